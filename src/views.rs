//! HTML shell: layout, sidebar, login screen, form pages.
//!
//! Server-rendered markup only — no client framework. Each page handler
//! builds its body and wraps it with [`layout`].

use crate::table::escape_html;

/// Sidebar entries: label, href.
const NAV: [(&str, &str); 5] = [
    ("Dashboard", "/dashboard"),
    ("User", "/user"),
    ("Product List", "/product"),
    ("Category", "/category"),
    ("Order", "/order"),
];

/// Wrap a page body in the admin shell: sidebar, header, optional
/// transient notice banner.
#[must_use]
pub fn layout(title: &str, active: &str, notice: Option<&str>, body: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(label, href)| {
            let class = if *href == active { " class=\"active\"" } else { "" };
            format!("<li{class}><a href=\"{href}\">{label}</a></li>")
        })
        .collect();

    let banner = notice.map_or(String::new(), |text| {
        format!("<div class=\"notice\">{}</div>", escape_html(text))
    });

    format!(
        concat!(
            "<!doctype html><html><head><meta charset=\"utf-8\">",
            "<title>{title} - Arpa Admin Panel</title>",
            "<link rel=\"stylesheet\" href=\"/assets/admin.css\">",
            "</head><body>",
            "<aside class=\"sidebar\"><div class=\"brand\">Arpa Admin</div><ul>{nav}</ul>",
            "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>",
            "</aside>",
            "<main>{banner}<section class=\"card\"><h1>{title}</h1>{body}</section></main>",
            "</body></html>"
        ),
        title = escape_html(title),
        nav = nav,
        banner = banner,
        body = body,
    )
}

/// Standalone login screen (no sidebar).
#[must_use]
pub fn login_page(notice: Option<&str>) -> String {
    let banner = notice.map_or(String::new(), |text| {
        format!("<div class=\"notice error\">{}</div>", escape_html(text))
    });
    format!(
        concat!(
            "<!doctype html><html><head><meta charset=\"utf-8\">",
            "<title>Login Arpa Admin Panel</title>",
            "<link rel=\"stylesheet\" href=\"/assets/admin.css\">",
            "</head><body class=\"login\">",
            "<section class=\"card\"><h1>Login Arpa Admin Panel</h1>",
            "<p>Enter your email below to login to your account</p>{banner}",
            "<form method=\"post\" action=\"/login\">",
            "<label>Email <input type=\"email\" name=\"email\" placeholder=\"admin@gmail.com\" required></label>",
            "<label>Password <input type=\"password\" name=\"password\" required></label>",
            "<button type=\"submit\">Login</button>",
            "</form></section></body></html>"
        ),
        banner = banner,
    )
}

/// A labelled form field with an optional inline validation error.
#[must_use]
pub fn field(label: &str, input: &str, error: Option<&str>) -> String {
    let error = error.map_or(String::new(), |text| {
        format!("<p class=\"field-error\">{}</p>", escape_html(text))
    });
    format!("<label>{}{input}{error}</label>", escape_html(label))
}

/// Dashboard cards: one record count per entity.
#[must_use]
pub fn dashboard_cards(counts: &[(&str, u64)]) -> String {
    let cards: String = counts
        .iter()
        .map(|(label, count)| {
            format!(
                "<div class=\"stat\"><span class=\"stat-value\">{count}</span><span class=\"stat-label\">{}</span></div>",
                escape_html(label)
            )
        })
        .collect();
    format!("<div class=\"stats\">{cards}</div>")
}

/// Format a price as rupiah: `Rp 1.500.000`, dot thousands separators.
#[must_use]
pub fn format_rupiah(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if negative {
        format!("Rp -{grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
