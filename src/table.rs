//! Generic data table: column descriptors and HTML rendering.
//!
//! Each listing screen supplies its own `Vec<Column<T>>`; the table itself
//! only knows how to turn rows into markup, apply the page-local filter,
//! and draw the pagination controls from a [`Pager`].

use crate::pager::{PAGE_SIZES, Pager};

type CellFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// One column of a listing.
pub struct Column<T> {
    /// Field key the free-text filter matches against.
    pub key: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Plain-text value, used for filtering and as the default cell.
    value: CellFn<T>,
    /// Custom cell markup; `None` renders the escaped plain value.
    render: Option<CellFn<T>>,
}

impl<T> Column<T> {
    /// Plain text column.
    #[must_use]
    pub fn text(
        key: &'static str,
        label: &'static str,
        value: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self { key, label, value: Box::new(value), render: None }
    }

    /// Column with a custom cell renderer. `value` still feeds the filter.
    #[must_use]
    pub fn rendered(
        key: &'static str,
        label: &'static str,
        value: impl Fn(&T) -> String + Send + Sync + 'static,
        render: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self { key, label, value: Box::new(value), render: Some(Box::new(render)) }
    }

    fn cell_html(&self, row: &T) -> String {
        match &self.render {
            Some(render) => render(row),
            None => escape_html(&(self.value)(row)),
        }
    }
}

/// Case-insensitive contains-match on the column named `filter_key`,
/// applied to the currently loaded page only. An empty needle or an
/// unknown key keeps every row.
#[must_use]
pub fn filter_rows<'a, T>(columns: &[Column<T>], rows: &'a [T], filter_key: &str, needle: &str) -> Vec<&'a T> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    let Some(column) = columns.iter().find(|c| c.key == filter_key) else {
        return rows.iter().collect();
    };
    rows.iter()
        .filter(|row| (column.value)(row).to_lowercase().contains(&needle))
        .collect()
}

/// `<thead>` markup.
#[must_use]
pub fn render_header<T>(columns: &[Column<T>]) -> String {
    let cells: String = columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape_html(c.label)))
        .collect();
    format!("<thead><tr>{cells}</tr></thead>")
}

/// `<tbody>` markup; the literal empty-state row when there is nothing to
/// show.
#[must_use]
pub fn render_rows<T>(columns: &[Column<T>], rows: &[&T]) -> String {
    if rows.is_empty() {
        return format!(
            "<tbody><tr><td colspan=\"{}\" class=\"empty\">No results.</td></tr></tbody>",
            columns.len()
        );
    }

    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = columns
                .iter()
                .map(|c| format!("<td>{}</td>", c.cell_html(row)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!("<tbody>{body}</tbody>")
}

/// Toolbar above the table: optional create link plus the filter box.
/// The filter form carries the current page size so filtering does not
/// reset a chosen rows-per-page.
#[must_use]
pub fn render_toolbar(name: &str, filter_key: &str, filter: &str, size: u64, create_path: Option<&str>) -> String {
    let create = create_path.map_or(String::new(), |path| {
        format!("<a class=\"button\" href=\"{}\">+ Add {}</a>", escape_html(path), escape_html(name))
    });
    format!(
        concat!(
            "<div class=\"toolbar\">{create}",
            "<form method=\"get\" class=\"filter\">",
            "<input type=\"text\" name=\"q\" value=\"{value}\" placeholder=\"Search by {key}\">",
            "<input type=\"hidden\" name=\"size\" value=\"{size}\">",
            "</form></div>"
        ),
        create = create,
        value = escape_html(filter),
        key = escape_html(filter_key),
        size = size,
    )
}

/// Pagination strip: rows-per-page select, `Page X of Y`, Previous/Next.
/// Disabled directions render as plain spans instead of links.
#[must_use]
pub fn render_controls(pager: &Pager) -> String {
    let q = urlencode(pager.filter());
    let q_attr = escape_html(pager.filter());
    let size = pager.size();

    let options: String = PAGE_SIZES
        .iter()
        .map(|s| {
            let selected = if *s == size { " selected" } else { "" };
            format!("<option value=\"{s}\"{selected}>{s}</option>")
        })
        .collect();

    let prev = if pager.has_prev() {
        format!("<a class=\"button\" href=\"?page={}&size={size}&q={q}\">Previous</a>", pager.page() - 1)
    } else {
        "<span class=\"button disabled\">Previous</span>".to_owned()
    };
    let next = if pager.has_next() {
        format!("<a class=\"button\" href=\"?page={}&size={size}&q={q}\">Next</a>", pager.page() + 1)
    } else {
        "<span class=\"button disabled\">Next</span>".to_owned()
    };

    format!(
        concat!(
            "<div class=\"pagination\">",
            "<form method=\"get\" class=\"page-size\">",
            "<label>Rows per page <select name=\"size\">{options}</select></label>",
            "<input type=\"hidden\" name=\"q\" value=\"{q_attr}\">",
            "<button type=\"submit\">Apply</button>",
            "</form>",
            "<span class=\"page-label\">Page {page} of {pages}</span>",
            "{prev}{next}",
            "</div>"
        ),
        options = options,
        q_attr = q_attr,
        page = pager.page(),
        pages = pager.total_pages(),
        prev = prev,
        next = next,
    )
}

/// Full listing widget: toolbar, table, pagination.
#[must_use]
pub fn render_table<T>(
    name: &str,
    columns: &[Column<T>],
    rows: &[T],
    pager: &Pager,
    filter_key: &str,
    create_path: Option<&str>,
) -> String {
    let visible = filter_rows(columns, rows, filter_key, pager.filter());
    format!(
        "{}<table>{}{}</table>{}",
        render_toolbar(name, filter_key, pager.filter(), pager.size(), create_path),
        render_header(columns),
        render_rows(columns, &visible),
        render_controls(pager),
    )
}

/// Percent-encode a query-string value.
#[must_use]
pub fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => {
                let _ = std::fmt::Write::write_fmt(&mut out, format_args!("%{byte:02X}"));
            }
        }
    }
    out
}

/// Minimal HTML escaping for text interpolated into markup.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
