use super::*;
use crate::pager::Pager;

struct Row {
    name: String,
    email: String,
}

fn columns() -> Vec<Column<Row>> {
    vec![
        Column::text("name", "Name", |r: &Row| r.name.clone()),
        Column::text("email", "Email", |r: &Row| r.email.clone()),
        Column::rendered("name", "Badge", |r: &Row| r.name.clone(), |r: &Row| {
            format!("<span class=\"badge\">{}</span>", escape_html(&r.name))
        }),
    ]
}

fn rows() -> Vec<Row> {
    vec![
        Row { name: "Alice".into(), email: "alice@example.com".into() },
        Row { name: "Bob".into(), email: "bob@example.com".into() },
        Row { name: "Alicia".into(), email: "alicia@example.com".into() },
    ]
}

// =============================================================================
// escape_html
// =============================================================================

#[test]
fn escape_html_passes_plain_text() {
    assert_eq!(escape_html("plain text"), "plain text");
}

#[test]
fn escape_html_escapes_markup() {
    assert_eq!(escape_html("<b>&\"'</b>"), "&lt;b&gt;&amp;&quot;&#39;&lt;/b&gt;");
}

// =============================================================================
// filter_rows
// =============================================================================

#[test]
fn empty_filter_keeps_all_rows() {
    let cols = columns();
    let data = rows();
    assert_eq!(filter_rows(&cols, &data, "name", "").len(), 3);
    assert_eq!(filter_rows(&cols, &data, "name", "   ").len(), 3);
}

#[test]
fn filter_matches_case_insensitively() {
    let cols = columns();
    let data = rows();
    let hits = filter_rows(&cols, &data, "name", "ALI");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].name, "Alice");
    assert_eq!(hits[1].name, "Alicia");
}

#[test]
fn filter_only_touches_named_field() {
    let cols = columns();
    let data = rows();
    // "example" appears in every email but no name.
    assert!(filter_rows(&cols, &data, "name", "example").is_empty());
    assert_eq!(filter_rows(&cols, &data, "email", "example").len(), 3);
}

#[test]
fn unknown_filter_key_keeps_all_rows() {
    let cols = columns();
    let data = rows();
    assert_eq!(filter_rows(&cols, &data, "nonexistent", "alice").len(), 3);
}

// =============================================================================
// render_header / render_rows
// =============================================================================

#[test]
fn header_lists_labels_in_order() {
    let html = render_header(&columns());
    assert!(html.contains("<th>Name</th>"));
    assert!(html.contains("<th>Email</th>"));
    let name_at = html.find("Name").unwrap();
    let email_at = html.find("Email").unwrap();
    assert!(name_at < email_at);
}

#[test]
fn rows_render_cells_through_descriptors() {
    let cols = columns();
    let data = rows();
    let refs: Vec<&Row> = data.iter().collect();
    let html = render_rows(&cols, &refs);
    assert!(html.contains("<td>Alice</td>"));
    assert!(html.contains("<td>alice@example.com</td>"));
    assert!(html.contains("<span class=\"badge\">Alice</span>"));
}

#[test]
fn plain_cells_are_escaped() {
    let cols = vec![Column::text("name", "Name", |r: &Row| r.name.clone())];
    let data = vec![Row { name: "<script>".into(), email: String::new() }];
    let refs: Vec<&Row> = data.iter().collect();
    let html = render_rows(&cols, &refs);
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn empty_page_renders_no_results_row() {
    let cols = columns();
    let html = render_rows(&cols, &[]);
    assert!(html.contains("No results."));
    assert!(html.contains("colspan=\"3\""));
}

// =============================================================================
// render_controls
// =============================================================================

fn loaded_pager(page: u64, size: u64, total: u64) -> Pager {
    let mut pager = Pager::for_request(page, size);
    let req = pager.mount();
    // Pretend a full page came back.
    pager.complete(req.seq, usize::try_from(size).unwrap_or(10), total);
    pager
}

#[test]
fn first_page_disables_previous_only() {
    let html = render_controls(&loaded_pager(1, 10, 25));
    assert!(html.contains("<span class=\"button disabled\">Previous</span>"));
    assert!(html.contains("href=\"?page=2&size=10&q=\">Next</a>"));
    assert!(html.contains("Page 1 of 3"));
}

#[test]
fn last_page_disables_next_only() {
    let html = render_controls(&loaded_pager(3, 10, 25));
    assert!(html.contains("<span class=\"button disabled\">Next</span>"));
    assert!(html.contains("href=\"?page=2&size=10&q=\">Previous</a>"));
    assert!(html.contains("Page 3 of 3"));
}

#[test]
fn empty_set_disables_both_directions() {
    let mut pager = Pager::new();
    let req = pager.mount();
    pager.complete(req.seq, 0, 0);
    let html = render_controls(&pager);
    assert!(html.contains("disabled\">Previous"));
    assert!(html.contains("disabled\">Next"));
    assert!(html.contains("Page 1 of 0"));
}

#[test]
fn size_select_marks_current_size() {
    let html = render_controls(&loaded_pager(1, 30, 100));
    assert!(html.contains("<option value=\"30\" selected>30</option>"));
    assert!(html.contains("<option value=\"10\">10</option>"));
}

#[test]
fn controls_carry_filter_text() {
    let mut pager = loaded_pager(2, 10, 50);
    pager.set_filter("kopi susu");
    let html = render_controls(&pager);
    // Encoded in the prev/next hrefs, escaped in the hidden form input.
    assert!(html.contains("href=\"?page=1&size=10&q=kopi%20susu\""), "{html}");
    assert!(html.contains("href=\"?page=3&size=10&q=kopi%20susu\""), "{html}");
    assert!(html.contains("name=\"q\" value=\"kopi susu\""), "{html}");
}

// =============================================================================
// render_table / render_toolbar
// =============================================================================

#[test]
fn table_applies_page_local_filter() {
    let mut pager = loaded_pager(1, 10, 3);
    pager.set_filter("bob");
    let html = render_table("User", &columns(), &rows(), &pager, "name", Some("/user/add"));
    assert!(html.contains("<td>Bob</td>"));
    assert!(!html.contains("<td>Alice</td>"));
}

#[test]
fn table_filter_to_nothing_shows_empty_row() {
    let mut pager = loaded_pager(1, 10, 3);
    pager.set_filter("zzz");
    let html = render_table("User", &columns(), &rows(), &pager, "name", None);
    assert!(html.contains("No results."));
}

#[test]
fn toolbar_with_create_link() {
    let html = render_toolbar("User", "name", "", 10, Some("/user/add"));
    assert!(html.contains("href=\"/user/add\""));
    assert!(html.contains("+ Add User"));
    assert!(html.contains("Search by name"));
}

#[test]
fn toolbar_without_create_link() {
    let html = render_toolbar("Order", "id", "", 10, None);
    assert!(!html.contains("Add Order"));
    assert!(html.contains("Search by id"));
}

#[test]
fn toolbar_escapes_filter_value() {
    let html = render_toolbar("User", "name", "\"><script>", 10, None);
    assert!(!html.contains("\"><script>"));
    assert!(html.contains("&quot;&gt;&lt;script&gt;"));
}

#[test]
fn toolbar_filter_form_keeps_current_page_size() {
    let html = render_toolbar("User", "name", "alice", 30, None);
    assert!(html.contains("<input type=\"hidden\" name=\"size\" value=\"30\">"), "{html}");
}

#[test]
fn urlencode_passes_unreserved_characters() {
    assert_eq!(urlencode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
}

#[test]
fn urlencode_escapes_everything_else() {
    assert_eq!(urlencode("a b&c=d"), "a%20b%26c%3Dd");
    assert_eq!(urlencode("café"), "caf%C3%A9");
}
