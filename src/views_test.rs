use super::*;

// =============================================================================
// layout
// =============================================================================

#[test]
fn layout_marks_active_nav_entry() {
    let html = layout("User", "/user", None, "<p>body</p>");
    assert!(html.contains("<li class=\"active\"><a href=\"/user\">User</a></li>"));
    assert!(html.contains("<li><a href=\"/dashboard\">Dashboard</a></li>"));
}

#[test]
fn layout_includes_body_and_title() {
    let html = layout("Product", "/product", None, "<table></table>");
    assert!(html.contains("<h1>Product</h1>"));
    assert!(html.contains("<table></table>"));
    assert!(html.contains("<title>Product - Arpa Admin Panel</title>"));
}

#[test]
fn layout_renders_notice_banner_when_present() {
    let html = layout("User", "/user", Some("User Promoted to Admin"), "");
    assert!(html.contains("<div class=\"notice\">User Promoted to Admin</div>"));
}

#[test]
fn layout_omits_banner_without_notice() {
    let html = layout("User", "/user", None, "");
    assert!(!html.contains("class=\"notice\""));
}

#[test]
fn layout_escapes_notice_text() {
    let html = layout("User", "/user", Some("<img onerror=x>"), "");
    assert!(!html.contains("<img onerror=x>"));
    assert!(html.contains("&lt;img onerror=x&gt;"));
}

#[test]
fn layout_has_logout_form() {
    let html = layout("User", "/user", None, "");
    assert!(html.contains("action=\"/logout\""));
}

// =============================================================================
// login_page
// =============================================================================

#[test]
fn login_page_posts_to_login() {
    let html = login_page(None);
    assert!(html.contains("action=\"/login\""));
    assert!(html.contains("name=\"email\""));
    assert!(html.contains("name=\"password\""));
}

#[test]
fn login_page_shows_error_notice() {
    let html = login_page(Some("Invalid credentials"));
    assert!(html.contains("Invalid credentials"));
    assert!(html.contains("notice error"));
}

// =============================================================================
// field
// =============================================================================

#[test]
fn field_renders_inline_error() {
    let html = field("Name", "<input name=\"name\">", Some("Name is required"));
    assert!(html.contains("<p class=\"field-error\">Name is required</p>"));
}

#[test]
fn field_without_error_has_no_error_markup() {
    let html = field("Name", "<input name=\"name\">", None);
    assert!(!html.contains("field-error"));
}

// =============================================================================
// dashboard_cards
// =============================================================================

#[test]
fn dashboard_cards_show_counts() {
    let html = dashboard_cards(&[("Users", 12), ("Products", 0)]);
    assert!(html.contains("<span class=\"stat-value\">12</span>"));
    assert!(html.contains("<span class=\"stat-label\">Users</span>"));
    assert!(html.contains("<span class=\"stat-value\">0</span>"));
}

// =============================================================================
// format_rupiah
// =============================================================================

#[test]
fn rupiah_groups_thousands_with_dots() {
    assert_eq!(format_rupiah(1_500_000), "Rp 1.500.000");
    assert_eq!(format_rupiah(150_000), "Rp 150.000");
}

#[test]
fn rupiah_small_amounts_ungrouped() {
    assert_eq!(format_rupiah(0), "Rp 0");
    assert_eq!(format_rupiah(999), "Rp 999");
}

#[test]
fn rupiah_exact_group_boundary() {
    assert_eq!(format_rupiah(1_000), "Rp 1.000");
    assert_eq!(format_rupiah(1_000_000), "Rp 1.000.000");
}

#[test]
fn rupiah_negative_amount() {
    assert_eq!(format_rupiah(-2_500), "Rp -2.500");
}
