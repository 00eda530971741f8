use super::*;
use crate::services::api::{CategoryName, OrderLine, OrderLineProduct};
use crate::table::filter_rows;

fn order(id: &str, customer: &str, status: &str, total: i64) -> Order {
    Order {
        id: id.into(),
        user: CategoryName { name: customer.into() },
        total_price: total,
        status: status.into(),
        products: vec![OrderLine {
            quantity: 2,
            product: OrderLineProduct { name: "Shoe".into(), price: total / 2, image: "shoe.png".into() },
        }],
    }
}

#[test]
fn status_badge_maps_known_and_unknown_variants() {
    assert!(status_badge("PROCESSING").contains("badge processing"));
    assert!(status_badge("SHIPPED").contains("badge shipped"));
    assert!(status_badge("DELIVERED").contains("badge delivered"));
    assert!(status_badge("WEIRD").contains("badge unknown"));
}

#[test]
fn status_form_preselects_the_current_status() {
    let html = status_form(&order("o1", "Alice", "SHIPPED", 100));
    assert!(html.contains("<option value=\"SHIPPED\" selected>"), "{html}");
    assert!(html.contains("action=\"/order/o1/status\""));
}

#[test]
fn listing_filters_on_customer_name() {
    let cols = columns();
    let rows = vec![order("o1", "Alice", "PROCESSING", 100), order("o2", "Bob", "PROCESSING", 100)];
    let hits = filter_rows(&cols, &rows, "user", "bob");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "o2");
}

#[test]
fn total_column_uses_rupiah_formatting() {
    let cols = columns();
    let html = table::render_rows(&cols, &[&order("o1", "Alice", "PROCESSING", 1_500_000)]);
    assert!(html.contains("Rp 1.500.000"), "{html}");
}

#[test]
fn validation_requires_ids_and_a_positive_quantity() {
    let form = OrderForm { user_id: " ".into(), product_id: String::new(), quantity: "0".into() };
    let errors = validate(&form);
    assert!(errors.user_id.is_some());
    assert!(errors.product_id.is_some());
    assert!(errors.quantity.is_some());

    let ok = OrderForm { user_id: "u1".into(), product_id: "p1".into(), quantity: "3".into() };
    assert!(!validate(&ok).any());
}
