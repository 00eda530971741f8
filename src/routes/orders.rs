//! Order listing, detail view, creation, and status transitions.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::services::api::{ApiError, NewOrder, NewOrderLine, Order, OrderStatus};
use crate::state::AppState;
use crate::table::{self, Column};
use crate::views::{self, format_rupiah};

use super::{AuthUser, ListQuery, action_response, fetch_listing, listing_error, notice_redirect};

fn status_badge(status: &str) -> String {
    let variant = match OrderStatus::parse(status) {
        Some(OrderStatus::Processing) => "processing",
        Some(OrderStatus::Shipped) => "shipped",
        Some(OrderStatus::Delivered) => "delivered",
        None => "unknown",
    };
    format!("<span class=\"badge {variant}\">{}</span>", table::escape_html(status))
}

fn status_form(order: &Order) -> String {
    let options: String = [OrderStatus::Processing, OrderStatus::Shipped, OrderStatus::Delivered]
        .iter()
        .map(|s| {
            let selected = if s.as_str() == order.status { " selected" } else { "" };
            format!("<option value=\"{}\"{selected}>{}</option>", s.as_str(), s.as_str())
        })
        .collect();
    format!(
        concat!(
            "<form method=\"post\" action=\"/order/{}/status\">",
            "<select name=\"status\">{}</select>",
            "<button type=\"submit\">Update</button></form>"
        ),
        table::escape_html(&order.id),
        options,
    )
}

fn columns() -> Vec<Column<Order>> {
    vec![
        Column::text("id", "Order", |o: &Order| o.id.clone()),
        Column::text("user", "Customer", |o: &Order| o.user.name.clone()),
        Column::text("total", "Total", |o: &Order| format_rupiah(o.total_price)),
        Column::rendered(
            "status",
            "Status",
            |o: &Order| o.status.clone(),
            |o: &Order| status_badge(&o.status),
        ),
        Column::rendered(
            "actions",
            "Actions",
            |_| String::new(),
            |o: &Order| {
                format!(
                    "<a class=\"button\" href=\"/order/{}\">View</a>{}",
                    table::escape_html(&o.id),
                    status_form(o),
                )
            },
        ),
    ]
}

/// `GET /order`
pub async fn list_page(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Response {
    let mut pager = query.pager();
    let api = &state.api;
    let token = &auth.session.access_token;

    let rows = match fetch_listing(&mut pager, |offset, limit| api.list_orders(token, offset, limit)).await {
        Ok(rows) => rows,
        Err(err) => return listing_error("Orders", "/order", &err),
    };

    let body = table::render_table("Order", &columns(), &rows, &pager, "user", Some("/order/add"));
    Html(views::layout("Orders", "/order", query.notice.as_deref(), &body)).into_response()
}

/// `GET /order/{id}` — line items and the running total.
pub async fn detail(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> Response {
    let order = match state.api.get_order(&auth.session.access_token, &id).await {
        Ok(order) => order,
        Err(ApiError::Unauthorized) => return Redirect::temporary("/login").into_response(),
        Err(_) => return notice_redirect("/order", "Order not found").into_response(),
    };

    let lines: String = order
        .products
        .iter()
        .map(|line| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                table::escape_html(&line.product.name),
                format_rupiah(line.product.price),
                line.quantity,
                format_rupiah(line.product.price * line.quantity),
            )
        })
        .collect();

    let body = format!(
        concat!(
            "<p>Customer: {customer}</p><p>Status: {status}</p>",
            "<table><thead><tr><th>Product</th><th>Price</th><th>Qty</th><th>Subtotal</th></tr></thead>",
            "<tbody>{lines}</tbody></table>",
            "<p class=\"total\">Total: {total}</p>",
            "<a class=\"button\" href=\"/order\">Back</a>"
        ),
        customer = table::escape_html(&order.user.name),
        status = status_badge(&order.status),
        lines = lines,
        total = format_rupiah(order.total_price),
    );
    let title = format!("Order {id}");
    Html(views::layout(&title, "/order", None, &body)).into_response()
}

// =============================================================================
// CREATE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Default)]
struct OrderFormErrors {
    user_id: Option<&'static str>,
    product_id: Option<&'static str>,
    quantity: Option<&'static str>,
}

impl OrderFormErrors {
    fn any(&self) -> bool {
        self.user_id.is_some() || self.product_id.is_some() || self.quantity.is_some()
    }
}

fn validate(form: &OrderForm) -> OrderFormErrors {
    let mut errors = OrderFormErrors::default();
    if form.user_id.trim().is_empty() {
        errors.user_id = Some("Customer id is required");
    }
    if form.product_id.trim().is_empty() {
        errors.product_id = Some("Product id is required");
    }
    match form.quantity.trim().parse::<i64>() {
        Ok(quantity) if quantity >= 1 => {}
        _ => errors.quantity = Some("Quantity must be at least 1"),
    }
    errors
}

fn form_page(form: &OrderForm, errors: &OrderFormErrors) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/order/add\">{}{}{}<button type=\"submit\">Save</button></form>",
        views::field(
            "Customer id",
            &format!("<input type=\"text\" name=\"user_id\" value=\"{}\">", table::escape_html(&form.user_id)),
            errors.user_id,
        ),
        views::field(
            "Product id",
            &format!("<input type=\"text\" name=\"product_id\" value=\"{}\">", table::escape_html(&form.product_id)),
            errors.product_id,
        ),
        views::field(
            "Quantity",
            &format!("<input type=\"number\" name=\"quantity\" value=\"{}\">", table::escape_html(&form.quantity)),
            errors.quantity,
        ),
    );
    views::layout("Add Order", "/order", None, &body)
}

/// `GET /order/add`
pub async fn add_page(_auth: AuthUser) -> Html<String> {
    Html(form_page(&OrderForm::default(), &OrderFormErrors::default()))
}

/// `POST /order/add`
pub async fn add(State(state): State<AppState>, auth: AuthUser, Form(form): Form<OrderForm>) -> Response {
    let errors = validate(&form);
    if errors.any() {
        return Html(form_page(&form, &errors)).into_response();
    }

    let order = NewOrder {
        user_id: form.user_id.trim().to_owned(),
        products: vec![NewOrderLine {
            product_id: form.product_id.trim().to_owned(),
            quantity: form.quantity.trim().parse().unwrap_or(1),
        }],
    };
    let result = state.api.create_order(&auth.session.access_token, &order).await;
    action_response("/order", result, "Order Created", "Failed to create order")
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// `POST /order/{id}/status`
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let Some(status) = OrderStatus::parse(&form.status) else {
        return notice_redirect("/order", "Unknown order status").into_response();
    };

    let result = state.api.update_order_status(&auth.session.access_token, &id, status).await;
    let ok = format!("Order updated to {}", status.as_str());
    action_response("/order", result, &ok, "Failed to update order")
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;
