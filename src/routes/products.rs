//! Product listing and create/edit/delete flows.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::services::api::{ApiError, Category, NewProduct, Product};
use crate::state::AppState;
use crate::table::{self, Column};
use crate::views::{self, format_rupiah};

use super::{AuthUser, ListQuery, action_response, fetch_listing, listing_error};

/// Product images are served by the backend under `/uploads/`.
fn image_url(api_url: &str, image: &str) -> String {
    format!("{api_url}/uploads/{image}")
}

fn columns(api_url: &str) -> Vec<Column<Product>> {
    let base = api_url.to_owned();
    vec![
        Column::rendered(
            "image",
            "Image",
            |_| String::new(),
            move |p: &Product| {
                format!(
                    "<img src=\"{}\" alt=\"{}\" width=\"48\">",
                    table::escape_html(&image_url(&base, &p.image)),
                    table::escape_html(&p.name),
                )
            },
        ),
        Column::text("name", "Name", |p: &Product| p.name.clone()),
        Column::text("price", "Price", |p: &Product| format_rupiah(p.price)),
        Column::text("stock", "Stock", |p: &Product| p.stock.to_string()),
        Column::rendered(
            "categories",
            "Categories",
            |p: &Product| {
                p.categories.iter().map(|c| c.category.name.as_str()).collect::<Vec<_>>().join(" ")
            },
            |p: &Product| {
                p.categories
                    .iter()
                    .map(|c| format!("<span class=\"badge\">{}</span>", table::escape_html(&c.category.name)))
                    .collect()
            },
        ),
        Column::rendered(
            "actions",
            "Actions",
            |_| String::new(),
            |p: &Product| {
                let id = table::escape_html(&p.id);
                format!(
                    concat!(
                        "<a class=\"button\" href=\"/product/{id}/edit\">Edit</a>",
                        "<form method=\"post\" action=\"/product/{id}/delete\">",
                        "<button type=\"submit\">Delete</button></form>"
                    ),
                    id = id,
                )
            },
        ),
    ]
}

/// `GET /product`
pub async fn list_page(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Response {
    let mut pager = query.pager();
    let api = &state.api;
    let token = &auth.session.access_token;

    let rows = match fetch_listing(&mut pager, |offset, limit| api.list_products(token, offset, limit)).await {
        Ok(rows) => rows,
        Err(err) => return listing_error("Products", "/product", &err),
    };

    let cols = columns(&state.config.api_url);
    let body = table::render_table("Product", &cols, &rows, &pager, "name", Some("/product/add"));
    Html(views::layout("Products", "/product", query.notice.as_deref(), &body)).into_response()
}

// =============================================================================
// CREATE / EDIT FORMS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
    /// Comma-separated category ids from the multi-select.
    #[serde(default)]
    pub categories: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Default)]
struct ProductFormErrors {
    name: Option<&'static str>,
    description: Option<&'static str>,
    price: Option<&'static str>,
    stock: Option<&'static str>,
    categories: Option<&'static str>,
}

impl ProductFormErrors {
    fn any(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.price.is_some()
            || self.stock.is_some()
            || self.categories.is_some()
    }
}

fn category_ids(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}

fn validate(form: &ProductForm) -> ProductFormErrors {
    let mut errors = ProductFormErrors::default();
    if form.name.trim().len() < 2 {
        errors.name = Some("Name must be at least 2 characters");
    }
    if form.description.trim().len() < 2 {
        errors.description = Some("Description must be at least 2 characters");
    }
    match form.price.trim().parse::<i64>() {
        Ok(price) if price > 0 => {}
        _ => errors.price = Some("Price must be a positive number"),
    }
    match form.stock.trim().parse::<i64>() {
        Ok(stock) if stock > 0 => {}
        _ => errors.stock = Some("Stock must be a positive number"),
    }
    if category_ids(&form.categories).is_empty() {
        errors.categories = Some("Pick at least one category");
    }
    errors
}

fn to_new_product(form: &ProductForm) -> NewProduct {
    NewProduct {
        name: form.name.trim().to_owned(),
        description: form.description.trim().to_owned(),
        price: form.price.trim().parse().unwrap_or_default(),
        stock: form.stock.trim().parse().unwrap_or_default(),
        categories: category_ids(&form.categories),
        image: form.image.trim().to_owned(),
    }
}

fn form_page(
    title: &str,
    action: &str,
    form: &ProductForm,
    errors: &ProductFormErrors,
    categories: &[Category],
) -> String {
    let selected = category_ids(&form.categories);
    let options: String = categories
        .iter()
        .map(|c| {
            let mark = if selected.iter().any(|id| id == &c.id) { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{mark}>{}</option>",
                table::escape_html(&c.id),
                table::escape_html(&c.name),
            )
        })
        .collect();

    let body = format!(
        concat!(
            "<form method=\"post\" action=\"{action}\">{name}{description}{price}{stock}",
            "{categories}{image}<button type=\"submit\">Save</button></form>"
        ),
        action = table::escape_html(action),
        name = views::field(
            "Name",
            &format!("<input type=\"text\" name=\"name\" value=\"{}\">", table::escape_html(&form.name)),
            errors.name,
        ),
        description = views::field(
            "Description",
            &format!(
                "<textarea name=\"description\">{}</textarea>",
                table::escape_html(&form.description)
            ),
            errors.description,
        ),
        price = views::field(
            "Price",
            &format!("<input type=\"number\" name=\"price\" value=\"{}\">", table::escape_html(&form.price)),
            errors.price,
        ),
        stock = views::field(
            "Stock",
            &format!("<input type=\"number\" name=\"stock\" value=\"{}\">", table::escape_html(&form.stock)),
            errors.stock,
        ),
        categories = views::field(
            "Categories (comma-separated ids)",
            &format!(
                concat!(
                    "<input type=\"text\" name=\"categories\" value=\"{}\" list=\"category-options\">",
                    "<datalist id=\"category-options\">{}</datalist>"
                ),
                table::escape_html(&form.categories),
                options,
            ),
            errors.categories,
        ),
        image = views::field(
            "Image filename",
            &format!("<input type=\"text\" name=\"image\" value=\"{}\">", table::escape_html(&form.image)),
            None,
        ),
    );
    views::layout(title, "/product", None, &body)
}

async fn all_categories(state: &AppState, token: &str) -> Result<Vec<Category>, ApiError> {
    // One page is plenty for a select box; the panel has a short list.
    state.api.list_categories(token, 0, 50).await.map(|page| page.rows)
}

/// `GET /product/add`
pub async fn add_page(State(state): State<AppState>, auth: AuthUser) -> Response {
    let categories = match all_categories(&state, &auth.session.access_token).await {
        Ok(categories) => categories,
        Err(err) => return listing_error("Add Product", "/product", &err),
    };
    Html(form_page("Add Product", "/product/add", &ProductForm::default(), &ProductFormErrors::default(), &categories))
        .into_response()
}

/// `POST /product/add`
pub async fn add(State(state): State<AppState>, auth: AuthUser, Form(form): Form<ProductForm>) -> Response {
    let token = &auth.session.access_token;
    let errors = validate(&form);
    if errors.any() {
        let categories = all_categories(&state, token).await.unwrap_or_default();
        return Html(form_page("Add Product", "/product/add", &form, &errors, &categories)).into_response();
    }

    let result = state.api.create_product(token, &to_new_product(&form)).await;
    action_response("/product", result, "Product Created", "Failed to create product")
}

/// `GET /product/{id}/edit`
pub async fn edit_page(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> Response {
    let token = &auth.session.access_token;
    let product = match state.api.get_product(token, &id).await {
        Ok(product) => product,
        Err(ApiError::Unauthorized) => return Redirect::temporary("/login").into_response(),
        Err(_) => return super::notice_redirect("/product", "Product not found").into_response(),
    };
    let categories = all_categories(&state, token).await.unwrap_or_default();

    let ids: Vec<&str> = product
        .categories
        .iter()
        .filter_map(|pc| {
            categories.iter().find(|c| c.name == pc.category.name).map(|c| c.id.as_str())
        })
        .collect();
    let form = ProductForm {
        name: product.name,
        description: product.description,
        price: product.price.to_string(),
        stock: product.stock.to_string(),
        categories: ids.join(","),
        image: product.image,
    };
    let action = format!("/product/{id}/edit");
    Html(form_page("Edit Product", &action, &form, &ProductFormErrors::default(), &categories)).into_response()
}

/// `POST /product/{id}/edit`
pub async fn edit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    let token = &auth.session.access_token;
    let errors = validate(&form);
    if errors.any() {
        let categories = all_categories(&state, token).await.unwrap_or_default();
        let action = format!("/product/{id}/edit");
        return Html(form_page("Edit Product", &action, &form, &errors, &categories)).into_response();
    }

    let result = state.api.update_product(token, &id, &to_new_product(&form)).await;
    action_response("/product", result, "Product Updated", "Failed to update product")
}

/// `POST /product/{id}/delete`
pub async fn delete(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> Response {
    let result = state.api.delete_product(&auth.session.access_token, &id).await;
    action_response("/product", result, "Product Deleted", "Failed to delete product")
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
