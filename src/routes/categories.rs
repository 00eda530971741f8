//! Category listing with create and delete.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::services::api::Category;
use crate::state::AppState;
use crate::table::{self, Column};
use crate::views;

use super::{AuthUser, ListQuery, action_response, fetch_listing, listing_error};

fn columns() -> Vec<Column<Category>> {
    vec![
        Column::text("name", "Name", |c: &Category| c.name.clone()),
        Column::rendered(
            "actions",
            "Actions",
            |_| String::new(),
            |c: &Category| {
                format!(
                    concat!(
                        "<form method=\"post\" action=\"/category/{}/delete\">",
                        "<button type=\"submit\">Delete</button></form>"
                    ),
                    table::escape_html(&c.id)
                )
            },
        ),
    ]
}

/// `GET /category`
pub async fn list_page(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Response {
    let mut pager = query.pager();
    let api = &state.api;
    let token = &auth.session.access_token;

    let rows = match fetch_listing(&mut pager, |offset, limit| api.list_categories(token, offset, limit)).await {
        Ok(rows) => rows,
        Err(err) => return listing_error("Categories", "/category", &err),
    };

    let body = table::render_table("Category", &columns(), &rows, &pager, "name", Some("/category/add"));
    Html(views::layout("Categories", "/category", query.notice.as_deref(), &body)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
}

fn form_page(form: &CategoryForm, error: Option<&'static str>) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/category/add\">{}<button type=\"submit\">Save</button></form>",
        views::field(
            "Name",
            &format!("<input type=\"text\" name=\"name\" value=\"{}\">", table::escape_html(&form.name)),
            error,
        ),
    );
    views::layout("Add Category", "/category", None, &body)
}

/// `GET /category/add`
pub async fn add_page(_auth: AuthUser) -> Html<String> {
    Html(form_page(&CategoryForm::default(), None))
}

/// `POST /category/add`
pub async fn add(State(state): State<AppState>, auth: AuthUser, Form(form): Form<CategoryForm>) -> Response {
    if form.name.trim().len() < 2 {
        return Html(form_page(&form, Some("Name must be at least 2 characters"))).into_response();
    }

    let result = state.api.create_category(&auth.session.access_token, form.name.trim()).await;
    action_response("/category", result, "Category Created", "Failed to create category")
}

/// `POST /category/{id}/delete`
pub async fn delete(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> Response {
    let result = state.api.delete_category(&auth.session.access_token, &id).await;
    action_response("/category", result, "Category Deleted", "Failed to delete category")
}
