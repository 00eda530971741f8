//! User listing, signup form, and role promotion.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::services::api::{NewUser, User};
use crate::state::AppState;
use crate::table::{self, Column};
use crate::views;

use super::{AuthUser, ListQuery, action_response, fetch_listing, listing_error};

fn columns() -> Vec<Column<User>> {
    vec![
        Column::text("name", "Name", |u: &User| u.name.clone()),
        Column::text("email", "Email", |u: &User| u.email.clone()),
        Column::text("role", "Role", |u: &User| u.role.clone()),
        Column::rendered(
            "actions",
            "Actions",
            |_| String::new(),
            |u: &User| {
                if u.role == "USER" {
                    format!(
                        concat!(
                            "<form method=\"post\" action=\"/user/{}/promote\">",
                            "<button type=\"submit\">Promote</button></form>"
                        ),
                        table::escape_html(&u.id)
                    )
                } else {
                    String::new()
                }
            },
        ),
    ]
}

/// `GET /user`
pub async fn list_page(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Response {
    let mut pager = query.pager();
    let api = &state.api;
    let token = &auth.session.access_token;

    let rows = match fetch_listing(&mut pager, |offset, limit| api.list_users(token, offset, limit)).await {
        Ok(rows) => rows,
        Err(err) => return listing_error("Users", "/user", &err),
    };

    let body = table::render_table("User", &columns(), &rows, &pager, "name", Some("/user/add"));
    Html(views::layout("Users", "/user", query.notice.as_deref(), &body)).into_response()
}

// =============================================================================
// SIGNUP FORM
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default)]
struct UserFormErrors {
    name: Option<&'static str>,
    email: Option<&'static str>,
    password: Option<&'static str>,
}

impl UserFormErrors {
    fn any(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.password.is_some()
    }
}

fn validate(form: &UserForm) -> UserFormErrors {
    let mut errors = UserFormErrors::default();
    if form.name.trim().is_empty() {
        errors.name = Some("Name is required");
    }
    if !form.email.contains('@') {
        errors.email = Some("Enter a valid email address");
    }
    if form.password.len() < 6 {
        errors.password = Some("Password must be at least 6 characters");
    }
    errors
}

fn form_page(form: &UserForm, errors: &UserFormErrors) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/user/add\">{}{}{}<button type=\"submit\">Save</button></form>",
        views::field(
            "Name",
            &format!(
                "<input type=\"text\" name=\"name\" value=\"{}\">",
                table::escape_html(&form.name)
            ),
            errors.name,
        ),
        views::field(
            "Email",
            &format!(
                "<input type=\"email\" name=\"email\" value=\"{}\">",
                table::escape_html(&form.email)
            ),
            errors.email,
        ),
        views::field("Password", "<input type=\"password\" name=\"password\">", errors.password),
    );
    views::layout("Add User", "/user", None, &body)
}

/// `GET /user/add`
pub async fn add_page(_auth: AuthUser) -> Html<String> {
    Html(form_page(&UserForm::default(), &UserFormErrors::default()))
}

/// `POST /user/add`
pub async fn add(State(state): State<AppState>, auth: AuthUser, Form(form): Form<UserForm>) -> Response {
    let errors = validate(&form);
    if errors.any() {
        return Html(form_page(&form, &errors)).into_response();
    }

    let user = NewUser {
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        password: form.password,
    };
    let result = state.api.signup(&auth.session.access_token, &user).await;
    action_response("/user", result, "User Created", "Failed to create user")
}

/// `POST /user/{id}/promote`
pub async fn promote(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> Response {
    if id.trim().is_empty() {
        return Redirect::temporary("/user").into_response();
    }
    let result = state.api.promote_user(&auth.session.access_token, &id).await;
    action_response("/user", result, "User Promoted to Admin", "Failed to promote user")
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
