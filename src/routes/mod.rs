//! Router assembly and shared listing plumbing.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every screen is a plain HTML page: the entity modules build their column
//! sets and bodies, this module wires them under one Axum router with the
//! session-refresh layer and request tracing.

pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

use std::future::Future;

use axum::Router;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::pager::{DEFAULT_PAGE_SIZE, Pager};
use crate::services::api::{ApiError, Page};
use crate::state::AppState;
use crate::table::urlencode;
use crate::views;

use auth::AuthUser;

const STYLESHEET: &str = include_str!("../../assets/admin.css");

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard))
        .route("/user", get(users::list_page))
        .route("/user/add", get(users::add_page).post(users::add))
        .route("/user/{id}/promote", post(users::promote))
        .route("/product", get(products::list_page))
        .route("/product/add", get(products::add_page).post(products::add))
        .route("/product/{id}/edit", get(products::edit_page).post(products::edit))
        .route("/product/{id}/delete", post(products::delete))
        .route("/category", get(categories::list_page))
        .route("/category/add", get(categories::add_page).post(categories::add))
        .route("/category/{id}/delete", post(categories::delete))
        .route("/order", get(orders::list_page))
        .route("/order/add", get(orders::add_page).post(orders::add))
        .route("/order/{id}", get(orders::detail))
        .route("/order/{id}/status", post(orders::update_status))
        .route("/assets/admin.css", get(stylesheet))
        .route("/healthz", get(healthz))
        .layer(axum::middleware::from_fn_with_state(state.clone(), auth::refresh_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::temporary("/dashboard")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

/// `GET /dashboard` — one record count per entity.
async fn dashboard(
    axum::extract::State(state): axum::extract::State<AppState>,
    auth: AuthUser,
) -> Response {
    let token = &auth.session.access_token;

    let mut counts = Vec::with_capacity(4);
    let mut notice = None;
    let lookups: [(&str, _); 4] = [
        ("Users", state.api.list_users(token, 0, 1).await.map(|p| p.total_record_count)),
        ("Products", state.api.list_products(token, 0, 1).await.map(|p| p.total_record_count)),
        ("Categories", state.api.list_categories(token, 0, 1).await.map(|p| p.total_record_count)),
        ("Orders", state.api.list_orders(token, 0, 1).await.map(|p| p.total_record_count)),
    ];
    for (label, result) in lookups {
        match result {
            Ok(count) => counts.push((label, count)),
            Err(ApiError::Unauthorized) => return Redirect::temporary("/login").into_response(),
            Err(err) => {
                tracing::error!(error = %err, entity = label, "dashboard count fetch failed");
                notice = Some("Failed to load some data from the backend");
                counts.push((label, 0));
            }
        }
    }

    let body = views::dashboard_cards(&counts);
    Html(views::layout("Dashboard", "/dashboard", notice, &body)).into_response()
}

// =============================================================================
// SHARED LISTING PLUMBING
// =============================================================================

/// Query parameters every listing screen understands.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub q: Option<String>,
    pub notice: Option<String>,
}

impl ListQuery {
    /// Position a pager from the request parameters.
    pub(crate) fn pager(&self) -> Pager {
        let mut pager = Pager::for_request(self.page.unwrap_or(1), self.size.unwrap_or(DEFAULT_PAGE_SIZE));
        if let Some(q) = &self.q {
            pager.set_filter(q);
        }
        pager
    }
}

/// Drive one pager fetch cycle against the backend. When the requested page
/// overshoots the dataset the pager clamps back to the last real page and a
/// single follow-up fetch retrieves it.
pub(crate) async fn fetch_listing<T, F, Fut>(pager: &mut Pager, fetch: F) -> Result<Vec<T>, ApiError>
where
    F: Fn(u64, u64) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    let req = pager.mount();
    let page = fetch(req.offset(), req.size).await?;
    pager.complete(req.seq, page.rows.len(), page.total_record_count);

    if page.rows.is_empty() && page.total_record_count > 0 && pager.page() < req.number {
        let req = pager.reload();
        let page = fetch(req.offset(), req.size).await?;
        pager.complete(req.seq, page.rows.len(), page.total_record_count);
        return Ok(page.rows);
    }
    Ok(page.rows)
}

/// Shared failure handling for listing pages.
pub(crate) fn listing_error(title: &str, active: &str, err: &ApiError) -> Response {
    match err {
        ApiError::Unauthorized => Redirect::temporary("/login").into_response(),
        _ => {
            tracing::error!(error = %err, page = title, "listing fetch failed");
            Html(views::layout(title, active, Some("Failed to load data from the backend"), "")).into_response()
        }
    }
}

/// Redirect back to a listing with a transient notice banner.
pub(crate) fn notice_redirect(path: &str, notice: &str) -> Redirect {
    Redirect::to(&format!("{path}?notice={}", urlencode(notice)))
}

/// Standard outcome handling for mutation actions: success and backend
/// failure both land back on the listing with a notice; a rejected token
/// goes to the login screen.
pub(crate) fn action_response(path: &str, result: Result<(), ApiError>, ok_notice: &str, err_notice: &str) -> Response {
    match result {
        Ok(()) => notice_redirect(path, ok_notice).into_response(),
        Err(ApiError::Unauthorized) => Redirect::temporary("/login").into_response(),
        Err(err) => {
            tracing::error!(error = %err, "action failed");
            notice_redirect(path, err_notice).into_response()
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
