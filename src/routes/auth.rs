//! Auth routes and session plumbing.
//!
//! ARCHITECTURE
//! ============
//! Authentication gating happens in two pieces: the `AuthUser` extractor
//! guards protected pages (no valid session cookie -> redirect to the login
//! screen), and the `refresh_session` layer re-seals a valid cookie on each
//! response so active admins stay logged in.

use axum::Form;
use axum::extract::{FromRef, Query, Request, State};
use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::services::api::ApiError;
use crate::services::session::{self, COOKIE_NAME, Session};
use crate::state::AppState;
use crate::views;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Verified session extracted from the cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub session: Session,
}

/// Rejection for unauthenticated requests: straight to the login screen.
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary("/login").into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(LoginRedirect);
        }

        let app_state = AppState::from_ref(state);
        let session = app_state.signer.open(token).ok_or(LoginRedirect)?;
        Ok(Self { session })
    }
}

// =============================================================================
// SESSION REFRESH LAYER
// =============================================================================

/// Extend a valid session by one day on every response that carries one.
/// Handlers that set or clear the cookie themselves (login, logout) win —
/// their `Set-Cookie` is left alone.
pub async fn refresh_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let token = CookieJar::from_headers(request.headers())
        .get(COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned());

    let mut response = next.run(request).await;

    let Some(token) = token else { return response };
    if response_sets_session(&response) {
        return response;
    }
    let Some((renewed, expires)) = state.signer.renew(&token) else {
        return response;
    };

    let cookie = session::session_cookie(renewed, expires, state.config.cookie_secure);
    if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

fn response_sets_session(response: &Response) -> bool {
    let prefix = format!("{COOKIE_NAME}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .any(|value| value.to_str().is_ok_and(|v| v.starts_with(&prefix)))
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// `GET /login` — login form. An already-authenticated visit goes straight
/// to the dashboard.
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let authenticated = jar
        .get(COOKIE_NAME)
        .map(Cookie::value)
        .and_then(|token| state.signer.open(token))
        .is_some();
    if authenticated {
        return Redirect::temporary("/dashboard").into_response();
    }
    Html(views::login_page(query.notice.as_deref())).into_response()
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// `POST /login` — exchange credentials with the backend, seal the session
/// cookie, land on the dashboard.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Html(views::login_page(Some("Email and password are required"))).into_response();
    }

    match state.api.login(email, &form.password).await {
        Ok(access_token) => {
            // Confirm the backend honors the token before sealing it into
            // a week-long cookie.
            if let Err(err) = state.api.profile(&access_token).await {
                tracing::error!(error = %err, "freshly issued token failed the profile check");
                return Html(views::login_page(Some("Invalid credentials"))).into_response();
            }
            let (token, expires) = state.signer.issue(&access_token);
            let cookie = session::session_cookie(token, expires, state.config.cookie_secure);
            tracing::info!("login succeeded");
            (jar.add(cookie), Redirect::to("/dashboard")).into_response()
        }
        Err(ApiError::Unauthorized) => Html(views::login_page(Some("Invalid credentials"))).into_response(),
        Err(ApiError::Backend { message, .. }) => Html(views::login_page(Some(&message))).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "login request failed");
            Html(views::login_page(Some("Could not reach the backend"))).into_response()
        }
    }
}

/// `POST /logout` — delete the session cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let cookie = session::removal_cookie(state.config.cookie_secure);
    (jar.add(cookie), Redirect::to("/login"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
