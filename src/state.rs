//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It carries the startup configuration plus the two boundary services
//! built from it: the backend API client and the session signer.

use std::sync::Arc;

use crate::config::Config;
use crate::services::api::ApiClient;
use crate::services::session::SessionSigner;

/// Clone is required by Axum; inner fields are Arc-wrapped or cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub signer: SessionSigner,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(&config.api_url);
        let signer = SessionSigner::new(&config.session_secret);
        Self { config: Arc::new(config), api, signer }
    }
}
