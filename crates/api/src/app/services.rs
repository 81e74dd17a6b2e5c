//! Service wiring shared by every handler.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;

use tierpass_auth::TokenCodec;
use tierpass_infra::{InMemoryUserStore, JsonFileUserStore, StoreError, UserStore};

use crate::app::errors::{json_error, store_error_to_response};
use crate::config::ApiConfig;

pub struct AppServices {
    pub codec: Arc<TokenCodec>,
    pub users: Arc<dyn UserStore>,
    pub stripe_configured: bool,
}

impl AppServices {
    pub fn new(codec: TokenCodec, users: Arc<dyn UserStore>, stripe_configured: bool) -> Self {
        Self {
            codec: Arc::new(codec),
            users,
            stripe_configured,
        }
    }

    /// Run `f` against the user store on the blocking pool.
    ///
    /// Store calls may do file IO under a lock and callers hash passwords
    /// inside `f`, so none of it runs on a runtime worker. Errors come back
    /// as ready-made responses.
    pub async fn with_users<T, F>(&self, f: F) -> Result<T, Response>
    where
        F: FnOnce(&dyn UserStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let users = self.users.clone();
        match tokio::task::spawn_blocking(move || f(&*users)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(store_error_to_response(e)),
            Err(e) => {
                tracing::error!(error = %e, "user store task failed");
                Err(json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error",
                ))
            }
        }
    }
}

pub fn build_services(config: &ApiConfig) -> AppServices {
    let codec = TokenCodec::new(config.vigenere_key.clone(), config.column_key.clone());

    let users: Arc<dyn UserStore> = match &config.users_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using JSON file user store");
            Arc::new(JsonFileUserStore::new(path.clone()))
        }
        None => Arc::new(InMemoryUserStore::new()),
    };

    AppServices::new(codec, users, config.stripe_secret_key.is_some())
}
