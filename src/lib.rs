pub mod config;
pub mod error;
pub mod forms;
pub mod ids;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::store::{FormStore, FsFormStore};

pub fn build_app(config: Config) -> Router {
    let store = Arc::new(FsFormStore::new(&config.storage_root));
    build_app_with_store(config, store)
}

/// Same as [`build_app`] with a caller-provided store.
pub fn build_app_with_store(config: Config, store: Arc<dyn FormStore>) -> Router {
    let state: SharedState = Arc::new(AppState { store });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
