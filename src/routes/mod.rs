pub mod forms;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/publish-form", post(forms::publish))
        .route("/api/forms", get(forms::list))
        .route("/api/forms/{id}", get(forms::get))
        .route("/api/forms/{id}/submissions", post(forms::submit))
}
