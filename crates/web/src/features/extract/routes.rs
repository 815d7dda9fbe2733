use axum::{Router, routing::post};

use super::handlers::extract;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/extract", post(extract))
}
