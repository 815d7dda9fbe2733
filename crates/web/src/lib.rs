use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod state;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(features::extract::handlers::extract),
    components(schemas(
        extraction::ExtractionRequest,
        extraction::ExtractionResult,
        error::ErrorResponse,
    )),
    tags(
        (name = "extraction", description = "Email reply extraction"),
    )
)]
pub struct ApiDoc;

/// Build the application router with CORS and API docs mounted
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(features::extract::routes::routes())
        .layer(cors)
        .with_state(state)
}
