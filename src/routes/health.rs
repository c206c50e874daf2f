use axum::{Router, routing::get};

pub const READY_MESSAGE: &str = "GraphQL API is running!";

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
}

/// Readiness probe. Never touches the upstream.
async fn index() -> &'static str {
    READY_MESSAGE
}
