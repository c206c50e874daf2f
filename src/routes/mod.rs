//! HTTP Routes
//!
//! - `/` - Readiness check (plain text)
//! - `/graphql` - GraphQL execution (POST) and the GraphiQL explorer (GET)

pub mod graphql;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;
use crate::middleware::apply_cors;
use crate::models::AppState;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(graphql::router(state))
        .merge(health::router())
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &origins)
}
