// Chunk Search Gateway - GraphQL front for a REST similarity-search service

pub mod config;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
