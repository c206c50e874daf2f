use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    routing::get,
    extract::State,
    response::{Html, IntoResponse},
};
use crate::models::AppState;
use tracing::debug;

pub const GRAPHQL_PATH: &str = "/graphql";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .with_state(state)
}

/// POST /graphql - Execute a GraphQL request
async fn graphql_handler(
    State(state): State<AppState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner();
    debug!(operation = ?request.operation_name, "Executing GraphQL request");

    state.schema.execute(request).await.into()
}

/// GET /graphql - Interactive GraphiQL explorer
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
