//! GraphQL Schema
//!
//! One root query field, `searchSimilarChunks`, backed by the upstream
//! [`ChunkSearchClient`](crate::search::ChunkSearchClient).

pub mod query;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::search::ChunkSearchClient;

pub use query::QueryRoot;

pub type GatewaySchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema with the upstream client available to resolvers.
pub fn build_schema(client: ChunkSearchClient) -> GatewaySchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(client)
        .finish()
}
