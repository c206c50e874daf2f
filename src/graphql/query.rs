use async_graphql::{Context, Object};
use tracing::{error, info};

use crate::models::ChunkResult;
use crate::search::ChunkSearchClient;

pub const DEFAULT_LIMIT: i32 = 5;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Chunks most similar to `query` among the documents of `user_id`.
    ///
    /// Upstream failures are logged and yield an empty list. An explicit
    /// `limit: null` searches with the default limit.
    async fn search_similar_chunks(
        &self,
        ctx: &Context<'_>,
        user_id: String,
        query: String,
        #[graphql(default_with = "Some(DEFAULT_LIMIT)")] limit: Option<i32>,
    ) -> Option<Vec<Option<ChunkResult>>> {
        // The list itself is always present, even when empty.
        Some(self.fetch(ctx, user_id, query, limit).await)
    }
}

impl QueryRoot {
    async fn fetch(
        &self,
        ctx: &Context<'_>,
        user_id: String,
        query: String,
        limit: Option<i32>,
    ) -> Vec<Option<ChunkResult>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        info!(user_id = %user_id, query = %query, limit, "Received search request");

        let client = match ctx.data::<ChunkSearchClient>() {
            Ok(client) => client,
            Err(e) => {
                error!("Search client missing from schema data: {:?}", e.message);
                return Vec::new();
            }
        };

        match client.search(&user_id, &query, limit).await {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, "Error fetching data from upstream search API");
                Vec::new()
            }
        }
    }
}
