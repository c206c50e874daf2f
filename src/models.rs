use async_graphql::SimpleObject;
use serde::Deserialize;

use crate::config::Config;
use crate::graphql::GatewaySchema;
use crate::search::ChunkSearchClient;
use crate::types::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub schema: GatewaySchema,
}

impl AppState {
    /// Build the upstream client and the schema around it.
    pub fn new(config: Config) -> AppResult<Self> {
        let client = ChunkSearchClient::from_config(&config.upstream)?;
        let schema = crate::graphql::build_schema(client);
        Ok(Self { config, schema })
    }
}

/// A stored text chunk and how closely it matched the search query.
// Fields stay nullable: the upstream may omit or null any of them.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct ChunkResult {
    pub chunk_id: Option<i64>,
    pub content_id: Option<i64>,
    pub file_name: Option<String>,
    pub text: Option<String>,
    pub similarity_score: Option<f64>,
}

// Upstream wire format

/// Envelope returned by `GET /api/search`. A missing `results` key reads as empty.
#[derive(Debug, Deserialize)]
pub struct UpstreamSearchResponse {
    #[serde(default)]
    pub results: Vec<Option<UpstreamChunk>>,
}

/// Missing keys and `null` values both read as `None`.
#[derive(Debug, Deserialize)]
pub struct UpstreamChunk {
    #[serde(default)]
    pub chunk_id: Option<i64>,
    #[serde(default)]
    pub content_id: Option<i64>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub similarity_score: Option<f64>,
}

impl From<UpstreamChunk> for ChunkResult {
    fn from(chunk: UpstreamChunk) -> Self {
        Self {
            chunk_id: chunk.chunk_id,
            content_id: chunk.content_id,
            file_name: chunk.file_name,
            text: chunk.text,
            similarity_score: chunk.similarity_score,
        }
    }
}
