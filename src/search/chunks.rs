//! Upstream Chunk Search Client
//!
//! Thin wrapper over the REST similarity-search API:
//!
//! ```text
//! GET {base}/api/search?user_id=..&query=..&limit=..
//! X-API-KEY: <key>
//! ```
//!
//! The response envelope is `{ "results": [ {chunk_id, content_id, file_name,
//! text, similarity_score}, ... ] }`. Each result maps one-to-one into a
//! [`ChunkResult`], preserving upstream order. Missing or `null` fields stay
//! `None` and a `null` result stays `None`.

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::UpstreamConfig;
use crate::models::{ChunkResult, UpstreamSearchResponse};
use crate::types::{AppError, AppResult};

pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Errors that can occur while calling the upstream search API
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Upstream returned status {0}")]
    Status(StatusCode),

    #[error("Failed to decode search results: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client for the upstream similarity-search API
#[derive(Debug, Clone)]
pub struct ChunkSearchClient {
    http: Client,
    search_url: Url,
    api_key: Option<String>,
}

impl ChunkSearchClient {
    /// Create a client against `search_url` with a default HTTP client (no timeout).
    pub fn new(search_url: Url, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            search_url,
            api_key,
        }
    }

    /// Configure client from config
    pub fn from_config(config: &UpstreamConfig) -> AppResult<Self> {
        let search_url = Url::parse(&config.search_url())
            .map_err(|e| AppError::Config(format!("invalid UPSTREAM_URL: {}", e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            search_url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Fetch the chunks most similar to `query` for `user_id`.
    ///
    /// `limit` is forwarded as-is; the upstream decides how to treat it.
    pub async fn search(
        &self,
        user_id: &str,
        query: &str,
        limit: i32,
    ) -> Result<Vec<Option<ChunkResult>>, SearchError> {
        let limit = limit.to_string();
        let mut request = self.http.get(self.search_url.clone()).query(&[
            ("user_id", user_id),
            ("query", query),
            ("limit", limit.as_str()),
        ]);

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(SearchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        debug!(%status, "Upstream search response received");

        let body: UpstreamSearchResponse = response.json().await.map_err(SearchError::Decode)?;
        let results: Vec<Option<ChunkResult>> = body
            .results
            .into_iter()
            .map(|chunk| chunk.map(ChunkResult::from))
            .collect();

        info!(count = results.len(), "Upstream search completed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server, api_key: Option<&str>) -> ChunkSearchClient {
        let url = Url::parse(&format!("{}/api/search", server.url())).unwrap();
        ChunkSearchClient::new(url, api_key.map(String::from))
    }

    fn two_results() -> String {
        json!({
            "results": [
                {
                    "chunk_id": 11,
                    "content_id": 2,
                    "file_name": "genome.txt",
                    "text": "ATCG repeats",
                    "similarity_score": 0.87
                },
                {
                    "chunk_id": 12,
                    "content_id": 2,
                    "file_name": "genome.txt",
                    "text": "GC content",
                    "similarity_score": 0.42,
                    "page": 4
                }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_search_maps_every_result() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("user_id".into(), "user-1".into()),
                Matcher::UrlEncoded("query".into(), "dna repeats".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
            ]))
            .match_header("x-api-key", "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(two_results())
            .create_async()
            .await;

        let results = client_for(&server, Some("secret"))
            .search("user-1", "dna repeats", 2)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.chunk_id, Some(11));
        assert_eq!(first.file_name.as_deref(), Some("genome.txt"));
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.text.as_deref(), Some("GC content"));
        assert_eq!(second.similarity_score, Some(0.42));
    }

    #[tokio::test]
    async fn test_search_omits_header_without_api_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .match_header("x-api-key", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"results": []}"#)
            .create_async()
            .await;

        let results = client_for(&server, None).search("u", "q", 5).await.unwrap();

        mock.assert_async().await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_non_success_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let err = client_for(&server, None).search("u", "q", 5).await.unwrap_err();
        assert!(matches!(err, SearchError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_search_rejects_malformed_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = client_for(&server, None).search("u", "q", 5).await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_keeps_results_with_null_fields() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "results": [
                        {"chunk_id": 1, "content_id": 1, "file_name": "a.txt", "text": "a", "similarity_score": 0.9},
                        {"chunk_id": 2, "content_id": 1, "file_name": null, "text": "b"}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let results = client_for(&server, None).search("u", "q", 5).await.unwrap();

        assert_eq!(results.len(), 2);
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.chunk_id, Some(2));
        assert_eq!(second.file_name, None);
        assert_eq!(second.similarity_score, None);
    }

    #[tokio::test]
    async fn test_search_unreachable_upstream() {
        // Port 1 is reserved and nothing listens there.
        let url = Url::parse("http://127.0.0.1:1/api/search").unwrap();
        let client = ChunkSearchClient::new(url, None);

        let err = client.search("u", "q", 5).await.unwrap_err();
        assert!(matches!(err, SearchError::Request(_)));
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let config = UpstreamConfig {
            base_url: "not a url".to_string(),
            api_key: None,
            timeout_secs: None,
        };
        assert!(matches!(
            ChunkSearchClient::from_config(&config),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_builds_search_url() {
        let config = UpstreamConfig {
            base_url: "http://search.internal:8080/".to_string(),
            api_key: Some("k".to_string()),
            timeout_secs: Some(10),
        };
        let client = ChunkSearchClient::from_config(&config).unwrap();
        assert_eq!(client.search_url().as_str(), "http://search.internal:8080/api/search");
    }
}
