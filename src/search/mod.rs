//! Search Module
//!
//! Client for the upstream REST similarity-search service that backs the
//! `searchSimilarChunks` GraphQL field.

pub mod chunks;

pub use chunks::{ChunkSearchClient, SearchError, API_KEY_HEADER};
