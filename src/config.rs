use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Host the upstream search API has always been served from.
pub const DEFAULT_UPSTREAM_URL: &str = "http://34.207.126.237";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    /// Full URL of the upstream search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/api/search", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: parse_origins(
                    &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
            },
            upstream: UpstreamConfig {
                base_url: env::var("UPSTREAM_URL")
                    .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
                api_key: env::var("API_KEY").ok(),
                timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .map(|s| s.parse::<u64>())
                    .transpose()?,
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "*")
        .map(String::from)
        .collect()
}
