use dotenvy::dotenv;
use std::env;

pub const DEFAULT_ENDPOINT: &str = "https://retail.googleapis.com";

/// Immutable process configuration, loaded once at startup and handed to the
/// router by dependency injection.
#[derive(Debug)]
pub struct Config {
    /// Full placement resource name the search is issued against, e.g.
    /// `projects/<p>/locations/global/catalogs/default_catalog/placements/default_search`.
    pub placement: String,
    pub endpoint: String,
    /// Static bearer token forwarded to the service; no refresh is performed.
    pub auth_token: Option<String>,
    pub bind_addr: String,
    /// When set, forwarded in place of the caller's `query` parameter.
    pub query_override: Option<String>,
    /// When set, forwarded in place of the caller's `visitorId` parameter.
    pub visitor_id_override: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present
        Ok(Config {
            placement: require_env("RETAIL_PLACEMENT")?,
            endpoint: env_or_default("RETAIL_ENDPOINT", DEFAULT_ENDPOINT),
            auth_token: optional_env("RETAIL_AUTH_TOKEN"),
            bind_addr: env_or_default("BIND_ADDR", "0.0.0.0:8080"),
            query_override: optional_env("QUERY_OVERRIDE"),
            visitor_id_override: optional_env("VISITOR_ID_OVERRIDE"),
        })
    }
}

fn require_env(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {key}"))
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
