//! Client configuration loaded from environment variables.

use std::env;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

/// Where the API lives and who we are.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Bearer token; required for mutations, optional for reads.
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Load from `QUILL_API_URL` and `QUILL_API_TOKEN`.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("QUILL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            token: env::var("QUILL_API_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}
