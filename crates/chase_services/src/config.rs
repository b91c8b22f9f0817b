//! Backend endpoint configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the backend lives and how to talk to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:3000/api`
    pub base_url: String,
    /// Placed-object records; defaults to `<base_url>/blocks`
    pub blocks_url: Option<String>,
    /// Bearer token for score submission
    pub token: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            blocks_url: None,
            token: None,
            timeout_ms: 5000,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// `base_url` joined with `path`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn blocks_url(&self) -> String {
        self.blocks_url.clone().unwrap_or_else(|| self.endpoint("blocks"))
    }

    /// HTTP agent with the configured timeout
    pub fn agent(&self) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let config = ApiConfig::default();
        assert_eq!(config.endpoint("/scores"), "http://localhost:3000/api/scores");
        assert_eq!(config.blocks_url(), "http://localhost:3000/api/blocks");

        let config = ApiConfig::default().with_base_url("https://game.example/api/");
        assert_eq!(config.endpoint("levels/2"), "https://game.example/api/levels/2");
    }

    #[test]
    fn test_partial_toml_like_override() {
        let config: ApiConfig = serde_json::from_str(r#"{"token":"a.b.c"}"#).unwrap();
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.token.as_deref(), Some("a.b.c"));
    }
}
