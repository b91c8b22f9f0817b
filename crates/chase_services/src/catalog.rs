//! Level catalog

use crate::config::ApiConfig;
use crate::error::ServiceResult;
use crate::service::{check_health, Service, ServiceHealth};
use serde::{Deserialize, Serialize};

/// Dynamic collectible target when the catalog cannot say
pub const DEFAULT_COINS_COUNT: u32 = 10;

/// A level as the backend describes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub coins_count: Option<u32>,
}

/// Read-only level metadata from `/levels`
pub struct LevelCatalog {
    config: ApiConfig,
    agent: ureq::Agent,
}

impl LevelCatalog {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            config: config.clone(),
            agent: config.agent(),
        }
    }

    fn get_json(&self, path: &str) -> ServiceResult<serde_json::Value> {
        let body = self.agent.get(&self.config.endpoint(path)).call()?.into_string()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// All levels; empty on failure
    pub fn list_levels(&self) -> Vec<LevelInfo> {
        match self.get_json("levels").and_then(|v| Ok(serde_json::from_value(v)?)) {
            Ok(levels) => levels,
            Err(e) => {
                log::warn!("Level list unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// One level; `None` on failure
    pub fn level(&self, id: u32) -> Option<LevelInfo> {
        match self.get_json(&format!("levels/{}", id)).and_then(|v| Ok(serde_json::from_value(v)?)) {
            Ok(level) => Some(level),
            Err(e) => {
                log::warn!("Level {} unavailable: {}", id, e);
                None
            }
        }
    }

    /// Dynamic collectibles needed for `id`; [`DEFAULT_COINS_COUNT`] on failure
    pub fn coins_count(&self, id: u32) -> u32 {
        match self.get_json(&format!("levels/{}/coins-count", id)) {
            Ok(value) => parse_count(&value).unwrap_or_else(|| {
                log::warn!("Unexpected coins-count for level {}: {}", id, value);
                DEFAULT_COINS_COUNT
            }),
            Err(e) => {
                log::warn!("Coins count for level {} unavailable: {}", id, e);
                DEFAULT_COINS_COUNT
            }
        }
    }
}

impl Service for LevelCatalog {
    fn name(&self) -> &str {
        "level catalog"
    }

    fn health(&self) -> ServiceHealth {
        check_health(&self.config)
    }
}

/// Accepts a bare number or an object carrying `count`/`coinsCount`
fn parse_count(value: &serde_json::Value) -> Option<u32> {
    let number = match value {
        serde_json::Value::Object(map) => map.get("coinsCount").or_else(|| map.get("count"))?,
        other => other,
    };
    number.as_u64().and_then(|n| u32::try_from(n).ok())
}
