//! Level data: placed-object records
//!
//! Records come from the remote API when it answers with a non-empty list,
//! otherwise from a local JSON file. A failing fallback yields an empty list;
//! the game then runs without scripted content.

use crate::config::ApiConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::service::{Service, ServiceHealth};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One placed object from level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, alias = "Role", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl BlockRecord {
    /// Coins and role-tagged records are collectibles; everything else is a building
    pub fn is_collectible(&self) -> bool {
        self.name.starts_with("coin") || matches!(self.role.as_deref(), Some("default" | "finalPrize"))
    }

    /// Declared level, defaulting to 1
    pub fn level(&self) -> u32 {
        self.level.unwrap_or(1)
    }

    pub fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Anything that can produce placed-object records
pub trait LevelDataSource {
    /// Name used in logs
    fn name(&self) -> &str;

    fn fetch_blocks(&self) -> ServiceResult<Vec<BlockRecord>>;
}

/// Records from the backend API
pub struct RemoteBlockSource {
    agent: ureq::Agent,
    url: String,
    config: ApiConfig,
}

impl RemoteBlockSource {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            agent: config.agent(),
            url: config.blocks_url(),
            config: config.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LevelDataSource for RemoteBlockSource {
    fn name(&self) -> &str {
        "remote blocks"
    }

    fn fetch_blocks(&self) -> ServiceResult<Vec<BlockRecord>> {
        let response = self.agent.get(&self.url).call()?;
        let body = response.into_string()?;
        let records: Vec<BlockRecord> = serde_json::from_str(&body)?;
        if records.is_empty() {
            return Err(ServiceError::Empty(self.url.clone()));
        }
        Ok(records)
    }
}

impl Service for RemoteBlockSource {
    fn name(&self) -> &str {
        LevelDataSource::name(self)
    }

    fn health(&self) -> ServiceHealth {
        crate::service::check_health(&self.config)
    }
}

/// Records from a JSON file on disk
pub struct LocalBlockSource {
    path: PathBuf,
}

impl LocalBlockSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LevelDataSource for LocalBlockSource {
    fn name(&self) -> &str {
        "local blocks"
    }

    fn fetch_blocks(&self) -> ServiceResult<Vec<BlockRecord>> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Primary source with a fallback
pub struct FallbackBlockSource {
    primary: Box<dyn LevelDataSource>,
    fallback: Box<dyn LevelDataSource>,
}

impl FallbackBlockSource {
    pub fn new(primary: Box<dyn LevelDataSource>, fallback: Box<dyn LevelDataSource>) -> Self {
        Self { primary, fallback }
    }

    /// Load records; never fails
    pub fn load(&self) -> Vec<BlockRecord> {
        match self.primary.fetch_blocks() {
            Ok(records) => {
                log::info!("Loaded {} block records from {}", records.len(), self.primary.name());
                return records;
            }
            Err(e) => log::warn!("{} unavailable ({}), using {}", self.primary.name(), e, self.fallback.name()),
        }

        match self.fallback.fetch_blocks() {
            Ok(records) => {
                log::info!("Loaded {} block records from {}", records.len(), self.fallback.name());
                records
            }
            Err(e) => {
                log::error!("No level data available: {}", e);
                Vec::new()
            }
        }
    }
}
