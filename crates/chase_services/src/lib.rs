//! # Chase Services
//!
//! Thin clients for everything the game talks to over the network:
//! - Level data (placed-object records), remote with a local-file fallback
//! - Level catalog (names, dynamic collectible counts)
//! - Score service (save, ranking, personal scores)
//! - Health checks
//!
//! Every call is best-effort. Data sources return `Result` so the caller can
//! fall back; the catalog and score clients swallow failures, log them and
//! return defaults, so the game never waits on the backend.
//!
//! ## Usage
//!
//! ```ignore
//! let api = ApiConfig::default();
//! let blocks = FallbackBlockSource::new(
//!     Box::new(RemoteBlockSource::new(&api)),
//!     Box::new(LocalBlockSource::new("data/blocks.json")),
//! )
//! .load();
//!
//! let scores = HttpScoreService::new(&api);
//! scores.save_score(&payload);
//! ```

pub mod blocks;
pub mod catalog;
pub mod config;
pub mod error;
pub mod scores;
pub mod service;

pub mod prelude {
    pub use crate::blocks::{BlockRecord, FallbackBlockSource, LevelDataSource, LocalBlockSource, RemoteBlockSource};
    pub use crate::catalog::{LevelCatalog, LevelInfo, DEFAULT_COINS_COUNT};
    pub use crate::config::ApiConfig;
    pub use crate::error::{ServiceError, ServiceResult};
    pub use crate::scores::{is_jwt_shaped, HttpScoreService, NullScoreService, ScoreEntry, ScoreService};
    pub use crate::service::{check_health, Service, ServiceHealth, ServiceState};
}

pub use prelude::*;
