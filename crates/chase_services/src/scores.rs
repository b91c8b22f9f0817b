//! Score service
//!
//! Saving needs a bearer token shaped like a JWT. Without one the save is
//! skipped locally. Nothing here returns an error: failures are logged and
//! surface as `None` or an empty list.

use crate::config::ApiConfig;
use crate::error::ServiceResult;
use crate::service::{check_health, Service, ServiceHealth};
use chase_gamestate::ScorePayload;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A stored score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub total_points: u32,
    #[serde(default)]
    pub game_time: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Score persistence
pub trait ScoreService {
    /// Save a finished run; `None` when skipped or failed
    fn save_score(&self, payload: &ScorePayload) -> Option<ScoreEntry>;

    /// Top `limit` scores
    fn ranking(&self, limit: u32) -> Vec<ScoreEntry>;

    /// The current player's scores
    fn my_scores(&self) -> Vec<ScoreEntry>;

    /// The current player's best score
    fn best_score(&self) -> Option<ScoreEntry>;
}

/// Three non-empty dot-separated segments
pub fn is_jwt_shaped(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() == 3 && parts.iter().all(|p| !p.is_empty())
}

/// Score service over HTTP
pub struct HttpScoreService {
    config: ApiConfig,
    agent: ureq::Agent,
}

impl HttpScoreService {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            config: config.clone(),
            agent: config.agent(),
        }
    }

    fn token(&self) -> Option<&str> {
        self.config.token.as_deref().filter(|t| is_jwt_shaped(t))
    }

    fn get<T: DeserializeOwned>(&self, path: &str, authorized: bool) -> ServiceResult<T> {
        let mut request = self.agent.get(&self.config.endpoint(path));
        if authorized {
            if let Some(token) = self.token() {
                request = request.set("Authorization", &format!("Bearer {}", token));
            }
        }
        let body = request.call()?.into_string()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn post_score(&self, token: &str, payload: &ScorePayload) -> ServiceResult<ScoreEntry> {
        let body = serde_json::to_value(payload)?;
        let response = self
            .agent
            .post(&self.config.endpoint("scores"))
            .set("Authorization", &format!("Bearer {}", token))
            .send_json(body)?;
        Ok(serde_json::from_str(&response.into_string()?)?)
    }
}

impl ScoreService for HttpScoreService {
    fn save_score(&self, payload: &ScorePayload) -> Option<ScoreEntry> {
        let Some(token) = self.token() else {
            log::warn!("No valid session token; score not saved");
            return None;
        };
        match self.post_score(token, payload) {
            Ok(entry) => {
                log::info!("Score saved: {} points", payload.total_points);
                Some(entry)
            }
            Err(e) => {
                log::warn!("Score save failed: {}", e);
                None
            }
        }
    }

    fn ranking(&self, limit: u32) -> Vec<ScoreEntry> {
        self.get(&format!("scores?limit={}", limit), false).unwrap_or_else(|e| {
            log::warn!("Ranking unavailable: {}", e);
            Vec::new()
        })
    }

    fn my_scores(&self) -> Vec<ScoreEntry> {
        if self.token().is_none() {
            return Vec::new();
        }
        self.get("scores/me", true).unwrap_or_else(|e| {
            log::warn!("Personal scores unavailable: {}", e);
            Vec::new()
        })
    }

    fn best_score(&self) -> Option<ScoreEntry> {
        self.token()?;
        self.get("scores/best", true)
            .map_err(|e| log::warn!("Best score unavailable: {}", e))
            .ok()
    }
}

impl Service for HttpScoreService {
    fn name(&self) -> &str {
        "scores"
    }

    fn health(&self) -> ServiceHealth {
        check_health(&self.config)
    }
}

/// Offline stand-in; records nothing
#[derive(Debug, Default)]
pub struct NullScoreService;

impl ScoreService for NullScoreService {
    fn save_score(&self, payload: &ScorePayload) -> Option<ScoreEntry> {
        log::debug!("Offline; dropping score of {} points", payload.total_points);
        None
    }

    fn ranking(&self, _limit: u32) -> Vec<ScoreEntry> {
        Vec::new()
    }

    fn my_scores(&self) -> Vec<ScoreEntry> {
        Vec::new()
    }

    fn best_score(&self) -> Option<ScoreEntry> {
        None
    }
}

impl Service for NullScoreService {
    fn name(&self) -> &str {
        "scores (offline)"
    }

    fn health(&self) -> ServiceHealth {
        ServiceHealth::offline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chase_gamestate::LevelPoints;

    fn payload() -> ScorePayload {
        ScorePayload {
            total_points: 30,
            points_by_level: LevelPoints {
                level1: 10,
                level2: 10,
                level3: 10,
            },
            game_time: Some(120),
        }
    }

    #[test]
    fn test_jwt_shape() {
        assert!(is_jwt_shaped("aaa.bbb.ccc"));
        assert!(!is_jwt_shaped("aaa.bbb"));
        assert!(!is_jwt_shaped("aaa..ccc"));
        assert!(!is_jwt_shaped(""));
    }

    #[test]
    fn test_save_without_token_skips_network() {
        let config = ApiConfig::default().with_base_url("http://127.0.0.1:9/api").with_token("not-a-jwt");
        let service = HttpScoreService::new(&config);
        assert!(service.token().is_none());
        assert!(service.save_score(&payload()).is_none());
        assert!(service.my_scores().is_empty());
        assert!(service.best_score().is_none());
    }

    #[test]
    fn test_unreachable_backend_is_absorbed() {
        let config = ApiConfig::default()
            .with_base_url("http://127.0.0.1:9/api")
            .with_token("a.b.c")
            .with_timeout_ms(500);
        let service = HttpScoreService::new(&config);
        assert!(service.save_score(&payload()).is_none());
        assert!(service.ranking(10).is_empty());
    }

    #[test]
    fn test_null_service() {
        let service = NullScoreService;
        assert!(service.save_score(&payload()).is_none());
        assert_eq!(service.health().state, crate::ServiceState::Offline);
    }

    #[test]
    fn test_score_entry_tolerates_sparse_rows() {
        let entry: ScoreEntry = serde_json::from_str(r#"{"totalPoints": 12}"#).unwrap();
        assert_eq!(entry.total_points, 12);
        assert!(entry.username.is_none());
    }
}
