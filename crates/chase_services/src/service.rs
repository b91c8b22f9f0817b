//! Service trait and health reporting

use crate::config::ApiConfig;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Reachability of a backend service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    /// Answering normally
    Running,
    /// Answering, but not successfully
    Degraded,
    /// Unreachable
    Failed,
    /// Disabled by configuration
    Offline,
}

impl ServiceState {
    /// Check if service is operational (Running or Degraded)
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Running | Self::Degraded)
    }
}

/// Service health status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub state: ServiceState,
    /// Health score (0.0 = dead, 1.0 = perfect)
    pub health_score: f32,
    pub last_error: Option<String>,
    /// Round trip of the health probe
    pub latency_ms: Option<u64>,
}

impl ServiceHealth {
    pub fn healthy(latency_ms: u64) -> Self {
        Self {
            state: ServiceState::Running,
            health_score: 1.0,
            last_error: None,
            latency_ms: Some(latency_ms),
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            state: ServiceState::Degraded,
            health_score: 0.5,
            last_error: Some(reason.into()),
            latency_ms: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            state: ServiceState::Failed,
            health_score: 0.0,
            last_error: Some(error.into()),
            latency_ms: None,
        }
    }

    pub fn offline() -> Self {
        Self {
            state: ServiceState::Offline,
            health_score: 0.0,
            last_error: None,
            latency_ms: None,
        }
    }
}

/// A backend client
pub trait Service {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Probe the backend
    fn health(&self) -> ServiceHealth;
}

/// `GET /health` against the configured API
pub fn check_health(config: &ApiConfig) -> ServiceHealth {
    let url = config.endpoint("health");
    let started = Instant::now();
    match config.agent().get(&url).call() {
        Ok(_) => ServiceHealth::healthy(started.elapsed().as_millis() as u64),
        Err(ureq::Error::Status(code, _)) => ServiceHealth::degraded(format!("{} returned status {}", url, code)),
        Err(ureq::Error::Transport(transport)) => ServiceHealth::failed(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_constructors() {
        assert!(ServiceHealth::healthy(3).state.is_operational());
        assert!(ServiceHealth::degraded("slow").state.is_operational());
        assert!(!ServiceHealth::failed("down").state.is_operational());
        assert!(!ServiceHealth::offline().state.is_operational());
    }

    #[test]
    fn test_unreachable_backend_fails() {
        let config = ApiConfig::default()
            .with_base_url("http://127.0.0.1:9/api")
            .with_timeout_ms(500);
        let health = check_health(&config);
        assert_eq!(health.state, ServiceState::Failed);
        assert!(health.last_error.is_some());
    }
}
