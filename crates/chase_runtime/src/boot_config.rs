//! Boot Configuration
//!
//! # Configuration Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. Config file: `--config <path>`, else `CHASE_CONFIG`, else `cheese-chase.toml` if present
//! 3. Environment: `CHASE_API_URL`, `CHASE_API_TOKEN`, `CHASE_SEED`, `CHASE_BLOCKS_FILE`, `CHASE_TICKS`
//! 4. Command line: `--seed`, `--ticks`, `--offline`, `--api-url`, `--blocks`, `--config`
//!
//! # Example Config File
//!
//! ```toml
//! seed = 42
//! ticks = 36000
//! offline = false
//! blocks_file = "data/blocks.json"
//!
//! [api]
//! base_url = "http://localhost:3000/api"
//! timeout_ms = 3000
//!
//! [world.portal]
//! distance = 15.0
//! ```

use chase_services::ApiConfig;
use chase_world::WorldConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cheese-chase.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Complete boot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Session seed; overrides `world.seed` when set
    pub seed: Option<u64>,
    /// Ticks to run before giving up
    pub ticks: u64,
    /// Skip every network call
    pub offline: bool,
    /// Level data used when the remote source fails
    pub blocks_file: PathBuf,
    /// Automatic restarts after a game over
    pub restarts: u32,
    pub api: ApiConfig,
    pub world: WorldConfig,
    /// Config file this was loaded from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ticks: 60 * 60 * 10,
            offline: false,
            blocks_file: PathBuf::from("data/blocks.json"),
            restarts: 1,
            api: ApiConfig::default(),
            world: WorldConfig::default(),
            config_path: None,
        }
    }
}

impl BootConfig {
    /// Load from the process environment and arguments
    pub fn load() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::load_from(&args, |key| std::env::var(key).ok())
    }

    /// Load from explicit arguments and an environment lookup
    pub fn load_from(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let explicit = flag_value(args, "--config")
            .map(PathBuf::from)
            .or_else(|| env("CHASE_CONFIG").filter(|p| !p.is_empty()).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => Self::default(),
        };

        config.apply_env(env);
        config.apply_args(args);
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded boot config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = env("CHASE_API_URL").filter(|v| !v.is_empty()) {
            log::info!("API URL from env: {}", url);
            self.api.base_url = url;
        }
        if let Some(token) = env("CHASE_API_TOKEN").filter(|v| !v.is_empty()) {
            log::info!("API token from env");
            self.api.token = Some(token);
        }
        if let Some(seed) = env("CHASE_SEED") {
            match seed.parse() {
                Ok(seed) => {
                    self.seed = Some(seed);
                    log::info!("Seed from env: {}", seed);
                }
                Err(_) => log::warn!("Ignoring CHASE_SEED={:?}", seed),
            }
        }
        if let Some(path) = env("CHASE_BLOCKS_FILE").filter(|v| !v.is_empty()) {
            self.blocks_file = PathBuf::from(path);
            log::info!("Blocks file from env: {}", self.blocks_file.display());
        }
        if let Some(ticks) = env("CHASE_TICKS") {
            match ticks.parse() {
                Ok(ticks) => {
                    self.ticks = ticks;
                    log::info!("Ticks from env: {}", self.ticks);
                }
                Err(_) => log::warn!("Ignoring CHASE_TICKS={:?}", ticks),
            }
        }
    }

    fn apply_args(&mut self, args: &[String]) {
        if let Some(seed) = flag_value(args, "--seed") {
            match seed.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring --seed {:?}", seed),
            }
        }
        if let Some(ticks) = flag_value(args, "--ticks") {
            match ticks.parse() {
                Ok(ticks) => self.ticks = ticks,
                Err(_) => log::warn!("Ignoring --ticks {:?}", ticks),
            }
        }
        if let Some(url) = flag_value(args, "--api-url") {
            self.api.base_url = url.to_string();
        }
        if let Some(path) = flag_value(args, "--blocks") {
            self.blocks_file = PathBuf::from(path);
        }
        if args.iter().any(|a| a == "--offline") {
            self.offline = true;
        }
    }

    /// World configuration with the session seed applied, if one was given
    pub fn world_config(&self) -> WorldConfig {
        match self.seed {
            Some(seed) => self.world.clone().with_seed(seed),
            None => self.world.clone(),
        }
    }

    pub fn print_summary(&self) {
        log::info!("Boot Configuration:");
        log::info!("  Seed: {}, ticks: {}", self.world_config().seed, self.ticks);
        if self.offline {
            log::info!("  Backend: offline");
        } else {
            log::info!("  Backend: {}", self.api.base_url);
        }
        log::info!("  Blocks file: {}", self.blocks_file.display());
        log::info!("  Levels: {}", self.world.levels.len());
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path.display());
        }
    }
}

/// Value following `flag`, as `--flag value` or `--flag=value`
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            return iter.next().map(String::as_str);
        }
        if let Some(value) = arg.strip_prefix(flag).and_then(|rest| rest.strip_prefix('=')) {
            return Some(value);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = BootConfig::default();
        assert_eq!(config.seed, None);
        assert!(!config.offline);
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.world.levels.len(), 3);
    }

    #[test]
    fn test_flag_value_forms() {
        let a = args(&["--seed", "5", "--ticks=10"]);
        assert_eq!(flag_value(&a, "--seed"), Some("5"));
        assert_eq!(flag_value(&a, "--ticks"), Some("10"));
        assert_eq!(flag_value(&a, "--blocks"), None);
        assert_eq!(flag_value(&args(&["--seed"]), "--seed"), None);
    }

    #[test]
    fn test_layers_override_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 1\nticks = 100\n[api]\nbase_url = \"http://file/api\"\n[world.portal]\ndistance = 20.0").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let env: HashMap<&str, String> = [("CHASE_SEED", "2".to_string()), ("CHASE_TICKS", "200".to_string())].into();
        let config = BootConfig::load_from(&args(&["--config", &path, "--seed", "3", "--offline"]), |k| {
            env.get(k).cloned()
        })
        .unwrap();

        assert_eq!(config.seed, Some(3), "flag beats env beats file");
        assert_eq!(config.ticks, 200, "env beats file");
        assert_eq!(config.api.base_url, "http://file/api");
        assert_eq!(config.world.portal.distance, 20.0);
        assert_eq!(config.world.portal.radius, 3.0);
        assert!(config.offline);
        assert_eq!(config.world_config().seed, 3);
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let env = |k: &str| (k == "CHASE_SEED").then(|| "not a number".to_string());
        let config = BootConfig::load_from(&args(&["--ticks", "lots"]), env).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.ticks, BootConfig::default().ticks);
    }

    #[test]
    fn test_world_seed_kept_without_session_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[world]\nseed = 7").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = BootConfig::load_from(&args(&["--config", &path]), no_env).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.world_config().seed, 7);

        let config = BootConfig::load_from(&args(&["--config", &path, "--seed", "9"]), no_env).unwrap();
        assert_eq!(config.world_config().seed, 9);
        assert_eq!(config.world.seed, 7);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = BootConfig::load_from(&args(&["--config", &missing.to_string_lossy()]), no_env);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"forty-two\"").unwrap();
        let result = BootConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }
}
