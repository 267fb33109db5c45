//! Service Configuration
//!
//! Layered from an optional TOML file and `FUELCOST__`-prefixed environment
//! variables (`FUELCOST__SERVER__ADDR=0.0.0.0:9000`). Every field has a
//! default so the service starts without any file.

use std::path::PathBuf;

use data_validator::ValidationConfig;
use serde::Deserialize;

use crate::rate_limit::RateLimitConfig;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "FUELCOST_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "fuelcost.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub model: ModelSettings,
    pub auth: AuthSettings,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingSettings,
    pub seed: SeedSettings,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// sqlx SQLite URL
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://fuelcost.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// JSON scaler artifact
    pub scaler_path: PathBuf,
    /// `.onnx` model or `.json` linear model
    pub model_path: PathBuf,
    /// Refuse to start when the resources fail to load
    pub required: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("models/scaler.json"),
            model_path: PathBuf::from("models/consumption.json"),
            required: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Static service tokens. Kept as a list so token text is never treated
    /// as a (case-folded) config key.
    pub tokens: Vec<StaticToken>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticToken {
    pub token: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    /// Reference data seed applied at startup
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load settings. `path` wins over `FUELCOST_CONFIG`, which wins over
    /// `fuelcost.toml` in the working directory. A missing file is not an
    /// error.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(config::Environment::with_prefix("FUELCOST").separator("__"))
            .build()?
            .try_deserialize()
    }
}
