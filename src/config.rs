use serde::Deserialize;

use crate::analysis::{
    AlertThresholds, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD, DEFAULT_PREDICTION_WINDOW,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mock_data: MockDataConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Origins allowed by CORS (e.g. the frontend dev server). Empty = any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
    /// Drop and recreate all tables at startup.
    #[serde(default = "default_true")]
    pub reset_on_start: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MockDataConfig {
    #[serde(default = "default_true")]
    pub seed_on_start: bool,
    /// Fixed RNG seed for reproducible demo data; a random one is drawn (and logged) when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MockDataConfig {
    fn default() -> Self {
        Self {
            seed_on_start: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,
    #[serde(default = "default_low_threshold")]
    pub low_threshold: f64,
    /// How many of the newest usage records feed the disk-full forecast.
    #[serde(default = "default_prediction_window")]
    pub prediction_window: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            low_threshold: DEFAULT_LOW_THRESHOLD,
            prediction_window: DEFAULT_PREDICTION_WINDOW,
        }
    }
}

impl AnalysisConfig {
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            high: self.high_threshold,
            low: self.low_threshold,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_high_threshold() -> f64 {
    DEFAULT_HIGH_THRESHOLD
}

fn default_low_threshold() -> f64 {
    DEFAULT_LOW_THRESHOLD
}

fn default_prediction_window() -> u32 {
    DEFAULT_PREDICTION_WINDOW
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        for origin in &self.server.cors_allowed_origins {
            anyhow::ensure!(
                axum::http::HeaderValue::from_str(origin).is_ok(),
                "server.cors_allowed_origins contains an invalid origin: {:?}",
                origin
            );
        }
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.analysis.high_threshold.is_finite() && self.analysis.low_threshold.is_finite(),
            "analysis.high_threshold and analysis.low_threshold must be finite"
        );
        anyhow::ensure!(
            self.analysis.low_threshold >= 0.0,
            "analysis.low_threshold must be >= 0, got {}",
            self.analysis.low_threshold
        );
        anyhow::ensure!(
            self.analysis.low_threshold < self.analysis.high_threshold,
            "analysis.low_threshold ({}) must be below analysis.high_threshold ({})",
            self.analysis.low_threshold,
            self.analysis.high_threshold
        );
        anyhow::ensure!(
            self.analysis.prediction_window > 0,
            "analysis.prediction_window must be > 0, got {}",
            self.analysis.prediction_window
        );
        Ok(())
    }
}
