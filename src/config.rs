use serde::Deserialize;

use crate::services::{
    recommendations::{DEFAULT_EARN_RATE, MAX_RECOMMENDATIONS, POINTS_PER_USD},
    EngineSettings,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the raw card catalog
    #[serde(default = "default_cards_path")]
    pub cards_path: String,

    /// Reward points per USD
    #[serde(default = "default_points_per_usd")]
    pub points_per_usd: f64,

    /// Earn rate (percent) for cards without any reward rate
    #[serde(default = "default_earn_rate_percent")]
    pub default_earn_rate_percent: f64,

    /// Upper bound on returned recommendations
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cards_path() -> String {
    "data/cards.json".to_string()
}

fn default_points_per_usd() -> f64 {
    POINTS_PER_USD
}

fn default_earn_rate_percent() -> f64 {
    DEFAULT_EARN_RATE * 100.0
}

fn default_max_recommendations() -> usize {
    MAX_RECOMMENDATIONS
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make scoring meaningless
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.points_per_usd.is_finite() && self.points_per_usd > 0.0,
            "POINTS_PER_USD must be a positive number, got {}",
            self.points_per_usd
        );
        anyhow::ensure!(
            self.default_earn_rate_percent.is_finite() && self.default_earn_rate_percent >= 0.0,
            "DEFAULT_EARN_RATE_PERCENT must not be negative, got {}",
            self.default_earn_rate_percent
        );
        anyhow::ensure!(
            self.max_recommendations > 0,
            "MAX_RECOMMENDATIONS must be at least 1"
        );
        Ok(())
    }

    /// Scoring settings; built-in issuer rules keep their defaults
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            points_per_usd: self.points_per_usd,
            default_earn_rate: self.default_earn_rate_percent / 100.0,
            max_recommendations: self.max_recommendations,
            ..EngineSettings::default()
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
