use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    pub grace_period_minutes: i64,
    pub validation_timeout_ms: u64,
    pub tick_interval_seconds: u64,
    #[serde(default)]
    pub fallback_travel_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Environment-specific overrides; the file is optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // `SLATED_BUSINESS_RULES__GRACE_PERIOD_MINUTES=5` style overrides
            .add_source(config::Environment::with_prefix("SLATED").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
