use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub combiner: FareCombinerConfig,
    #[serde(default)]
    pub mixed_search: MixedSearchConfig,
}

/// Mixed-carrier combination settings. All defaults live in `Default`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FareCombinerConfig {
    /// Upper bound on returned combinations (default 20)
    pub max_combinations: usize,
    /// Minimum savings vs. the reference price, in percent (default 0)
    pub min_savings_percent: f64,
    /// Minimum savings vs. the reference price, absolute (default 0)
    pub min_savings_amount: f64,
    /// Keep pairs where both tickets share an airline (default true)
    pub include_same_airline: bool,
    /// Currency of the combined price (default USD)
    pub currency: String,
}

impl Default for FareCombinerConfig {
    fn default() -> Self {
        Self {
            max_combinations: 20,
            min_savings_percent: 0.0,
            min_savings_amount: 0.0,
            include_same_airline: true,
            currency: "USD".to_string(),
        }
    }
}

/// When to spend extra one-way searches on separate tickets
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MixedSearchConfig {
    /// Minimum estimated savings to trigger a search, in percent (default 5)
    pub min_estimated_savings_percent: f64,
    /// Minimum estimated savings to trigger a search, absolute (default 20)
    pub min_estimated_savings_amount: f64,
    /// Search without an explicit user opt-in (default true)
    pub auto_enable: bool,
    /// Cabins where auto-enable applies (default ECONOMY, PREMIUM_ECONOMY)
    pub auto_enable_cabin_classes: Vec<String>,
}

impl Default for MixedSearchConfig {
    fn default() -> Self {
        Self {
            min_estimated_savings_percent: 5.0,
            min_estimated_savings_amount: 20.0,
            auto_enable: true,
            auto_enable_cabin_classes: vec!["ECONOMY".to_string(), "PREMIUM_ECONOMY".to_string()],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            // Environment specific overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // SKYRANK__COMBINER__MAX_COMBINATIONS=10 sets combiner.max_combinations
            .add_source(config::Environment::with_prefix("SKYRANK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
