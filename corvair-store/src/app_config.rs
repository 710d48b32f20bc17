use corvair_catalog::ClassMultipliers;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_baggage_price")]
    pub extra_baggage_price: i64,
    #[serde(default = "default_meal_price")]
    pub meal_service_price: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub class_multipliers: ClassMultipliers,
}

fn default_baggage_price() -> i64 {
    150
}

fn default_meal_price() -> i64 {
    75
}

fn default_currency() -> String {
    "TRY".to_string()
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            extra_baggage_price: default_baggage_price(),
            meal_service_price: default_meal_price(),
            currency: default_currency(),
            class_multipliers: ClassMultipliers::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment overrides with a CORVAIR prefix,
            // e.g. CORVAIR_BUSINESS_RULES__CURRENCY=EUR
            .add_source(config::Environment::with_prefix("CORVAIR").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
