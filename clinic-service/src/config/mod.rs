use serde::Deserialize;
use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct ClinicConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// OTLP collector; traces are only exported when set.
    pub otlp_endpoint: Option<String>,
}

impl ClinicConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_production();

        Ok(ClinicConfig {
            common,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", None, is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("clinic_db"), is_prod)?,
            },
            logging: LoggingConfig {
                level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
                otlp_endpoint: std::env::var("OTLP_ENDPOINT")
                    .ok()
                    .filter(|endpoint| !endpoint.is_empty()),
            },
        })
    }
}
