use serde::{Deserialize, Serialize};
use std::{env, path::Path, str::FromStr};

use crate::models::UnknownAnswerTypePolicy;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub unknown_answer_type: UnknownAnswerTypePolicy,
    pub log_format: LogFormat,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        Self::from_dir(Path::new("config"), &app_env)
    }

    /// Load `<dir>/<app_env>.toml` (optional) with `APP__*` overrides on top
    pub fn from_dir(dir: &Path, app_env: &str) -> Result<Self, config::ConfigError> {
        let file = dir.join(format!("{}.toml", app_env));
        let settings = config::Config::builder()
            .add_source(
                config::File::from(file)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let unknown_answer_type = settings
            .get_string("hydration.unknown_answer_type")
            .or_else(|_| env::var("UNKNOWN_ANSWER_TYPE"))
            .ok()
            .map(|raw| raw.parse::<UnknownAnswerTypePolicy>())
            .transpose()
            .map_err(config::ConfigError::Message)?
            .unwrap_or_default();

        let log_format = settings
            .get_string("logging.format")
            .or_else(|_| env::var("LOG_FORMAT"))
            .ok()
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()
            .map_err(config::ConfigError::Message)?
            .unwrap_or_default();

        Ok(Config {
            unknown_answer_type,
            log_format,
        })
    }
}
