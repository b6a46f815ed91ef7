use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Output format for the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_service_name() -> String {
    "invoice-totals".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// Load settings from an optional file plus `APP__*` environment variables.
///
/// An explicit `path` must exist; otherwise `default_name` is looked up in the
/// working directory with any extension the `config` crate understands, and
/// skipped when absent. Environment variables always win.
pub fn load_layered<T: DeserializeOwned>(
    default_name: &str,
    path: Option<&Path>,
) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(default_name).required(false),
    };

    let config = Cfg::builder()
        .add_source(file)
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}
