use thiserror::Error;
use crate::manager_accuweather::WeatherError;

#[derive(Error, Debug)]
#[error("configuration error: {0}")]
pub struct ConfigError(pub String);
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> ConfigError {
        ConfigError(format!("config file error: {}", e))
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> ConfigError {
        ConfigError(format!("toml parse error: {}", e))
    }
}
#[derive(Error, Debug)]
#[error("forecast store error: {0}")]
pub struct StoreError(pub String);
impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> StoreError {
        StoreError(format!("file i/o error: {}", e))
    }
}
impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> StoreError {
        StoreError(format!("json document error: {}", e))
    }
}

/// Error aborting one tick of a location's pipeline, tagged with the
/// pipeline phase it occurred in
#[derive(Error, Debug)]
#[error("phase {phase}: {msg}")]
pub struct WorkerError {
    pub phase: &'static str,
    pub msg: String,
}
impl From<WeatherError> for WorkerError {
    fn from(e: WeatherError) -> WorkerError {
        WorkerError { phase: "query", msg: e.to_string() }
    }
}
impl From<StoreError> for WorkerError {
    fn from(e: StoreError) -> WorkerError {
        WorkerError { phase: "store", msg: e.to_string() }
    }
}
