use std::collections::HashMap;
use std::fs;
use chrono_tz::Tz;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    pub data_dir: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct WeatherSource {
    pub api_key: String,
}

#[derive(Deserialize, Clone)]
pub struct WebhookTarget {
    pub id: String,
    pub token: String,
}

/// One monitored location as configured, immutable for the run
#[derive(Deserialize, Clone)]
pub struct Location {
    pub timezone: Tz,
    /// Minute past the top of the hour the location's tick fires at
    #[serde(default)]
    pub minute: u8,
    /// Weather source key identifying the place to query forecasts for
    pub station: String,
    pub model: Option<String>,
    pub webhooks: Vec<WebhookTarget>,
    pub name: Option<String>,
    pub color: Option<u32>,
    pub image: Option<String>,
    pub footer: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Deserialize)]
struct RawConfig {
    general: General,
    weather: WeatherSource,
    #[serde(default)]
    locations: HashMap<String, toml::Value>,
}

pub struct Config {
    pub general: General,
    pub weather: WeatherSource,
    pub locations: HashMap<String, Location>,
    /// Diagnostics for location entries dropped during decoding. Loading runs
    /// before the logger is installed, so the caller emits these afterwards.
    pub skipped: Vec<String>,
}

/// Loads the configuration file and returns a struct with all configuration items.
///
/// A malformed location entry is dropped with a diagnostic so the remaining
/// locations still get scheduled; a malformed top level is an error.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let raw: RawConfig = toml::from_str(&toml)?;

    let mut locations: HashMap<String, Location> = HashMap::new();
    let mut skipped: Vec<String> = Vec::new();
    for (key, value) in raw.locations {
        match value.try_into::<Location>() {
            Ok(location) => {
                if location.minute > 59 {
                    skipped.push(format!("location {} skipped: minute {} out of range", key, location.minute));
                } else {
                    locations.insert(key, location);
                }
            }
            Err(e) => skipped.push(format!("location {} skipped: {}", key, e)),
        }
    }

    Ok(Config {
        general: raw.general,
        weather: raw.weather,
        locations,
        skipped,
    })
}

impl Location {
    /// Display name for reports, falling back to the location key
    ///
    /// # Arguments
    ///
    /// * 'key' - the location key from the configuration
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }
}
