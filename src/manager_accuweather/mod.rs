use std::fmt;
use std::time::Duration;
use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use ureq::Agent;
use crate::models::accuweather::HourlyForecast;
use crate::models::forecast::ForecastRecord;

pub enum WeatherError {
    Api(String),
    Document(String),
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WeatherError::Api(e) => write!(f, "WeatherError::Api: {}", e),
            WeatherError::Document(e) => write!(f, "WeatherError::Document: {}", e),
        }
    }
}
impl From<ureq::Error> for WeatherError {
    fn from(e: ureq::Error) -> Self {
        WeatherError::Api(e.to_string())
    }
}
impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Document(e.to_string())
    }
}

/// Struct for managing hourly forecasts from the AccuWeather forecast API
pub struct AccuWeather {
    agent: Agent,
    api_key: String,
}

impl AccuWeather {
    /// Returns an AccuWeather struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'api_key' - the API key to authorize requests with
    pub fn new(api_key: String) -> AccuWeather {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Self { agent, api_key }
    }

    /// Retrieves the twelve hour hourly forecast for a station and tags every
    /// entry with the query event it belongs to.
    ///
    /// Query date and hour are taken from 'now', the start of the current hour
    /// in the location's timezone; target date and hour are the entry's valid
    /// time converted to the same timezone.
    ///
    /// # Arguments
    ///
    /// * 'station' - the source's location key to query forecasts for
    /// * 'now' - start of the current hour in the location's timezone
    pub fn query(&self, station: &str, now: DateTime<Tz>) -> Result<Vec<ForecastRecord>, WeatherError> {
        let aw_domain = "https://dataservice.accuweather.com";
        let url = format!("{}/forecasts/v1/hourly/12hour/{}", aw_domain, station);

        let json = self.agent
            .get(&url)
            .query("apikey", &self.api_key)
            .query("metric", "true")
            .call()?
            .body_mut()
            .read_to_string()?;

        let hours: Vec<HourlyForecast> = serde_json::from_str(&json)?;
        if hours.is_empty() {
            return Err(WeatherError::Api(format!("empty forecast for station {}", station)));
        }

        let tz = now.timezone();
        let records = hours.iter()
            .map(|h| {
                let target = h.date_time.with_timezone(&tz);
                ForecastRecord {
                    query_date: now.date_naive(),
                    query_hour: now.hour() as u8,
                    target_date: target.date_naive(),
                    target_hour: target.hour() as u8,
                    label: h.icon_phrase.clone(),
                    icon: h.weather_icon,
                    is_daylight: h.is_daylight,
                    temperature: h.temperature.value,
                    wind_speed: h.wind.speed.value,
                    wind_gust: h.wind_gust.speed.value,
                }
            })
            .collect();

        Ok(records)
    }
}
