use serde::Deserialize;
use chrono::{DateTime, FixedOffset};

#[derive(Deserialize)]
pub struct UnitValue {
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Deserialize)]
pub struct Wind {
    #[serde(rename = "Speed")]
    pub speed: UnitValue,
}

#[derive(Deserialize)]
pub struct HourlyForecast {
    #[serde(rename = "DateTime")]
    pub date_time: DateTime<FixedOffset>,
    #[serde(rename = "WeatherIcon")]
    pub weather_icon: u8,
    #[serde(rename = "IconPhrase")]
    pub icon_phrase: String,
    #[serde(rename = "IsDaylight")]
    pub is_daylight: bool,
    #[serde(rename = "Temperature")]
    pub temperature: UnitValue,
    #[serde(rename = "Wind")]
    pub wind: Wind,
    #[serde(rename = "WindGust")]
    pub wind_gust: Wind,
}
