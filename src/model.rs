use crate::errors::ConfigError;
use crate::models::condition::Condition;
use crate::models::forecast::{ForecastRecord, ModelOutput};

/// A model transform maps one raw forecast record to the dominant in-game
/// condition it implies. Pure function, no state between records.
pub type Model = fn(&ForecastRecord) -> ModelOutput;

/// Wind gust threshold in km/h above which the baseline model calls windy
const WINDY_GUST_KMH: f64 = 39.0;

/// Sustained wind threshold in km/h used by the gale model
const GALE_WIND_KMH: f64 = 30.0;

/// Returns the model registered under the given name, defaulting to the
/// baseline model when no name is configured
///
/// # Arguments
///
/// * 'name' - the configured model selector, if any
pub fn resolve(name: Option<&str>) -> Result<Model, ConfigError> {
    match name {
        None | Some("baseline") => Ok(baseline),
        Some("gale") => Ok(gale),
        Some(other) => Err(ConfigError(format!("unknown model: {}", other))),
    }
}

/// Baseline transform: a strong gust forces windy, otherwise the source icon
/// code decides, with the daylight flag separating sunny from clear skies
fn baseline(record: &ForecastRecord) -> ModelOutput {
    let dominant = if record.wind_gust >= WINDY_GUST_KMH {
        Condition::Windy
    } else {
        from_icon(record.icon, record.is_daylight)
    };

    ModelOutput { dominant }
}

/// Like the baseline but also treats strong sustained wind as windy, for
/// places where gust readings from the source run low
fn gale(record: &ForecastRecord) -> ModelOutput {
    let dominant = if record.wind_gust >= WINDY_GUST_KMH || record.wind_speed >= GALE_WIND_KMH {
        Condition::Windy
    } else {
        from_icon(record.icon, record.is_daylight)
    };

    ModelOutput { dominant }
}

/// Maps the source icon code ranges to a dominant condition.
/// Codes 1-44 per the source documentation; day codes below 33, night
/// equivalents from 33 up, 32 is the source's own windy code.
fn from_icon(icon: u8, is_daylight: bool) -> Condition {
    match icon {
        1..=3 | 30 | 31 => if is_daylight { Condition::Sunny } else { Condition::Clear },
        4..=6 => Condition::PartlyCloudy,
        7 | 8 => Condition::Cloudy,
        11 => Condition::Fog,
        12..=18 => Condition::Rain,
        19..=29 => Condition::Snow,
        32 => Condition::Windy,
        33 | 34 => if is_daylight { Condition::Sunny } else { Condition::Clear },
        35..=37 => Condition::PartlyCloudy,
        38 => Condition::Cloudy,
        39..=42 => Condition::Rain,
        43 | 44 => Condition::Snow,
        _ => Condition::Cloudy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(icon: u8, is_daylight: bool, wind_speed: f64, wind_gust: f64) -> ForecastRecord {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        ForecastRecord {
            query_date: date,
            query_hour: 10,
            target_date: date,
            target_hour: 11,
            label: "test".to_string(),
            icon,
            is_daylight,
            temperature: 20.0,
            wind_speed,
            wind_gust,
        }
    }

    #[test]
    fn baseline_maps_icons() {
        assert_eq!(baseline(&record(1, true, 5.0, 10.0)).dominant, Condition::Sunny);
        assert_eq!(baseline(&record(33, false, 5.0, 10.0)).dominant, Condition::Clear);
        assert_eq!(baseline(&record(5, true, 5.0, 10.0)).dominant, Condition::PartlyCloudy);
        assert_eq!(baseline(&record(7, true, 5.0, 10.0)).dominant, Condition::Cloudy);
        assert_eq!(baseline(&record(11, true, 5.0, 10.0)).dominant, Condition::Fog);
        assert_eq!(baseline(&record(15, true, 5.0, 10.0)).dominant, Condition::Rain);
        assert_eq!(baseline(&record(22, false, 5.0, 10.0)).dominant, Condition::Snow);
    }

    #[test]
    fn gust_overrides_icon() {
        assert_eq!(baseline(&record(1, true, 5.0, 45.0)).dominant, Condition::Windy);
        assert_eq!(baseline(&record(15, true, 5.0, 39.0)).dominant, Condition::Windy);
    }

    #[test]
    fn gale_adds_sustained_wind() {
        assert_eq!(baseline(&record(1, true, 35.0, 10.0)).dominant, Condition::Sunny);
        assert_eq!(gale(&record(1, true, 35.0, 10.0)).dominant, Condition::Windy);
    }

    #[test]
    fn resolve_defaults_and_rejects_unknown() {
        assert!(resolve(None).is_ok());
        assert!(resolve(Some("gale")).is_ok());
        assert!(resolve(Some("nope")).is_err());
    }
}
