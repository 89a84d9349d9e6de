use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::models::condition::Condition;

/// One hourly prediction from a single query event. Dates and hours are
/// calendar values in the owning location's timezone; the target is never
/// before the query.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ForecastRecord {
    pub query_date: NaiveDate,
    pub query_hour: u8,
    pub target_date: NaiveDate,
    pub target_hour: u8,
    /// Categorical condition label as reported by the weather source
    pub label: String,
    pub icon: u8,
    pub is_daylight: bool,
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
}

/// Result of applying a location's model transform to one raw record
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelOutput {
    pub dominant: Condition,
}

/// Archived model output, stored in the model partition tree under the same
/// (location, date, query hour) key scheme as the raw records it was derived from
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelRecord {
    pub query_date: NaiveDate,
    pub query_hour: u8,
    pub target_date: NaiveDate,
    pub target_hour: u8,
    pub model: ModelOutput,
}
