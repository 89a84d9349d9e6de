use serde::{Deserialize, Serialize};

/// Dominant in-game weather conditions a model can predict
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Sunny,
    Clear,
    #[serde(rename = "partlycloudy")]
    PartlyCloudy,
    Cloudy,
    Windy,
    Rain,
    Snow,
    Fog,
}

/// Glyph used in report cells no prediction maps to
pub const NONE_GLYPH: &str = "▪️";

/// Returns the report glyph for a grid cell
///
/// # Arguments
///
/// * 'condition' - the dominant condition in the cell, or None for an empty cell
pub fn glyph(condition: Option<Condition>) -> &'static str {
    match condition {
        Some(Condition::Sunny)        => "☀️",
        Some(Condition::Clear)        => "🌙",
        Some(Condition::PartlyCloudy) => "⛅",
        Some(Condition::Cloudy)       => "☁️",
        Some(Condition::Windy)        => "🌬️",
        Some(Condition::Rain)         => "🌧️",
        Some(Condition::Snow)         => "❄️",
        Some(Condition::Fog)          => "🌫️",
        None                          => NONE_GLYPH,
    }
}
