use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider-neutral weather snapshot: current conditions plus hourly and
/// daily forecast sequences, all in wire units (Celsius, m/s, inHg).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub hourly: Vec<HourRecord>,
    pub daily: Vec<DayRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub dew_point_c: f64,
    pub condition: String,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    pub wind_bearing_deg: f64,
    /// Compass abbreviation for the bearing, e.g. "N" or "NNE".
    pub wind_compass: String,
    pub wind_gust_mps: Option<f64>,
    pub pressure_inhg: f64,
    /// Barometric trend description ("rising", "falling", "steady") when
    /// the provider reports one.
    pub pressure_trend: Option<String>,
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourRecord {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    /// Icon identifier for the hour's condition.
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: DateTime<Utc>,
    pub low_c: f64,
    pub high_c: f64,
    pub symbol: String,
}
