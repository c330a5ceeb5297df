use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::condition::WeatherCondition;
use crate::model::{CurrentConditions, DayRecord, HourRecord, WeatherReport};
use crate::provider::{truncate_body, unix_to_utc};
use crate::units::{MB_PER_INHG, direction};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.open-meteo.com";

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,dew_point_2m,\
relative_humidity_2m,weather_code,surface_pressure,wind_speed_10m,wind_direction_10m,\
wind_gusts_10m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Open-Meteo forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Point the client at a different host (used by HTTP tests).
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url, http: Client::new() }
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn get_weather(&self, latitude: f64, longitude: f64) -> Result<WeatherReport> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("forecast_days", "10".to_string()),
                ("wind_speed_unit", "ms".to_string()),
                ("timeformat", "unixtime".to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (forecast)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OmResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        Ok(report_from_response(parsed))
    }
}

fn report_from_response(parsed: OmResponse) -> WeatherReport {
    let cur = parsed.current;
    let condition = WeatherCondition::from_wmo_code(cur.weather_code);

    let current = CurrentConditions {
        temperature_c: cur.temperature_2m,
        feels_like_c: cur.apparent_temperature,
        dew_point_c: cur.dew_point_2m,
        condition: condition.description().to_string(),
        humidity_pct: cur.relative_humidity_2m,
        wind_speed_mps: cur.wind_speed_10m,
        wind_bearing_deg: cur.wind_direction_10m,
        wind_compass: direction::degree_to_compass(cur.wind_direction_10m).to_string(),
        wind_gust_mps: cur.wind_gusts_10m,
        // surface_pressure comes back in hPa
        pressure_inhg: cur.surface_pressure / MB_PER_INHG,
        // Open-Meteo carries no barometric trend
        pressure_trend: None,
        observed_at: unix_to_utc(cur.time).unwrap_or_else(Utc::now),
    };

    let hourly = parsed
        .hourly
        .time
        .iter()
        .zip(&parsed.hourly.temperature_2m)
        .zip(&parsed.hourly.weather_code)
        .filter_map(|((&ts, &temp), &code)| {
            unix_to_utc(ts).map(|time| HourRecord {
                time,
                temperature_c: temp,
                symbol: WeatherCondition::from_wmo_code(code).icon_name().to_string(),
            })
        })
        .collect();

    let daily = parsed
        .daily
        .time
        .iter()
        .zip(&parsed.daily.temperature_2m_max)
        .zip(&parsed.daily.temperature_2m_min)
        .zip(&parsed.daily.weather_code)
        .filter_map(|(((&ts, &high), &low), &code)| {
            unix_to_utc(ts).map(|date| DayRecord {
                date,
                low_c: low,
                high_c: high,
                symbol: WeatherCondition::from_wmo_code(code).icon_name().to_string(),
            })
        })
        .collect();

    WeatherReport { current, hourly, daily }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: i64,
    temperature_2m: f64,
    apparent_temperature: f64,
    dew_point_2m: f64,
    relative_humidity_2m: f64,
    weather_code: i32,
    surface_pressure: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    wind_gusts_10m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<i64>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<i64>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
    hourly: OmHourly,
    daily: OmDaily,
}
