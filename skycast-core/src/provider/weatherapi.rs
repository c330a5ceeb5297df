use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::condition::WeatherCondition;
use crate::model::{CurrentConditions, DayRecord, HourRecord, WeatherReport};
use crate::provider::{truncate_body, unix_to_utc};

use super::WeatherProvider;

const BASE_URL: &str = "http://api.weatherapi.com";
const FORECAST_DAYS: u32 = 10;

/// WeatherAPI.com forecast client. Requires an API key.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Point the client at a different host (used by HTTP tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn get_weather(&self, latitude: f64, longitude: f64) -> Result<WeatherReport> {
        let url = format!("{}/v1/forecast.json", self.base_url);
        let query = format!("{latitude},{longitude}");
        let days = FORECAST_DAYS.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (forecast)")?;

        let status = res.status();
        let body =
            res.text().await.context("Failed to read WeatherAPI forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "WeatherAPI forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: WaForecastResponse =
            serde_json::from_str(&body).context("Failed to parse WeatherAPI forecast JSON")?;

        Ok(report_from_response(parsed))
    }
}

fn report_from_response(parsed: WaForecastResponse) -> WeatherReport {
    let cur = parsed.current;

    let ts = cur.last_updated_epoch.or(parsed.location.localtime_epoch);
    let observed_at = ts.and_then(unix_to_utc).unwrap_or_else(Utc::now);

    let current = CurrentConditions {
        temperature_c: cur.temp_c,
        feels_like_c: cur.feelslike_c,
        dew_point_c: cur.dewpoint_c.unwrap_or(cur.temp_c),
        condition: cur.condition.text,
        humidity_pct: cur.humidity,
        wind_speed_mps: cur.wind_kph / 3.6,
        wind_bearing_deg: cur.wind_degree,
        wind_compass: cur.wind_dir,
        wind_gust_mps: cur.gust_kph.map(|kph| kph / 3.6),
        pressure_inhg: cur.pressure_in,
        // WeatherAPI carries no barometric trend
        pressure_trend: None,
        observed_at,
    };

    let mut hourly = Vec::new();
    let mut daily = Vec::new();
    for day in parsed.forecast.forecastday.into_iter().take(FORECAST_DAYS as usize) {
        if let Some(date) = unix_to_utc(day.date_epoch) {
            daily.push(DayRecord {
                date,
                low_c: day.day.mintemp_c,
                high_c: day.day.maxtemp_c,
                symbol: condition_from_code(day.day.condition.code).icon_name().to_string(),
            });
        }
        for hour in day.hour {
            if let Some(time) = unix_to_utc(hour.time_epoch) {
                hourly.push(HourRecord {
                    time,
                    temperature_c: hour.temp_c,
                    symbol: condition_from_code(hour.condition.code).icon_name().to_string(),
                });
            }
        }
    }

    WeatherReport { current, hourly, daily }
}

/// Fold WeatherAPI condition codes onto the shared condition categories.
/// See: https://www.weatherapi.com/docs/weather_conditions.json
fn condition_from_code(code: i32) -> WeatherCondition {
    match code {
        1000 => WeatherCondition::Clear,
        1003 => WeatherCondition::PartlyCloudy,
        1006 | 1009 => WeatherCondition::Cloudy,
        1030 | 1135 | 1147 => WeatherCondition::Fog,
        1063 | 1150 | 1153 | 1168 | 1171 => WeatherCondition::Drizzle,
        1180 | 1183 | 1186 | 1189 | 1240 => WeatherCondition::Rain,
        1192 | 1195 | 1243 | 1246 => WeatherCondition::HeavyRain,
        1066 | 1114 | 1117 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1255 | 1258 => {
            WeatherCondition::Snow
        }
        1069 | 1072 | 1198 | 1201 | 1204 | 1207 | 1237 | 1249 | 1252 | 1261 | 1264 => {
            WeatherCondition::Sleet
        }
        1087 | 1273 | 1276 | 1279 | 1282 => WeatherCondition::Thunderstorm,
        _ => WeatherCondition::Clear,
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    localtime_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: i32,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    dewpoint_c: Option<f64>,
    humidity: f64,
    wind_kph: f64,
    wind_degree: f64,
    wind_dir: String,
    gust_kph: Option<f64>,
    pressure_in: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time_epoch: i64,
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date_epoch: i64,
    day: WaDay,
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}
