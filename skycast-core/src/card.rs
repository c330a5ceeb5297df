use std::fmt::Display;

use chrono::{DateTime, TimeZone, Timelike, Utc};

use crate::model::WeatherReport;
use crate::units::{DisplayUnits, speed};

/// Maximum entries in the hourly strip.
pub const HOURLY_SLOTS: usize = 24;
/// Maximum entries in the daily list.
pub const DAILY_SLOTS: usize = 10;

/// One entry in the 24-hour strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourSlot {
    pub time: String,
    pub icon: String,
    pub temperature: String,
}

/// One entry in the 10-day list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySlot {
    pub day: String,
    pub icon: String,
    pub low: String,
    pub high: String,
}

/// Marker color for the pressure state badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressureColor {
    Red,
    Blue,
    #[default]
    White,
}

/// Display-ready weather card. Every field is a formatted string; the UI
/// never does arithmetic on them (the range bar goes through
/// [`parse_degrees`]). A card is replaced wholesale on each successful
/// fetch, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub temperature: String,
    pub feels_like: String,
    pub high_temp: String,
    pub low_temp: String,
    pub high_low_abbrev: String,
    pub high_low_full: String,
    pub condition: String,
    pub humidity: String,
    pub dew_point: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub wind_direction_icon: String,
    pub wind_gust: String,
    pub pressure: String,
    pub pressure_trend_icon: String,
    pub pressure_state: String,
    pub pressure_color: PressureColor,
    pub as_of: DateTime<Utc>,
    pub hourly: Vec<HourSlot>,
    pub daily: Vec<DaySlot>,
}

impl Default for WeatherCard {
    fn default() -> Self {
        Self {
            temperature: String::new(),
            feels_like: String::new(),
            high_temp: String::new(),
            low_temp: String::new(),
            high_low_abbrev: "H: 0°  /  L: 0°".to_string(),
            high_low_full: "High: 0°  /  Low: 0°".to_string(),
            condition: String::new(),
            humidity: String::new(),
            dew_point: String::new(),
            wind_speed: String::new(),
            wind_direction: String::new(),
            wind_direction_icon: String::new(),
            wind_gust: String::new(),
            pressure: String::new(),
            pressure_trend_icon: String::new(),
            pressure_state: String::new(),
            pressure_color: PressureColor::White,
            as_of: Utc::now(),
            hourly: Vec::new(),
            daily: Vec::new(),
        }
    }
}

impl WeatherCard {
    /// Recompute every display field from a provider report.
    ///
    /// `now` fixes both the hourly-inclusion cutoff and the timezone the
    /// hour/day labels are rendered in; callers pass `Local::now()`, tests
    /// pass a pinned `Utc` instant.
    pub fn from_report<Tz>(report: &WeatherReport, units: DisplayUnits, now: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let cur = &report.current;
        let tz = now.timezone();

        let temperature = fmt_degrees(units, cur.temperature_c);
        let feels_like = fmt_degrees(units, cur.feels_like_c);
        let dew_point = fmt_degrees(units, cur.dew_point_c);

        // Today's high/low come from the first daily record; an empty daily
        // sequence formats from zero rather than failing.
        let (high_c, low_c) = report.daily.first().map(|d| (d.high_c, d.low_c)).unwrap_or((0.0, 0.0));
        let high_temp = fmt_degrees(units, high_c);
        let low_temp = fmt_degrees(units, low_c);

        let humidity = format!("{:.0}%", cur.humidity_pct);
        let wind_speed = format!("{:.1} mph", speed::mps_to_mph(cur.wind_speed_mps));
        let wind_gust = format!("{:.0} mph", speed::mps_to_mph(cur.wind_gust_mps.unwrap_or(0.0)));
        let wind_direction = format!("{:.0}° {}", cur.wind_bearing_deg, cur.wind_compass);

        let pressure = format!(
            "{:.2} {}",
            units.pressure.from_inhg(cur.pressure_inhg),
            units.pressure.suffix()
        );
        // High/low thresholds are always evaluated on the inHg value,
        // independent of the display unit.
        let (pressure_state, pressure_color) = pressure_state(cur.pressure_inhg);

        // Calendar-hour granularity in the display timezone: a record is
        // kept when its local (day, hour) is the same as or later than
        // now's, and labelled "Now" on exact (day, hour) equality. Epoch
        // buckets would disagree in fractional-offset timezones.
        let now_hour = (now.date_naive(), now.hour());
        let mut hourly = Vec::new();
        for hour in &report.hourly {
            if hourly.len() >= HOURLY_SLOTS {
                break;
            }
            let local = hour.time.with_timezone(&tz);
            let local_hour = (local.date_naive(), local.hour());
            if local_hour < now_hour {
                continue;
            }
            let time = if local_hour == now_hour {
                "Now".to_string()
            } else {
                local.format("%-I%p").to_string()
            };
            hourly.push(HourSlot {
                time,
                icon: hour.symbol.clone(),
                temperature: fmt_degrees(units, hour.temperature_c),
            });
        }

        let today = now.date_naive();
        let daily = report
            .daily
            .iter()
            .take(DAILY_SLOTS)
            .map(|day| {
                let local = day.date.with_timezone(&tz);
                let label = if local.date_naive() == today {
                    "Today".to_string()
                } else {
                    local.format("%a").to_string()
                };
                DaySlot {
                    day: label,
                    icon: day.symbol.clone(),
                    low: fmt_degrees(units, day.low_c),
                    high: fmt_degrees(units, day.high_c),
                }
            })
            .collect();

        Self {
            temperature,
            feels_like,
            high_low_abbrev: format!("H: {high_temp}  /  L: {low_temp}"),
            high_low_full: format!("High: {high_temp}  /  Low: {low_temp}"),
            high_temp,
            low_temp,
            condition: cur.condition.clone(),
            humidity,
            dew_point,
            wind_speed,
            wind_direction,
            wind_direction_icon: wind_direction_icon(&cur.wind_compass).to_string(),
            wind_gust,
            pressure,
            pressure_trend_icon: pressure_trend_icon(cur.pressure_trend.as_deref()).to_string(),
            pressure_state: pressure_state.to_string(),
            pressure_color,
            as_of: cur.observed_at,
            hourly,
            daily,
        }
    }
}

/// Icon identifier for a compass abbreviation. Only the eight primary and
/// secondary points (plus their NNE/SSE/SSW/NNW variants) are mapped;
/// anything else yields an empty identifier, silently.
pub fn wind_direction_icon(abbrev: &str) -> &'static str {
    match abbrev {
        "N" => "arrow.up.circle",
        "NE" | "NNE" => "arrow.up.right.circle",
        "E" => "arrow.right.circle",
        "SE" | "SSE" => "arrow.down.right.circle",
        "S" => "arrow.down.circle",
        "SW" | "SSW" => "arrow.down.left.circle",
        "W" => "arrow.left.circle",
        "NW" | "NNW" => "arrow.up.left.circle",
        _ => "",
    }
}

/// Pressure badge: "H" at or above 30.20 inHg, "L" at or below 29.80 inHg.
pub fn pressure_state(pressure_inhg: f64) -> (&'static str, PressureColor) {
    if pressure_inhg >= 30.20 {
        ("H", PressureColor::Red)
    } else if pressure_inhg <= 29.80 {
        ("L", PressureColor::Blue)
    } else {
        ("", PressureColor::White)
    }
}

/// Trend icon from the provider's trend description; unknown or absent
/// descriptions yield an empty identifier.
pub fn pressure_trend_icon(trend: Option<&str>) -> &'static str {
    match trend.map(str::to_lowercase).as_deref() {
        Some("rising") => "arrow.up",
        Some("falling") => "arrow.down",
        Some("steady") => "equal",
        _ => "",
    }
}

/// Parse a formatted degree string back into a number, for the one tile
/// that needs raw values (the temperature-range bar). Unparsable input
/// yields 0.0.
pub fn parse_degrees(s: &str) -> f64 {
    s.trim().trim_end_matches('°').parse().unwrap_or(0.0)
}

fn fmt_degrees(units: DisplayUnits, temp_c: f64) -> String {
    format!("{:.0}°", units.temperature.from_celsius(temp_c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DayRecord, HourRecord};
    use crate::units::{PressureUnit, TemperatureUnit};
    use chrono::{Duration, FixedOffset, TimeZone};

    fn celsius_units() -> DisplayUnits {
        DisplayUnits { temperature: TemperatureUnit::Celsius, pressure: PressureUnit::InchesOfMercury }
    }

    fn sample_current() -> CurrentConditions {
        CurrentConditions {
            temperature_c: 15.3,
            feels_like_c: 14.1,
            dew_point_c: 9.6,
            condition: "Partly Cloudy".to_string(),
            humidity_pct: 48.0,
            wind_speed_mps: 4.4704, // exactly 10 mph
            wind_bearing_deg: 22.0,
            wind_compass: "NNE".to_string(),
            wind_gust_mps: Some(8.9408),
            pressure_inhg: 30.01,
            pressure_trend: Some("Rising".to_string()),
            observed_at: Utc.with_ymd_and_hms(2024, 4, 21, 15, 30, 0).unwrap(),
        }
    }

    fn sample_report() -> WeatherReport {
        WeatherReport { current: sample_current(), hourly: Vec::new(), daily: Vec::new() }
    }

    #[test]
    fn pressure_state_boundaries() {
        assert_eq!(pressure_state(30.20), ("H", PressureColor::Red));
        assert_eq!(pressure_state(30.19), ("", PressureColor::White));
        assert_eq!(pressure_state(29.81), ("", PressureColor::White));
        assert_eq!(pressure_state(29.80), ("L", PressureColor::Blue));
    }

    #[test]
    fn wind_icons_fold_ordinals() {
        assert_eq!(wind_direction_icon("N"), "arrow.up.circle");
        assert_eq!(wind_direction_icon("NE"), "arrow.up.right.circle");
        assert_eq!(wind_direction_icon("NNE"), "arrow.up.right.circle");
        assert_eq!(wind_direction_icon("SSW"), "arrow.down.left.circle");
        assert_eq!(wind_direction_icon("W"), "arrow.left.circle");
    }

    #[test]
    fn unmatched_wind_abbreviation_is_empty() {
        assert_eq!(wind_direction_icon("ENE"), "");
        assert_eq!(wind_direction_icon("bogus"), "");
        assert_eq!(wind_direction_icon(""), "");
    }

    #[test]
    fn trend_icon_is_case_insensitive() {
        assert_eq!(pressure_trend_icon(Some("rising")), "arrow.up");
        assert_eq!(pressure_trend_icon(Some("Falling")), "arrow.down");
        assert_eq!(pressure_trend_icon(Some("STEADY")), "equal");
        assert_eq!(pressure_trend_icon(Some("wobbling")), "");
        assert_eq!(pressure_trend_icon(None), "");
    }

    #[test]
    fn current_fields_format_with_fixed_precision() {
        let now = Utc.with_ymd_and_hms(2024, 4, 21, 15, 45, 0).unwrap();
        let card = WeatherCard::from_report(&sample_report(), celsius_units(), now);

        assert_eq!(card.temperature, "15°");
        assert_eq!(card.feels_like, "14°");
        assert_eq!(card.dew_point, "10°");
        assert_eq!(card.humidity, "48%");
        assert_eq!(card.wind_speed, "10.0 mph");
        assert_eq!(card.wind_gust, "20 mph");
        assert_eq!(card.wind_direction, "22° NNE");
        assert_eq!(card.wind_direction_icon, "arrow.up.right.circle");
        assert_eq!(card.pressure, "30.01 inHg");
        assert_eq!(card.pressure_state, "");
        assert_eq!(card.pressure_color, PressureColor::White);
        assert_eq!(card.pressure_trend_icon, "arrow.up");
        assert_eq!(card.as_of, sample_current().observed_at);
    }

    #[test]
    fn fahrenheit_rounds_to_zero_decimals() {
        let units = DisplayUnits::default();
        let now = Utc.with_ymd_and_hms(2024, 4, 21, 15, 45, 0).unwrap();
        let card = WeatherCard::from_report(&sample_report(), units, now);

        // 15.3 C = 59.54 F
        assert_eq!(card.temperature, "60°");
    }

    #[test]
    fn missing_gust_formats_as_zero() {
        let mut report = sample_report();
        report.current.wind_gust_mps = None;
        let now = Utc.with_ymd_and_hms(2024, 4, 21, 15, 45, 0).unwrap();
        let card = WeatherCard::from_report(&report, celsius_units(), now);
        assert_eq!(card.wind_gust, "0 mph");
    }

    #[test]
    fn millibar_display_keeps_inhg_thresholds() {
        let mut report = sample_report();
        report.current.pressure_inhg = 30.25;
        let units =
            DisplayUnits { temperature: TemperatureUnit::Celsius, pressure: PressureUnit::Millibars };
        let now = Utc.with_ymd_and_hms(2024, 4, 21, 15, 45, 0).unwrap();
        let card = WeatherCard::from_report(&report, units, now);

        assert_eq!(card.pressure, "1024.38 mb");
        assert_eq!(card.pressure_state, "H");
        assert_eq!(card.pressure_color, PressureColor::Red);
    }

    fn hourly_report(start: DateTime<Utc>, count: usize) -> WeatherReport {
        let mut report = sample_report();
        report.hourly = (0..count)
            .map(|i| HourRecord {
                time: start + Duration::hours(i as i64),
                temperature_c: 10.0 + i as f64,
                symbol: "sun.max".to_string(),
            })
            .collect();
        report
    }

    #[test]
    fn hourly_keeps_current_hour_onward_in_order() {
        // Records at H-1, H, H+1, H+2 relative to now; now is mid-hour.
        let h = Utc.with_ymd_and_hms(2024, 4, 21, 15, 0, 0).unwrap();
        let report = hourly_report(h - Duration::hours(1), 4);
        let now = h + Duration::minutes(45);

        let card = WeatherCard::from_report(&report, celsius_units(), now);

        let times: Vec<&str> = card.hourly.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["Now", "4PM", "5PM"]);
        let temps: Vec<&str> = card.hourly.iter().map(|s| s.temperature.as_str()).collect();
        assert_eq!(temps, vec!["11°", "12°", "13°"]);
    }

    #[test]
    fn record_earlier_in_the_current_hour_still_qualifies() {
        let now = Utc.with_ymd_and_hms(2024, 4, 21, 15, 45, 0).unwrap();
        let mut report = sample_report();
        report.hourly = vec![HourRecord {
            time: Utc.with_ymd_and_hms(2024, 4, 21, 15, 0, 0).unwrap(),
            temperature_c: 12.0,
            symbol: "cloud".to_string(),
        }];

        let card = WeatherCard::from_report(&report, celsius_units(), now);
        assert_eq!(card.hourly.len(), 1);
        assert_eq!(card.hourly[0].time, "Now");
    }

    #[test]
    fn hourly_caps_at_twenty_four() {
        let h = Utc.with_ymd_and_hms(2024, 4, 21, 0, 0, 0).unwrap();
        let report = hourly_report(h, 40);
        let card = WeatherCard::from_report(&report, celsius_units(), h);

        assert_eq!(card.hourly.len(), HOURLY_SLOTS);
        assert_eq!(card.hourly[0].time, "Now");
        // 23 hours after midnight is 11PM
        assert_eq!(card.hourly[23].time, "11PM");
    }

    #[test]
    fn only_the_matching_day_and_hour_is_now() {
        let h = Utc.with_ymd_and_hms(2024, 4, 21, 23, 0, 0).unwrap();
        // Crosses midnight: 11PM today, then hours of the next day.
        let report = hourly_report(h, 3);
        let card = WeatherCard::from_report(&report, celsius_units(), h);

        let times: Vec<&str> = card.hourly.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["Now", "12AM", "1AM"]);
    }

    #[test]
    fn fractional_offset_compares_local_calendar_hours() {
        // UTC+5:30: provider hours land mid-hour in local time, so epoch
        // buckets and local calendar hours disagree.
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let now = offset.with_ymd_and_hms(2024, 4, 21, 16, 10, 0).unwrap();

        let mut report = sample_report();
        report.hourly = vec![
            // 10:00 UTC = 15:30 local, the previous local hour
            HourRecord {
                time: Utc.with_ymd_and_hms(2024, 4, 21, 10, 0, 0).unwrap(),
                temperature_c: 11.0,
                symbol: "sun.max".to_string(),
            },
            // 11:00 UTC = 16:30 local, the current local hour
            HourRecord {
                time: Utc.with_ymd_and_hms(2024, 4, 21, 11, 0, 0).unwrap(),
                temperature_c: 12.0,
                symbol: "sun.max".to_string(),
            },
        ];

        let card = WeatherCard::from_report(&report, celsius_units(), now);

        let times: Vec<&str> = card.hourly.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["Now"]);
        assert_eq!(card.hourly[0].temperature, "12°");
    }

    #[test]
    fn daily_labels_today_and_caps_at_ten() {
        let now = Utc.with_ymd_and_hms(2024, 4, 21, 15, 0, 0).unwrap();
        let mut report = sample_report();
        report.daily = (0..12)
            .map(|i| DayRecord {
                date: now + Duration::days(i),
                low_c: 8.0,
                high_c: 18.0,
                symbol: "cloud.sun".to_string(),
            })
            .collect();

        let card = WeatherCard::from_report(&report, celsius_units(), now);

        assert_eq!(card.daily.len(), DAILY_SLOTS);
        assert_eq!(card.daily[0].day, "Today");
        // 2024-04-22 is a Monday
        assert_eq!(card.daily[1].day, "Mon");
        assert_eq!(card.daily[0].low, "8°");
        assert_eq!(card.daily[0].high, "18°");
        assert_eq!(card.high_low_abbrev, "H: 18°  /  L: 8°");
        assert_eq!(card.high_low_full, "High: 18°  /  Low: 8°");
    }

    #[test]
    fn empty_daily_formats_from_zero() {
        let now = Utc.with_ymd_and_hms(2024, 4, 21, 15, 0, 0).unwrap();
        let card = WeatherCard::from_report(&sample_report(), celsius_units(), now);
        assert_eq!(card.high_temp, "0°");
        assert_eq!(card.low_temp, "0°");
        assert!(card.daily.is_empty());
    }

    #[test]
    fn parse_degrees_roundtrip_and_fallback() {
        assert_eq!(parse_degrees("72°"), 72.0);
        assert_eq!(parse_degrees("-5°"), -5.0);
        assert_eq!(parse_degrees(" 18° "), 18.0);
        assert_eq!(parse_degrees("garbage"), 0.0);
        assert_eq!(parse_degrees(""), 0.0);
    }
}
