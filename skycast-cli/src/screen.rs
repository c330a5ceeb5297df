//! Text rendering for the weather card: current-conditions header,
//! 24-hour strip, 10-day list with temperature-range bars, and the
//! wind/pressure/humidity tiles.

use chrono::Local;
use skycast_core::{DaySlot, HourSlot, PressureColor, WeatherState, card};

const BAR_WIDTH: usize = 16;

pub fn render(title: &str, state: &WeatherState) -> String {
    let c = &state.card;
    let mut out = String::new();

    out.push_str(&format!("  {title}\n"));
    let as_of = c.as_of.with_timezone(&Local);
    out.push_str(&format!("  {}\n\n", as_of.format("%b %-d, %Y @ %-I:%M %p")));

    out.push_str(&format!("  {}\n", c.temperature));
    if !c.condition.is_empty() {
        out.push_str(&format!("  CURRENTLY {}\n", c.condition.to_uppercase()));
    }
    out.push('\n');

    if !c.hourly.is_empty() {
        out.push_str("  24-HOUR FORECAST\n");
        out.push_str(&hourly_strip(&c.hourly));
        out.push('\n');
    }

    if !c.daily.is_empty() {
        out.push_str("  10-DAY FORECAST\n");
        out.push_str(&daily_list(&c.daily));
        out.push('\n');
    }

    out.push_str(&format!("  TEMP      {}\n", c.high_low_abbrev));
    out.push_str(&format!("  HUMIDITY  {:<9} DEW POINT {}\n", c.humidity, c.dew_point));
    out.push_str(&format!(
        "  WIND      {} {} at {}, gusts {}\n",
        glyph(&c.wind_direction_icon),
        c.wind_direction,
        c.wind_speed,
        c.wind_gust
    ));
    out.push_str(&format!(
        "  PRESSURE  {} {} {}\n",
        c.pressure,
        glyph(&c.pressure_trend_icon),
        pressure_badge(&c.pressure_state, c.pressure_color)
    ));

    out
}

fn hourly_strip(slots: &[HourSlot]) -> String {
    let mut out = String::new();
    for row in slots.chunks(8) {
        let mut times = String::new();
        let mut icons = String::new();
        let mut temps = String::new();
        for slot in row {
            times.push_str(&format!("{:>6}", slot.time));
            icons.push_str(&format!("{:>6}", glyph(&slot.icon)));
            temps.push_str(&format!("{:>6}", slot.temperature));
        }
        out.push_str(&format!("  {times}\n  {icons}\n  {temps}\n"));
    }
    out
}

fn daily_list(days: &[DaySlot]) -> String {
    // The range bars need raw values; everything on the card is a
    // formatted string, so parse the low/high back.
    let lows: Vec<f64> = days.iter().map(|d| card::parse_degrees(&d.low)).collect();
    let highs: Vec<f64> = days.iter().map(|d| card::parse_degrees(&d.high)).collect();
    let span_low = lows.iter().copied().fold(f64::INFINITY, f64::min);
    let span_high = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut out = String::new();
    for (day, (&low, &high)) in days.iter().zip(lows.iter().zip(&highs)) {
        out.push_str(&format!(
            "  {:<6} {}  {:>5} {} {:>5}\n",
            day.day,
            glyph(&day.icon),
            day.low,
            range_bar(low, high, span_low, span_high),
            day.high
        ));
    }
    out
}

/// Position a low..high segment inside the whole window's span.
fn range_bar(low: f64, high: f64, span_low: f64, span_high: f64) -> String {
    let span = (span_high - span_low).max(1.0);
    let start = ((((low - span_low) / span) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH - 1);
    let end = ((((high - span_low) / span) * BAR_WIDTH as f64).round() as usize)
        .clamp(start + 1, BAR_WIDTH);

    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    for i in 0..BAR_WIDTH {
        bar.push(if i >= start && i < end { '█' } else { '░' });
    }
    bar
}

fn pressure_badge(state: &str, color: PressureColor) -> String {
    if state.is_empty() {
        return String::new();
    }
    match color {
        PressureColor::Red => format!("\x1b[31m{state}\x1b[0m"),
        PressureColor::Blue => format!("\x1b[34m{state}\x1b[0m"),
        PressureColor::White => state.to_string(),
    }
}

fn glyph(icon: &str) -> &'static str {
    match icon {
        "sun.max" => "☀",
        "cloud.sun" => "⛅",
        "cloud" => "☁",
        "cloud.fog" => "≡",
        "cloud.drizzle" => "🌦",
        "cloud.rain" => "🌧",
        "cloud.heavyrain" => "🌧",
        "snowflake" => "❄",
        "cloud.sleet" => "🌨",
        "cloud.bolt" => "⛈",
        "arrow.up" => "↑",
        "arrow.down" => "↓",
        "equal" => "=",
        "arrow.up.circle" => "↑",
        "arrow.up.right.circle" => "↗",
        "arrow.right.circle" => "→",
        "arrow.down.right.circle" => "↘",
        "arrow.down.circle" => "↓",
        "arrow.down.left.circle" => "↙",
        "arrow.left.circle" => "←",
        "arrow.up.left.circle" => "↖",
        _ => " ",
    }
}
