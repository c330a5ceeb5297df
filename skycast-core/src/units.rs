use serde::{Deserialize, Serialize};

/// Display unit for temperature-like values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn from_celsius(self, temp_c: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => temp_c,
            TemperatureUnit::Fahrenheit => temp_c * 9.0 / 5.0 + 32.0,
        }
    }
}

/// Display unit for barometric pressure. Providers report in inches of
/// mercury internally; conversion happens at display time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    #[default]
    #[serde(rename = "inhg")]
    InchesOfMercury,
    #[serde(rename = "mb")]
    Millibars,
}

pub const MB_PER_INHG: f64 = 33.863_886;

impl PressureUnit {
    pub fn from_inhg(self, pressure_inhg: f64) -> f64 {
        match self {
            PressureUnit::InchesOfMercury => pressure_inhg,
            PressureUnit::Millibars => pressure_inhg * MB_PER_INHG,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            PressureUnit::InchesOfMercury => "inHg",
            PressureUnit::Millibars => "mb",
        }
    }
}

/// Unit configuration for the weather card. Fixed defaults; there is no
/// runtime unit switch on the interactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisplayUnits {
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
}

pub mod speed {
    const MPS_PER_MPH: f64 = 0.447_04;

    pub fn mps_to_mph(mps: f64) -> f64 {
        mps / MPS_PER_MPH
    }
}

pub mod direction {
    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];

    pub fn degree_to_compass(deg: f64) -> &'static str {
        let deg = (deg % 360.0 + 360.0) % 360.0;
        let idx = ((deg / 22.5 + 0.5) as usize) % 16;
        COMPASS[idx]
    }
}
