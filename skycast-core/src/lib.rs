//! Core library for the `skycast` weather display.
//!
//! This crate defines:
//! - The static location registry (cities plus the two sentinel entries)
//! - Display units and conversions
//! - Abstraction over weather providers
//! - The presenter that turns provider reports into display-ready cards
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod card;
pub mod condition;
pub mod config;
pub mod locations;
pub mod model;
pub mod presenter;
pub mod provider;
pub mod units;

pub use card::{DaySlot, HourSlot, PressureColor, WeatherCard};
pub use condition::WeatherCondition;
pub use config::{Config, ProviderConfig};
pub use locations::{Location, LocationError};
pub use model::{CurrentConditions, DayRecord, HourRecord, WeatherReport};
pub use presenter::{WeatherPresenter, WeatherState};
pub use provider::{ProviderId, WeatherProvider};
pub use units::{DisplayUnits, PressureUnit, TemperatureUnit};
