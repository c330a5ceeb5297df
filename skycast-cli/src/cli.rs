use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skycast_core::{
    Config, WeatherPresenter, locations,
    provider::{self, ProviderId},
};

use crate::screen;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Single-screen weather display")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the weather card for a registry location or explicit coordinates.
    Show {
        /// Location id from `skycast locations`; prompts when omitted.
        location: Option<u32>,

        /// Latitude in degrees; used together with --lon instead of a location id.
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Longitude in degrees.
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },

    /// List the location registry.
    Locations,

    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openmeteo" or "weatherapi".
        provider: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { location, lat, lon } => show(location, lat, lon).await,
            Command::Locations => {
                for loc in locations::all() {
                    println!(
                        "{:>2}  {:<20} ({:.6}, {:.6})",
                        loc.id, loc.name, loc.latitude, loc.longitude
                    );
                }
                Ok(())
            }
            Command::Configure { provider } => configure(&provider),
        }
    }
}

async fn show(location: Option<u32>, lat: Option<f64>, lon: Option<f64>) -> Result<()> {
    let config = Config::load()?;
    let provider = provider::default_provider_from_config(&config)?;
    let presenter = WeatherPresenter::new(Arc::from(provider), config.units);

    let (title, latitude, longitude) = match (lat, lon) {
        (Some(lat), Some(lon)) => (format!("Lat: {lat}, Lon: {lon}"), lat, lon),
        _ => pick_location(location, &presenter)?,
    };

    presenter.fetch_weather(latitude, longitude).await;

    print!("{}", screen::render(&title, &presenter.state()));
    Ok(())
}

fn pick_location(id: Option<u32>, presenter: &WeatherPresenter) -> Result<(String, f64, f64)> {
    let loc = match id {
        Some(id) => locations::resolve(id)?,
        None => {
            let options: Vec<&locations::Location> = locations::all().iter().collect();
            Select::new("Location:", options).prompt()?
        }
    };

    if loc.is_custom() {
        let state = presenter.state();
        let (lat, lon) = prompt_coordinates(state.latitude, state.longitude)?;
        return Ok((format!("Lat: {lat}, Lon: {lon}"), lat, lon));
    }

    if loc.is_current_location() {
        // Device location services aren't wired up; the registry entry
        // carries fallback coordinates.
        tracing::info!("device location unavailable, using registry coordinates");
    }

    Ok((loc.name.to_string(), loc.latitude, loc.longitude))
}

/// Coordinate-entry form: two free-text fields defaulting to the
/// presenter's current coordinates; unparsable input coerces to 0.0.
fn prompt_coordinates(default_lat: f64, default_lon: f64) -> Result<(f64, f64)> {
    let default_lat = default_lat.to_string();
    let default_lon = default_lon.to_string();

    let lat = Text::new("Latitude:").with_default(&default_lat).prompt()?;
    let lon = Text::new("Longitude:").with_default(&default_lon).prompt()?;

    Ok((parse_coordinate(&lat), parse_coordinate(&lon)))
}

fn parse_coordinate(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

fn configure(provider: &str) -> Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    if id == ProviderId::OpenMeteo {
        println!("Provider '{id}' needs no API key.");
        config.set_default_provider(id);
        config.save()?;
        println!("Default provider set to '{id}'.");
        return Ok(());
    }

    let api_key = Text::new("API key:").prompt()?;
    config.upsert_provider_api_key(id, api_key);
    config.save()?;

    println!("Saved configuration for provider '{id}'.");
    Ok(())
}
