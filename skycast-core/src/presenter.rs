use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::card::WeatherCard;
use crate::locations;
use crate::provider::WeatherProvider;
use crate::units::DisplayUnits;

/// Observable presenter state. Published as a whole through a watch
/// channel; subscribers always see a consistent snapshot.
#[derive(Debug, Clone)]
pub struct WeatherState {
    pub card: WeatherCard,
    pub is_loading: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for WeatherState {
    fn default() -> Self {
        let home = &locations::all()[0];
        Self {
            card: WeatherCard::default(),
            is_loading: false,
            latitude: home.latitude,
            longitude: home.longitude,
        }
    }
}

/// Owns the display-unit configuration, the selected coordinates and the
/// latest card, and republishes them after each fetch.
pub struct WeatherPresenter {
    provider: Arc<dyn WeatherProvider>,
    units: DisplayUnits,
    state: watch::Sender<WeatherState>,
    generation: AtomicU64,
}

impl WeatherPresenter {
    pub fn new(provider: Arc<dyn WeatherProvider>, units: DisplayUnits) -> Self {
        let (state, _) = watch::channel(WeatherState::default());
        Self { provider, units, state, generation: AtomicU64::new(0) }
    }

    /// Receiver that observes every published state change.
    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> WeatherState {
        self.state.borrow().clone()
    }

    pub fn units(&self) -> DisplayUnits {
        self.units
    }

    /// Fetch a snapshot for the given coordinates and republish the card.
    ///
    /// Coordinates are not validated; out-of-range values go to the
    /// provider, which may fail. On failure the loading flag is cleared and
    /// the previous card stays untouched. If another fetch starts while
    /// this one is awaiting the provider, the stale result is discarded:
    /// the last *initiated* fetch wins.
    pub async fn fetch_weather(&self, latitude: f64, longitude: f64) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(latitude, longitude, "fetching weather");

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.latitude = latitude;
            s.longitude = longitude;
        });

        let result = self.provider.get_weather(latitude, longitude).await;

        let card = match result {
            Ok(report) => Some(WeatherCard::from_report(&report, self.units, Local::now())),
            Err(err) => {
                warn!(error = %err, "weather fetch failed");
                None
            }
        };
        let fetched = card.is_some();

        // The generation check runs inside the publish itself; a fetch that
        // starts after this one completes can't have its state overwritten
        // by this result, and a stale failure can't clear its loading flag.
        let applied = self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            if let Some(card) = card {
                s.card = card;
            }
            s.is_loading = false;
            true
        });

        if !applied {
            debug!(generation, "discarding stale weather fetch result");
        } else if fetched {
            info!("completed weather fetch");
        }
    }
}
