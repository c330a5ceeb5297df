use std::fmt;

use thiserror::Error;

/// A named entry in the static location registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub id: u32,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// The registry is fixed at process start; ids are dense and match
/// declaration order. The two highest ids are sentinels: "current device
/// location" (its coordinates are a placeholder until a location service
/// supplies real ones) and "custom location" (opens the coordinate-entry
/// form instead of a direct fetch).
static LOCATIONS: [Location; 7] = [
    Location { id: 0, name: "Park, CA", latitude: 37.334606, longitude: -122.009102 },
    Location { id: 1, name: "Jacksonville, FL", latitude: 30.332184, longitude: -81.655647 },
    Location { id: 2, name: "Albany, NY", latitude: 42.652580, longitude: -73.756233 },
    Location { id: 3, name: "Houston, TX", latitude: 29.760799, longitude: -95.369507 },
    Location { id: 4, name: "Anchorage, AK", latitude: 61.216579, longitude: -149.899597 },
    Location { id: 5, name: "Current Loc {N/A}", latitude: 37.334606, longitude: -122.009102 },
    Location { id: 6, name: "Custom Location", latitude: 0.0, longitude: 0.0 },
];

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("No location with id {0}. Run `skycast locations` to list valid ids.")]
    NotFound(u32),
}

/// All registry entries, in declaration order.
pub fn all() -> &'static [Location] {
    &LOCATIONS
}

/// Resolve a location id to its registry entry.
pub fn resolve(id: u32) -> Result<&'static Location, LocationError> {
    LOCATIONS.iter().find(|loc| loc.id == id).ok_or(LocationError::NotFound(id))
}

/// Id of the "current device location" sentinel (second-highest id).
pub fn current_location_id() -> u32 {
    (LOCATIONS.len() - 2) as u32
}

/// Id of the "custom coordinates" sentinel (highest id).
pub fn custom_location_id() -> u32 {
    (LOCATIONS.len() - 1) as u32
}

impl Location {
    pub fn is_current_location(&self) -> bool {
        self.id == current_location_id()
    }

    pub fn is_custom(&self) -> bool {
        self.id == custom_location_id()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_declared_coordinates() {
        let loc = resolve(0).expect("id 0 must exist");
        assert_eq!(loc.name, "Park, CA");
        assert_eq!(loc.latitude, 37.334606);
        assert_eq!(loc.longitude, -122.009102);

        let loc = resolve(4).expect("id 4 must exist");
        assert_eq!(loc.name, "Anchorage, AK");
        assert_eq!(loc.latitude, 61.216579);
        assert_eq!(loc.longitude, -149.899597);
    }

    #[test]
    fn resolve_unknown_id_errors() {
        let err = resolve(99).unwrap_err();
        assert!(err.to_string().contains("No location with id 99"));
    }

    #[test]
    fn ids_are_dense_and_ordered() {
        for (i, loc) in all().iter().enumerate() {
            assert_eq!(loc.id, i as u32);
        }
    }

    #[test]
    fn sentinels_are_the_two_highest_ids() {
        let n = all().len() as u32;
        assert_eq!(current_location_id(), n - 2);
        assert_eq!(custom_location_id(), n - 1);

        let current = resolve(current_location_id()).unwrap();
        assert!(current.is_current_location());
        assert!(!current.is_custom());

        let custom = resolve(custom_location_id()).unwrap();
        assert!(custom.is_custom());
        assert!(!custom.is_current_location());
    }
}
