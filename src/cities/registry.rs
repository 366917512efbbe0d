//! The fixed set of cities the condition classifier was trained on, with their
//! coordinates and categorical codes.

use crate::cities::error::RegistryError;
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;

/// A geographical coordinate: latitude first, longitude second.
///
/// ```
/// use daycast::LatLon;
///
/// let lagos = LatLon(6.5244, 3.3792);
/// assert_eq!(lagos.0, 6.5244);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A registered city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub location: LatLon,
    /// Categorical feature value, dense in `[0, number of cities)`.
    pub code: u32,
}

// Display order. The codes are the classifier's label encoding of the city
// column, which is alphabetical; they must not be renumbered without retraining.
const CITIES: [City; 6] = [
    City { name: "Lagos", location: LatLon(6.5244, 3.3792), code: 3 },
    City { name: "Port Harcourt", location: LatLon(4.8156, 7.0498), code: 5 },
    City { name: "Kano", location: LatLon(12.0022, 8.5927), code: 2 },
    City { name: "Abuja", location: LatLon(9.0579, 7.4951), code: 0 },
    City { name: "Ibadan", location: LatLon(7.3776, 3.9470), code: 1 },
    City { name: "Ota", location: LatLon(6.6804, 3.2356), code: 4 },
];

/// Read-only lookup of the cities known to the classifier.
///
/// The registry holds no state beyond the static table, so it is `Copy` and can be
/// shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityRegistry;

impl CityRegistry {
    pub fn new() -> Self {
        Self
    }

    /// All cities, in display order.
    pub fn cities(&self) -> &'static [City] {
        &CITIES
    }

    /// Number of distinct city codes.
    pub fn len(&self) -> usize {
        CITIES.len()
    }

    pub fn is_empty(&self) -> bool {
        CITIES.is_empty()
    }

    /// Looks a city up by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCity`] for any name outside the registry.
    ///
    /// ```
    /// use daycast::CityRegistry;
    ///
    /// let lagos = CityRegistry::new().resolve("lagos").unwrap();
    /// assert_eq!(lagos.name, "Lagos");
    /// assert!(CityRegistry::new().resolve("Atlantis").is_err());
    /// ```
    pub fn resolve(&self, name: &str) -> Result<City, RegistryError> {
        let wanted = name.trim();
        CITIES
            .iter()
            .find(|city| city.name.eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| RegistryError::UnknownCity(name.to_string()))
    }

    /// Finds the registered city closest to `location`, if one lies within
    /// `max_distance_km` (haversine distance).
    pub fn nearest(&self, location: LatLon, max_distance_km: f64) -> Result<City, RegistryError> {
        CITIES
            .iter()
            .map(|city| {
                let dist_km = distance(
                    HaversineLocation {
                        latitude: location.0,
                        longitude: location.1,
                    },
                    HaversineLocation {
                        latitude: city.location.0,
                        longitude: city.location.1,
                    },
                    Units::Kilometers,
                );
                (city, dist_km)
            })
            .filter(|(_, dist_km)| *dist_km <= max_distance_km)
            .min_by_key(|(_, dist_km)| OrderedFloat(*dist_km))
            .map(|(city, _)| *city)
            .ok_or(RegistryError::NoCityWithinRadius {
                radius: max_distance_km,
                lat: location.0,
                lon: location.1,
            })
    }
}
