//! Geolocation collaborator
//!
//! Looked up before the store's locked update and attached to the attack
//! record; a miss degrades to `None` and never blocks ingestion.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::models::GeoLocation;

pub trait GeoLocator: Send + Sync {
    fn locate(&self, ip: &str) -> Option<GeoLocation>;
}

/// Prefix table over the documentation/example ranges the simulators emit.
/// Real deployments would swap in a GeoIP database behind the same trait.
const PREFIX_TABLE: &[(&str, &str, &str, f64, f64)] = &[
    ("203.0.113.", "Australia", "Sydney", -33.8688, 151.2093),
    ("198.51.100.", "United States", "Chicago", 41.8781, -87.6298),
    ("192.0.2.", "Germany", "Berlin", 52.5200, 13.4050),
    ("100.64.", "Brazil", "Sao Paulo", -23.5505, -46.6333),
    ("185.220.", "Netherlands", "Amsterdam", 52.3676, 4.9041),
];

pub struct StaticGeoLocator {
    cache: RwLock<HashMap<String, Option<GeoLocation>>>,
}

impl StaticGeoLocator {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn lookup(ip: &str) -> Option<GeoLocation> {
        PREFIX_TABLE
            .iter()
            .find(|(prefix, ..)| ip.starts_with(prefix))
            .map(|(_, country, city, lat, lon)| GeoLocation {
                country: country.to_string(),
                city: city.to_string(),
                lat: *lat,
                lon: *lon,
            })
    }
}

impl Default for StaticGeoLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoLocator for StaticGeoLocator {
    fn locate(&self, ip: &str) -> Option<GeoLocation> {
        if let Some(cached) = self.cache.read().get(ip) {
            return cached.clone();
        }

        let result = Self::lookup(ip);
        self.cache.write().insert(ip.to_string(), result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_prefix_resolves() {
        let geo = StaticGeoLocator::new();
        let loc = geo.locate("203.0.113.42").unwrap();
        assert_eq!(loc.city, "Sydney");
    }

    #[test]
    fn test_unknown_ip_is_none_and_cached() {
        let geo = StaticGeoLocator::new();
        assert!(geo.locate("10.1.2.3").is_none());
        assert!(geo.cache.read().contains_key("10.1.2.3"));
        // Cached miss stays a miss
        assert!(geo.locate("10.1.2.3").is_none());
    }
}
