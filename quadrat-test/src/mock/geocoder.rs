//! Mock reverse geocoder backed by bounding boxes

use quadrat_core::Country;
use quadrat_lookup::Geocoder;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A latitude/longitude box assigned to one country
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
    pub country: Country,
}

impl Region {
    pub fn new(south: f64, north: f64, west: f64, east: f64, country: Country) -> Self {
        Self {
            south,
            north,
            west,
            east,
            country,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.south..=self.north).contains(&latitude) && (self.west..=self.east).contains(&longitude)
    }
}

fn country(code: &str) -> Country {
    Country::from_iso_code(code).unwrap_or_else(|| panic!("unknown ISO code {}", code))
}

/// Geocoder that answers from an ordered list of regions; the first
/// containing region wins, so smaller regions go before the ones they overlap
pub struct MockGeocoder {
    regions: Vec<Region>,
    calls: AtomicUsize,
}

impl MockGeocoder {
    /// No regions: every point is unresolved
    pub fn empty() -> Self {
        Self {
            regions: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Coarse boxes around the places the test suites use
    pub fn new() -> Self {
        Self::empty()
            // Zealand before Sweden, so Copenhagen is Danish
            .with_region(Region::new(54.5, 57.8, 8.0, 12.7, Country::DENMARK))
            .with_region(Region::new(55.3, 69.1, 11.0, 24.2, Country::SWEDEN))
            // Isle of Man and Northern Ireland before Ireland and Great Britain
            .with_region(Region::new(54.0, 54.45, -4.85, -4.3, Country::ISLE_OF_MAN))
            .with_region(Region::new(54.0, 55.3, -8.2, -5.4, Country::UNITED_KINGDOM))
            .with_region(Region::new(51.4, 55.4, -10.5, -6.0, Country::IRELAND))
            .with_region(Region::new(49.9, 60.9, -8.2, 1.8, Country::UNITED_KINGDOM))
            .with_region(Region::new(-21.4, -20.8, 55.2, 55.9, country("RE")))
            .with_region(Region::new(42.3, 51.1, -4.8, 8.2, Country::FRANCE))
            .with_region(Region::new(47.2, 55.1, 5.8, 15.1, Country::GERMANY))
            .with_region(Region::new(50.7, 53.6, 3.3, 7.2, Country::NETHERLANDS))
            .with_region(Region::new(58.0, 71.2, 4.5, 31.1, country("NO")))
            // Southern Ontario before the contiguous United States
            .with_region(Region::new(41.6, 46.0, -83.5, -74.3, Country::CANADA))
            .with_region(Region::new(49.0, 83.1, -141.0, -52.6, Country::CANADA))
            .with_region(Region::new(24.5, 49.0, -125.0, -66.9, Country::UNITED_STATES))
            .with_region(Region::new(-43.7, -10.6, 113.0, 153.7, Country::AUSTRALIA))
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// Number of lookups made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for MockGeocoder {
    fn country_at(&self, latitude: f64, longitude: f64) -> Option<Country> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.regions
            .iter()
            .find(|r| r.contains(latitude, longitude))
            .map(|r| r.country)
    }
}
