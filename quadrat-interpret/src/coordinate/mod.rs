//! Coordinate interpretation
//!
//! Turns latitude and longitude text into a validated WGS84 point. Common
//! transcription errors (a lost minus sign, swapped axes) are repaired when a
//! corrected point lands in the country the record claims, and the country
//! the point actually falls in is cross-checked against that claim.

pub mod parse;

pub use parse::{is_wgs84, parse_coordinate, round_to, split_verbatim, Axis};

use quadrat_core::{Confidence, CoordinatePoint, Country, IssueCode, IssueSet, ParseOutcome};
use quadrat_lookup::Geocoder;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_DECIMALS: u32 = 5;

/// One way of reading the parsed pair, with the issues using it implies
#[derive(Debug, Clone, Copy)]
struct Candidate {
    latitude: f64,
    longitude: f64,
    issues: &'static [IssueCode],
}

impl Candidate {
    fn point(&self) -> CoordinatePoint {
        CoordinatePoint::new(self.latitude, self.longitude)
    }

    fn in_range(&self) -> bool {
        self.point().in_range()
    }

    fn same_point(&self, other: &Candidate) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

/// As given first, then the corrections in the order they are tried
fn candidates(latitude: f64, longitude: f64) -> Vec<Candidate> {
    let all = [
        Candidate {
            latitude,
            longitude,
            issues: &[],
        },
        Candidate {
            latitude: -latitude,
            longitude,
            issues: &[IssueCode::PresumedNegatedLatitude],
        },
        Candidate {
            latitude,
            longitude: -longitude,
            issues: &[IssueCode::PresumedNegatedLongitude],
        },
        Candidate {
            latitude: -latitude,
            longitude: -longitude,
            issues: &[
                IssueCode::PresumedNegatedLatitude,
                IssueCode::PresumedNegatedLongitude,
            ],
        },
        Candidate {
            latitude: longitude,
            longitude: latitude,
            issues: &[IssueCode::PresumedSwappedCoordinate],
        },
    ];

    // Negating a zero or swapping equal values reproduces an earlier point
    let mut unique: Vec<Candidate> = Vec::with_capacity(all.len());
    for candidate in all {
        if !unique.iter().any(|c| c.same_point(&candidate)) {
            unique.push(candidate);
        }
    }
    unique
}

fn present(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Degree/minute/second arithmetic leaves noise far below any rounding step
fn was_rounded(raw: f64, rounded: f64) -> bool {
    (raw - rounded).abs() > 1e-9
}

fn matches_known(geocoded: Option<Country>, known: Country) -> bool {
    geocoded
        .map(|g| g == known || g.is_confused_with(known))
        .unwrap_or(false)
}

pub struct CoordinateInterpreter {
    geocoder: Arc<dyn Geocoder>,
    decimals: u32,
}

impl CoordinateInterpreter {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Interpret a latitude/longitude pair.
    ///
    /// `known` is the country the record states, if any. It is kept unless
    /// the point lies in a territory commonly confused with it.
    pub fn interpret(
        &self,
        latitude: Option<&str>,
        longitude: Option<&str>,
        datum: Option<&str>,
        known: Option<Country>,
    ) -> ParseOutcome<CoordinatePoint> {
        let (lat_text, lng_text) = match (present(latitude), present(longitude)) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return ParseOutcome::fail(),
        };

        let (lat, lng) = match (
            parse_coordinate(lat_text, Axis::Latitude),
            parse_coordinate(lng_text, Axis::Longitude),
        ) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                debug!("Unparsable coordinates ({}, {})", lat_text, lng_text);
                return ParseOutcome::fail_with(IssueCode::CoordinateInvalid);
            }
        };

        let mut issues = IssueSet::new();
        let (rounded_lat, rounded_lng) = (round_to(lat, self.decimals), round_to(lng, self.decimals));
        if was_rounded(lat, rounded_lat) || was_rounded(lng, rounded_lng) {
            issues.insert(IssueCode::CoordinateRounded);
        }

        let (chosen, geocoded) = match self.select(rounded_lat, rounded_lng, known) {
            Some(selection) => selection,
            None => return ParseOutcome::fail_with(IssueCode::CoordinateOutOfRange),
        };
        if !chosen.issues.is_empty() {
            debug!(
                "Corrected ({}, {}) to ({}, {}): {:?}",
                rounded_lat, rounded_lng, chosen.latitude, chosen.longitude, chosen.issues
            );
        }
        issues.extend(chosen.issues.iter().copied());

        let country = match (known, geocoded) {
            (Some(k), Some(g)) if g == k => Some(k),
            (Some(k), Some(g)) if g.is_confused_with(k) => {
                issues.insert(IssueCode::CountryDerivedFromCoordinates);
                Some(g)
            }
            (Some(k), Some(_)) => {
                issues.insert(IssueCode::CountryCoordinateMismatch);
                Some(k)
            }
            (Some(k), None) => Some(k),
            (None, Some(g)) => {
                issues.insert(IssueCode::CountryDerivedFromCoordinates);
                Some(g)
            }
            (None, None) => None,
        };

        if !datum.map(is_wgs84).unwrap_or(false) {
            issues.insert(IssueCode::GeodeticDatumAssumedWgs84);
        }

        let confidence = if chosen.issues.is_empty() {
            Confidence::Definite
        } else {
            Confidence::Probable
        };
        ParseOutcome::Success {
            payload: CoordinatePoint {
                latitude: chosen.latitude,
                longitude: chosen.longitude,
                country,
            },
            confidence,
            issues,
        }
    }

    /// Interpret a single combined text such as `"43.65, -79.4"` or `"43°39'N 79°24'W"`
    pub fn interpret_verbatim(
        &self,
        coordinates: Option<&str>,
        datum: Option<&str>,
        known: Option<Country>,
    ) -> ParseOutcome<CoordinatePoint> {
        let text = match present(coordinates) {
            Some(text) => text,
            None => return ParseOutcome::fail(),
        };
        match split_verbatim(text) {
            Some((lat, lng)) => self.interpret(Some(lat), Some(lng), datum, known),
            None => {
                debug!("Cannot split verbatim coordinates {:?}", text);
                ParseOutcome::fail_with(IssueCode::CoordinateInvalid)
            }
        }
    }

    /// Pick a candidate and its geocoded country; None when nothing is in range
    fn select(
        &self,
        latitude: f64,
        longitude: f64,
        known: Option<Country>,
    ) -> Option<(Candidate, Option<Country>)> {
        let in_range: Vec<Candidate> = candidates(latitude, longitude)
            .into_iter()
            .filter(Candidate::in_range)
            .collect();
        let first = *in_range.first()?;

        let known = match known {
            Some(known) => known,
            None => return Some((first, self.geocoder.country_at(first.latitude, first.longitude))),
        };

        let mut geocoded = Vec::with_capacity(in_range.len());
        for candidate in &in_range {
            let country = self.geocoder.country_at(candidate.latitude, candidate.longitude);
            if matches_known(country, known) {
                return Some((*candidate, country));
            }
            geocoded.push(country);
        }

        // Nothing lands in the stated country: keep the point as given when
        // possible and let the caller see the mismatch
        Some((first, geocoded.first().copied().flatten()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<Country>);

    impl Geocoder for Fixed {
        fn country_at(&self, _latitude: f64, _longitude: f64) -> Option<Country> {
            self.0
        }
    }

    fn interpreter(country: Option<Country>) -> CoordinateInterpreter {
        CoordinateInterpreter::new(Arc::new(Fixed(country)))
    }

    #[test]
    fn test_candidates_skip_duplicates() {
        assert_eq!(candidates(10.0, 20.0).len(), 5);
        assert_eq!(candidates(0.0, 20.0).len(), 3);
        assert_eq!(candidates(5.0, 5.0).len(), 4);
    }

    #[test]
    fn test_blank_inputs_fail_silently() {
        let interp = interpreter(None);
        for (lat, lng) in [(None, None), (Some("45"), None), (Some(" "), Some("10"))] {
            let outcome = interp.interpret(lat, lng, None, None);
            assert!(!outcome.is_success());
            assert!(outcome.issues().is_empty());
        }
    }

    #[test]
    fn test_unparsable_is_invalid() {
        let outcome = interpreter(None).interpret(Some("asdf"), Some("qwer"), None, None);
        assert!(outcome.has_issue(IssueCode::CoordinateInvalid));
        assert!(outcome.payload().is_none());
    }

    #[test]
    fn test_swap_rescues_out_of_range_latitude() {
        let outcome = interpreter(None).interpret(Some("120.5"), Some("45.2"), None, None);
        let point = outcome.payload().unwrap();
        assert_eq!((point.latitude, point.longitude), (45.2, 120.5));
        assert!(outcome.has_issue(IssueCode::PresumedSwappedCoordinate));
        assert_eq!(outcome.confidence(), Some(Confidence::Probable));
    }

    #[test]
    fn test_wgs84_datum_adds_no_issue() {
        let outcome = interpreter(Some(Country::CANADA)).interpret(
            Some("43.65"),
            Some("-79.4"),
            Some("EPSG:4326"),
            Some(Country::CANADA),
        );
        assert!(outcome.issues().is_empty());
        assert_eq!(outcome.confidence(), Some(Confidence::Definite));
    }

    #[test]
    fn test_unresolved_geocode_keeps_known_country() {
        let outcome = interpreter(None).interpret(Some("10"), Some("10"), None, Some(Country::FRANCE));
        assert_eq!(outcome.payload().unwrap().country, Some(Country::FRANCE));
        assert!(!outcome.has_issue(IssueCode::CountryCoordinateMismatch));
    }
}
