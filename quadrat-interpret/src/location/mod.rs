//! Location interpretation
//!
//! Resolves the stated country, interprets coordinates against it, and
//! fills the descriptive location fields and the elevation and depth ranges.

pub mod clean;
pub mod meter_range;

pub use clean::clean_place_name;
pub use meter_range::{interpret_meter_range, parse_meters, RangeKind, DEPTH, ELEVATION};

use crate::coordinate::{parse::parse_decimal, CoordinateInterpreter};
use quadrat_core::config::LocationConfig;
use quadrat_core::{
    Continent, CoordinatePoint, Country, InterpretedRecord, IssueCode, ParseOutcome, Term,
    TermLookup, VerbatimRecord,
};
use quadrat_lookup::Geocoder;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_MAX_COORDINATE_PRECISION: f64 = 10.0;

/// Where a coordinate pair can be read from, in the order tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoordinateSource {
    Decimal,
    VerbatimPair,
    VerbatimCombined,
}

const COORDINATE_SOURCES: [CoordinateSource; 3] = [
    CoordinateSource::Decimal,
    CoordinateSource::VerbatimPair,
    CoordinateSource::VerbatimCombined,
];

pub struct LocationInterpreter {
    coordinates: CoordinateInterpreter,
    max_coordinate_precision: f64,
}

impl LocationInterpreter {
    pub fn new(coordinates: CoordinateInterpreter) -> Self {
        Self {
            coordinates,
            max_coordinate_precision: DEFAULT_MAX_COORDINATE_PRECISION,
        }
    }

    pub fn from_config(geocoder: Arc<dyn Geocoder>, config: &LocationConfig) -> Self {
        let coordinates =
            CoordinateInterpreter::new(geocoder).with_decimals(config.coordinate_decimals);
        Self::new(coordinates).with_max_coordinate_precision(config.max_coordinate_precision)
    }

    pub fn with_max_coordinate_precision(mut self, max: f64) -> Self {
        self.max_coordinate_precision = max;
        self
    }

    pub fn coordinates(&self) -> &CoordinateInterpreter {
        &self.coordinates
    }

    /// Reduce several country texts, most authoritative first, to one country.
    ///
    /// The first non-blank text decides. A later text that also parses but
    /// names another country adds `COUNTRY_MISMATCH`; a later text replaces a
    /// first one that could not be parsed, with `COUNTRY_INVALID`.
    pub fn interpret_country(values: &[Option<&str>]) -> ParseOutcome<Country> {
        let mut result: Option<ParseOutcome<Country>> = None;

        for text in values.iter().flatten().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            result = Some(match result {
                None => Country::parse(text),
                Some(current) if current.is_success() => {
                    let other = Country::parse(text);
                    match (current.payload(), other.payload()) {
                        (Some(a), Some(b)) if a != b => current.with_issue(IssueCode::CountryMismatch),
                        _ => current,
                    }
                }
                Some(_) => Country::parse(text).with_issue(IssueCode::CountryInvalid),
            });
        }

        match result {
            None => ParseOutcome::fail(),
            Some(outcome) if !outcome.is_success() => outcome.with_issue(IssueCode::CountryInvalid),
            Some(outcome) => outcome,
        }
    }

    pub fn interpret_location(&self, verbatim: &VerbatimRecord, record: &mut InterpretedRecord) {
        let country = Self::interpret_country(&[
            verbatim.value(Term::CountryCode),
            verbatim.value(Term::Country),
        ])
        .map(Country::preferred);
        let (country, issues) = country.into_parts();
        record.country = country;
        record.add_issues(&issues);

        self.interpret_coordinates(verbatim, record, country);

        record.continent = verbatim
            .value(Term::Continent)
            .and_then(|text| Continent::parse(text).into_payload());
        record.water_body = verbatim.value(Term::WaterBody).and_then(clean_place_name);
        record.state_province = verbatim.value(Term::StateProvince).and_then(clean_place_name);

        let elevation = interpret_meter_range(
            verbatim.value(Term::MinimumElevationInMeters),
            verbatim.value(Term::MaximumElevationInMeters),
            &ELEVATION,
        );
        if let Some(value) = elevation.payload() {
            record.elevation = Some(value.value);
            record.elevation_accuracy = Some(value.accuracy);
        }
        record.add_issues(elevation.issues());

        let depth = interpret_meter_range(
            verbatim.value(Term::MinimumDepthInMeters),
            verbatim.value(Term::MaximumDepthInMeters),
            &DEPTH,
        );
        if let Some(value) = depth.payload() {
            record.depth = Some(value.value);
            record.depth_accuracy = Some(value.accuracy);
        }
        record.add_issues(depth.issues());
    }

    /// None when the source's fields are absent
    fn attempt(
        &self,
        source: CoordinateSource,
        verbatim: &VerbatimRecord,
        country: Option<Country>,
    ) -> Option<ParseOutcome<CoordinatePoint>> {
        let datum = verbatim.value(Term::GeodeticDatum);
        match source {
            CoordinateSource::Decimal => Some(self.coordinates.interpret(
                verbatim.value(Term::DecimalLatitude),
                verbatim.value(Term::DecimalLongitude),
                datum,
                country,
            )),
            CoordinateSource::VerbatimPair => {
                let lat = verbatim.value(Term::VerbatimLatitude)?;
                let lng = verbatim.value(Term::VerbatimLongitude)?;
                debug!("Trying verbatim latitude/longitude for {}", verbatim.key());
                Some(self.coordinates.interpret(Some(lat), Some(lng), datum, country))
            }
            CoordinateSource::VerbatimCombined => {
                let text = verbatim.value(Term::VerbatimCoordinates)?;
                debug!("Trying verbatim coordinates for {}", verbatim.key());
                Some(self.coordinates.interpret_verbatim(Some(text), datum, country))
            }
        }
    }

    fn interpret_coordinates(
        &self,
        verbatim: &VerbatimRecord,
        record: &mut InterpretedRecord,
        country: Option<Country>,
    ) {
        let mut outcome = ParseOutcome::fail();
        for source in COORDINATE_SOURCES {
            if let Some(attempt) = self.attempt(source, verbatim, country) {
                outcome = attempt;
                if outcome.is_success() {
                    break;
                }
            }
        }

        if let Some(point) = outcome.payload() {
            record.decimal_latitude = Some(point.latitude);
            record.decimal_longitude = Some(point.longitude);

            // A point in a territory of the stated country wins over the text
            if country.is_none() || country != point.country {
                record.country = point.country;
            }

            record.coordinate_accuracy = verbatim
                .value(Term::CoordinatePrecision)
                .and_then(|text| self.coordinate_accuracy(text));
            debug!("Got lat [{}] lng [{}]", point.latitude, point.longitude);
        }

        record.add_issues(outcome.issues());
    }

    fn coordinate_accuracy(&self, text: &str) -> Option<f64> {
        let precision = parse_decimal(text)?.abs();
        if precision == 0.0 {
            return None;
        }
        if precision > self.max_coordinate_precision {
            debug!(
                "Ignoring coordinatePrecision {} above {}",
                precision, self.max_coordinate_precision
            );
            return None;
        }
        Some(precision)
    }
}
