/// Data quality flags attached to interpreted records
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Unordered issue collection; duplicates collapse
pub type IssueSet = BTreeSet<IssueCode>;

/// Closed vocabulary of interpretation issues.
///
/// Persisted downstream by name, so variants are only ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    CountryInvalid,
    CountryMismatch,
    CountryCoordinateMismatch,
    CountryDerivedFromCoordinates,
    CoordinateInvalid,
    CoordinateOutOfRange,
    CoordinateRounded,
    PresumedNegatedLatitude,
    PresumedNegatedLongitude,
    PresumedSwappedCoordinate,
    GeodeticDatumAssumedWgs84,
    ElevationUnlikely,
    ElevationMinMaxSwapped,
    ElevationNotMetric,
    ElevationNonNumeric,
    DepthUnlikely,
    DepthMinMaxSwapped,
    DepthNotMetric,
    DepthNonNumeric,
    RecordedDateInvalid,
    RecordedDateUnlikely,
    IdentifiedDateInvalid,
    IdentifiedDateUnlikely,
    ModifiedDateInvalid,
    ModifiedDateUnlikely,
    TaxonMatchNone,
    TaxonMatchFuzzy,
    #[serde(rename = "TAXON_MATCH_HIGHERRANK")]
    TaxonMatchHigherRank,
    /// A reference lookup could not be completed; not the same as "no match"
    InterpretationError,
}

impl IssueCode {
    pub const ALL: [IssueCode; 29] = [
        IssueCode::CountryInvalid,
        IssueCode::CountryMismatch,
        IssueCode::CountryCoordinateMismatch,
        IssueCode::CountryDerivedFromCoordinates,
        IssueCode::CoordinateInvalid,
        IssueCode::CoordinateOutOfRange,
        IssueCode::CoordinateRounded,
        IssueCode::PresumedNegatedLatitude,
        IssueCode::PresumedNegatedLongitude,
        IssueCode::PresumedSwappedCoordinate,
        IssueCode::GeodeticDatumAssumedWgs84,
        IssueCode::ElevationUnlikely,
        IssueCode::ElevationMinMaxSwapped,
        IssueCode::ElevationNotMetric,
        IssueCode::ElevationNonNumeric,
        IssueCode::DepthUnlikely,
        IssueCode::DepthMinMaxSwapped,
        IssueCode::DepthNotMetric,
        IssueCode::DepthNonNumeric,
        IssueCode::RecordedDateInvalid,
        IssueCode::RecordedDateUnlikely,
        IssueCode::IdentifiedDateInvalid,
        IssueCode::IdentifiedDateUnlikely,
        IssueCode::ModifiedDateInvalid,
        IssueCode::ModifiedDateUnlikely,
        IssueCode::TaxonMatchNone,
        IssueCode::TaxonMatchFuzzy,
        IssueCode::TaxonMatchHigherRank,
        IssueCode::InterpretationError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountryInvalid => "COUNTRY_INVALID",
            Self::CountryMismatch => "COUNTRY_MISMATCH",
            Self::CountryCoordinateMismatch => "COUNTRY_COORDINATE_MISMATCH",
            Self::CountryDerivedFromCoordinates => "COUNTRY_DERIVED_FROM_COORDINATES",
            Self::CoordinateInvalid => "COORDINATE_INVALID",
            Self::CoordinateOutOfRange => "COORDINATE_OUT_OF_RANGE",
            Self::CoordinateRounded => "COORDINATE_ROUNDED",
            Self::PresumedNegatedLatitude => "PRESUMED_NEGATED_LATITUDE",
            Self::PresumedNegatedLongitude => "PRESUMED_NEGATED_LONGITUDE",
            Self::PresumedSwappedCoordinate => "PRESUMED_SWAPPED_COORDINATE",
            Self::GeodeticDatumAssumedWgs84 => "GEODETIC_DATUM_ASSUMED_WGS84",
            Self::ElevationUnlikely => "ELEVATION_UNLIKELY",
            Self::ElevationMinMaxSwapped => "ELEVATION_MIN_MAX_SWAPPED",
            Self::ElevationNotMetric => "ELEVATION_NOT_METRIC",
            Self::ElevationNonNumeric => "ELEVATION_NON_NUMERIC",
            Self::DepthUnlikely => "DEPTH_UNLIKELY",
            Self::DepthMinMaxSwapped => "DEPTH_MIN_MAX_SWAPPED",
            Self::DepthNotMetric => "DEPTH_NOT_METRIC",
            Self::DepthNonNumeric => "DEPTH_NON_NUMERIC",
            Self::RecordedDateInvalid => "RECORDED_DATE_INVALID",
            Self::RecordedDateUnlikely => "RECORDED_DATE_UNLIKELY",
            Self::IdentifiedDateInvalid => "IDENTIFIED_DATE_INVALID",
            Self::IdentifiedDateUnlikely => "IDENTIFIED_DATE_UNLIKELY",
            Self::ModifiedDateInvalid => "MODIFIED_DATE_INVALID",
            Self::ModifiedDateUnlikely => "MODIFIED_DATE_UNLIKELY",
            Self::TaxonMatchNone => "TAXON_MATCH_NONE",
            Self::TaxonMatchFuzzy => "TAXON_MATCH_FUZZY",
            Self::TaxonMatchHigherRank => "TAXON_MATCH_HIGHERRANK",
            Self::InterpretationError => "INTERPRETATION_ERROR",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueCode {
    type Err = crate::QuadratError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        IssueCode::ALL
            .iter()
            .copied()
            .find(|issue| issue.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| crate::QuadratError::Parse(format!("Unknown issue code: {}", s)))
    }
}
