//! Darwin Core term vocabulary.
//!
//! Records arrive keyed by qualified term names such as
//! `http://rs.tdwg.org/dwc/terms/decimalLatitude` or `dwc:decimalLatitude`;
//! everything downstream works with the closed [`Term`] enum instead.

use crate::QuadratError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Namespace a term is published under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Dwc,
    DcTerms,
    Gbif,
}

impl Namespace {
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Dwc => "dwc",
            Namespace::DcTerms => "dcterms",
            Namespace::Gbif => "gbif",
        }
    }

    pub fn uri(&self) -> &'static str {
        match self {
            Namespace::Dwc => "http://rs.tdwg.org/dwc/terms/",
            Namespace::DcTerms => "http://purl.org/dc/terms/",
            Namespace::Gbif => "http://rs.gbif.org/terms/1.0/",
        }
    }

    const ALL: [Namespace; 3] = [Namespace::Dwc, Namespace::DcTerms, Namespace::Gbif];
}

macro_rules! terms {
    ($($variant:ident => ($name:literal, $ns:ident)),+ $(,)?) => {
        /// A term the interpreters know how to read
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Term {
            $($variant),+
        }

        impl Term {
            pub const ALL: &'static [Term] = &[$(Term::$variant),+];

            /// Unqualified name, e.g. `decimalLatitude`
            pub fn simple_name(&self) -> &'static str {
                match self {
                    $(Term::$variant => $name),+
                }
            }

            pub fn namespace(&self) -> Namespace {
                match self {
                    $(Term::$variant => Namespace::$ns),+
                }
            }
        }
    };
}

terms! {
    OccurrenceId => ("occurrenceID", Dwc),
    CatalogNumber => ("catalogNumber", Dwc),
    InstitutionCode => ("institutionCode", Dwc),
    CollectionCode => ("collectionCode", Dwc),
    BasisOfRecord => ("basisOfRecord", Dwc),
    RecordedBy => ("recordedBy", Dwc),
    IdentifiedBy => ("identifiedBy", Dwc),
    Locality => ("locality", Dwc),
    County => ("county", Dwc),
    Country => ("country", Dwc),
    CountryCode => ("countryCode", Dwc),
    StateProvince => ("stateProvince", Dwc),
    Continent => ("continent", Dwc),
    WaterBody => ("waterBody", Dwc),
    DecimalLatitude => ("decimalLatitude", Dwc),
    DecimalLongitude => ("decimalLongitude", Dwc),
    VerbatimLatitude => ("verbatimLatitude", Dwc),
    VerbatimLongitude => ("verbatimLongitude", Dwc),
    VerbatimCoordinates => ("verbatimCoordinates", Dwc),
    GeodeticDatum => ("geodeticDatum", Dwc),
    CoordinatePrecision => ("coordinatePrecision", Dwc),
    CoordinateUncertaintyInMeters => ("coordinateUncertaintyInMeters", Dwc),
    MinimumElevationInMeters => ("minimumElevationInMeters", Dwc),
    MaximumElevationInMeters => ("maximumElevationInMeters", Dwc),
    MinimumDepthInMeters => ("minimumDepthInMeters", Dwc),
    MaximumDepthInMeters => ("maximumDepthInMeters", Dwc),
    EventDate => ("eventDate", Dwc),
    Year => ("year", Dwc),
    Month => ("month", Dwc),
    Day => ("day", Dwc),
    VerbatimEventDate => ("verbatimEventDate", Dwc),
    DateIdentified => ("dateIdentified", Dwc),
    Kingdom => ("kingdom", Dwc),
    Phylum => ("phylum", Dwc),
    Class => ("class", Dwc),
    Order => ("order", Dwc),
    Family => ("family", Dwc),
    Genus => ("genus", Dwc),
    SpecificEpithet => ("specificEpithet", Dwc),
    InfraspecificEpithet => ("infraspecificEpithet", Dwc),
    ScientificName => ("scientificName", Dwc),
    ScientificNameAuthorship => ("scientificNameAuthorship", Dwc),
    TaxonRank => ("taxonRank", Dwc),
    VerbatimTaxonRank => ("verbatimTaxonRank", Dwc),
    TaxonId => ("taxonID", Dwc),
    Modified => ("modified", DcTerms),
    GenericName => ("genericName", Gbif),
}

impl Term {
    /// Fully qualified URI, e.g. `http://rs.tdwg.org/dwc/terms/year`
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.namespace().uri(), self.simple_name())
    }

    /// `prefix:name` form
    pub fn prefixed_name(&self) -> String {
        format!("{}:{}", self.namespace().prefix(), self.simple_name())
    }
}

/// Strip a known namespace URI or prefix, if any
fn unqualify(name: &str) -> &str {
    for ns in Namespace::ALL {
        if let Some(rest) = name.strip_prefix(ns.uri()) {
            return rest;
        }
        if let Some(rest) = name
            .strip_prefix(ns.prefix())
            .and_then(|r| r.strip_prefix(':'))
        {
            return rest;
        }
    }
    name
}

impl FromStr for Term {
    type Err = QuadratError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let simple = unqualify(s.trim());
        Term::ALL
            .iter()
            .copied()
            .find(|term| term.simple_name().eq_ignore_ascii_case(simple))
            .ok_or_else(|| QuadratError::Parse(format!("Unknown term: {}", s)))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.simple_name())
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Extension row types a record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extension {
    Identification,
    Multimedia,
    MeasurementOrFact,
}

impl Extension {
    pub const ALL: [Extension; 3] = [
        Extension::Identification,
        Extension::Multimedia,
        Extension::MeasurementOrFact,
    ];

    pub fn simple_name(&self) -> &'static str {
        match self {
            Extension::Identification => "Identification",
            Extension::Multimedia => "Multimedia",
            Extension::MeasurementOrFact => "MeasurementOrFact",
        }
    }

    pub fn row_type(&self) -> &'static str {
        match self {
            Extension::Identification => "http://rs.tdwg.org/dwc/terms/Identification",
            Extension::Multimedia => "http://rs.gbif.org/terms/1.0/Multimedia",
            Extension::MeasurementOrFact => "http://rs.tdwg.org/dwc/terms/MeasurementOrFact",
        }
    }
}

impl FromStr for Extension {
    type Err = QuadratError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let simple = unqualify(s.trim());
        Extension::ALL
            .iter()
            .copied()
            .find(|ext| ext.simple_name().eq_ignore_ascii_case(simple))
            .ok_or_else(|| QuadratError::Parse(format!("Unknown extension: {}", s)))
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}

impl Serialize for Extension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.simple_name())
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_and_qualified_names() {
        assert_eq!("decimalLatitude".parse::<Term>().unwrap(), Term::DecimalLatitude);
        assert_eq!(
            "http://rs.tdwg.org/dwc/terms/decimalLatitude".parse::<Term>().unwrap(),
            Term::DecimalLatitude
        );
        assert_eq!("dwc:year".parse::<Term>().unwrap(), Term::Year);
        assert_eq!("dcterms:modified".parse::<Term>().unwrap(), Term::Modified);
        assert_eq!(
            "http://rs.gbif.org/terms/1.0/genericName".parse::<Term>().unwrap(),
            Term::GenericName
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("DECIMALLONGITUDE".parse::<Term>().unwrap(), Term::DecimalLongitude);
        assert_eq!("taxonid".parse::<Term>().unwrap(), Term::TaxonId);
    }

    #[test]
    fn test_unknown_term() {
        assert!("dwc:notATerm".parse::<Term>().is_err());
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(Term::Year.qualified_name(), "http://rs.tdwg.org/dwc/terms/year");
        assert_eq!(Term::Modified.prefixed_name(), "dcterms:modified");
    }

    #[test]
    fn test_simple_names_are_unique() {
        let mut names: Vec<_> = Term::ALL.iter().map(|t| t.simple_name().to_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Term::ALL.len());
    }

    #[test]
    fn test_extension_from_row_type() {
        assert_eq!(
            "http://rs.tdwg.org/dwc/terms/Identification".parse::<Extension>().unwrap(),
            Extension::Identification
        );
        assert_eq!("multimedia".parse::<Extension>().unwrap(), Extension::Multimedia);
    }
}
