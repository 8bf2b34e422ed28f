use super::normalize;
use crate::types::ParseOutcome;
use crate::QuadratError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Taxonomic rank, ordered from highest to lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Domain,
    Kingdom,
    Subkingdom,
    Superphylum,
    Phylum,
    Subphylum,
    Superclass,
    Class,
    Subclass,
    Superorder,
    Order,
    Suborder,
    Infraorder,
    Superfamily,
    Family,
    Subfamily,
    Tribe,
    Subtribe,
    Genus,
    Subgenus,
    Section,
    Series,
    Species,
    /// Some rank below species that the publisher did not state
    InfraspecificName,
    Subspecies,
    Variety,
    Subvariety,
    Form,
    Subform,
    Cultivar,
    Unranked,
}

impl Rank {
    pub const ALL: [Rank; 31] = [
        Rank::Domain,
        Rank::Kingdom,
        Rank::Subkingdom,
        Rank::Superphylum,
        Rank::Phylum,
        Rank::Subphylum,
        Rank::Superclass,
        Rank::Class,
        Rank::Subclass,
        Rank::Superorder,
        Rank::Order,
        Rank::Suborder,
        Rank::Infraorder,
        Rank::Superfamily,
        Rank::Family,
        Rank::Subfamily,
        Rank::Tribe,
        Rank::Subtribe,
        Rank::Genus,
        Rank::Subgenus,
        Rank::Section,
        Rank::Series,
        Rank::Species,
        Rank::InfraspecificName,
        Rank::Subspecies,
        Rank::Variety,
        Rank::Subvariety,
        Rank::Form,
        Rank::Subform,
        Rank::Cultivar,
        Rank::Unranked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Domain => "DOMAIN",
            Rank::Kingdom => "KINGDOM",
            Rank::Subkingdom => "SUBKINGDOM",
            Rank::Superphylum => "SUPERPHYLUM",
            Rank::Phylum => "PHYLUM",
            Rank::Subphylum => "SUBPHYLUM",
            Rank::Superclass => "SUPERCLASS",
            Rank::Class => "CLASS",
            Rank::Subclass => "SUBCLASS",
            Rank::Superorder => "SUPERORDER",
            Rank::Order => "ORDER",
            Rank::Suborder => "SUBORDER",
            Rank::Infraorder => "INFRAORDER",
            Rank::Superfamily => "SUPERFAMILY",
            Rank::Family => "FAMILY",
            Rank::Subfamily => "SUBFAMILY",
            Rank::Tribe => "TRIBE",
            Rank::Subtribe => "SUBTRIBE",
            Rank::Genus => "GENUS",
            Rank::Subgenus => "SUBGENUS",
            Rank::Section => "SECTION",
            Rank::Series => "SERIES",
            Rank::Species => "SPECIES",
            Rank::InfraspecificName => "INFRASPECIFIC_NAME",
            Rank::Subspecies => "SUBSPECIES",
            Rank::Variety => "VARIETY",
            Rank::Subvariety => "SUBVARIETY",
            Rank::Form => "FORM",
            Rank::Subform => "SUBFORM",
            Rank::Cultivar => "CULTIVAR",
            Rank::Unranked => "UNRANKED",
        }
    }

    pub fn is_infraspecific(&self) -> bool {
        *self > Rank::Species && *self != Rank::Unranked
    }

    /// Rank names are definite; abbreviations and marker forms are probable
    pub fn parse(text: &str) -> ParseOutcome<Rank> {
        let key = normalize(text);
        if key.is_empty() {
            return ParseOutcome::fail();
        }
        if let Some(rank) = Rank::ALL.iter().find(|r| normalize(r.as_str()) == key) {
            return ParseOutcome::success(*rank);
        }
        let abbreviated = match key.as_str() {
            "dom" => Some(Rank::Domain),
            "regnum" | "reg" | "king" => Some(Rank::Kingdom),
            "phyl" | "division" | "div" => Some(Rank::Phylum),
            "cl" | "classis" => Some(Rank::Class),
            "ord" | "ordo" => Some(Rank::Order),
            "fam" | "familia" => Some(Rank::Family),
            "subfam" => Some(Rank::Subfamily),
            "trib" => Some(Rank::Tribe),
            "gen" => Some(Rank::Genus),
            "subgen" => Some(Rank::Subgenus),
            "sect" => Some(Rank::Section),
            "ser" => Some(Rank::Series),
            "sp" | "spp" | "spec" | "sps" => Some(Rank::Species),
            "infrasp" | "infraspecific" | "infraspecies" => Some(Rank::InfraspecificName),
            "subsp" | "ssp" | "subspec" => Some(Rank::Subspecies),
            "var" | "varietas" => Some(Rank::Variety),
            "subvar" => Some(Rank::Subvariety),
            "f" | "fo" | "forma" => Some(Rank::Form),
            "subf" | "subfo" => Some(Rank::Subform),
            "cv" | "cultivar" => Some(Rank::Cultivar),
            _ => None,
        };
        match abbreviated {
            Some(rank) => ParseOutcome::probable(rank),
            None => ParseOutcome::fail(),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = QuadratError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::parse(s)
            .into_payload()
            .ok_or_else(|| QuadratError::Parse(format!("Unknown rank: {}", s)))
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ranks the services know but this vocabulary does not become `Unranked`
impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Rank::parse(&text).into_payload().unwrap_or(Rank::Unranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Confidence;

    #[test]
    fn test_parse_names() {
        assert_eq!(Rank::parse("species").payload(), Some(&Rank::Species));
        assert_eq!(Rank::parse("INFRASPECIFIC_NAME").payload(), Some(&Rank::InfraspecificName));
        assert_eq!(Rank::parse("Genus").confidence(), Some(Confidence::Definite));
    }

    #[test]
    fn test_parse_abbreviations() {
        assert_eq!(Rank::parse("subsp.").payload(), Some(&Rank::Subspecies));
        assert_eq!(Rank::parse("var.").payload(), Some(&Rank::Variety));
        assert_eq!(Rank::parse("f.").payload(), Some(&Rank::Form));
        assert_eq!(Rank::parse("sp.").confidence(), Some(Confidence::Probable));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(!Rank::parse("gigantic").is_success());
        assert!(!Rank::parse(" ").is_success());
    }

    #[test]
    fn test_ordering() {
        assert!(Rank::Kingdom < Rank::Genus);
        assert!(Rank::Subspecies.is_infraspecific());
        assert!(!Rank::Species.is_infraspecific());
        assert!(!Rank::Unranked.is_infraspecific());
    }

    #[test]
    fn test_unknown_rank_deserialises_as_unranked() {
        let rank: Rank = serde_json::from_str("\"STRAIN\"").unwrap();
        assert_eq!(rank, Rank::Unranked);
        assert_eq!(serde_json::to_string(&Rank::Species).unwrap(), "\"SPECIES\"");
    }
}
