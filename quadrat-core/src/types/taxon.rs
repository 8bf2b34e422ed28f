//! Name matching request and response shapes.
//!
//! Field names follow the GBIF species match API so responses decode
//! directly into these types.

use crate::vocab::Rank;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    Exact,
    Fuzzy,
    #[serde(rename = "HIGHERRANK")]
    HigherRank,
    None,
}

impl Default for MatchType {
    fn default() -> Self {
        MatchType::None
    }
}

/// Higher classification with backbone keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kingdom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phylum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kingdom_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phylum_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_key: Option<i64>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        *self == Classification::default()
    }
}

/// Answer from a name matching service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameUsageMatch {
    #[serde(default)]
    pub usage_key: Option<i64>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub canonical_name: Option<String>,
    #[serde(default)]
    pub rank: Option<Rank>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub confidence: Option<u8>,
    #[serde(default)]
    pub match_type: MatchType,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(flatten)]
    pub classification: Classification,
}

impl NameUsageMatch {
    /// A NONE answer with nothing else filled in
    pub fn none() -> Self {
        Self::default()
    }
}

/// Name plus the classification hints sent to a matcher; also the cache key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchQuery {
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub name: Option<String>,
    pub rank: Option<Rank>,
}

impl MatchQuery {
    /// Present parameters in request order, keyed by their API names
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = [
            ("kingdom", &self.kingdom),
            ("phylum", &self.phylum),
            ("class", &self.class),
            ("order", &self.order),
            ("family", &self.family),
            ("genus", &self.genus),
            ("name", &self.name),
        ];
        for (key, value) in text {
            if let Some(v) = value {
                pairs.push((key, v.clone()));
            }
        }
        if let Some(rank) = self.rank {
            pairs.push(("rank", rank.as_str().to_string()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        *self == MatchQuery::default()
    }
}

/// Atomised parts of a parsed canonical name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameParts {
    pub generic_name: Option<String>,
    pub specific_epithet: Option<String>,
    pub infraspecific_epithet: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_match_response() {
        let json = r#"{
            "usageKey": 2435099,
            "scientificName": "Puma concolor (Linnaeus, 1771)",
            "canonicalName": "Puma concolor",
            "rank": "SPECIES",
            "status": "ACCEPTED",
            "confidence": 99,
            "matchType": "EXACT",
            "kingdom": "Animalia",
            "phylum": "Chordata",
            "order": "Carnivora",
            "family": "Felidae",
            "genus": "Puma",
            "species": "Puma concolor",
            "kingdomKey": 1,
            "phylumKey": 44,
            "classKey": 359,
            "orderKey": 732,
            "familyKey": 9703,
            "genusKey": 2435098,
            "speciesKey": 2435099,
            "class": "Mammalia",
            "synonym": false
        }"#;

        let m: NameUsageMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.usage_key, Some(2435099));
        assert_eq!(m.rank, Some(Rank::Species));
        assert_eq!(m.match_type, MatchType::Exact);
        assert_eq!(m.classification.class.as_deref(), Some("Mammalia"));
        assert_eq!(m.classification.species_key, Some(2435099));
    }

    #[test]
    fn test_decode_none_and_higherrank() {
        let none: NameUsageMatch =
            serde_json::from_str(r#"{"confidence": 100, "matchType": "NONE"}"#).unwrap();
        assert_eq!(none.match_type, MatchType::None);
        assert!(none.classification.is_empty());

        let higher: NameUsageMatch =
            serde_json::from_str(r#"{"matchType": "HIGHERRANK", "rank": "GENUS"}"#).unwrap();
        assert_eq!(higher.match_type, MatchType::HigherRank);
    }

    #[test]
    fn test_query_pairs_order() {
        let query = MatchQuery {
            kingdom: Some("Animalia".into()),
            genus: Some("Puma".into()),
            name: Some("Puma concolor".into()),
            rank: Some(Rank::Species),
            ..Default::default()
        };
        let keys: Vec<_> = query.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["kingdom", "genus", "name", "rank"]);
    }
}
