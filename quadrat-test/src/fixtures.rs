//! Test fixtures and data generators
//!
//! Backbone answers and verbatim records for use across the quadrat workspace.

use crate::mock::MockNameMatcher;
use quadrat_core::{Classification, MatchType, NameUsageMatch, Rank, Term, VerbatimRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::Path;

/// Backbone answer for the cougar
pub fn puma_concolor() -> NameUsageMatch {
    NameUsageMatch {
        usage_key: Some(2435099),
        scientific_name: Some("Puma concolor (Linnaeus, 1771)".to_string()),
        canonical_name: Some("Puma concolor".to_string()),
        rank: Some(Rank::Species),
        status: Some("ACCEPTED".to_string()),
        confidence: Some(98),
        match_type: MatchType::Exact,
        note: None,
        classification: Classification {
            kingdom: Some("Animalia".to_string()),
            phylum: Some("Chordata".to_string()),
            class: Some("Mammalia".to_string()),
            order: Some("Carnivora".to_string()),
            family: Some("Felidae".to_string()),
            genus: Some("Puma".to_string()),
            species: Some("Puma concolor".to_string()),
            kingdom_key: Some(1),
            phylum_key: Some(44),
            class_key: Some(359),
            order_key: Some(732),
            family_key: Some(9703),
            genus_key: Some(2435098),
            species_key: Some(2435099),
        },
    }
}

/// Backbone answer for the silver fir
pub fn abies_alba() -> NameUsageMatch {
    NameUsageMatch {
        usage_key: Some(2685484),
        scientific_name: Some("Abies alba Mill.".to_string()),
        canonical_name: Some("Abies alba".to_string()),
        rank: Some(Rank::Species),
        status: Some("ACCEPTED".to_string()),
        confidence: Some(97),
        match_type: MatchType::Exact,
        note: None,
        classification: Classification {
            kingdom: Some("Plantae".to_string()),
            phylum: Some("Tracheophyta".to_string()),
            class: Some("Pinopsida".to_string()),
            order: Some("Pinales".to_string()),
            family: Some("Pinaceae".to_string()),
            genus: Some("Abies".to_string()),
            species: Some("Abies alba".to_string()),
            kingdom_key: Some(6),
            phylum_key: Some(7707728),
            class_key: Some(194),
            order_key: Some(640),
            family_key: Some(3925),
            genus_key: Some(2684876),
            species_key: Some(2685484),
        },
    }
}

/// Matcher that knows the fixture names
pub fn default_matcher() -> MockNameMatcher {
    MockNameMatcher::new()
        .with_answer("Puma concolor", puma_concolor())
        .with_answer("Abies alba", abies_alba())
}

/// Build a record from term/value pairs
pub fn record(key: &str, fields: &[(Term, &str)]) -> VerbatimRecord {
    fields
        .iter()
        .fold(VerbatimRecord::builder(key), |builder, (term, value)| {
            builder.field(*term, *value)
        })
        .build()
}

/// A handful of records covering the common corrections
pub fn sample_records() -> Vec<VerbatimRecord> {
    vec![
        record(
            "clean",
            &[
                (Term::CountryCode, "DK"),
                (Term::DecimalLatitude, "55.68"),
                (Term::DecimalLongitude, "12.57"),
                (Term::GeodeticDatum, "WGS84"),
                (Term::EventDate, "2019-06-01"),
                (Term::ScientificName, "Abies alba"),
            ],
        ),
        record(
            "negated",
            &[
                (Term::Country, "Canada"),
                (Term::DecimalLatitude, "43.65"),
                (Term::DecimalLongitude, "79.4"),
                (Term::Year, "1999"),
                (Term::Month, "7"),
                (Term::Day, "12"),
                (Term::ScientificName, "Puma concolor"),
            ],
        ),
        record(
            "verbatim",
            &[
                (Term::VerbatimCoordinates, "55°40'48\"N 12°34'12\"E"),
                (Term::EventDate, "12/07/1999"),
                (Term::Genus, "Puma"),
                (Term::SpecificEpithet, "concolor"),
            ],
        ),
        record(
            "broken",
            &[
                (Term::CountryCode, "XX"),
                (Term::DecimalLatitude, "200"),
                (Term::DecimalLongitude, "200"),
                (Term::EventDate, "not a date"),
                (Term::MinimumElevationInMeters, "high"),
            ],
        ),
    ]
}

const GENERATED_NAMES: &[&str] = &["Puma concolor", "Abies alba", "Unknown thing"];

/// Generate reproducible records with coordinates around Europe
pub fn generate_records(count: usize, seed: u64) -> Vec<VerbatimRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let latitude: f64 = rng.gen_range(36.0..70.0);
            let longitude: f64 = rng.gen_range(-10.0..30.0);
            let year: i32 = rng.gen_range(1850..2020);
            let month: u32 = rng.gen_range(1..=12);
            let day: u32 = rng.gen_range(1..=28);
            let name = GENERATED_NAMES[rng.gen_range(0..GENERATED_NAMES.len())];

            VerbatimRecord::builder(format!("occ-{:05}", i))
                .field(Term::DecimalLatitude, format!("{:.4}", latitude))
                .field(Term::DecimalLongitude, format!("{:.4}", longitude))
                .field(Term::GeodeticDatum, "WGS84")
                .field(Term::EventDate, format!("{:04}-{:02}-{:02}", year, month, day))
                .field(Term::ScientificName, name)
                .build()
        })
        .collect()
}

/// Write records as JSON lines, one record per line
pub fn write_records_jsonl(path: &Path, records: &[VerbatimRecord]) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)?;
    for record in records {
        serde_json::to_writer(&mut file, record)?;
        writeln!(file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quadrat_core::TermLookup;

    #[test]
    fn test_generate_records_reproducible() {
        let a = generate_records(10, 42);
        let b = generate_records(10, 42);
        assert_eq!(a, b);
        assert_eq!(a[3].key(), "occ-00003");
        assert!(a.iter().all(|r| r.has(Term::DecimalLatitude)));
    }

    #[test]
    fn test_record_builder() {
        let r = record("k", &[(Term::Country, "Denmark")]);
        assert_eq!(r.value(Term::Country), Some("Denmark"));
        assert_eq!(r.value(Term::Year), None);
    }

    #[test]
    fn test_write_records_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        write_records_jsonl(&path, &sample_records()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<VerbatimRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, sample_records());
    }
}
