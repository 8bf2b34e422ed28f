/// Raw occurrence records as published
use super::term::{Extension, Term};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One extension row, or the core fields of a record
pub type TermMap = BTreeMap<Term, String>;

/// Read access to term values, trimmed and with blanks treated as absent
pub trait TermLookup {
    fn raw(&self, term: Term) -> Option<&str>;

    fn value(&self, term: Term) -> Option<&str> {
        self.raw(term).map(str::trim).filter(|v| !v.is_empty())
    }

    fn has(&self, term: Term) -> bool {
        self.value(term).is_some()
    }
}

impl TermLookup for TermMap {
    fn raw(&self, term: Term) -> Option<&str> {
        self.get(&term).map(String::as_str)
    }
}

/// A published occurrence: an opaque key, core term values, and extension rows.
///
/// Only non-blank values are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawVerbatimRecord")]
pub struct VerbatimRecord {
    key: String,
    #[serde(default)]
    fields: TermMap,
    #[serde(default)]
    extensions: BTreeMap<Extension, Vec<TermMap>>,
}

impl VerbatimRecord {
    pub fn builder(key: impl Into<String>) -> VerbatimRecordBuilder {
        VerbatimRecordBuilder {
            record: VerbatimRecord {
                key: key.into(),
                fields: TermMap::new(),
                extensions: BTreeMap::new(),
            },
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fields(&self) -> &TermMap {
        &self.fields
    }

    pub fn extension(&self, extension: Extension) -> &[TermMap] {
        self.extensions
            .get(&extension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_extension(&self, extension: Extension) -> bool {
        !self.extension(extension).is_empty()
    }

    pub fn insert(&mut self, term: Term, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.fields.remove(&term);
        } else {
            self.fields.insert(term, value);
        }
    }
}

impl TermLookup for VerbatimRecord {
    fn raw(&self, term: Term) -> Option<&str> {
        self.fields.raw(term)
    }
}

pub struct VerbatimRecordBuilder {
    record: VerbatimRecord,
}

impl VerbatimRecordBuilder {
    pub fn field(mut self, term: Term, value: impl Into<String>) -> Self {
        self.record.insert(term, value);
        self
    }

    /// Append one extension row; rows with no values are dropped
    pub fn extension_row<I, V>(mut self, extension: Extension, row: I) -> Self
    where
        I: IntoIterator<Item = (Term, V)>,
        V: Into<String>,
    {
        let row: TermMap = row
            .into_iter()
            .map(|(term, value)| (term, value.into()))
            .filter(|(_, value)| !value.trim().is_empty())
            .collect();
        if !row.is_empty() {
            self.record.extensions.entry(extension).or_default().push(row);
        }
        self
    }

    pub fn build(self) -> VerbatimRecord {
        self.record
    }
}

/// Wire form: term and extension names as published, unknown ones skipped
#[derive(Deserialize)]
struct RawVerbatimRecord {
    key: String,
    #[serde(default)]
    fields: BTreeMap<String, Option<String>>,
    #[serde(default)]
    extensions: BTreeMap<String, Vec<BTreeMap<String, Option<String>>>>,
}

fn known_terms(raw: BTreeMap<String, Option<String>>) -> Vec<(Term, String)> {
    raw.into_iter()
        .filter_map(|(name, value)| match name.parse::<Term>() {
            Ok(term) => value.map(|v| (term, v)),
            Err(_) => {
                debug!("Skipping unknown term {}", name);
                None
            }
        })
        .collect()
}

impl From<RawVerbatimRecord> for VerbatimRecord {
    fn from(raw: RawVerbatimRecord) -> Self {
        let mut builder = VerbatimRecord::builder(raw.key);
        for (term, value) in known_terms(raw.fields) {
            builder = builder.field(term, value);
        }
        for (name, rows) in raw.extensions {
            let Ok(extension) = name.parse::<Extension>() else {
                debug!("Skipping unknown extension {}", name);
                continue;
            };
            for row in rows {
                builder = builder.extension_row(extension, known_terms(row));
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_skips_blank_values() {
        let record = VerbatimRecord::builder("1")
            .field(Term::Country, "Denmark")
            .field(Term::StateProvince, "   ")
            .build();

        assert_eq!(record.key(), "1");
        assert_eq!(record.value(Term::Country), Some("Denmark"));
        assert!(!record.has(Term::StateProvince));
        assert_eq!(record.fields().len(), 1);
    }

    #[test]
    fn test_value_is_trimmed() {
        let record = VerbatimRecord::builder("1")
            .field(Term::Year, " 1984 ")
            .build();
        assert_eq!(record.raw(Term::Year), Some(" 1984 "));
        assert_eq!(record.value(Term::Year), Some("1984"));
    }

    #[test]
    fn test_extension_rows() {
        let record = VerbatimRecord::builder("1")
            .extension_row(
                Extension::Identification,
                [(Term::ScientificName, "Abies alba"), (Term::Kingdom, "Plantae")],
            )
            .extension_row(Extension::Identification, [(Term::Genus, " ")])
            .build();

        assert!(record.has_extension(Extension::Identification));
        assert_eq!(record.extension(Extension::Identification).len(), 1);
        assert!(record.extension(Extension::Multimedia).is_empty());
    }

    #[test]
    fn test_deserialize_skips_unknown_terms() {
        let json = r#"{
            "key": "42",
            "fields": {
                "http://rs.tdwg.org/dwc/terms/decimalLatitude": "55.68",
                "dwc:decimalLongitude": "12.57",
                "dwc:somethingElse": "x",
                "country": null
            },
            "extensions": {
                "http://rs.tdwg.org/dwc/terms/Identification": [
                    {"scientificName": "Puma concolor"}
                ],
                "http://example.org/Unknown": [{"year": "1990"}]
            }
        }"#;

        let record: VerbatimRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.key(), "42");
        assert_eq!(record.value(Term::DecimalLatitude), Some("55.68"));
        assert_eq!(record.value(Term::DecimalLongitude), Some("12.57"));
        assert!(!record.has(Term::Country));
        assert_eq!(record.fields().len(), 2);
        assert_eq!(
            record.extension(Extension::Identification)[0].value(Term::ScientificName),
            Some("Puma concolor")
        );
    }
}
