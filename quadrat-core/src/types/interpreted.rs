use super::issue::{IssueCode, IssueSet};
use super::taxon::Classification;
use crate::vocab::{Continent, Country, Rank};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Typed, issue-annotated result of interpreting one verbatim record.
///
/// Built fresh per interpretation pass. Each interpreter owns a disjoint
/// group of fields; the location interpreter is the only writer of
/// `country`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretedRecord {
    pub key: String,

    // location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<Continent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_accuracy: Option<f64>,

    // temporal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_identified: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<NaiveDate>,

    // taxonomy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon_rank: Option<Rank>,
    #[serde(default, flatten)]
    pub classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_epithet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infraspecific_epithet: Option<String>,

    #[serde(default)]
    pub issues: IssueSet,
}

impl InterpretedRecord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn add_issue(&mut self, issue: IssueCode) {
        self.issues.insert(issue);
    }

    pub fn add_issues<'a, I: IntoIterator<Item = &'a IssueCode>>(&mut self, issues: I) {
        self.issues.extend(issues.into_iter().copied());
    }

    pub fn has_issue(&self, issue: IssueCode) -> bool {
        self.issues.contains(&issue)
    }
}
