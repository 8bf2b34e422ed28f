//! Taxonomy interpretation
//!
//! Builds a query from the verbatim name fragments, asks the reference
//! taxonomy for the best match and copies the matched classification onto
//! the interpreted record. A matcher that cannot answer is reported as a
//! failure, never as "no match".

pub mod fields;
pub mod name;

pub use fields::{interpret_rank, TaxonFields};
pub use name::{build_scientific_name, clean_epithet, clean_name};

use quadrat_core::{
    Extension, InterpretedRecord, IssueCode, MatchQuery, MatchType, NameUsageMatch, ParseOutcome,
    VerbatimRecord,
};
use quadrat_lookup::{NameMatcher, NameParser};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

fn is_real_match(outcome: &ParseOutcome<NameUsageMatch>) -> bool {
    outcome
        .payload()
        .map(|m| m.match_type != MatchType::None)
        .unwrap_or(false)
}

pub struct TaxonomyInterpreter {
    matcher: Arc<dyn NameMatcher>,
    parser: Arc<dyn NameParser>,
}

impl TaxonomyInterpreter {
    pub fn new(matcher: Arc<dyn NameMatcher>, parser: Arc<dyn NameParser>) -> Self {
        Self { matcher, parser }
    }

    /// Match one set of verbatim name fields
    pub fn match_fields(&self, fields: &TaxonFields) -> ParseOutcome<NameUsageMatch> {
        self.match_taxon(&fields.query())
    }

    pub fn match_taxon(&self, query: &MatchQuery) -> ParseOutcome<NameUsageMatch> {
        if query.is_empty() {
            debug!("Nothing to match");
            return ParseOutcome::success(NameUsageMatch::none()).with_issue(IssueCode::TaxonMatchNone);
        }

        debug!("Attempt to match name [{}]", query.name.as_deref().unwrap_or_default());
        let found = match self.matcher.match_name(query) {
            Ok(found) => found,
            Err(e) => {
                error!("Failed name match for {:?}: {}", query, e);
                return ParseOutcome::fail();
            }
        };

        let name = query.name.as_deref().unwrap_or_default();
        let note = found.note.as_deref().unwrap_or_default();
        let issue = match found.match_type {
            MatchType::Exact => None,
            MatchType::None => {
                info!("Match for [{}] returned no match. Lookup note: [{}]", name, note);
                Some(IssueCode::TaxonMatchNone)
            }
            MatchType::Fuzzy => {
                debug!("Match for [{}] was fuzzy. Match note: [{}]", name, note);
                Some(IssueCode::TaxonMatchFuzzy)
            }
            MatchType::HigherRank => {
                debug!("Match for [{}] was to higher rank only. Match note: [{}]", name, note);
                Some(IssueCode::TaxonMatchHigherRank)
            }
        };

        let outcome = ParseOutcome::success(found);
        match issue {
            Some(issue) => outcome.with_issue(issue),
            None => outcome,
        }
    }

    /// Copy a match onto the record, splitting the matched name into parts
    pub fn apply_match(&self, record: &mut InterpretedRecord, found: &NameUsageMatch) {
        record.taxon_key = found.usage_key;
        record.scientific_name = found.scientific_name.clone();
        record.taxon_rank = found.rank;
        record.classification = found.classification.clone();

        let name = found
            .canonical_name
            .as_deref()
            .or(found.scientific_name.as_deref());
        if let Some(name) = name {
            match self.parser.parse(name, found.rank) {
                Some(parts) => {
                    record.generic_name = parts.generic_name;
                    record.specific_epithet = parts.specific_epithet;
                    record.infraspecific_epithet = parts.infraspecific_epithet;
                }
                None => warn!("Failed to parse backbone name {:?} for occurrence {}", name, record.key),
            }
        }

        debug!(
            "Occurrence {} matched to {:?} [{:?}]",
            record.key, record.scientific_name, record.taxon_key
        );
    }

    /// Match the core name fields, falling back to identification rows in
    /// their published order when the core fields give no real match
    pub fn interpret_taxonomy(&self, verbatim: &VerbatimRecord, record: &mut InterpretedRecord) {
        let mut outcome = self.match_fields(&TaxonFields::from_terms(verbatim));

        if !is_real_match(&outcome) {
            for row in verbatim.extension(Extension::Identification) {
                let candidate = self.match_fields(&TaxonFields::from_terms(row));
                if is_real_match(&candidate) {
                    debug!("Occurrence {} matched via identification record", verbatim.key());
                    outcome = candidate;
                    break;
                }
            }
        }

        match outcome {
            ParseOutcome::Success { payload, issues, .. } => {
                self.apply_match(record, &payload);
                record.add_issues(&issues);
            }
            ParseOutcome::Failure { issues } => {
                debug!("No backbone answer for occurrence {}", verbatim.key());
                record.add_issues(&issues);
                record.add_issue(IssueCode::InterpretationError);
            }
        }
    }
}
