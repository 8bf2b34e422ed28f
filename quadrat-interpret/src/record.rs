//! Whole-record interpretation
//!
//! `OccurrenceInterpreter` owns one interpreter per concern and runs them in
//! a fixed order on each verbatim record. Records are independent, so batches
//! are interpreted in parallel.

use crate::location::LocationInterpreter;
use crate::taxonomy::TaxonomyInterpreter;
use crate::temporal::TemporalInterpreter;
use quadrat_core::{Config, InterpretedRecord, VerbatimRecord};
use quadrat_lookup::{Geocoder, NameMatcher, NameParser};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

pub struct OccurrenceInterpreter {
    location: LocationInterpreter,
    temporal: TemporalInterpreter,
    taxonomy: TaxonomyInterpreter,
}

impl OccurrenceInterpreter {
    pub fn new(
        config: &Config,
        geocoder: Arc<dyn Geocoder>,
        matcher: Arc<dyn NameMatcher>,
        parser: Arc<dyn NameParser>,
    ) -> Self {
        Self {
            location: LocationInterpreter::from_config(geocoder, &config.location),
            temporal: TemporalInterpreter::from_config(&config.temporal),
            taxonomy: TaxonomyInterpreter::new(matcher, parser),
        }
    }

    /// Replace the temporal interpreter, e.g. to pin "today"
    pub fn with_temporal(mut self, temporal: TemporalInterpreter) -> Self {
        self.temporal = temporal;
        self
    }

    pub fn location(&self) -> &LocationInterpreter {
        &self.location
    }

    pub fn temporal(&self) -> &TemporalInterpreter {
        &self.temporal
    }

    pub fn taxonomy(&self) -> &TaxonomyInterpreter {
        &self.taxonomy
    }

    /// Interpret one record: location, then dates, then taxonomy
    pub fn interpret(&self, verbatim: &VerbatimRecord) -> InterpretedRecord {
        let mut record = InterpretedRecord::new(verbatim.key());

        self.location.interpret_location(verbatim, &mut record);
        self.temporal.interpret_temporal(verbatim).apply_to(&mut record);
        self.taxonomy.interpret_taxonomy(verbatim, &mut record);

        debug!(
            "Interpreted occurrence {} with {} issues",
            record.key,
            record.issues.len()
        );
        record
    }

    /// Interpret a batch in parallel, keeping input order
    pub fn interpret_all(&self, records: &[VerbatimRecord]) -> Vec<InterpretedRecord> {
        info!("Interpreting {} records", records.len());
        records.par_iter().map(|r| self.interpret(r)).collect()
    }
}
