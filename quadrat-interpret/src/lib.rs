//! Interpretation of verbatim occurrence records
//!
//! Each interpreter is total over its input: it returns a
//! [`ParseOutcome`](quadrat_core::ParseOutcome) or fills an
//! [`InterpretedRecord`](quadrat_core::InterpretedRecord) and records what it
//! corrected or rejected as issues, never an error.

pub mod coordinate;
pub mod location;
pub mod record;
pub mod taxonomy;
pub mod temporal;

pub use coordinate::CoordinateInterpreter;
pub use location::LocationInterpreter;
pub use record::OccurrenceInterpreter;
pub use taxonomy::{TaxonFields, TaxonomyInterpreter};
pub use temporal::{TemporalInterpretation, TemporalInterpreter};
