pub mod interpreted;
pub mod issue;
pub mod outcome;
pub mod record;
pub mod taxon;
pub mod term;
pub mod values;

pub use interpreted::InterpretedRecord;
pub use issue::{IssueCode, IssueSet};
pub use outcome::{Confidence, ParseOutcome};
pub use record::{TermLookup, TermMap, VerbatimRecord, VerbatimRecordBuilder};
pub use taxon::{Classification, MatchQuery, MatchType, NameParts, NameUsageMatch};
pub use term::{Extension, Namespace, Term};
pub use values::{CoordinatePoint, DateYmd, MeterValue};
