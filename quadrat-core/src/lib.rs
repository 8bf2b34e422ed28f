//! Core types shared across all quadrat crates
//!
//! Holds the verbatim and interpreted record models, the issue vocabulary,
//! the `ParseOutcome` result type every interpretation step returns, and the
//! controlled vocabularies (country, continent, rank) the interpreters parse
//! free text into.

pub mod config;
pub mod error;
pub mod system;
pub mod types;
pub mod vocab;

// Re-export commonly used types
pub use config::{default_config, load_config, save_config, Config};
pub use error::{QuadratError, QuadratResult};

pub use types::{
    Classification, Confidence, CoordinatePoint, DateYmd, Extension, InterpretedRecord, IssueCode,
    IssueSet, MatchQuery, MatchType, MeterValue, NameParts, NameUsageMatch, ParseOutcome, Term,
    TermLookup, TermMap, VerbatimRecord, VerbatimRecordBuilder,
};
pub use vocab::{Continent, Country, Rank};

/// Version information for the quadrat project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
