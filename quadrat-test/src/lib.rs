//! Test utilities for the quadrat workspace
//!
//! Mock lookups, fixtures, isolated environments and custom assertions
//! shared by the crates' integration tests.

pub mod assertions;
pub mod environment;
pub mod fixtures;
pub mod mock;

pub use assertions::{assert_close, assert_coordinate, assert_issues, assert_record_issues};
pub use environment::TestEnvironment;
pub use fixtures::{default_matcher, generate_records, record, sample_records};
pub use mock::{MockGeocoder, MockNameMatcher, Region};

pub use anyhow::{Context, Result};
pub use tempfile;

/// Route interpreter logs through the test harness, filtered by
/// `QUADRAT_LOG`. Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("QUADRAT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}
