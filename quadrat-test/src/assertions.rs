//! Custom assertions for interpretation results

use quadrat_core::{CoordinatePoint, InterpretedRecord, IssueCode, IssueSet, ParseOutcome};

/// Coordinates are compared to five decimals, the default rounding
pub const COORDINATE_TOLERANCE: f64 = 0.00001;

fn describe(issues: &IssueSet) -> Vec<&'static str> {
    issues.iter().map(|i| i.as_str()).collect()
}

/// Assert the exact issue set of an outcome
pub fn assert_issues<T>(outcome: &ParseOutcome<T>, expected: &[IssueCode]) {
    let expected: IssueSet = expected.iter().copied().collect();
    assert_eq!(
        outcome.issues(),
        &expected,
        "Expected issues {:?}, got {:?}",
        describe(&expected),
        describe(outcome.issues())
    );
}

/// Assert the exact issue set of an interpreted record
pub fn assert_record_issues(record: &InterpretedRecord, expected: &[IssueCode]) {
    let expected: IssueSet = expected.iter().copied().collect();
    assert_eq!(
        record.issues,
        expected,
        "Record {} expected issues {:?}, got {:?}",
        record.key,
        describe(&expected),
        describe(&record.issues)
    );
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "Value {} differs from {} by more than {}",
        actual,
        expected,
        tolerance
    );
}

/// Assert a successful coordinate outcome at the given point
pub fn assert_coordinate(outcome: &ParseOutcome<CoordinatePoint>, latitude: f64, longitude: f64) {
    let point = outcome
        .payload()
        .unwrap_or_else(|| panic!("Expected a point, got failure with {:?}", outcome.issues()));
    assert_close(point.latitude, latitude, COORDINATE_TOLERANCE);
    assert_close(point.longitude, longitude, COORDINATE_TOLERANCE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_issues_exact() {
        let outcome: ParseOutcome<()> = ParseOutcome::fail_with(IssueCode::CoordinateInvalid);
        assert_issues(&outcome, &[IssueCode::CoordinateInvalid]);
    }

    #[test]
    #[should_panic(expected = "Expected issues")]
    fn test_assert_issues_rejects_extra() {
        let outcome: ParseOutcome<()> =
            ParseOutcome::fail_with(IssueCode::CoordinateInvalid).with_issue(IssueCode::CountryInvalid);
        assert_issues(&outcome, &[IssueCode::CoordinateInvalid]);
    }

    #[test]
    #[should_panic(expected = "differs from")]
    fn test_assert_close_fails() {
        assert_close(43.65, 43.66, COORDINATE_TOLERANCE);
    }
}
