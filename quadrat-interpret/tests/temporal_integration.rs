/// Integration tests for recorded, identified and modified dates
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use quadrat_core::{DateYmd, InterpretedRecord, IssueCode, Term};
use quadrat_interpret::TemporalInterpreter;
use quadrat_test::{assert_issues, record};

fn interpreter() -> TemporalInterpreter {
    TemporalInterpreter::default().with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

fn parts(ymd: &DateYmd) -> (Option<i32>, Option<u32>, Option<u32>) {
    (ymd.year, ymd.month, ymd.day)
}

#[test]
fn test_atomic_fields_only() {
    let outcome = interpreter().interpret_recorded_date(Some("1984"), Some("3"), Some("22"), None);
    let ymd = outcome.payload().unwrap();
    assert_eq!(parts(ymd), (Some(1984), Some(3), Some(22)));
    assert_eq!(ymd.iso_date().as_deref(), Some("1984-03-22"));
    assert!(outcome.issues().is_empty());
}

#[test]
fn test_unparsable_text_falls_back_to_atomic() {
    let outcome =
        interpreter().interpret_recorded_date(Some("1984"), Some("3"), None, Some("22-17-1984"));
    let ymd = outcome.payload().unwrap();
    assert_eq!(parts(ymd), (Some(1984), Some(3), None));
    assert_eq!(ymd.date, None);
    assert_issues(&outcome, &[IssueCode::RecordedDateInvalid]);
}

#[test]
fn test_nothing_to_read() {
    let outcome = interpreter().interpret_recorded_date(None, None, None, None);
    assert!(!outcome.is_success());
    assert!(outcome.issues().is_empty());
}

#[test]
fn test_month_zero_drops_day() {
    let outcome = interpreter().interpret_recorded_date(Some("1984"), Some("0"), Some("22"), None);
    assert_eq!(parts(outcome.payload().unwrap()), (Some(1984), None, None));
    assert!(outcome.issues().is_empty());
}

#[test]
fn test_text_date_wins_over_atomic() {
    let outcome = interpreter().interpret_recorded_date(
        Some("1999"),
        Some("7"),
        Some("12"),
        Some("1999-07-19"),
    );
    assert_eq!(parts(outcome.payload().unwrap()), (Some(1999), Some(7), Some(19)));
}

#[test]
fn test_ambiguous_text_is_day_first() {
    let outcome = interpreter().interpret_recorded_date(None, None, None, Some("07/06/1999"));
    assert_eq!(
        outcome.payload().unwrap().iso_date().as_deref(),
        Some("1999-06-07")
    );
    assert_eq!(outcome.confidence(), Some(quadrat_core::Confidence::Probable));
}

#[test]
fn test_year_bounds() {
    let interp = interpreter();
    let early = interp.interpret_recorded_date(Some("1599"), None, None, None);
    assert!(!early.is_success());
    assert_issues(&early, &[IssueCode::RecordedDateUnlikely]);

    let late = interp.interpret_recorded_date(Some("2025"), None, None, None);
    assert_issues(&late, &[IssueCode::RecordedDateUnlikely]);

    let edge = interp.interpret_recorded_date(Some("1600"), None, None, None);
    assert!(edge.is_success());
}

#[test]
fn test_configured_lower_bound() {
    let interp = TemporalInterpreter::new(1750).with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    let outcome = interp.interpret_recorded_date(Some("1700"), None, None, None);
    assert!(outcome.has_issue(IssueCode::RecordedDateUnlikely));
}

#[test]
fn test_interpret_temporal_applies_all_dates() {
    let verbatim = record(
        "1",
        &[
            (Term::EventDate, "1879-11-01"),
            (Term::DateIdentified, "1880-03-05T10:00:00"),
            (Term::Modified, "2030-01-01"),
        ],
    );
    let dates = interpreter().interpret_temporal(&verbatim);

    let mut interpreted = InterpretedRecord::new("1");
    dates.apply_to(&mut interpreted);

    assert_eq!(interpreted.year, Some(1879));
    assert_eq!(interpreted.event_date, NaiveDate::from_ymd_opt(1879, 11, 1));
    assert_eq!(interpreted.date_identified, NaiveDate::from_ymd_opt(1880, 3, 5));
    assert_eq!(interpreted.modified, None);
    assert!(interpreted.has_issue(IssueCode::ModifiedDateUnlikely));
    assert_eq!(interpreted.issues.len(), 1);
}

#[test]
fn test_invalid_identified_date() {
    let verbatim = record("1", &[(Term::DateIdentified, "some time ago")]);
    let dates = interpreter().interpret_temporal(&verbatim);
    assert_issues(&dates.identified, &[IssueCode::IdentifiedDateInvalid]);
    assert!(!dates.recorded.is_success());
}
