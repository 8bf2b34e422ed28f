/// Integration tests for coordinate interpretation against the mock geocoder
use proptest::prelude::*;
use quadrat_core::{Confidence, Country, IssueCode};
use quadrat_interpret::CoordinateInterpreter;
use quadrat_test::{assert_coordinate, assert_issues, MockGeocoder};
use std::sync::Arc;

fn interpreter() -> CoordinateInterpreter {
    CoordinateInterpreter::new(Arc::new(MockGeocoder::new()))
}

#[test]
fn test_canada_negated_longitude() {
    let outcome = interpreter().interpret(Some("43.65"), Some("79.4"), None, Some(Country::CANADA));

    assert_coordinate(&outcome, 43.65, -79.4);
    assert_issues(
        &outcome,
        &[
            IssueCode::PresumedNegatedLongitude,
            IssueCode::GeodeticDatumAssumedWgs84,
        ],
    );
    assert_eq!(outcome.confidence(), Some(Confidence::Probable));
    assert_eq!(outcome.payload().unwrap().country, Some(Country::CANADA));
}

#[test]
fn test_point_in_other_country_keeps_stated_country() {
    let outcome = interpreter().interpret(
        Some("55.68"),
        Some("12.57"),
        Some("WGS84"),
        Some(Country::SWEDEN),
    );

    assert_coordinate(&outcome, 55.68, 12.57);
    assert_issues(&outcome, &[IssueCode::CountryCoordinateMismatch]);
    assert_eq!(outcome.payload().unwrap().country, Some(Country::SWEDEN));
}

#[test]
fn test_northern_ireland_stated_as_ireland() {
    let outcome = interpreter().interpret(
        Some("54.597"),
        Some("-5.93"),
        Some("WGS84"),
        Some(Country::IRELAND),
    );

    assert_issues(&outcome, &[IssueCode::CountryDerivedFromCoordinates]);
    assert_eq!(outcome.payload().unwrap().country, Some(Country::UNITED_KINGDOM));
}

#[test]
fn test_isle_of_man_stated_as_united_kingdom() {
    let outcome = interpreter().interpret(
        Some("54.25"),
        Some("-4.5"),
        Some("EPSG:4326"),
        Some(Country::UNITED_KINGDOM),
    );

    assert_issues(&outcome, &[IssueCode::CountryDerivedFromCoordinates]);
    assert_eq!(outcome.payload().unwrap().country, Some(Country::ISLE_OF_MAN));
}

#[test]
fn test_out_of_range_after_all_corrections() {
    let outcome = interpreter().interpret(Some("200"), Some("200"), None, None);
    assert!(!outcome.is_success());
    assert_issues(&outcome, &[IssueCode::CoordinateOutOfRange]);
}

#[test]
fn test_blank_input_fails_without_issues() {
    let outcome = interpreter().interpret(Some("  "), Some("12.5"), None, None);
    assert!(!outcome.is_success());
    assert!(outcome.issues().is_empty());
}

#[test]
fn test_unparsable_input() {
    let outcome = interpreter().interpret(Some("north-ish"), Some("12.5"), None, None);
    assert_issues(&outcome, &[IssueCode::CoordinateInvalid]);
}

#[test]
fn test_rounding_to_five_decimals() {
    let outcome = interpreter().interpret(
        Some("43.6512345678"),
        Some("-79.4012345"),
        None,
        Some(Country::CANADA),
    );

    assert_coordinate(&outcome, 43.65123, -79.40123);
    assert_issues(
        &outcome,
        &[IssueCode::CoordinateRounded, IssueCode::GeodeticDatumAssumedWgs84],
    );
}

#[test]
fn test_country_derived_without_stated_country() {
    let outcome = interpreter().interpret(Some("-37.78"), Some("144.97"), Some("WGS 84"), None);

    assert_issues(&outcome, &[IssueCode::CountryDerivedFromCoordinates]);
    assert_eq!(outcome.payload().unwrap().country, Some(Country::AUSTRALIA));
}

#[test]
fn test_swapped_axes_recovered() {
    let outcome = interpreter().interpret(Some("144.97"), Some("-37.78"), Some("WGS84"), None);

    assert_coordinate(&outcome, -37.78, 144.97);
    assert!(outcome.has_issue(IssueCode::PresumedSwappedCoordinate));
    assert!(outcome.has_issue(IssueCode::CountryDerivedFromCoordinates));
}

#[test]
fn test_zero_zero_is_a_point() {
    let outcome = interpreter().interpret(Some("0"), Some("0"), Some("WGS84"), None);
    assert_coordinate(&outcome, 0.0, 0.0);
    assert!(outcome.issues().is_empty());
}

#[test]
fn test_verbatim_dms_pair() {
    let outcome = interpreter().interpret_verbatim(
        Some("55°40'48\"N 12°34'12\"E"),
        Some("WGS84"),
        Some(Country::DENMARK),
    );
    assert_coordinate(&outcome, 55.68, 12.57);
    assert!(outcome.issues().is_empty());
}

#[test]
fn test_corrected_point_is_stable() {
    let interpreter = interpreter();
    let first = interpreter.interpret(Some("43.65"), Some("79.4"), None, Some(Country::CANADA));
    let point = *first.payload().unwrap();

    let again = interpreter.interpret(
        Some(&point.latitude.to_string()),
        Some(&point.longitude.to_string()),
        None,
        Some(Country::CANADA),
    );
    assert_coordinate(&again, 43.65, -79.4);
    assert_issues(&again, &[IssueCode::GeodeticDatumAssumedWgs84]);
}

proptest! {
    #[test]
    fn test_in_range_points_need_no_correction(
        lat in -90_000i32..=90_000,
        lng in -180_000i32..=180_000,
    ) {
        let interpreter = CoordinateInterpreter::new(Arc::new(MockGeocoder::empty()));
        let (lat, lng) = (lat as f64 / 1000.0, lng as f64 / 1000.0);

        let outcome = interpreter.interpret(Some(&lat.to_string()), Some(&lng.to_string()), None, None);
        prop_assert!(outcome.is_success());
        prop_assert_eq!(outcome.issues().len(), 1);
        prop_assert!(outcome.has_issue(IssueCode::GeodeticDatumAssumedWgs84));

        let point = *outcome.payload().unwrap();
        prop_assert_eq!(point.latitude, lat);
        prop_assert_eq!(point.longitude, lng);

        // Feeding the result back changes nothing
        let again = interpreter.interpret(
            Some(&point.latitude.to_string()),
            Some(&point.longitude.to_string()),
            None,
            None,
        );
        prop_assert_eq!(again.payload().copied(), Some(point));
        prop_assert_eq!(again.issues(), outcome.issues());
    }
}
