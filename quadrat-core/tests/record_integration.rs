//! Verbatim records in and interpreted records out, through serde

use pretty_assertions::assert_eq;
use quadrat_core::{
    Country, Extension, InterpretedRecord, IssueCode, Rank, Term, TermLookup, VerbatimRecord,
};

#[test]
fn test_json_line_round_trip() {
    let record = VerbatimRecord::builder("occ-1")
        .field(Term::CountryCode, "DK")
        .field(Term::DecimalLatitude, "55.6761")
        .field(Term::DecimalLongitude, "12.5683")
        .field(Term::ScientificName, "Puma concolor")
        .extension_row(
            Extension::Identification,
            [(Term::ScientificName, "Felis concolor"), (Term::DateIdentified, "1990-01-01")],
        )
        .build();

    let line = serde_json::to_string(&record).unwrap();
    assert!(line.contains("\"countryCode\":\"DK\""));

    let back: VerbatimRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(back, record);
    assert_eq!(
        back.extension(Extension::Identification)[0].value(Term::DateIdentified),
        Some("1990-01-01")
    );
}

#[test]
fn test_interpreted_record_json_shape() {
    let mut record = InterpretedRecord::new("occ-2");
    record.country = Some(Country::CANADA);
    record.decimal_latitude = Some(43.65);
    record.decimal_longitude = Some(-79.4);
    record.taxon_rank = Some(Rank::Species);
    record.add_issue(IssueCode::PresumedNegatedLongitude);
    record.add_issue(IssueCode::GeodeticDatumAssumedWgs84);

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["country"], "CA");
    assert_eq!(value["decimalLongitude"], -79.4);
    assert_eq!(value["taxonRank"], "SPECIES");
    assert_eq!(
        value["issues"],
        serde_json::json!(["PRESUMED_NEGATED_LONGITUDE", "GEODETIC_DATUM_ASSUMED_WGS84"])
    );
}

#[test]
fn test_vocabularies_from_str() {
    assert_eq!("Canada".parse::<Country>().unwrap(), Country::CANADA);
    assert_eq!("subsp.".parse::<Rank>().unwrap(), Rank::Subspecies);
    assert!("nowhere".parse::<Country>().is_err());
}
