//! Elevation and depth ranges given as a minimum and maximum in metres.
//!
//! Either bound may be missing. Values may carry a unit; anything not in
//! metres is converted and flagged. The result is the midpoint of the range
//! with half its width as the accuracy.

use once_cell::sync::Lazy;
use quadrat_core::{IssueCode, IssueSet, MeterValue, ParseOutcome};
use regex::Regex;

static MEASUREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^([-+]?\d+(?:[.,]\d+)?|[-+]?[.,]\d+)\s*(m|meters?|metres?|km|kilometers?|kilometres?|ft|feet|foot|')?\.?$",
    )
    .expect("measurement pattern is valid")
});

const FEET_TO_METERS: f64 = 0.3048;

/// Plausible values and the issues reported for one kind of range
#[derive(Debug, Clone, Copy)]
pub struct RangeKind {
    pub lowest: f64,
    pub highest: f64,
    pub unlikely: IssueCode,
    pub swapped: IssueCode,
    pub not_metric: IssueCode,
    pub non_numeric: IssueCode,
}

pub const ELEVATION: RangeKind = RangeKind {
    lowest: -11_000.0,
    highest: 10_000.0,
    unlikely: IssueCode::ElevationUnlikely,
    swapped: IssueCode::ElevationMinMaxSwapped,
    not_metric: IssueCode::ElevationNotMetric,
    non_numeric: IssueCode::ElevationNonNumeric,
};

pub const DEPTH: RangeKind = RangeKind {
    lowest: 0.0,
    highest: 11_000.0,
    unlikely: IssueCode::DepthUnlikely,
    swapped: IssueCode::DepthMinMaxSwapped,
    not_metric: IssueCode::DepthNotMetric,
    non_numeric: IssueCode::DepthNonNumeric,
};

/// A single measurement converted to metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meters {
    pub value: f64,
    pub converted: bool,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse one measurement such as `"120"`, `"1,5 km"` or `"300 ft"`
pub fn parse_meters(text: &str) -> Option<Meters> {
    let caps = MEASUREMENT.captures(text.trim())?;
    let number: f64 = caps[1].replace(',', ".").parse().ok()?;
    let unit = caps.get(2).map(|u| u.as_str().to_ascii_lowercase());

    let (factor, converted) = match unit.as_deref() {
        None => (1.0, false),
        Some(u) if u.starts_with("km") || u.starts_with("kilomet") => (1000.0, true),
        Some(u) if u.starts_with('m') => (1.0, false),
        Some(_) => (FEET_TO_METERS, true),
    };
    let value = number * factor;
    Some(Meters {
        value: if converted { round2(value) } else { value },
        converted,
    })
}

/// Interpret a min/max pair into one value with accuracy
pub fn interpret_meter_range(
    min: Option<&str>,
    max: Option<&str>,
    kind: &RangeKind,
) -> ParseOutcome<MeterValue> {
    let mut issues = IssueSet::new();
    let mut bound = |text: Option<&str>| -> Option<f64> {
        let text = text.map(str::trim).filter(|t| !t.is_empty())?;
        match parse_meters(text) {
            Some(m) => {
                if m.converted {
                    issues.insert(kind.not_metric);
                }
                Some(m.value)
            }
            None => {
                issues.insert(kind.non_numeric);
                None
            }
        }
    };
    let min = bound(min);
    let max = bound(max);

    let (low, high) = match (min, max) {
        (Some(a), Some(b)) if a > b => {
            issues.insert(kind.swapped);
            (b, a)
        }
        (Some(a), Some(b)) => (a, b),
        (Some(v), None) | (None, Some(v)) => (v, v),
        (None, None) => return ParseOutcome::Failure { issues },
    };

    if low < kind.lowest || high > kind.highest {
        return ParseOutcome::fail_with(kind.unlikely).with_issues(issues);
    }

    ParseOutcome::Success {
        payload: MeterValue {
            value: round2((low + high) / 2.0),
            accuracy: round2((high - low) / 2.0),
        },
        confidence: quadrat_core::Confidence::Definite,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meters_units() {
        assert_eq!(parse_meters("120").map(|m| m.value), Some(120.0));
        assert_eq!(parse_meters("120 m").map(|m| m.converted), Some(false));
        assert_eq!(parse_meters("1,5km").map(|m| m.value), Some(1500.0));
        assert_eq!(parse_meters("100 ft").map(|m| m.value), Some(30.48));
        assert_eq!(parse_meters("100'").map(|m| m.converted), Some(true));
        assert_eq!(parse_meters("-20 Meters").map(|m| m.value), Some(-20.0));
        assert_eq!(parse_meters("about 100"), None);
        assert_eq!(parse_meters("100-200"), None);
    }

    #[test]
    fn test_range_midpoint_and_accuracy() {
        let outcome = interpret_meter_range(Some("100"), Some("200"), &ELEVATION);
        assert_eq!(outcome.payload(), Some(&MeterValue { value: 150.0, accuracy: 50.0 }));
        assert!(outcome.issues().is_empty());

        let outcome = interpret_meter_range(None, Some("35"), &DEPTH);
        assert_eq!(outcome.payload(), Some(&MeterValue { value: 35.0, accuracy: 0.0 }));
    }

    #[test]
    fn test_swapped_bounds() {
        let outcome = interpret_meter_range(Some("200"), Some("100"), &ELEVATION);
        assert_eq!(outcome.payload().map(|v| v.value), Some(150.0));
        assert!(outcome.has_issue(IssueCode::ElevationMinMaxSwapped));
    }

    #[test]
    fn test_non_numeric_and_not_metric() {
        let outcome = interpret_meter_range(Some("high"), Some("1000 ft"), &ELEVATION);
        assert_eq!(outcome.payload().map(|v| v.value), Some(304.8));
        assert!(outcome.has_issue(IssueCode::ElevationNonNumeric));
        assert!(outcome.has_issue(IssueCode::ElevationNotMetric));

        let outcome = interpret_meter_range(Some("deep"), None, &DEPTH);
        assert!(!outcome.is_success());
        assert!(outcome.has_issue(IssueCode::DepthNonNumeric));
    }

    #[test]
    fn test_unlikely_values_are_dropped() {
        let outcome = interpret_meter_range(Some("12000"), None, &ELEVATION);
        assert!(!outcome.is_success());
        assert!(outcome.has_issue(IssueCode::ElevationUnlikely));

        let outcome = interpret_meter_range(Some("-5"), Some("10"), &DEPTH);
        assert!(outcome.has_issue(IssueCode::DepthUnlikely));
        assert!(outcome.payload().is_none());
    }

    #[test]
    fn test_blank_is_silent_failure() {
        let outcome = interpret_meter_range(Some(" "), None, &DEPTH);
        assert!(!outcome.is_success());
        assert!(outcome.issues().is_empty());
    }
}
