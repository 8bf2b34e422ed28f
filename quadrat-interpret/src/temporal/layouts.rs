//! Free text date layouts, tried in a fixed order.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use quadrat_core::{Confidence, DateYmd};
use regex::Regex;

static ISO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})(?:[T\s].*)?$").expect("ISO date pattern is valid")
});

static COMPACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("compact date pattern is valid"));

static YEAR_LAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})(?:[T\s].*)?$")
        .expect("year-last date pattern is valid")
});

static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})$").expect("year-month pattern is valid"));

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").expect("year pattern is valid"));

/// A date read from free text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub ymd: DateYmd,
    pub confidence: Confidence,
}

impl ParsedDate {
    fn full(date: NaiveDate, confidence: Confidence) -> Self {
        Self {
            ymd: DateYmd::from_date(date),
            confidence,
        }
    }

    fn partial(year: i32, month: Option<u32>) -> Self {
        Self {
            ymd: DateYmd::new(Some(year), month, None),
            confidence: Confidence::Definite,
        }
    }

    pub fn is_full(&self) -> bool {
        self.ymd.date.is_some()
    }

    /// The full date, or the first day of the month or year it names
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.ymd.date.or_else(|| {
            NaiveDate::from_ymd_opt(self.ymd.year?, self.ymd.month.unwrap_or(1), 1)
        })
    }
}

type Layout = fn(&str) -> Option<ParsedDate>;

const LAYOUTS: &[Layout] = &[iso, compact, year_last, year_month, year_only];

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn iso(text: &str) -> Option<ParsedDate> {
    let caps = ISO.captures(text)?;
    ymd(&caps[1], &caps[2], &caps[3]).map(|d| ParsedDate::full(d, Confidence::Definite))
}

fn compact(text: &str) -> Option<ParsedDate> {
    let caps = COMPACT.captures(text)?;
    ymd(&caps[1], &caps[2], &caps[3]).map(|d| ParsedDate::full(d, Confidence::Definite))
}

/// `d-M-yyyy` or `M-d-yyyy`; day-first wins when both read as real dates
fn year_last(text: &str) -> Option<ParsedDate> {
    let caps = YEAR_LAST.captures(text)?;
    let day_first = ymd(&caps[3], &caps[2], &caps[1]);
    let month_first = ymd(&caps[3], &caps[1], &caps[2]);
    match (day_first, month_first) {
        (Some(d), Some(m)) if d == m => Some(ParsedDate::full(d, Confidence::Definite)),
        (Some(d), Some(_)) => Some(ParsedDate::full(d, Confidence::Probable)),
        (Some(d), None) | (None, Some(d)) => Some(ParsedDate::full(d, Confidence::Definite)),
        (None, None) => None,
    }
}

fn year_month(text: &str) -> Option<ParsedDate> {
    let caps = YEAR_MONTH.captures(text)?;
    let month: u32 = caps[2].parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(ParsedDate::partial(caps[1].parse().ok()?, Some(month)))
}

fn year_only(text: &str) -> Option<ParsedDate> {
    let caps = YEAR.captures(text)?;
    Some(ParsedDate::partial(caps[1].parse().ok()?, None))
}

/// First layout that reads the text, if any
pub fn parse_date(text: &str) -> Option<ParsedDate> {
    let text = text.trim();
    LAYOUTS.iter().find_map(|layout| layout(text))
}
