//! Temporal interpretation
//!
//! Reconciles the atomic year, month and day fields with a free text event
//! date, and reads the identification and modification dates. Every date is
//! bounded below by a configurable earliest year and above by today.

pub mod layouts;

pub use layouts::{parse_date, ParsedDate};

use chrono::{Datelike, NaiveDate, Utc};
use quadrat_core::config::TemporalConfig;
use quadrat_core::{
    Confidence, DateYmd, InterpretedRecord, IssueCode, IssueSet, ParseOutcome, Term, TermLookup,
};
use tracing::debug;

pub const DEFAULT_MIN_YEAR: i32 = 1600;

/// Atomic parts after validation, before reconciling with the text date
#[derive(Debug, Default, Clone, Copy)]
struct AtomicParts {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
}

fn days_in_month(year: Option<i32>, month: u32) -> u32 {
    // 2000 is a leap year, so an unknown year allows 29 February
    let year = year.unwrap_or(2000);
    let (next_year, next_month) = if month == 12 {
        match year.checked_add(1) {
            Some(next) => (next, 1),
            None => return 31,
        }
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Everything read from one record's date terms
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalInterpretation {
    pub recorded: ParseOutcome<DateYmd>,
    pub identified: ParseOutcome<NaiveDate>,
    pub modified: ParseOutcome<NaiveDate>,
}

impl TemporalInterpretation {
    pub fn apply_to(&self, record: &mut InterpretedRecord) {
        if let Some(ymd) = self.recorded.payload() {
            record.year = ymd.year;
            record.month = ymd.month;
            record.day = ymd.day;
            record.event_date = ymd.date;
        }
        record.date_identified = self.identified.payload().copied();
        record.modified = self.modified.payload().copied();

        record.add_issues(self.recorded.issues());
        record.add_issues(self.identified.issues());
        record.add_issues(self.modified.issues());
    }
}

#[derive(Debug, Clone)]
pub struct TemporalInterpreter {
    min_year: i32,
    today: Option<NaiveDate>,
}

impl Default for TemporalInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_YEAR)
    }
}

impl TemporalInterpreter {
    pub fn new(min_year: i32) -> Self {
        Self {
            min_year,
            today: None,
        }
    }

    pub fn from_config(config: &TemporalConfig) -> Self {
        Self::new(config.min_year)
    }

    /// Fix the reference day instead of reading the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    /// Reconcile atomic year/month/day text with a free text event date.
    ///
    /// A full text date wins outright. A partial one is completed from the
    /// atomic parts that agree with it. Unparsable text falls back to the
    /// atomic parts and is flagged.
    pub fn interpret_recorded_date(
        &self,
        year: Option<&str>,
        month: Option<&str>,
        day: Option<&str>,
        date_text: Option<&str>,
    ) -> ParseOutcome<DateYmd> {
        let mut issues = IssueSet::new();
        let atomic = self.atomic_parts(year, month, day, &mut issues);

        let parsed = match date_text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => match parse_date(text) {
                Some(parsed) => Some(parsed),
                None => {
                    debug!("Unparsable event date {:?}", text);
                    issues.insert(IssueCode::RecordedDateInvalid);
                    None
                }
            },
            None => None,
        };

        let (ymd, confidence) = match parsed {
            Some(p) if p.is_full() => (p.ymd, p.confidence),
            Some(p) => (fill_from_atomic(p.ymd, atomic), p.confidence),
            None => (DateYmd::new(atomic.year, atomic.month, atomic.day), Confidence::Definite),
        };

        if ymd.is_empty() {
            return ParseOutcome::Failure { issues };
        }

        let today = self.today();
        let unlikely_year = ymd
            .year
            .map(|y| y < self.min_year || y > today.year())
            .unwrap_or(false);
        let future_date = ymd.date.map(|d| d > today).unwrap_or(false);
        if unlikely_year || future_date {
            debug!("Recorded date {:?} outside [{}, {}]", ymd, self.min_year, today);
            return ParseOutcome::fail_with(IssueCode::RecordedDateUnlikely).with_issues(issues);
        }

        ParseOutcome::Success {
            payload: ymd,
            confidence,
            issues,
        }
    }

    fn atomic_parts(
        &self,
        year: Option<&str>,
        month: Option<&str>,
        day: Option<&str>,
        issues: &mut IssueSet,
    ) -> AtomicParts {
        fn number<T: std::str::FromStr>(text: Option<&str>, issues: &mut IssueSet) -> Option<T> {
            let text = text.map(str::trim).filter(|t| !t.is_empty())?;
            match text.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    issues.insert(IssueCode::RecordedDateInvalid);
                    None
                }
            }
        }

        let year: Option<i32> = number(year, issues);
        let month_given = month.map(|m| !m.trim().is_empty()).unwrap_or(false);
        let month: Option<u32> = number::<u32>(month, issues).filter(|m| (1..=12).contains(m));
        let mut day: Option<u32> = number::<u32>(day, issues).filter(|d| (1..=31).contains(d));

        // A day is meaningless once its stated month is discarded
        if month_given && month.is_none() {
            day = None;
        }
        if let (Some(m), Some(d)) = (month, day) {
            if d > days_in_month(year, m) {
                day = None;
            }
        }

        AtomicParts { year, month, day }
    }

    /// Parse a standalone date, dropping it when unparsable or implausible
    pub fn interpret_bounded_date(
        &self,
        text: Option<&str>,
        invalid: IssueCode,
        unlikely: IssueCode,
    ) -> ParseOutcome<NaiveDate> {
        let text = match text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => text,
            None => return ParseOutcome::fail(),
        };
        let parsed = match parse_date(text) {
            Some(parsed) => parsed,
            None => return ParseOutcome::fail_with(invalid),
        };
        let date = match parsed.first_day() {
            Some(date) => date,
            None => return ParseOutcome::fail_with(invalid),
        };
        if date.year() < self.min_year || date > self.today() {
            return ParseOutcome::fail_with(unlikely);
        }
        ParseOutcome::success(date).with_confidence(parsed.confidence)
    }

    /// Recorded, identified and modified dates of one record
    pub fn interpret_temporal<L: TermLookup + ?Sized>(&self, terms: &L) -> TemporalInterpretation {
        TemporalInterpretation {
            recorded: self.interpret_recorded_date(
                terms.value(Term::Year),
                terms.value(Term::Month),
                terms.value(Term::Day),
                terms.value(Term::EventDate),
            ),
            identified: self.interpret_bounded_date(
                terms.value(Term::DateIdentified),
                IssueCode::IdentifiedDateInvalid,
                IssueCode::IdentifiedDateUnlikely,
            ),
            modified: self.interpret_bounded_date(
                terms.value(Term::Modified),
                IssueCode::ModifiedDateInvalid,
                IssueCode::ModifiedDateUnlikely,
            ),
        }
    }
}

/// Complete a partial text date with atomic parts that agree with it
fn fill_from_atomic(text: DateYmd, atomic: AtomicParts) -> DateYmd {
    let year_agrees = atomic.year.is_none() || atomic.year == text.year;
    let month = match text.month {
        Some(m) => Some(m),
        None if year_agrees => atomic.month,
        None => None,
    };
    let day = match (month, atomic.month) {
        (Some(m), Some(am)) if year_agrees && m == am => atomic.day,
        _ => None,
    };
    DateYmd::new(text.year, month, day)
}
