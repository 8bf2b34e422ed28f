/// Uniform result of every interpretation step
use super::issue::{IssueCode, IssueSet};
use serde::{Deserialize, Serialize};

/// How sure an interpreter is about a successful payload.
///
/// Informational only: a `Probable` payload is applied exactly like a
/// `Definite` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Definite,
    Probable,
}

/// Either a usable payload plus the corrections applied to reach it, or no
/// payload plus the reasons none could be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Success {
        payload: T,
        confidence: Confidence,
        issues: IssueSet,
    },
    Failure {
        issues: IssueSet,
    },
}

impl<T> ParseOutcome<T> {
    /// Definite success without issues
    pub fn success(payload: T) -> Self {
        Self::Success {
            payload,
            confidence: Confidence::Definite,
            issues: IssueSet::new(),
        }
    }

    pub fn probable(payload: T) -> Self {
        Self::Success {
            payload,
            confidence: Confidence::Probable,
            issues: IssueSet::new(),
        }
    }

    /// Failure with no explanation; used when no attempt was made
    pub fn fail() -> Self {
        Self::Failure {
            issues: IssueSet::new(),
        }
    }

    pub fn fail_with(issue: IssueCode) -> Self {
        let mut issues = IssueSet::new();
        issues.insert(issue);
        Self::Failure { issues }
    }

    pub fn with_issue(mut self, issue: IssueCode) -> Self {
        self.add_issue(issue);
        self
    }

    pub fn with_issues<I: IntoIterator<Item = IssueCode>>(mut self, extra: I) -> Self {
        self.issues_mut().extend(extra);
        self
    }

    pub fn with_confidence(self, confidence: Confidence) -> Self {
        match self {
            Self::Success { payload, issues, .. } => Self::Success {
                payload,
                confidence,
                issues,
            },
            failure => failure,
        }
    }

    pub fn add_issue(&mut self, issue: IssueCode) {
        self.issues_mut().insert(issue);
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            Self::Success { confidence, .. } => Some(*confidence),
            Self::Failure { .. } => None,
        }
    }

    pub fn issues(&self) -> &IssueSet {
        match self {
            Self::Success { issues, .. } | Self::Failure { issues } => issues,
        }
    }

    pub fn has_issue(&self, issue: IssueCode) -> bool {
        self.issues().contains(&issue)
    }

    fn issues_mut(&mut self) -> &mut IssueSet {
        match self {
            Self::Success { issues, .. } | Self::Failure { issues } => issues,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ParseOutcome<U> {
        match self {
            Self::Success {
                payload,
                confidence,
                issues,
            } => ParseOutcome::Success {
                payload: f(payload),
                confidence,
                issues,
            },
            Self::Failure { issues } => ParseOutcome::Failure { issues },
        }
    }

    pub fn into_payload(self) -> Option<T> {
        self.into_parts().0
    }

    pub fn into_parts(self) -> (Option<T>, IssueSet) {
        match self {
            Self::Success { payload, issues, .. } => (Some(payload), issues),
            Self::Failure { issues } => (None, issues),
        }
    }
}
