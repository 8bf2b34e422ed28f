//! Mock name matcher with scripted answers

use quadrat_core::{MatchQuery, MatchType, NameUsageMatch};
use quadrat_lookup::{LookupError, NameMatcher};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Answers by query name. Unknown names get a NONE match; names marked
/// unreachable fail with a transport error.
pub struct MockNameMatcher {
    answers: HashMap<String, NameUsageMatch>,
    unreachable: HashSet<String>,
    transient_failures: AtomicU32,
    calls: AtomicUsize,
    queries: Mutex<Vec<MatchQuery>>,
}

impl MockNameMatcher {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            unreachable: HashSet::new(),
            transient_failures: AtomicU32::new(0),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_answer(mut self, name: &str, answer: NameUsageMatch) -> Self {
        self.answers.insert(name.to_string(), answer);
        self
    }

    /// Every query for this name fails as if the service were down
    pub fn with_unreachable(mut self, name: &str) -> Self {
        self.unreachable.insert(name.to_string());
        self
    }

    /// The next `count` calls fail transiently, whatever the name
    pub fn with_transient_failures(self, count: u32) -> Self {
        self.transient_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queries received so far, in call order
    pub fn queries(&self) -> Vec<MatchQuery> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

impl Default for MockNameMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NameMatcher for MockNameMatcher {
    fn match_name(&self, query: &MatchQuery) -> Result<NameUsageMatch, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }

        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(LookupError::Status {
                status: 503,
                url: "mock://species/match".to_string(),
            });
        }

        let name = query.name.clone().unwrap_or_default();
        if self.unreachable.contains(&name) {
            return Err(LookupError::Transport(format!("no route to host for {}", name)));
        }

        Ok(self.answers.get(&name).cloned().unwrap_or_else(|| NameUsageMatch {
            match_type: MatchType::None,
            note: Some(format!("No match for {}", name)),
            ..Default::default()
        }))
    }
}
