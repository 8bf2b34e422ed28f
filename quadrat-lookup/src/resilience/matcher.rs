use super::retry::{with_retry, RetryPolicy};
use crate::{LookupError, NameMatcher};
use quadrat_core::{MatchQuery, NameUsageMatch};

/// Name matcher that retries transient failures of the wrapped matcher
pub struct RetryingNameMatcher<M> {
    inner: M,
    policy: RetryPolicy,
}

impl<M: NameMatcher> RetryingNameMatcher<M> {
    pub fn new(inner: M, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<M: NameMatcher> NameMatcher for RetryingNameMatcher<M> {
    fn match_name(&self, query: &MatchQuery) -> Result<NameUsageMatch, LookupError> {
        let context = format!(
            "name match of {}",
            query.name.as_deref().unwrap_or("<no name>")
        );
        with_retry(|| self.inner.match_name(query), &self.policy, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::RetryPolicyBuilder;
    use quadrat_core::MatchType;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    impl NameMatcher for Flaky {
        fn match_name(&self, _query: &MatchQuery) -> Result<NameUsageMatch, LookupError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(LookupError::Status { status: 502, url: "test".into() })
            } else {
                Ok(NameUsageMatch {
                    match_type: MatchType::Exact,
                    usage_key: Some(1),
                    ..Default::default()
                })
            }
        }
    }

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicyBuilder::new()
            .max_attempts(attempts)
            .initial_backoff(Duration::from_millis(1))
            .build()
    }

    #[test]
    fn test_recovers_within_budget() {
        let matcher = RetryingNameMatcher::new(Flaky { failures: 2, calls: AtomicU32::new(0) }, policy(3));
        let result = matcher.match_name(&MatchQuery::default()).unwrap();
        assert_eq!(result.usage_key, Some(1));
        assert_eq!(matcher.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_gives_up_after_budget() {
        let matcher = RetryingNameMatcher::new(Flaky { failures: 10, calls: AtomicU32::new(0) }, policy(3));
        let result = matcher.match_name(&MatchQuery::default());
        assert!(matches!(result, Err(LookupError::RetriesExhausted { attempts: 3, .. })));
        assert_eq!(matcher.inner.calls.load(Ordering::SeqCst), 3);
    }
}
