/// Bounded retry with backoff for reference lookups
use crate::LookupError;
use quadrat_core::config::RetryConfig;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, error, warn};

/// How often and how patiently a lookup is retried
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff before the first retry
    pub initial_backoff: Duration,
    /// Upper bound on any single wait
    pub max_backoff: Duration,
    /// 1.0 keeps the backoff fixed
    pub multiplier: f32,
    /// Stretch each wait by up to a quarter at random
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::for_lookups()
    }
}

impl RetryPolicy {
    /// Five attempts, two seconds apart
    pub fn for_lookups() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(2000),
            max_backoff: Duration::from_secs(60),
            multiplier: 1.0,
            jitter: false,
        }
    }

    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            multiplier: 1.0,
            jitter: false,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_backoff: Duration::from_millis(config.backoff_ms),
            multiplier: config.multiplier,
            jitter: config.jitter,
            ..Self::for_lookups()
        }
    }

    /// Wait before retry number `attempt + 1`, capped at `max_backoff`
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let scaled = self.initial_backoff.as_millis() as f64
            * f64::from(self.multiplier).powi(attempt as i32);
        let capped = scaled.min(self.max_backoff.as_millis() as f64).max(0.0) as u64;

        let spread = if self.jitter {
            rand::thread_rng().gen_range(0..=capped / 4)
        } else {
            0
        };
        Duration::from_millis(capped + spread)
    }
}

/// Run `operation` under `policy`.
///
/// Only transient lookup failures are retried. Running out of attempts
/// yields `LookupError::RetriesExhausted` carrying the last failure.
pub fn with_retry<F, T>(mut operation: F, policy: &RetryPolicy, context: &str) -> Result<T, LookupError>
where
    F: FnMut() -> Result<T, LookupError>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let err = match operation() {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{} answered on attempt {}", context, attempt);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if !err.is_transient() {
            error!("{} failed permanently: {}", context, err);
            return Err(err);
        }
        if attempt >= attempts {
            error!("{} still failing after {} attempts: {}", context, attempts, err);
            return Err(LookupError::RetriesExhausted {
                attempts,
                last: Box::new(err),
            });
        }

        let wait = policy.calculate_backoff(attempt - 1);
        warn!(
            "{} failed ({}/{}): {}; next try in {:?}",
            context, attempt, attempts, err, wait
        );
        std::thread::sleep(wait);
        attempt += 1;
    }
}

/// Builder for retry policies
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl Default for RetryPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicyBuilder {
    pub fn new() -> Self {
        Self {
            policy: RetryPolicy::default(),
        }
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.policy.max_attempts = attempts;
        self
    }

    pub fn initial_backoff(mut self, duration: Duration) -> Self {
        self.policy.initial_backoff = duration;
        self
    }

    pub fn max_backoff(mut self, duration: Duration) -> Self {
        self.policy.max_backoff = duration;
        self
    }

    pub fn multiplier(mut self, multiplier: f32) -> Self {
        self.policy.multiplier = multiplier;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.policy.jitter = jitter;
        self
    }

    pub fn build(self) -> RetryPolicy {
        self.policy
    }
}
