pub mod matcher;
pub mod retry;

pub use matcher::RetryingNameMatcher;
pub use retry::{with_retry, RetryPolicy, RetryPolicyBuilder};
