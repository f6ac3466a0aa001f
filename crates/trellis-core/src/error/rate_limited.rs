use std::time::Duration;

use super::Error;

/// Error when a caller exceeded its request budget.
#[derive(Debug)]
pub(super) struct RateLimitedError {
    retry_after: Duration,
}

impl std::error::Error for RateLimitedError {}

impl core::fmt::Display for RateLimitedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "rate limit exceeded; retry after {}s",
            self.retry_after.as_secs()
        )
    }
}

impl Error {
    /// Creates a rate limit error carrying retry guidance.
    pub fn rate_limited(retry_after: Duration) -> Error {
        Error::from(super::ErrorKind::RateLimited(RateLimitedError { retry_after }))
    }

    /// Returns `true` if this error is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.retry_after().is_some()
    }

    /// How long the caller should wait before retrying.
    pub fn retry_after(&self) -> Option<Duration> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::RateLimited(err) => Some(&err.retry_after),
            _ => None,
        })
        .copied()
    }
}
