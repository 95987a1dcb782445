//! Retry policy for store requests.

use std::time::Duration;

use simplenotes_core::Error;

/// Whether repeating a request can change server state twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idempotency {
    /// GET and DELETE: repeating them is harmless.
    Idempotent,
    /// POST: a repeat after the server saw the request would duplicate a note.
    NonIdempotent,
}

/// Decides whether a failed attempt is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// `attempt` is 1-based: the first try is attempt 1.
    ///
    /// Non-idempotent requests are only repeated when the connection was
    /// never established.
    pub fn should_retry(&self, error: &Error, attempt: u32, idempotency: Idempotency) -> bool {
        if attempt > self.max_retries {
            return false;
        }
        match idempotency {
            Idempotency::Idempotent => error.is_retryable(),
            Idempotency::NonIdempotent => error.is_connect(),
        }
    }
}
