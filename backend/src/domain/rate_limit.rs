//! Fixed-window rate limiting keyed by caller network origin.
//!
//! Bounds brute-force and account-enumeration attempts against registration
//! and login. A rejected attempt never reaches the registry or ledger.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Attempt budget for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuota {
    /// Attempts allowed per window.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
}

impl RateQuota {
    /// A per-minute quota.
    pub const fn per_minute(max_requests: u32) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(60),
        }
    }
}

/// Returned when an origin has exhausted its window budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rate limit exceeded; retry in {}s", .retry_after.as_secs())]
pub struct RateLimitExceeded {
    /// Time remaining until the window resets.
    pub retry_after: Duration,
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Shrink the origin map before it can grow without bound.
const PRUNE_THRESHOLD: usize = 1024;

/// Fixed-window counter per origin.
#[derive(Debug)]
pub struct RateLimiter {
    quota: RateQuota,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    /// Create a limiter with the given quota.
    pub fn new(quota: RateQuota) -> Self {
        Self {
            quota,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt from `origin`, rejecting it when over budget.
    pub fn check(&self, origin: &str) -> Result<(), RateLimitExceeded> {
        self.check_at(origin, Instant::now())
    }

    /// [`Self::check`] with an explicit clock reading, for deterministic tests.
    pub fn check_at(&self, origin: &str, now: Instant) -> Result<(), RateLimitExceeded> {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if windows.len() > PRUNE_THRESHOLD {
            let window = self.quota.window;
            windows.retain(|_, w| now.saturating_duration_since(w.started_at) < window);
        }

        let window = windows.entry(origin.to_owned()).or_insert_with(|| Window {
            started_at: now,
            count: 0,
        });
        if now.saturating_duration_since(window.started_at) >= self.quota.window {
            window.started_at = now;
            window.count = 0;
        }
        if window.count >= self.quota.max_requests {
            let elapsed = now.saturating_duration_since(window.started_at);
            return Err(RateLimitExceeded {
                retry_after: self.quota.window.saturating_sub(elapsed),
            });
        }
        window.count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_within_quota_pass() {
        let limiter = RateLimiter::new(RateQuota::per_minute(3));
        let now = Instant::now();
        for _ in 0..3 {
            assert!(limiter.check_at("10.0.0.1", now).is_ok());
        }
    }

    #[test]
    fn the_attempt_over_quota_is_rejected() {
        let limiter = RateLimiter::new(RateQuota::per_minute(2));
        let now = Instant::now();
        assert!(limiter.check_at("10.0.0.1", now).is_ok());
        assert!(limiter.check_at("10.0.0.1", now).is_ok());
        let err = limiter
            .check_at("10.0.0.1", now)
            .expect_err("third attempt must be rejected");
        assert!(err.retry_after <= Duration::from_secs(60));
    }

    #[test]
    fn origins_are_counted_independently() {
        let limiter = RateLimiter::new(RateQuota::per_minute(1));
        let now = Instant::now();
        assert!(limiter.check_at("10.0.0.1", now).is_ok());
        assert!(limiter.check_at("10.0.0.2", now).is_ok());
        assert!(limiter.check_at("10.0.0.1", now).is_err());
    }

    #[test]
    fn windows_reset_after_their_length_elapses() {
        let limiter = RateLimiter::new(RateQuota::per_minute(1));
        let now = Instant::now();
        assert!(limiter.check_at("10.0.0.1", now).is_ok());
        assert!(limiter.check_at("10.0.0.1", now).is_err());
        let later = now + Duration::from_secs(61);
        assert!(limiter.check_at("10.0.0.1", later).is_ok());
    }

    #[test]
    fn stale_origins_are_pruned_once_the_map_grows() {
        let limiter = RateLimiter::new(RateQuota::per_minute(1));
        let now = Instant::now();
        for i in 0..=PRUNE_THRESHOLD {
            assert!(limiter.check_at(&format!("10.0.{}.{}", i / 256, i % 256), now).is_ok());
        }
        let later = now + Duration::from_secs(120);
        assert!(limiter.check_at("fresh-origin", later).is_ok());
        let windows = limiter.windows.lock().expect("unpoisoned in tests");
        assert!(windows.len() <= 2);
    }
}
