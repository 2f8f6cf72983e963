//! Sliding-window rate limiting for login attempts.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// In-memory sliding-window rate limiter keyed by client address.
///
/// Entries are pruned lazily on each check; idle keys are removed once their
/// window expires.
#[derive(Debug)]
pub struct RateLimiter {
    max_attempts: usize,
    window: Duration,
    attempts: DashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_attempts` per `window` per key.
    #[must_use]
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: DashMap::new(),
        }
    }

    /// Records an attempt for `key` and reports whether it is allowed.
    ///
    /// Attempts older than the window no longer count.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.attempts.entry(key.to_string()).or_default();

        entry.retain(|t| now.duration_since(*t) < self.window);

        if entry.len() >= self.max_attempts {
            return false;
        }

        entry.push(now);
        true
    }

    /// Seconds a blocked client should wait before retrying.
    #[must_use]
    pub const fn retry_after_secs(&self) -> u64 {
        self.window.as_secs()
    }
}

impl Default for RateLimiter {
    /// Five attempts per fifteen minutes, matching the login policy.
    fn default() -> Self {
        Self::new(5, Duration::from_secs(15 * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_max_attempts() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.2"));
    }

    #[test]
    fn test_expired_attempts_do_not_count() {
        let limiter = RateLimiter::new(1, Duration::ZERO);
        assert!(limiter.check("10.0.0.1"));
        // Window of zero: the previous attempt has already expired.
        assert!(limiter.check("10.0.0.1"));
    }

    #[test]
    fn test_retry_after_matches_window() {
        let limiter = RateLimiter::new(5, Duration::from_secs(900));
        assert_eq!(limiter.retry_after_secs(), 900);
    }
}
