use std::time::{Duration, Instant};

use dashmap::DashMap;

const MAX_FAILURES: u32 = 5;
const WINDOW: Duration = Duration::from_secs(15 * 60);

/// Per-email login brute force limiter, sliding window.
pub struct LoginRateLimiter {
    /// email -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check if a login attempt for this email is allowed.
    pub fn check(&self, email: &str) -> Result<(), ()> {
        if let Some(entry) = self.entries.get(email) {
            let (count, start) = *entry;
            if start.elapsed() < WINDOW && count >= MAX_FAILURES {
                return Err(());
            }
        }
        Ok(())
    }

    pub fn record_failure(&self, email: &str) {
        let now = Instant::now();
        let mut entry = self.entries.entry(email.to_string()).or_insert((0, now));
        let (count, start) = entry.value_mut();
        if start.elapsed() >= WINDOW {
            *count = 0;
            *start = now;
        }
        *count += 1;
    }

    pub fn reset(&self, email: &str) {
        self.entries.remove(email);
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_until_threshold_then_blocks() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..5 {
            assert!(limiter.check("a@b.com").is_ok());
            limiter.record_failure("a@b.com");
        }
        assert!(limiter.check("a@b.com").is_err());
    }

    #[test]
    fn reset_clears_the_counter() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..6 {
            limiter.record_failure("a@b.com");
        }
        assert!(limiter.check("a@b.com").is_err());
        limiter.reset("a@b.com");
        assert!(limiter.check("a@b.com").is_ok());
    }

    #[test]
    fn emails_are_limited_independently() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..6 {
            limiter.record_failure("a@b.com");
        }
        assert!(limiter.check("other@b.com").is_ok());
    }
}
