//! Fixed-window rate limiter
//!
//! Per-client request counter with a rolling 60-second reset. The whole
//! table sits behind one mutex; the lock is held only for the map touch,
//! and a poisoned lock fails open rather than blocking requests. Entries
//! whose window expired long ago are swept opportunistically so the table
//! stays bounded under many distinct clients.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default request threshold per window
pub const DEFAULT_MAX_REQUESTS: u32 = 120;

/// Default window length
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Table size above which a sweep of stale entries runs
const SWEEP_WATERMARK: usize = 1024;

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window limiter keyed by client identity
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request from `client` and decide whether it may proceed.
    ///
    /// The counter advances even when the request is denied, so the
    /// window tracks continuously. Denied clients are admitted again once
    /// the window elapses and the entry resets.
    pub fn check(&self, client: &str) -> Decision {
        let now = Instant::now();

        // Fail open: a poisoned lock must not block traffic.
        let Ok(mut entries) = self.entries.lock() else {
            return Decision::Allowed;
        };

        if entries.len() > SWEEP_WATERMARK {
            let horizon = self.window * 2;
            entries.retain(|_, entry| now.duration_since(entry.window_start) < horizon);
        }

        let entry = entries.entry(client.to_string()).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 1;
            entry.window_start = now;
        } else {
            entry.count = entry.count.saturating_add(1);
        }

        if entry.count > self.max_requests {
            Decision::Denied
        } else {
            Decision::Allowed
        }
    }

    /// Number of client identities currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_allows_up_to_threshold() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert_eq!(limiter.check("10.0.0.1"), Decision::Allowed);
        }
        assert_eq!(limiter.check("10.0.0.1"), Decision::Denied);
    }

    #[test]
    fn test_clients_counted_independently() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        assert_eq!(limiter.check("10.0.0.1"), Decision::Allowed);
        assert_eq!(limiter.check("10.0.0.1"), Decision::Denied);
        assert_eq!(limiter.check("10.0.0.2"), Decision::Allowed);
    }

    #[test]
    fn test_window_reset_readmits_client() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_millis(20));
        assert_eq!(limiter.check("10.0.0.1"), Decision::Allowed);
        assert_eq!(limiter.check("10.0.0.1"), Decision::Denied);

        thread::sleep(Duration::from_millis(25));
        assert_eq!(limiter.check("10.0.0.1"), Decision::Allowed);
    }

    #[test]
    fn test_denied_requests_advance_the_counter() {
        let limiter = FixedWindowLimiter::new(2, Duration::from_millis(40));
        assert_eq!(limiter.check("10.0.0.1"), Decision::Allowed);
        assert_eq!(limiter.check("10.0.0.1"), Decision::Allowed);
        // Denied, but still counted: the window keeps tracking.
        assert_eq!(limiter.check("10.0.0.1"), Decision::Denied);
        assert_eq!(limiter.check("10.0.0.1"), Decision::Denied);

        thread::sleep(Duration::from_millis(45));
        assert_eq!(limiter.check("10.0.0.1"), Decision::Allowed);
    }

    #[test]
    fn test_stale_entries_swept_past_watermark() {
        let limiter = FixedWindowLimiter::new(100, Duration::from_millis(5));
        for i in 0..=SWEEP_WATERMARK {
            limiter.check(&format!("client-{}", i));
        }
        assert!(limiter.tracked_clients() > SWEEP_WATERMARK);

        // Let every window expire past the sweep horizon, then trigger
        // the sweep with one more request.
        thread::sleep(Duration::from_millis(15));
        limiter.check("fresh-client");
        assert!(limiter.tracked_clients() <= 2);
    }
}
