//! Per-identity sliding-window rate limiter
//!
//! Each identity keeps the timestamps of its admitted requests. On every
//! admission attempt, timestamps at least one window old are discarded; the
//! request is admitted only if fewer than `max_requests` remain. Denied
//! attempts are not recorded.
//!
//! State lives in process memory and is lost on restart. Identities are never
//! evicted, so `tracked_identities` grows with the number of distinct callers.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::RateLimitConfig;

/// Outcome of one admission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    /// `retry_after` is the time until the oldest recorded request leaves the window
    Denied { retry_after: Duration },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed)
    }
}

pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    requests: DashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: DashMap::new(),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window())
    }

    /// Admit or deny a request from `identity` at the current instant
    pub fn admit(&self, identity: &str) -> Admission {
        self.admit_at(identity, Instant::now())
    }

    /// Admit or deny a request from `identity` arriving at `now`
    ///
    /// Check and record happen under the identity's map entry lock, so
    /// concurrent attempts for one identity cannot both take the last slot.
    pub fn admit_at(&self, identity: &str, now: Instant) -> Admission {
        let mut timestamps = self.requests.entry(identity.to_string()).or_default();

        while let Some(&oldest) = timestamps.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        if timestamps.len() >= self.max_requests {
            let retry_after = timestamps
                .front()
                .map(|&oldest| self.window.saturating_sub(now.saturating_duration_since(oldest)))
                .unwrap_or(self.window);
            return Admission::Denied { retry_after };
        }

        timestamps.push_back(now);
        Admission::Allowed
    }

    /// Number of distinct identities with recorded history
    pub fn tracked_identities(&self) -> usize {
        self.requests.len()
    }

    pub fn window_len(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn limiter() -> SlidingWindowLimiter {
        SlidingWindowLimiter::new(10, Duration::from_secs(60))
    }

    #[test]
    fn test_eleventh_request_denied() {
        let limiter = limiter();
        let start = Instant::now();

        for i in 0..10 {
            let now = start + Duration::from_secs(i);
            assert_eq!(limiter.admit_at("alice", now), Admission::Allowed, "request {}", i + 1);
        }

        assert_eq!(
            limiter.admit_at("alice", start + Duration::from_secs(10)),
            Admission::Denied {
                retry_after: Duration::from_secs(50)
            }
        );
    }

    #[test]
    fn test_denial_does_not_consume_slot() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..10 {
            limiter.admit_at("alice", start);
        }
        for _ in 0..5 {
            assert!(!limiter.admit_at("alice", start + Duration::from_secs(30)).is_allowed());
        }

        // All ten originals expire together; the denials left nothing behind
        let later = start + Duration::from_secs(60);
        for _ in 0..10 {
            assert!(limiter.admit_at("alice", later).is_allowed());
        }
        assert!(!limiter.admit_at("alice", later).is_allowed());
    }

    #[test]
    fn test_timestamp_exactly_one_window_old_is_purged() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.admit_at("bob", start).is_allowed());
        assert_eq!(
            limiter.admit_at("bob", start + Duration::from_millis(59_999)),
            Admission::Denied {
                retry_after: Duration::from_millis(1)
            }
        );
        assert!(limiter.admit_at("bob", start + Duration::from_secs(60)).is_allowed());
    }

    #[test]
    fn test_window_slides() {
        let limiter = SlidingWindowLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.admit_at("carol", start).is_allowed());
        assert!(limiter
            .admit_at("carol", start + Duration::from_secs(30))
            .is_allowed());
        assert!(!limiter
            .admit_at("carol", start + Duration::from_secs(45))
            .is_allowed());

        // First request has left the window, second has not
        assert!(limiter
            .admit_at("carol", start + Duration::from_secs(61))
            .is_allowed());
        assert_eq!(
            limiter.admit_at("carol", start + Duration::from_secs(62)),
            Admission::Denied {
                retry_after: Duration::from_secs(28)
            }
        );
    }

    #[test]
    fn test_identities_are_independent() {
        let limiter = limiter();
        let now = Instant::now();

        for _ in 0..10 {
            limiter.admit_at("alice", now);
        }
        assert!(!limiter.admit_at("alice", now).is_allowed());
        assert!(limiter.admit_at("bob", now).is_allowed());
        assert_eq!(limiter.tracked_identities(), 2);
    }

    #[test]
    fn test_from_config() {
        let limiter = SlidingWindowLimiter::from_config(&RateLimitConfig {
            max_requests: 3,
            window_seconds: 5,
        });
        assert_eq!(limiter.max_requests(), 3);
        assert_eq!(limiter.window_len(), Duration::from_secs(5));
        assert_eq!(limiter.tracked_identities(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_admissions_never_exceed_limit() {
        let limiter = Arc::new(limiter());

        let handles: Vec<_> = (0..200)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.admit("alice").is_allowed() })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, limiter.max_requests());
        assert_eq!(limiter.tracked_identities(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admit_uses_clock() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.admit("dave").is_allowed());
        assert!(!limiter.admit("dave").is_allowed());

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(limiter.admit("dave").is_allowed());
    }
}
