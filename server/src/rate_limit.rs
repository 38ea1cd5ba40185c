//! In-memory rate limiting for message submission.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<IpAddr, VecDeque<Instant>>`.
//! Two limits enforced on `POST /send`:
//! - Per-sender: 5 messages/min
//! - Global: 60 messages/min
//!
//! The log only retains ten messages, so the limiter is what keeps one
//! visitor from scrolling everyone else's messages out of the window.

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const DEFAULT_PER_SENDER_LIMIT: usize = 5;
const DEFAULT_PER_SENDER_WINDOW_SECS: u64 = 60;

const DEFAULT_GLOBAL_LIMIT: usize = 60;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Clone, Copy)]
struct RateLimitConfig {
    per_sender_limit: usize,
    per_sender_window: Duration,
    global_limit: usize,
    global_window: Duration,
}

impl RateLimitConfig {
    fn from_env() -> Self {
        let per_sender_window_secs =
            crate::services::env_parse("SEND_RATE_LIMIT_PER_CLIENT_WINDOW_SECS", DEFAULT_PER_SENDER_WINDOW_SECS);
        let global_window_secs =
            crate::services::env_parse("SEND_RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS);

        Self {
            per_sender_limit: crate::services::env_parse("SEND_RATE_LIMIT_PER_CLIENT", DEFAULT_PER_SENDER_LIMIT),
            per_sender_window: Duration::from_secs(per_sender_window_secs),
            global_limit: crate::services::env_parse("SEND_RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(global_window_secs),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("per-sender rate limit exceeded (max {limit} messages/{window_secs}s)")]
    PerSenderExceeded { limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} messages/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: std::sync::Arc<Mutex<RateLimiterInner>>,
    config: RateLimitConfig,
}

struct RateLimiterInner {
    /// Per-sender submission timestamps.
    sender_requests: HashMap<IpAddr, VecDeque<Instant>>,
    /// Global submission timestamps.
    global_requests: VecDeque<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: std::sync::Arc::new(Mutex::new(RateLimiterInner {
                sender_requests: HashMap::new(),
                global_requests: VecDeque::new(),
            })),
            config: RateLimitConfig::from_env(),
        }
    }

    /// Check both per-sender and global limits, then record the submission.
    pub fn check_and_record(&self, sender: IpAddr) -> Result<(), RateLimitError> {
        self.check_and_record_at(sender, Instant::now())
    }

    /// Internal: check + record with explicit timestamp (for testing).
    fn check_and_record_at(&self, sender: IpAddr, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        // Prune and check global first (no borrow conflict).
        prune_window(&mut inner.global_requests, now, cfg.global_window);
        if inner.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        // Prune and check per-sender.
        let sender_deque = inner.sender_requests.entry(sender).or_default();
        prune_window(sender_deque, now, cfg.per_sender_window);
        if sender_deque.len() >= cfg.per_sender_limit {
            return Err(RateLimitError::PerSenderExceeded {
                limit: cfg.per_sender_limit,
                window_secs: cfg.per_sender_window.as_secs(),
            });
        }

        // Record.
        sender_deque.push_back(now);
        inner.global_requests.push_back(now);

        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
