use super::*;

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(192, 0, 2, last))
}

#[test]
fn allows_up_to_per_sender_limit() {
    let limiter = RateLimiter::new();
    let now = Instant::now();

    for _ in 0..DEFAULT_PER_SENDER_LIMIT {
        limiter.check_and_record_at(ip(1), now).unwrap();
    }
    let err = limiter.check_and_record_at(ip(1), now).unwrap_err();
    assert!(matches!(err, RateLimitError::PerSenderExceeded { .. }));
}

#[test]
fn rejected_submission_is_not_recorded() {
    let limiter = RateLimiter::new();
    let now = Instant::now();

    for _ in 0..DEFAULT_PER_SENDER_LIMIT {
        limiter.check_and_record_at(ip(1), now).unwrap();
    }
    // Hammering while over the limit must not extend the lockout window.
    for _ in 0..10 {
        assert!(limiter.check_and_record_at(ip(1), now).is_err());
    }
    let later = now + Duration::from_secs(DEFAULT_PER_SENDER_WINDOW_SECS + 1);
    limiter.check_and_record_at(ip(1), later).unwrap();
}

#[test]
fn window_expiry_frees_capacity() {
    let limiter = RateLimiter::new();
    let now = Instant::now();

    for _ in 0..DEFAULT_PER_SENDER_LIMIT {
        limiter.check_and_record_at(ip(1), now).unwrap();
    }
    assert!(limiter.check_and_record_at(ip(1), now + Duration::from_secs(30)).is_err());

    let later = now + Duration::from_secs(DEFAULT_PER_SENDER_WINDOW_SECS + 1);
    limiter.check_and_record_at(ip(1), later).unwrap();
}

#[test]
fn senders_are_limited_independently() {
    let limiter = RateLimiter::new();
    let now = Instant::now();

    for _ in 0..DEFAULT_PER_SENDER_LIMIT {
        limiter.check_and_record_at(ip(1), now).unwrap();
    }
    assert!(limiter.check_and_record_at(ip(1), now).is_err());
    limiter.check_and_record_at(ip(2), now).unwrap();
}

#[test]
fn global_limit_spans_all_senders() {
    let limiter = RateLimiter::new();
    let now = Instant::now();

    // Fill the global window with distinct senders staying under their
    // per-sender limits.
    let mut sent = 0;
    let mut octet = 1;
    while sent < DEFAULT_GLOBAL_LIMIT {
        for _ in 0..DEFAULT_PER_SENDER_LIMIT.min(DEFAULT_GLOBAL_LIMIT - sent) {
            limiter.check_and_record_at(ip(octet), now).unwrap();
            sent += 1;
        }
        octet += 1;
    }

    let err = limiter.check_and_record_at(ip(200), now).unwrap_err();
    assert!(matches!(err, RateLimitError::GlobalExceeded { .. }));
}
