use daily_idioms::api::rate_limit::RateLimiter;

/// Tests for the fixed-window rate limiter.

const WINDOW_MS: i64 = 60_000;
const MAX: u32 = 5;

#[test]
fn test_first_call_is_allowed_with_full_window() {
    let limiter = RateLimiter::new();

    let decision = limiter.check_at("1.2.3.4:/idiom", WINDOW_MS, MAX, 1_000);

    assert!(decision.allowed);
    assert_eq!(decision.remaining, MAX - 1);
    assert_eq!(decision.reset_at, 1_000 + WINDOW_MS);
}

#[test]
fn test_sixth_call_within_window_is_denied() {
    let limiter = RateLimiter::new();

    for i in 0..5 {
        let decision = limiter.check_at("1.2.3.4:/idiom", WINDOW_MS, MAX, 1_000 + i);
        assert!(decision.allowed, "Call {} should be allowed", i + 1);
    }

    let sixth = limiter.check_at("1.2.3.4:/idiom", WINDOW_MS, MAX, 1_010);
    assert!(!sixth.allowed, "The sixth call within the window must be denied");
    assert_eq!(sixth.remaining, 0);
}

#[test]
fn test_window_elapse_resets_the_count() {
    let limiter = RateLimiter::new();

    for _ in 0..6 {
        limiter.check_at("key", WINDOW_MS, MAX, 1_000);
    }

    // Strictly past the reset time: the stale record is replaced, not
    // incremented.
    let after = limiter.check_at("key", WINDOW_MS, MAX, 1_000 + WINDOW_MS + 1);

    assert!(after.allowed, "A call after the window must start fresh");
    assert_eq!(after.remaining, MAX - 1);
    assert_eq!(after.reset_at, 1_000 + WINDOW_MS + 1 + WINDOW_MS);
}

#[test]
fn test_keys_are_counted_independently() {
    let limiter = RateLimiter::new();

    for _ in 0..5 {
        limiter.check_at("1.2.3.4:/idiom", WINDOW_MS, MAX, 1_000);
    }

    let other_path = limiter.check_at("1.2.3.4:/how-to-say-this", WINDOW_MS, MAX, 1_000);
    let other_client = limiter.check_at("5.6.7.8:/idiom", WINDOW_MS, MAX, 1_000);

    assert!(other_path.allowed);
    assert!(other_client.allowed);
}

#[test]
fn test_denied_calls_still_count_once_each() {
    let limiter = RateLimiter::new();

    for _ in 0..5 {
        limiter.check_at("key", WINDOW_MS, MAX, 1_000);
    }

    let sixth = limiter.check_at("key", WINDOW_MS, MAX, 1_001);
    let seventh = limiter.check_at("key", WINDOW_MS, MAX, 1_002);

    assert!(!sixth.allowed);
    assert!(!seventh.allowed);
    assert_eq!(sixth.remaining, 0, "Remaining never goes negative");
    assert_eq!(seventh.remaining, 0);
}

#[test]
fn test_sweep_removes_only_expired_records() {
    let limiter = RateLimiter::new();

    limiter.check_at("stale", WINDOW_MS, MAX, 1_000);
    limiter.check_at("fresh", WINDOW_MS, MAX, 50_000);
    assert_eq!(limiter.len(), 2);

    let removed = limiter.sweep_at(1_000 + WINDOW_MS + 1);

    assert_eq!(removed, 1);
    assert_eq!(limiter.len(), 1);
}

#[test]
fn test_sweep_on_empty_store() {
    let limiter = RateLimiter::new();

    assert_eq!(limiter.sweep_at(i64::MAX), 0);
    assert!(limiter.is_empty());
}
