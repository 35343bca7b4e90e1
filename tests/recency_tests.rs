use daily_idioms::content::recency::RecencyGuard;

/// Tests for the recently-sent fingerprint cache.
/// The size bound and oldest-first eviction are load-bearing for dedup.

#[test]
fn test_size_never_exceeds_capacity() {
    let mut guard = RecencyGuard::with_capacity(5);

    for i in 0..50 {
        guard.insert(&format!("fingerprint-{i}"));
        assert!(
            guard.len() <= guard.capacity(),
            "Guard grew past its capacity after {} insertions",
            i + 1
        );
    }
}

#[test]
fn test_oldest_entry_evicted_first() {
    let mut guard = RecencyGuard::with_capacity(3);

    guard.insert("first");
    guard.insert("second");
    guard.insert("third");
    assert!(guard.contains("first"));

    guard.insert("fourth");

    assert!(
        !guard.contains("first"),
        "Oldest entry should be evicted once capacity is exceeded"
    );
    assert!(guard.contains("second"));
    assert!(guard.contains("third"));
    assert!(guard.contains("fourth"));
}

#[test]
fn test_capacity_plus_one_distinct_inserts_drop_the_first() {
    let mut guard = RecencyGuard::new();
    let capacity = guard.capacity();

    for i in 0..=capacity {
        guard.insert(&format!("entry-{i}"));
    }

    assert_eq!(guard.len(), capacity);
    assert!(!guard.contains("entry-0"));
    assert!(guard.contains(&format!("entry-{capacity}")));
}

#[test]
fn test_reinsert_is_idempotent_for_membership() {
    let mut guard = RecencyGuard::with_capacity(3);

    guard.insert("repeat");
    guard.insert("repeat");
    guard.insert("repeat");

    assert_eq!(guard.len(), 1, "Re-inserting must not grow the guard");
    assert!(guard.contains("repeat"));
}

#[test]
fn test_reinsert_refreshes_eviction_order() {
    let mut guard = RecencyGuard::with_capacity(3);

    guard.insert("a");
    guard.insert("b");
    guard.insert("c");

    // Touching `a` moves it to most-recent, so `b` becomes the eviction
    // candidate.
    guard.insert("a");
    guard.insert("d");

    assert!(guard.contains("a"), "Refreshed entry was evicted");
    assert!(!guard.contains("b"), "Stale entry should have been evicted");
    assert!(guard.contains("c"));
    assert!(guard.contains("d"));
}

#[test]
fn test_empty_guard() {
    let guard = RecencyGuard::new();

    assert!(guard.is_empty());
    assert_eq!(guard.len(), 0);
    assert!(!guard.contains("anything"));
}
