// Native tests for the high-score store seam.

use neon_snake::storage::{HighScoreStore, MemoryStore};

#[test]
fn memory_store_defaults_to_zero() {
    let store = MemoryStore::new();
    assert_eq!(store.load(), 0);
}

#[test]
fn memory_store_round_trips() {
    let mut store = MemoryStore::new();
    store.save(130);
    assert_eq!(store.load(), 130);
    store.save(260);
    assert_eq!(store.load(), 260);
}

#[test]
fn memory_store_clones_share_one_slot() {
    // Mirrors two game instances sharing one browser profile.
    let mut a = MemoryStore::new();
    let b = a.clone();
    a.save(500);
    assert_eq!(b.load(), 500);
    assert_eq!(b.get(), 500);
}
