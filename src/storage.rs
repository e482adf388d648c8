//! High-score persistence behind a small key/value seam.
//!
//! The simulation only ever needs "load one integer, save one integer", so
//! the trait stays that narrow. The browser implementation sits on
//! localStorage; the in-memory one keeps the simulation testable on the host.

use std::rc::Rc;

use web_sys::window;

pub trait HighScoreStore {
    /// Read the persisted high score; absent or unparsable values read as 0.
    fn load(&self) -> u32;
    /// Persist a new high score. Failures are swallowed — the game keeps
    /// running without persistence.
    fn save(&mut self, value: u32);
}

/// Browser localStorage-backed store, keyed per installation/profile.
pub struct LocalStorage {
    key: &'static str,
}

impl LocalStorage {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl HighScoreStore for LocalStorage {
    fn load(&self) -> u32 {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(self.key).ok().flatten())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    fn save(&mut self, value: u32) {
        if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(self.key, &value.to_string());
        }
    }
}

/// In-memory store. Clones share one slot, mirroring how separate game
/// instances in one browser profile see the same persisted value.
#[derive(Clone, Default)]
pub struct MemoryStore(Rc<std::cell::Cell<u32>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.0.get()
    }

    fn save(&mut self, value: u32) {
        self.0.set(value);
    }
}
