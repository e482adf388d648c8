//! Browser-side smoke tests, run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use neon_snake::storage::{HighScoreStore, LocalStorage};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trips_in_browser() {
    let mut store = LocalStorage::new("snakeHighScoreTest");
    store.save(1230);
    assert_eq!(store.load(), 1230);
}

#[wasm_bindgen_test]
fn local_storage_missing_key_reads_zero() {
    let store = LocalStorage::new("snakeHighScoreNeverWritten");
    assert_eq!(store.load(), 0);
}
