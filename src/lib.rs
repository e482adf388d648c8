//! Neon Snake core crate.
//!
//! Classic grid snake rendered on an HTML canvas with a neon look. The crate
//! splits into a pure fixed-step simulation (`sim`, host-testable), cosmetic
//! frame-driven effects (`effects`), canvas painting (`render`), high-score
//! persistence (`storage`), and the wasm scheduling glue (`app`) that wires
//! the interval tick clock and the animation frame loop together. The host
//! page drives the exported `mount` / `start_game` / `change_direction` /
//! `toggle_pause` functions from its own button, key, and touch handlers.

use wasm_bindgen::prelude::*;

mod app;
pub mod effects;
mod render;
pub mod sim;
pub mod storage;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
