//! TFT Rolldown core crate.
//!
//! Helpers the rolldown trainer's JS shell calls into: shop highlight analysis
//! (star-up / owned detection), the data-loading progress display, and sound
//! effects. Pure logic lives in plain Rust modules so it runs under `cargo test`
//! on the host; `bindings` is the wasm surface.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod bindings;
pub mod combination;
pub mod logging;
pub mod progress;
pub mod styles;

pub use combination::{
    CombinationResult, GroupKey, HighlightType, STAR_UP_THRESHOLD, Unit, analyze_combination,
    can_form_combination, classify_highlight, has_unit_on_bench_or_board,
};
pub use progress::{ProgressSnapshot, Stage};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}
