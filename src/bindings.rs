//! JS-facing entry points.
//!
//! Game state crosses the boundary as JSON strings. Anything malformed
//! degrades to the "no highlight" answer; the shop render must not throw.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioConfig, AudioPlayer, HtmlAudioBackend};
use crate::combination::HighlightType;
use crate::styles::Theme;

#[cfg(feature = "serde_json")]
mod json {
    use std::collections::BTreeMap;

    use crate::combination::{CombinationResult, Unit};

    pub(super) fn candidate(json: &str) -> Option<Unit> {
        match serde_json::from_str::<Option<Unit>>(json) {
            Ok(u) => u,
            Err(e) => {
                log::debug!("candidate ignored: {e}");
                None
            }
        }
    }

    /// Missing or malformed collections read as empty; a malformed slot reads as an empty slot.
    pub(super) fn collection(json: &str) -> Vec<Option<Unit>> {
        if json.trim().is_empty() {
            return Vec::new();
        }
        let slots = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(json) {
            Ok(v) => v.unwrap_or_default(),
            Err(e) => {
                log::debug!("unit collection ignored: {e}");
                return Vec::new();
            }
        };
        slots
            .into_iter()
            .map(|v| match serde_json::from_value::<Option<Unit>>(v) {
                Ok(u) => u,
                Err(e) => {
                    log::debug!("unit slot ignored: {e}");
                    None
                }
            })
            .collect()
    }

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct AnalysisView {
        can_combine: bool,
        has_unit_on_board: bool,
        unit_counts: BTreeMap<String, u32>,
        would_create_combination: bool,
        highlight_type: &'static str,
    }

    impl From<&CombinationResult> for AnalysisView {
        fn from(r: &CombinationResult) -> Self {
            AnalysisView {
                can_combine: r.can_combine,
                has_unit_on_board: r.has_unit_on_board,
                unit_counts: r.unit_counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                would_create_combination: r.would_create_combination,
                highlight_type: r.highlight_type().as_str(),
            }
        }
    }
}

/// Highlight for a shop slot: `"combination"`, `"owned"` or `"none"`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn classify_shop_unit(candidate_json: &str, bench_json: &str, board_json: &str) -> String {
    let candidate = json::candidate(candidate_json);
    let bench = json::collection(bench_json);
    let board = json::collection(board_json);
    crate::combination::classify_highlight(candidate.as_ref(), &bench, &board)
        .as_str()
        .to_string()
}

/// Full analysis as JSON (`canCombine`, `hasUnitOnBoard`, `unitCounts`, ...).
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn analyze_shop_unit(candidate_json: &str, bench_json: &str, board_json: &str) -> String {
    let candidate = json::candidate(candidate_json);
    let bench = json::collection(bench_json);
    let board = json::collection(board_json);
    let result = crate::combination::analyze_combination(candidate.as_ref(), &bench, &board);
    serde_json::to_string(&json::AnalysisView::from(&result)).unwrap_or_else(|e| {
        log::error!("analysis encode failed: {e}");
        "{}".to_string()
    })
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn render_progress(element_id: &str, snapshot_json: &str) -> Result<(), JsValue> {
    let snapshot = crate::progress::ProgressSnapshot::from_json(snapshot_json)
        .map_err(|e| JsValue::from_str(&format!("bad progress snapshot: {e}")))?;
    crate::progress::render_into(element_id, &snapshot)
}

/// Inline CSS for a highlight label returned by `classify_shop_unit`.
#[wasm_bindgen]
pub fn highlight_css_for(kind: &str) -> String {
    Theme::default().highlight_css(HighlightType::parse(kind))
}

/// Handle the JS shell keeps for the lifetime of the page.
#[wasm_bindgen]
pub struct SoundPlayer {
    inner: AudioPlayer<HtmlAudioBackend>,
}

#[wasm_bindgen]
impl SoundPlayer {
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: Option<String>) -> SoundPlayer {
        let mut config = AudioConfig::default();
        if let Some(url) = base_url {
            config.base_url = url;
        }
        SoundPlayer { inner: AudioPlayer::new(HtmlAudioBackend::new(), config) }
    }

    pub fn initialize(&mut self) -> u32 {
        self.inner.initialize() as u32
    }

    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    /// Warns about and drops sounds that failed to load since `initialize`.
    pub fn check_load_failures(&mut self) -> u32 {
        self.inner.check_load_failures() as u32
    }

    pub fn play(&mut self, name: &str) -> bool {
        self.inner.play_named(name)
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.inner.set_volume(volume);
    }

    pub fn volume(&self) -> f64 {
        self.inner.volume()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.inner.set_enabled(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    pub fn play_buy(&mut self) -> bool {
        self.inner.play_buy()
    }

    pub fn play_sell(&mut self) -> bool {
        self.inner.play_sell()
    }

    pub fn play_reroll(&mut self) -> bool {
        self.inner.play_reroll()
    }

    pub fn play_level_up(&mut self) -> bool {
        self.inner.play_level_up()
    }

    pub fn play_star_up(&mut self) -> bool {
        self.inner.play_star_up()
    }

    pub fn play_error(&mut self) -> bool {
        self.inner.play_error()
    }

    pub fn dispose(&mut self) {
        self.inner.dispose();
    }
}
