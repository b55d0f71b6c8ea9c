//! Progress indicator for data / image downloads.
//!
//! The JS shell owns the loading pipeline and hands us a snapshot each time it
//! changes; rendering is a pure function of that snapshot.

use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::styles::{self, Theme};

/// Loading pipeline stage. `Unknown` catches any stage name we do not recognise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    FetchingVersion,
    DetectingSet,
    Downloading,
    Parsing,
    Processing,
    Caching,
    LoadingImages,
    DownloadingImages,
    Complete,
    CompleteImages,
    Error,
    Unknown,
}

impl Stage {
    pub const ALL: [Stage; 12] = [
        Stage::FetchingVersion,
        Stage::DetectingSet,
        Stage::Downloading,
        Stage::Parsing,
        Stage::Processing,
        Stage::Caching,
        Stage::LoadingImages,
        Stage::DownloadingImages,
        Stage::Complete,
        Stage::CompleteImages,
        Stage::Error,
        Stage::Unknown,
    ];

    pub fn parse(s: &str) -> Self {
        match s {
            "fetching_version" => Stage::FetchingVersion,
            "detecting_set" => Stage::DetectingSet,
            "downloading" => Stage::Downloading,
            "parsing" => Stage::Parsing,
            "processing" => Stage::Processing,
            "caching" => Stage::Caching,
            "loading_images" => Stage::LoadingImages,
            "downloading_images" => Stage::DownloadingImages,
            "complete" => Stage::Complete,
            "complete_images" => Stage::CompleteImages,
            "error" => Stage::Error,
            _ => Stage::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::FetchingVersion => "fetching_version",
            Stage::DetectingSet => "detecting_set",
            Stage::Downloading => "downloading",
            Stage::Parsing => "parsing",
            Stage::Processing => "processing",
            Stage::Caching => "caching",
            Stage::LoadingImages => "loading_images",
            Stage::DownloadingImages => "downloading_images",
            Stage::Complete => "complete",
            Stage::CompleteImages => "complete_images",
            Stage::Error => "error",
            Stage::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::FetchingVersion => "Checking latest patch version...",
            Stage::DetectingSet => "Detecting current set...",
            Stage::Downloading => "Downloading game data...",
            Stage::Parsing => "Parsing game data...",
            Stage::Processing => "Processing champions and traits...",
            Stage::Caching => "Saving data for next time...",
            Stage::LoadingImages => "Loading images...",
            Stage::DownloadingImages => "Downloading champion images...",
            Stage::Complete => "Game data ready!",
            Stage::CompleteImages => "Images ready!",
            Stage::Error => "Failed to load game data",
            Stage::Unknown => "Loading...",
        }
    }

    pub fn color(self) -> &'static str {
        styles::stage_color(self)
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Stage::Complete | Stage::CompleteImages | Stage::Error)
    }
}

/// Snapshot supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSnapshot {
    pub stage: Stage,
    pub current: u32,
    pub total: u32,
    /// Percent, nominally 0..=100.
    pub progress: f64,
    pub error: Option<String>,
    pub is_active: bool,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            stage: Stage::Unknown,
            current: 0,
            total: 0,
            progress: 0.0,
            error: None,
            is_active: false,
        }
    }
}

impl ProgressSnapshot {
    /// Bar fill in 0..=100. Falls back to `current / total` when no explicit percent was given.
    pub fn percent(&self) -> f64 {
        let raw = if self.progress > 0.0 {
            self.progress
        } else if self.total > 0 {
            f64::from(self.current) / f64::from(self.total) * 100.0
        } else {
            0.0
        };
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) }
    }

    fn error_message(&self) -> Option<&str> {
        match (&self.error, self.stage) {
            (Some(e), _) if !e.is_empty() => Some(e.as_str()),
            (_, Stage::Error) => Some("Unknown error"),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
mod wire {
    use super::{ProgressSnapshot, Stage};

    /// JS-side shape: `{stage, current, total, progress, error, isActive}`.
    #[derive(serde::Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub(super) struct SnapshotWire {
        stage: Option<String>,
        current: u32,
        total: u32,
        progress: f64,
        error: Option<String>,
        is_active: Option<bool>,
    }

    impl Default for SnapshotWire {
        fn default() -> Self {
            Self { stage: None, current: 0, total: 0, progress: 0.0, error: None, is_active: None }
        }
    }

    impl From<SnapshotWire> for ProgressSnapshot {
        fn from(w: SnapshotWire) -> Self {
            let stage = w.stage.as_deref().map(Stage::parse).unwrap_or(Stage::Unknown);
            ProgressSnapshot {
                stage,
                current: w.current,
                total: w.total,
                progress: w.progress,
                error: w.error,
                // A snapshot without the flag is shown until it reaches a finished stage.
                is_active: w.is_active.unwrap_or(!stage.is_finished()),
            }
        }
    }
}

#[cfg(feature = "serde_json")]
impl ProgressSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<wire::SnapshotWire>(json).map(Into::into)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(snapshot: &ProgressSnapshot) -> String {
    render_html_themed(snapshot, &Theme::default())
}

pub fn render_html_themed(snapshot: &ProgressSnapshot, theme: &Theme) -> String {
    if !snapshot.is_active {
        return String::new();
    }
    let stage = snapshot.stage;
    let color = stage.color();
    let pct = snapshot.percent();
    let mut html = String::new();
    html.push_str(&format!(
        "<div class='tft-progress' data-stage='{}' style='color:{};font-size:13px;'>",
        stage.as_str(),
        theme.text
    ));
    html.push_str(&format!("<div class='tft-progress-label'>{}", stage.label()));
    if snapshot.total > 0 {
        html.push_str(&format!(
            " <span class='tft-progress-count'>{} / {}</span>",
            snapshot.current, snapshot.total
        ));
    }
    html.push_str("</div>");
    html.push_str(&format!(
        "<div class='tft-progress-track' style='background:{};height:6px;border-radius:3px;overflow:hidden;'>\
         <div class='tft-progress-bar' style='width:{:.1}%;background:{};height:100%;'></div></div>",
        theme.bar_track, pct, color
    ));
    if let Some(msg) = snapshot.error_message() {
        html.push_str(&format!(
            "<div class='tft-progress-error' style='color:{};'>{}</div>",
            theme.error_text,
            escape_html(msg)
        ));
    }
    html.push_str("</div>");
    html
}

/// Writes the rendered snapshot into the element with `element_id`.
pub fn render_into(element_id: &str, snapshot: &ProgressSnapshot) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let el = doc
        .get_element_by_id(element_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{element_id}")))?;
    el.set_inner_html(&render_html(snapshot));
    Ok(())
}
