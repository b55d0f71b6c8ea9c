//! Colours and inline CSS shared by the shop highlight and the progress bar.

use crate::combination::HighlightType;
use crate::progress::Stage;

/// Fallback colour for stages without a dedicated entry.
pub const NEUTRAL_COLOR: &str = "#9e9e9e";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct HighlightStyle {
    pub border: String,
    pub glow: String,
}

/// Overridable palette. `Default` is the stock rolldown look.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Theme {
    pub combination: HighlightStyle,
    pub owned: HighlightStyle,
    pub bar_track: String,
    pub text: String,
    pub error_text: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            combination: HighlightStyle {
                border: "#ffd700".to_string(),
                glow: "rgba(255,215,0,0.65)".to_string(),
            },
            owned: HighlightStyle {
                border: "#4fc3f7".to_string(),
                glow: "rgba(79,195,247,0.45)".to_string(),
            },
            bar_track: "#2b2b2b".to_string(),
            text: "#e0e0e0".to_string(),
            error_text: "#ff6b6b".to_string(),
        }
    }
}

impl Theme {
    pub fn highlight_style(&self, kind: HighlightType) -> Option<&HighlightStyle> {
        match kind {
            HighlightType::Combination => Some(&self.combination),
            HighlightType::Owned => Some(&self.owned),
            HighlightType::None => None,
        }
    }

    /// Inline style for a shop slot. Empty for `HighlightType::None`.
    pub fn highlight_css(&self, kind: HighlightType) -> String {
        match self.highlight_style(kind) {
            Some(s) => format!(
                "border:2px solid {}; box-shadow:0 0 12px 2px {};",
                s.border, s.glow
            ),
            None => String::new(),
        }
    }
}

pub fn stage_color(stage: Stage) -> &'static str {
    match stage {
        Stage::FetchingVersion => "#64b5f6",
        Stage::DetectingSet => "#7986cb",
        Stage::Downloading => "#4fc3f7",
        Stage::Parsing => "#ba68c8",
        Stage::Processing => "#ffb74d",
        Stage::Caching => "#4db6ac",
        Stage::LoadingImages => "#81c784",
        Stage::DownloadingImages => "#aed581",
        Stage::Complete | Stage::CompleteImages => "#66bb6a",
        Stage::Error => "#ef5350",
        Stage::Unknown => NEUTRAL_COLOR,
    }
}
