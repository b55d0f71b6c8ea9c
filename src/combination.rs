//! Shop highlight analysis.
//!
//! Given a unit offered in the shop and the player's bench + board, decide whether
//! buying it would complete a star-up (three copies of the same unit at the same
//! tier), whether a copy is already owned, and which highlight the shop slot gets.
//!
//! Every function here is pure and total: missing candidates, id-less units and
//! empty slots all degrade to the "no effect" answer instead of an error, since
//! the caller is the shop render path.

use std::collections::BTreeMap;
use std::fmt;

/// Copies of one unit at one tier needed to star it up.
pub const STAR_UP_THRESHOLD: u32 = 3;

/// A game piece, either owned (bench / board) or offered in the shop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Unit {
    /// Champion identifier. Empty means "no id".
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    /// Star tier; unset (or zero) reads as 1.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stars: Option<u32>,
}

impl Unit {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), stars: None }
    }

    pub fn with_stars(id: impl Into<String>, stars: u32) -> Self {
        Self { id: id.into(), stars: Some(stars) }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn tier(&self) -> u32 {
        self.stars.filter(|&s| s > 0).unwrap_or(1)
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey { id: self.id.clone(), stars: self.tier() }
    }
}

/// Bucket of units identical in kind and tier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub id: String,
    pub stars: u32,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.id, self.stars)
    }
}

/// Shop slot highlight, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HighlightType {
    Combination,
    Owned,
    None,
}

impl HighlightType {
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightType::Combination => "combination",
            HighlightType::Owned => "owned",
            HighlightType::None => "none",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "combination" => HighlightType::Combination,
            "owned" => HighlightType::Owned,
            _ => HighlightType::None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombinationResult {
    pub can_combine: bool,
    /// Mirrors `can_combine`; kept separate for the JS shape.
    pub would_create_combination: bool,
    pub has_unit_on_board: bool,
    /// Existing copies of the candidate's id per tier (candidate not included).
    pub unit_counts: BTreeMap<GroupKey, u32>,
}

impl CombinationResult {
    pub fn highlight_type(&self) -> HighlightType {
        if self.can_combine {
            HighlightType::Combination
        } else if self.has_unit_on_board {
            HighlightType::Owned
        } else {
            HighlightType::None
        }
    }
}

fn with_id(candidate: Option<&Unit>) -> Option<&Unit> {
    candidate.filter(|u| u.has_id())
}

fn present_units<'a>(
    bench: &'a [Option<Unit>],
    board: &'a [Option<Unit>],
) -> impl Iterator<Item = &'a Unit> {
    bench.iter().chain(board.iter()).flatten()
}

/// Per-tier counts of units whose id matches `id`.
fn count_matching(id: &str, bench: &[Option<Unit>], board: &[Option<Unit>]) -> BTreeMap<GroupKey, u32> {
    let mut counts = BTreeMap::new();
    for unit in present_units(bench, board).filter(|u| u.id == id) {
        *counts.entry(unit.group_key()).or_insert(0) += 1;
    }
    counts
}

/// Adds the candidate's own copy and checks every group against the threshold.
fn reaches_threshold(mut counts: BTreeMap<GroupKey, u32>, candidate: &Unit) -> bool {
    *counts.entry(candidate.group_key()).or_insert(0) += 1;
    counts.values().any(|&n| n >= STAR_UP_THRESHOLD)
}

pub fn can_form_combination(
    candidate: Option<&Unit>,
    bench: &[Option<Unit>],
    board: &[Option<Unit>],
) -> bool {
    let Some(candidate) = with_id(candidate) else {
        return false;
    };
    reaches_threshold(count_matching(&candidate.id, bench, board), candidate)
}

/// Ownership at any tier.
pub fn has_unit_on_bench_or_board(
    unit_id: Option<&str>,
    bench: &[Option<Unit>],
    board: &[Option<Unit>],
) -> bool {
    match unit_id {
        Some(id) if !id.is_empty() => present_units(bench, board).any(|u| u.id == id),
        _ => false,
    }
}

pub fn analyze_combination(
    candidate: Option<&Unit>,
    bench: &[Option<Unit>],
    board: &[Option<Unit>],
) -> CombinationResult {
    let Some(candidate) = with_id(candidate) else {
        return CombinationResult::default();
    };
    let unit_counts = count_matching(&candidate.id, bench, board);
    let has_unit_on_board = has_unit_on_bench_or_board(Some(candidate.id.as_str()), bench, board);
    let can_combine = reaches_threshold(unit_counts.clone(), candidate);
    CombinationResult {
        can_combine,
        would_create_combination: can_combine,
        has_unit_on_board,
        unit_counts,
    }
}

pub fn classify_highlight(
    candidate: Option<&Unit>,
    bench: &[Option<Unit>],
    board: &[Option<Unit>],
) -> HighlightType {
    analyze_combination(candidate, bench, board).highlight_type()
}
