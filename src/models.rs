//! Core data models for the matching pipeline.
//!
//! This module contains all struct definitions and enums shared by the
//! scoring, ranking, selection, and review modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Song Models
// ============================================================================

/// A song mention extracted from transcribed content.
///
/// `confidence` defaults to 0.0 and only carries meaning once the scorer has
/// populated it; raw extraction output must not be trusted for threshold
/// comparisons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub catalog_id: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            catalog_id: None,
            confidence: 0.0,
        }
    }
}

/// Raw search hit from the external music-catalog collaborator, not yet scored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogCandidate {
    pub id: String,
    pub title: String,
    pub artist_name: String,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// A scored catalog candidate produced by the ranker.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub song: Song,
    pub match_confidence: f64,
    pub catalog_id: String,
    pub preview_url: Option<String>,
}

// ============================================================================
// Match Status
// ============================================================================

/// Review state of a matched song.
///
/// Closed set: decoding an unrecognized tag is a hard error, never a silent
/// default. `auto` and `selected` are the two states included in the final
/// playlist; `selected` and `skipped` only ever come from explicit user action
/// in the review session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Auto,
    Pending,
    Selected,
    Skipped,
}

impl MatchStatus {
    /// The single playlist-inclusion predicate. Every caller that decides
    /// whether a match goes into the playlist must go through this.
    pub fn is_included(self) -> bool {
        matches!(self, MatchStatus::Auto | MatchStatus::Selected)
    }
}

/// Pairing of an originally-mentioned song with its chosen catalog candidate
/// and a review status. The unit the review session operates on and the unit
/// handed to playlist creation.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchedSong {
    pub original_song: Song,
    pub catalog_song: Song,
    pub match_status: MatchStatus,
}

// ============================================================================
// Selection Summary
// ============================================================================

/// Per-status counts over a list of matched songs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub total: usize,
    pub auto_selected: usize,
    pub pending: usize,
    pub selected: usize,
    pub skipped: usize,
}

impl SelectionSummary {
    /// Percentage of matches auto-selected (0.0 when the list is empty).
    pub fn auto_selected_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.auto_selected as f64 / self.total as f64
        }
    }

    /// Percentage of matches awaiting review (0.0 when the list is empty).
    pub fn requires_review_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.pending as f64 / self.total as f64
        }
    }

    /// Count of matches included in the final playlist.
    pub fn included(&self) -> usize {
        self.auto_selected + self.selected
    }
}

// ============================================================================
// Match Quality
// ============================================================================

/// Human-readable confidence bucket, used for display only. Independent of
/// the auto-select threshold and never consulted for control flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchQuality {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.9 {
            MatchQuality::Excellent
        } else if confidence >= 0.7 {
            MatchQuality::Good
        } else if confidence >= 0.5 {
            MatchQuality::Fair
        } else {
            MatchQuality::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchQuality::Excellent => "Excellent match",
            MatchQuality::Good => "Good match",
            MatchQuality::Fair => "Fair match",
            MatchQuality::Poor => "Poor match",
        }
    }
}

impl std::fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Run Statistics (Instrumentation)
// ============================================================================

/// Per-run matching statistics for instrumentation.
#[derive(Default, Debug, Clone, Serialize)]
pub struct MatchReport {
    /// Songs fed into the batch matcher
    pub total_songs: usize,
    /// Songs that produced a top match
    pub matched: usize,
    /// Matches classified auto at the auto-select threshold
    pub auto_selected: usize,
    /// Matches left pending for review
    pub pending_review: usize,
    /// Songs whose every query strategy came back empty
    pub no_results: usize,
    /// Songs whose search failed with a non-retryable error
    pub search_failures: usize,

    // Timing
    pub elapsed_seconds: f64,
}

impl MatchReport {
    /// Calculate match rate as a percentage
    pub fn match_rate(&self) -> f64 {
        if self.total_songs == 0 {
            0.0
        } else {
            100.0 * self.matched as f64 / self.total_songs as f64
        }
    }

    /// Log the report to stderr in JSON format
    pub fn log_phase(&self, phase: &str) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[STATS:{}]\n{}", phase, json);
        }
    }

    /// Write the report to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
