//! Match status classification and selection summaries.
//!
//! Maps confidence values onto the four-state review vocabulary. This is the
//! only place that produces `auto`; `selected` and `skipped` come exclusively
//! from explicit user action in the review session.

use crate::models::{MatchStatus, MatchedSong, SearchResult, SelectionSummary, Song};

/// Confidence at or above which a match bypasses human review
pub const DEFAULT_AUTO_SELECT_THRESHOLD: f64 = 0.9;

/// Classify a confidence value. Inclusive on the low end: a confidence equal
/// to the threshold is auto-selected. Thresholds are taken as given, no
/// defensive range validation.
pub fn classify(confidence: f64, auto_select_threshold: f64) -> MatchStatus {
    if confidence >= auto_select_threshold {
        MatchStatus::Auto
    } else {
        MatchStatus::Pending
    }
}

/// Pair each song with itself as both original and candidate and classify on
/// its stored confidence. Used when no distinct candidate exists yet.
pub fn classify_batch(songs: &[Song], auto_select_threshold: f64) -> Vec<MatchedSong> {
    songs
        .iter()
        .map(|song| MatchedSong {
            original_song: song.clone(),
            catalog_song: song.clone(),
            match_status: classify(song.confidence, auto_select_threshold),
        })
        .collect()
}

/// Build a `MatchedSong` from an original song and its chosen search result,
/// classifying on the result's match confidence.
pub fn to_matched_song(
    original: &Song,
    candidate: &SearchResult,
    auto_select_threshold: f64,
) -> MatchedSong {
    MatchedSong {
        original_song: original.clone(),
        catalog_song: candidate.song.clone(),
        match_status: classify(candidate.match_confidence, auto_select_threshold),
    }
}

/// Count each status across a list of matched songs.
pub fn selection_summary(matches: &[MatchedSong]) -> SelectionSummary {
    let mut summary = SelectionSummary {
        total: matches.len(),
        ..Default::default()
    };
    for matched in matches {
        match matched.match_status {
            MatchStatus::Auto => summary.auto_selected += 1,
            MatchStatus::Pending => summary.pending += 1,
            MatchStatus::Selected => summary.selected += 1,
            MatchStatus::Skipped => summary.skipped += 1,
        }
    }
    summary
}

/// Catalog IDs of the matches included in the playlist, in chronological
/// order. Catalog songs without an ID are skipped.
pub fn included_catalog_ids(matches: &[MatchedSong]) -> Vec<String> {
    matches
        .iter()
        .filter(|m| m.match_status.is_included())
        .filter_map(|m| m.catalog_song.catalog_id.clone())
        .collect()
}

/// Human-readable playlist description. `total` is the full matched-song
/// count, not just the included ones; the source clause is omitted when no
/// source name is supplied.
pub fn playlist_description(total: usize, source_name: Option<&str>) -> String {
    let noun = if total == 1 { "song" } else { "songs" };
    match source_name {
        Some(source) => format!(
            "Playlist with {} {} from {}. Created with Playlist Creator.",
            total, noun, source
        ),
        None => format!(
            "Playlist with {} {}. Created with Playlist Creator.",
            total, noun
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================
