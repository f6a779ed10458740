//! Match confidence scoring.
//!
//! Combines title/artist similarity with penalty and bonus heuristics into a
//! single confidence value for an (original song, catalog candidate) pair.
//! Certain substrings (live/remix/karaoke/tribute/remastered) signal the
//! candidate is not the canonical studio version even when textual similarity
//! is otherwise high.

use crate::models::Song;
use crate::similarity::{normalize, similarity};

// ============================================================================
// Score Weights and Thresholds
// ============================================================================

/// Weight of title similarity in the general-case formula
pub const TITLE_WEIGHT: f64 = 0.5;

/// Weight of artist similarity in the general-case formula
pub const ARTIST_WEIGHT: f64 = 0.4;

/// Score for a title-exact match with a strong (>= 0.8) artist similarity
pub const TITLE_EXACT_SCORE: f64 = 0.95;

/// Artist similarity required for the title-exact special case
pub const TITLE_EXACT_ARTIST_BAR: f64 = 0.8;

/// Penalty for live/remix versions the original did not ask for
pub const VERSION_PENALTY: f64 = 0.15;

/// Penalty for karaoke and tribute recordings, regardless of the original
pub const COVER_PENALTY: f64 = 0.4;

/// Penalty for remasters the original did not ask for
pub const REMASTER_PENALTY: f64 = 0.05;

/// Bonus when a featured-artist mention lines up with the candidate credits
pub const FEATURING_BONUS: f64 = 0.1;

// ============================================================================
// Scoring
// ============================================================================

/// Score a catalog candidate's title/artist against the original song.
///
/// Returns a confidence in [0.0, 1.0]. The weighted sum alone tops out at
/// 0.9; only the two exact-match short-circuits can reach above it, so
/// maximally confident results are always true exact matches.
pub fn score_match(original: &Song, candidate_title: &str, candidate_artist: &str) -> f64 {
    let orig_title = normalize(&original.title);
    let orig_artist = normalize(&original.artist);
    let cand_title = normalize(candidate_title);
    let cand_artist = normalize(candidate_artist);

    // Exact title and artist: maximally confident
    if cand_title == orig_title && cand_artist == orig_artist {
        return 1.0;
    }

    // Exact title with a strong artist match
    if cand_title == orig_title && similarity(&orig_artist, &cand_artist) >= TITLE_EXACT_ARTIST_BAR
    {
        return TITLE_EXACT_SCORE;
    }

    let title_similarity = similarity(&orig_title, &cand_title);
    let artist_similarity = similarity(&orig_artist, &cand_artist);

    let mut confidence = TITLE_WEIGHT * title_similarity + ARTIST_WEIGHT * artist_similarity;

    // Version penalties stack independently
    if cand_title.contains("live") && !orig_title.contains("live") {
        confidence -= VERSION_PENALTY;
    }
    if cand_title.contains("remix") && !orig_title.contains("remix") {
        confidence -= VERSION_PENALTY;
    }
    if cand_title.contains("karaoke") {
        confidence -= COVER_PENALTY;
    }
    if cand_title.contains("tribute") {
        confidence -= COVER_PENALTY;
    }
    if cand_title.contains("remastered") && !orig_title.contains("remastered") {
        confidence -= REMASTER_PENALTY;
    }

    // Featured-artist mentions often land in the candidate title or as a
    // joined artist credit
    if (orig_artist.contains("ft.") || orig_artist.contains("feat."))
        && (cand_title.contains("feat.") || cand_artist.contains("&"))
    {
        confidence += FEATURING_BONUS;
    }

    confidence.clamp(0.0, 1.0)
}

// ============================================================================
// TESTS
// ============================================================================
