//! Candidate ranking.
//!
//! Scores every raw catalog candidate against the original song and returns
//! them sorted by confidence. No filtering happens here; minimum-confidence
//! filtering belongs to the top-match decision.

use crate::models::{CatalogCandidate, SearchResult, Song};
use crate::scoring::score_match;

/// Default minimum confidence for accepting a top match. Zero means even a
/// poor match is surfaced (with its quality label) rather than dropped.
pub const DEFAULT_MINIMUM_CONFIDENCE: f64 = 0.0;

/// Score and sort candidates descending by match confidence.
/// The sort is stable: ties keep their input order.
pub fn rank_candidates(candidates: &[CatalogCandidate], original: &Song) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = candidates
        .iter()
        .map(|candidate| {
            let confidence = score_match(original, &candidate.title, &candidate.artist_name);
            let song = Song {
                title: candidate.title.clone(),
                artist: candidate.artist_name.clone(),
                catalog_id: Some(candidate.id.clone()),
                confidence,
            };
            SearchResult {
                song,
                match_confidence: confidence,
                catalog_id: candidate.id.clone(),
                preview_url: candidate.preview_url.clone(),
            }
        })
        .collect();

    // Primary: confidence (higher is better); stable, so ties keep input order
    results.sort_by(|a, b| {
        b.match_confidence
            .partial_cmp(&a.match_confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}

/// First ranked candidate at or above `minimum_confidence`, if any.
pub fn top_match(
    candidates: &[CatalogCandidate],
    original: &Song,
    minimum_confidence: f64,
) -> Option<SearchResult> {
    rank_candidates(candidates, original)
        .into_iter()
        .find(|result| result.match_confidence >= minimum_confidence)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, title: &str, artist: &str) -> CatalogCandidate {
        CatalogCandidate {
            id: id.to_string(),
            title: title.to_string(),
            artist_name: artist.to_string(),
            preview_url: None,
        }
    }

    #[test]
    fn test_rank_descending_with_stable_ties() {
        let original = Song::new("Yesterday", "Beatles");
        let candidates = vec![
            // Scores: substring-title tie, exact match, substring-title tie
            candidate("a", "Yesterday Once More", "Beatles"),
            candidate("b", "Yesterday", "Beatles"),
            candidate("c", "Yesterday and Today", "Beatles"),
        ];
        let ranked = rank_candidates(&candidates, &original);
        assert_eq!(ranked[0].catalog_id, "b");
        assert_eq!(ranked[0].match_confidence, 1.0);
        // The two tied candidates retain their original relative order
        assert_eq!(ranked[1].catalog_id, "a");
        assert_eq!(ranked[2].catalog_id, "c");
        assert_eq!(ranked[1].match_confidence, ranked[2].match_confidence);
    }

    #[test]
    fn test_ranked_song_carries_score_and_catalog_id() {
        let original = Song::new("Yesterday", "Beatles");
        let ranked = rank_candidates(&[candidate("b", "Yesterday", "Beatles")], &original);
        assert_eq!(ranked[0].song.catalog_id.as_deref(), Some("b"));
        assert_eq!(ranked[0].song.confidence, ranked[0].match_confidence);
    }

    #[test]
    fn test_top_match_respects_minimum() {
        let original = Song::new("Yesterday", "Beatles");
        let candidates = vec![candidate("a", "Completely Different", "Nobody")];
        assert!(top_match(&candidates, &original, 0.5).is_none());
        // Default minimum of 0.0 always surfaces something when candidates exist
        assert!(top_match(&candidates, &original, DEFAULT_MINIMUM_CONFIDENCE).is_some());
    }

    #[test]
    fn test_no_candidates_no_top_match() {
        let original = Song::new("Yesterday", "Beatles");
        assert!(top_match(&[], &original, 0.0).is_none());
    }
}
