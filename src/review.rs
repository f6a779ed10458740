//! Card-based review workflow over pending matches.
//!
//! Walks a linear, chronologically-ordered sequence of matched songs and
//! applies accept/reject decisions, with single-step undo (chainable) and
//! batch operations. Pure in-memory state manipulation: no operation can
//! fail, and operations on an empty or completed session are no-ops.
//!
//! Per-entry transitions: `pending -> selected`, `pending -> skipped`, and
//! `{selected, skipped} -> pending` via undo of the most recent action.
//! There is no direct `selected <-> skipped` transition, and `auto` entries
//! assigned before the session are never touched here.

use crate::models::{MatchStatus, MatchedSong};

#[derive(Clone, Debug, Default)]
pub struct ReviewSession {
    matches: Vec<MatchedSong>,
    current_index: usize,
    history: Vec<usize>,
}

impl ReviewSession {
    /// Build a session over the full match list, all statuses intermixed,
    /// order = chronological mention order.
    pub fn new(matches: Vec<MatchedSong>) -> Self {
        Self {
            matches,
            current_index: 0,
            history: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    pub fn current_match(&self) -> Option<&MatchedSong> {
        self.matches.get(self.current_index)
    }

    /// True immediately for an empty list.
    pub fn is_complete(&self) -> bool {
        self.current_index >= self.matches.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Fraction of the list visited, 0.0 for an empty list.
    pub fn progress(&self) -> f64 {
        if self.matches.is_empty() {
            0.0
        } else {
            self.current_index as f64 / self.matches.len() as f64
        }
    }

    pub fn remaining_count(&self) -> usize {
        self.matches.len() - self.current_index
    }

    pub fn matches(&self) -> &[MatchedSong] {
        &self.matches
    }

    /// Consume the session, yielding the match list in original order.
    pub fn into_matches(self) -> Vec<MatchedSong> {
        self.matches
    }

    pub fn accepted_matches(&self) -> Vec<&MatchedSong> {
        self.matches
            .iter()
            .filter(|m| m.match_status == MatchStatus::Selected)
            .collect()
    }

    pub fn rejected_matches(&self) -> Vec<&MatchedSong> {
        self.matches
            .iter()
            .filter(|m| m.match_status == MatchStatus::Skipped)
            .collect()
    }

    // ------------------------------------------------------------------
    // Single-card actions
    // ------------------------------------------------------------------

    pub fn accept_current_match(&mut self) {
        self.decide_current(MatchStatus::Selected);
    }

    pub fn reject_current_match(&mut self) {
        self.decide_current(MatchStatus::Skipped);
    }

    fn decide_current(&mut self, status: MatchStatus) {
        if self.is_complete() {
            return;
        }
        self.matches[self.current_index].match_status = status;
        self.history.push(self.current_index);
        self.current_index += 1;
    }

    /// Revert the most recent action: step back to its index and reset that
    /// entry to pending. Undo always reverts to pending; it does not restore
    /// a prior non-pending state.
    pub fn undo(&mut self) {
        if let Some(index) = self.history.pop() {
            self.current_index = index;
            self.matches[index].match_status = MatchStatus::Pending;
        }
    }

    // ------------------------------------------------------------------
    // Batch actions
    // ------------------------------------------------------------------

    /// Accept every remaining pending entry and jump to complete.
    /// Already-visited and auto entries are untouched.
    pub fn accept_all(&mut self) {
        self.decide_rest(MatchStatus::Selected);
    }

    /// Reject every remaining pending entry and jump to complete.
    pub fn reject_all(&mut self) {
        self.decide_rest(MatchStatus::Skipped);
    }

    fn decide_rest(&mut self, status: MatchStatus) {
        for matched in &mut self.matches[self.current_index..] {
            if matched.match_status == MatchStatus::Pending {
                matched.match_status = status;
            }
        }
        self.current_index = self.matches.len();
    }

    /// Accept every pending entry in the full list whose catalog-song
    /// confidence is at or above `threshold`, regardless of the cursor. The
    /// cursor does not move; auto and already-decided entries keep their
    /// status (reversing a decision requires an undo back to pending).
    ///
    /// Reads `catalog_song.confidence`, so the field must have been populated
    /// by the scorer (the ranker does this) for the threshold to mean what
    /// callers expect.
    pub fn accept_all_high_confidence(&mut self, threshold: f64) {
        for matched in &mut self.matches {
            if matched.match_status == MatchStatus::Pending
                && matched.catalog_song.confidence >= threshold
            {
                matched.match_status = MatchStatus::Selected;
            }
        }
    }

    /// Mirror of `accept_all_high_confidence`: reject pending entries at or
    /// below `threshold`.
    pub fn reject_all_low_confidence(&mut self, threshold: f64) {
        for matched in &mut self.matches {
            if matched.match_status == MatchStatus::Pending
                && matched.catalog_song.confidence <= threshold
            {
                matched.match_status = MatchStatus::Skipped;
            }
        }
    }

    /// Reset every entry to pending, rewind the cursor, clear history.
    pub fn reset(&mut self) {
        for matched in &mut self.matches {
            matched.match_status = MatchStatus::Pending;
        }
        self.current_index = 0;
        self.history.clear();
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Song;

    fn pending(title: &str, confidence: f64) -> MatchedSong {
        let mut catalog_song = Song::new(title, "Artist");
        catalog_song.catalog_id = Some(format!("id-{}", title));
        catalog_song.confidence = confidence;
        MatchedSong {
            original_song: Song::new(title, "Artist"),
            catalog_song,
            match_status: MatchStatus::Pending,
        }
    }

    fn session(confidences: &[f64]) -> ReviewSession {
        ReviewSession::new(
            confidences
                .iter()
                .enumerate()
                .map(|(i, &c)| pending(&format!("song{}", i), c))
                .collect(),
        )
    }

    #[test]
    fn test_accept_reject_round_trip_with_undo() {
        let mut session = session(&[0.5, 0.5, 0.5]);
        session.accept_current_match();
        session.reject_current_match();
        session.accept_current_match();

        assert!(session.is_complete());
        let statuses: Vec<MatchStatus> =
            session.matches().iter().map(|m| m.match_status).collect();
        assert_eq!(
            statuses,
            vec![
                MatchStatus::Selected,
                MatchStatus::Skipped,
                MatchStatus::Selected
            ]
        );

        session.undo();
        session.undo();
        assert_eq!(session.matches()[2].match_status, MatchStatus::Pending);
        assert_eq!(session.matches()[1].match_status, MatchStatus::Pending);
        assert_eq!(session.matches()[0].match_status, MatchStatus::Selected);
        assert_eq!(session.current_match().unwrap().original_song.title, "song1");
        assert!(!session.is_complete());
    }

    #[test]
    fn test_progress_and_remaining() {
        let mut session = session(&[0.5, 0.5, 0.5, 0.5]);
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.remaining_count(), 4);
        session.accept_current_match();
        assert_eq!(session.progress(), 0.25);
        assert_eq!(session.remaining_count(), 3);
    }

    #[test]
    fn test_accept_all_only_touches_unvisited_tail() {
        let mut session = session(&[0.5, 0.5, 0.5]);
        session.reject_current_match();
        session.accept_all();
        assert!(session.is_complete());
        assert_eq!(session.matches()[0].match_status, MatchStatus::Skipped);
        assert_eq!(session.matches()[1].match_status, MatchStatus::Selected);
        assert_eq!(session.matches()[2].match_status, MatchStatus::Selected);
    }

    #[test]
    fn test_reject_all() {
        let mut session = session(&[0.5, 0.5]);
        session.reject_all();
        assert!(session.is_complete());
        assert!(session
            .matches()
            .iter()
            .all(|m| m.match_status == MatchStatus::Skipped));
        assert_eq!(session.rejected_matches().len(), 2);
        assert!(session.accepted_matches().is_empty());
    }

    fn with_status(confidence: f64, status: MatchStatus) -> MatchedSong {
        let mut matched = pending("song", confidence);
        matched.match_status = status;
        matched
    }

    #[test]
    fn test_reject_all_leaves_auto_entries_untouched() {
        // Classifier-assigned auto entries are immutable inside the session;
        // batch rejection must not drop them from the playlist
        let mut session = ReviewSession::new(vec![
            with_status(0.95, MatchStatus::Auto),
            with_status(0.5, MatchStatus::Pending),
        ]);
        session.reject_all();
        assert!(session.is_complete());
        assert_eq!(session.matches()[0].match_status, MatchStatus::Auto);
        assert_eq!(session.matches()[1].match_status, MatchStatus::Skipped);

        let mut session = ReviewSession::new(vec![with_status(0.95, MatchStatus::Auto)]);
        session.accept_all();
        assert_eq!(session.matches()[0].match_status, MatchStatus::Auto);
    }

    #[test]
    fn test_batch_accept_does_not_flip_decided_entries() {
        // A rejected entry stays rejected even above the threshold; flipping
        // it requires an undo back to pending first
        let mut session = session(&[0.95, 0.92]);
        session.reject_current_match();
        session.accept_all_high_confidence(0.9);
        assert_eq!(session.matches()[0].match_status, MatchStatus::Skipped);
        assert_eq!(session.matches()[1].match_status, MatchStatus::Selected);

        session.undo();
        session.accept_all_high_confidence(0.9);
        assert_eq!(session.matches()[0].match_status, MatchStatus::Selected);
    }

    #[test]
    fn test_batch_reject_does_not_flip_decided_entries() {
        let mut session = session(&[0.3, 0.4]);
        session.accept_current_match();
        session.reject_all_low_confidence(0.6);
        assert_eq!(session.matches()[0].match_status, MatchStatus::Selected);
        assert_eq!(session.matches()[1].match_status, MatchStatus::Skipped);
    }

    #[test]
    fn test_batch_high_confidence_does_not_move_cursor() {
        let mut session = session(&[0.95, 0.6, 0.85, 0.92]);
        session.accept_all_high_confidence(0.9);
        let statuses: Vec<MatchStatus> =
            session.matches().iter().map(|m| m.match_status).collect();
        assert_eq!(
            statuses,
            vec![
                MatchStatus::Selected,
                MatchStatus::Pending,
                MatchStatus::Pending,
                MatchStatus::Selected
            ]
        );
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.current_match().unwrap().catalog_song.confidence, 0.95);
    }

    #[test]
    fn test_batch_low_confidence_inclusive_bound() {
        let mut session = session(&[0.6, 0.9, 0.3]);
        session.reject_all_low_confidence(0.6);
        let statuses: Vec<MatchStatus> =
            session.matches().iter().map(|m| m.match_status).collect();
        assert_eq!(
            statuses,
            vec![
                MatchStatus::Skipped,
                MatchStatus::Pending,
                MatchStatus::Skipped
            ]
        );
    }

    #[test]
    fn test_empty_session_is_safe() {
        let mut session = ReviewSession::new(Vec::new());
        assert!(session.is_complete());
        assert!(session.current_match().is_none());
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.remaining_count(), 0);
        assert!(!session.can_undo());
        // Every mutating operation is a no-op, never a fault
        session.accept_current_match();
        session.reject_current_match();
        session.undo();
        session.accept_all();
        session.reject_all();
        session.accept_all_high_confidence(0.9);
        session.reject_all_low_confidence(0.5);
        session.reset();
        assert!(session.is_complete());
    }

    #[test]
    fn test_actions_after_complete_are_noops() {
        let mut session = session(&[0.5]);
        session.accept_current_match();
        assert!(session.is_complete());
        session.accept_current_match();
        session.reject_current_match();
        assert_eq!(session.matches()[0].match_status, MatchStatus::Selected);
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn test_undo_with_empty_history_is_noop() {
        let mut session = session(&[0.5]);
        session.undo();
        assert_eq!(session.matches()[0].match_status, MatchStatus::Pending);
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_no_direct_selected_to_skipped() {
        // Flipping a decision requires an intervening undo back to pending
        let mut session = session(&[0.5]);
        session.accept_current_match();
        assert_eq!(session.matches()[0].match_status, MatchStatus::Selected);
        session.undo();
        assert_eq!(session.matches()[0].match_status, MatchStatus::Pending);
        session.reject_current_match();
        assert_eq!(session.matches()[0].match_status, MatchStatus::Skipped);
    }

    #[test]
    fn test_reset() {
        let mut session = session(&[0.5, 0.5]);
        session.accept_current_match();
        session.reject_current_match();
        session.reset();
        assert!(session
            .matches()
            .iter()
            .all(|m| m.match_status == MatchStatus::Pending));
        assert_eq!(session.progress(), 0.0);
        assert!(!session.can_undo());
    }
}
