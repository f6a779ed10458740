//! Batch search orchestration and playlist submission.
//!
//! Sits at the boundary between the pure matching core and the external
//! catalog/playlist collaborators. Catalog calls run sequentially with a
//! fixed inter-call delay to respect rate limits, and one song's failure
//! never aborts the batch: that song simply produces no reviewable match.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use crate::models::{CatalogCandidate, MatchReport, MatchStatus, MatchedSong, Song};
use crate::queries::query_strategies;
use crate::ranking::{top_match, DEFAULT_MINIMUM_CONFIDENCE};
use crate::selector::{
    included_catalog_ids, playlist_description, to_matched_song, DEFAULT_AUTO_SELECT_THRESHOLD,
};

/// Delay between consecutive catalog search calls
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 100;

// ============================================================================
// Errors
// ============================================================================

/// Errors from the catalog-search boundary.
///
/// `AuthenticationRequired` and `RateLimited` short-circuit the query
/// strategy fallback loop; an unrecognized `Backend` error lets the caller
/// fall through to the next strategy.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("rate limited")]
    RateLimited,
    #[error("no results found for \"{title}\" by {artist}")]
    NoResults { title: String, artist: String },
    #[error("search backend error: {0}")]
    Backend(String),
}

// ============================================================================
// Capability Interfaces
// ============================================================================

/// Fixed-shape catalog search capability. Any concrete backend (vendor API,
/// local test double) implements this one interface.
pub trait CatalogSearch {
    fn search(&self, query: &str) -> Result<Vec<CatalogCandidate>, SearchError>;
}

/// Handle to a created playlist on the external service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistHandle {
    pub id: String,
    pub name: String,
}

/// Playlist creation capability on the external music service.
pub trait PlaylistClient {
    fn create_playlist(
        &self,
        name: &str,
        description: &str,
        song_ids: &[String],
    ) -> anyhow::Result<PlaylistHandle>;

    fn add_songs(&self, playlist_id: &str, song_ids: &[String]) -> anyhow::Result<()>;
}

// ============================================================================
// Configuration
// ============================================================================

/// Tunables for the batch matcher, supplied by the surrounding application.
#[derive(Clone, Copy, Debug)]
pub struct MatcherConfig {
    pub auto_select_threshold: f64,
    pub minimum_confidence: f64,
    pub search_delay: Duration,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            auto_select_threshold: DEFAULT_AUTO_SELECT_THRESHOLD,
            minimum_confidence: DEFAULT_MINIMUM_CONFIDENCE,
            search_delay: Duration::from_millis(DEFAULT_SEARCH_DELAY_MS),
        }
    }
}

// ============================================================================
// Search with Strategy Fallback
// ============================================================================

/// Search the catalog for a song, trying query strategies in order and
/// stopping at the first non-empty candidate set.
///
/// Known error categories (auth, rate limit) propagate immediately without
/// trying further strategies; unrecognized backend errors fall through to the
/// next strategy. Exhausting all strategies yields `NoResults` naming the
/// song.
pub fn search_song(
    client: &dyn CatalogSearch,
    song: &Song,
) -> Result<Vec<CatalogCandidate>, SearchError> {
    for query in query_strategies(song) {
        match client.search(&query) {
            Ok(candidates) if !candidates.is_empty() => return Ok(candidates),
            Ok(_) => continue,
            Err(err @ SearchError::AuthenticationRequired) => return Err(err),
            Err(err @ SearchError::RateLimited) => return Err(err),
            Err(_) => continue,
        }
    }
    Err(SearchError::NoResults {
        title: song.title.clone(),
        artist: song.artist.clone(),
    })
}

// ============================================================================
// Batch Matching
// ============================================================================

/// Match a chronologically-ordered batch of songs against the catalog.
///
/// Calls run sequentially with `config.search_delay` between them. A song
/// whose search fails or finds nothing is counted in the report and dropped;
/// the batch continues. The returned matches preserve the input order.
pub fn match_songs(
    client: &dyn CatalogSearch,
    songs: &[Song],
    config: &MatcherConfig,
) -> (Vec<MatchedSong>, MatchReport) {
    let start = Instant::now();
    let mut report = MatchReport {
        total_songs: songs.len(),
        ..Default::default()
    };
    let mut matches = Vec::with_capacity(songs.len());

    let pb = create_progress_bar(songs.len() as u64, "Matching songs");

    for (i, song) in songs.iter().enumerate() {
        if i > 0 && !config.search_delay.is_zero() {
            std::thread::sleep(config.search_delay);
        }

        match search_song(client, song) {
            Ok(candidates) => {
                match top_match(&candidates, song, config.minimum_confidence) {
                    Some(result) => {
                        let matched = to_matched_song(song, &result, config.auto_select_threshold);
                        match matched.match_status {
                            MatchStatus::Auto => report.auto_selected += 1,
                            _ => report.pending_review += 1,
                        }
                        report.matched += 1;
                        matches.push(matched);
                    }
                    // Candidates existed but none cleared the minimum
                    None => report.no_results += 1,
                }
            }
            Err(SearchError::NoResults { .. }) => report.no_results += 1,
            Err(err) => {
                eprintln!("Search failed for \"{}\": {}", song.title, err);
                report.search_failures += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("Matched {}/{} songs", report.matched, songs.len()));
    report.elapsed_seconds = start.elapsed().as_secs_f64();
    (matches, report)
}

// ============================================================================
// Playlist Submission
// ============================================================================

/// Create a playlist from the included (auto or selected) matches, preserving
/// chronological order.
pub fn build_playlist(
    client: &dyn PlaylistClient,
    name: &str,
    source_name: Option<&str>,
    matches: &[MatchedSong],
) -> anyhow::Result<PlaylistHandle> {
    let song_ids = included_catalog_ids(matches);
    let description = playlist_description(matches.len(), source_name);
    client.create_playlist(name, &description, &song_ids)
}

fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})")
            .unwrap()
            .progress_chars("=> "),
    );
    pb.set_message(msg.to_string());
    pb
}

// ============================================================================
// TESTS
// ============================================================================
