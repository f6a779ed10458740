use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use playlist_creator::models::{CatalogCandidate, MatchQuality, Song};
use playlist_creator::pipeline::{
    build_playlist, match_songs, CatalogSearch, MatcherConfig, PlaylistClient, PlaylistHandle,
    SearchError, DEFAULT_SEARCH_DELAY_MS,
};
use playlist_creator::review::ReviewSession;
use playlist_creator::selector::selection_summary;

#[derive(Parser)]
#[command(name = "playlist-creator")]
#[command(about = "Match extracted song mentions against a catalog and build a playlist")]
struct Args {
    /// JSON file with the extracted songs, in chronological mention order
    songs: PathBuf,

    /// JSON file with the catalog candidates to search over
    catalog: PathBuf,

    /// Confidence at or above which a match bypasses review
    #[arg(long, default_value = "0.9")]
    auto_threshold: f64,

    /// Minimum confidence for accepting a top match at all
    #[arg(long, default_value = "0.0")]
    min_confidence: f64,

    /// Delay between catalog searches, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SEARCH_DELAY_MS)]
    delay_ms: u64,

    /// Batch-accept pending matches at or above this confidence
    #[arg(long)]
    accept_above: Option<f64>,

    /// Batch-reject pending matches at or below this confidence
    #[arg(long)]
    reject_below: Option<f64>,

    /// Accept whatever is still pending after the batch passes
    #[arg(long)]
    accept_rest: bool,

    /// Name for the created playlist (dry-run print)
    #[arg(long)]
    playlist_name: Option<String>,

    /// Source name to mention in the playlist description
    #[arg(long)]
    source: Option<String>,

    /// Write the match report to this JSON file
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Offline catalog backed by a flat candidate list. Retrieval is a cheap
/// word-overlap filter; the scorer does the real ranking afterwards.
struct FixtureCatalog {
    candidates: Vec<CatalogCandidate>,
}

impl CatalogSearch for FixtureCatalog {
    fn search(&self, query: &str) -> Result<Vec<CatalogCandidate>, SearchError> {
        let query_lower = query.to_lowercase();
        let query_words: Vec<&str> = query_lower.split_whitespace().collect();
        let hits = self
            .candidates
            .iter()
            .filter(|c| {
                let title_lower = c.title.to_lowercase();
                let overlap = title_lower
                    .split_whitespace()
                    .filter(|w| query_words.contains(w))
                    .count();
                overlap >= title_lower.split_whitespace().count().min(2).max(1)
            })
            .cloned()
            .collect();
        Ok(hits)
    }
}

/// Dry-run playlist client: prints what would be created instead of calling
/// the external service.
struct DryRunPlaylistClient;

impl PlaylistClient for DryRunPlaylistClient {
    fn create_playlist(
        &self,
        name: &str,
        description: &str,
        song_ids: &[String],
    ) -> Result<PlaylistHandle> {
        println!("\nPlaylist: {}", name);
        println!("  {}", description);
        println!("  Songs: {}", song_ids.join(", "));
        Ok(PlaylistHandle {
            id: "dry-run".to_string(),
            name: name.to_string(),
        })
    }

    fn add_songs(&self, _playlist_id: &str, _song_ids: &[String]) -> Result<()> {
        Ok(())
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &PathBuf, what: &str) -> Result<T> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {:?}", what, path))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse {} file {:?}", what, path))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let songs: Vec<Song> = load_json(&args.songs, "songs")?;
    let candidates: Vec<CatalogCandidate> = load_json(&args.catalog, "catalog")?;
    println!(
        "Loaded {} songs and {} catalog candidates",
        songs.len(),
        candidates.len()
    );

    let catalog = FixtureCatalog { candidates };
    let config = MatcherConfig {
        auto_select_threshold: args.auto_threshold,
        minimum_confidence: args.min_confidence,
        search_delay: Duration::from_millis(args.delay_ms),
    };

    let (matches, report) = match_songs(&catalog, &songs, &config);
    report.log_phase("match");
    if let Some(path) = &args.report {
        report.write_to_file(path)?;
    }

    let mut session = ReviewSession::new(matches);
    if let Some(threshold) = args.accept_above {
        session.accept_all_high_confidence(threshold);
    }
    if let Some(threshold) = args.reject_below {
        session.reject_all_low_confidence(threshold);
    }
    if args.accept_rest {
        session.accept_all();
    }

    println!("\nMatches:");
    println!("{:-<80}", "");
    for matched in session.matches() {
        let confidence = matched.catalog_song.confidence;
        println!(
            "[{:?}] {} - {} -> {} - {} ({:.2}, {})",
            matched.match_status,
            matched.original_song.artist,
            matched.original_song.title,
            matched.catalog_song.artist,
            matched.catalog_song.title,
            confidence,
            MatchQuality::from_confidence(confidence)
        );
    }

    let summary = selection_summary(session.matches());
    println!("\n{:=<60}", "");
    println!("Selection summary");
    println!(
        "  Auto-selected: {} ({:.1}%)",
        summary.auto_selected,
        summary.auto_selected_percent()
    );
    println!("  Accepted:      {}", summary.selected);
    println!("  Rejected:      {}", summary.skipped);
    println!(
        "  Pending:       {} ({:.1}%)",
        summary.pending,
        summary.requires_review_percent()
    );
    println!("  Match rate:    {:.1}%", report.match_rate());
    println!("{:=<60}", "");

    if let Some(name) = &args.playlist_name {
        build_playlist(
            &DryRunPlaylistClient,
            name,
            args.source.as_deref(),
            session.matches(),
        )?;
    }

    Ok(())
}
