//! Search query strategy generation.
//!
//! Produces ordered alternate search-query strings for a song so the catalog
//! search has the best recall before any scoring happens. The caller tries
//! strategies in order and stops at the first one that returns candidates.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::models::Song;

/// Parenthetical groups like "(Remastered 2011)" or "(feat. Someone)"
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Possessive marker that search backends tend to choke on: "Journey's " -> "Journey "
static POSSESSIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'s ").unwrap());

/// Regex to collapse whitespace runs (including tabs and newlines) into a
/// single space
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Clean a title or artist term for use in a search query.
/// Strips double quotes, possessive markers, and parenthetical groups, then
/// collapses whitespace.
pub fn clean_term(term: &str) -> String {
    let mut result = term.replace('"', "");
    result = POSSESSIVE.replace_all(&result, " ").to_string();
    result = PARENTHETICAL.replace_all(&result, "").to_string();
    result = WHITESPACE_RUN.replace_all(&result, " ").to_string();
    result.trim().to_string()
}

/// Ordered alternate query strings for a song, deduplicated
/// case-insensitively with first-seen order preserved.
///
/// Always starts with "{title} {artist}". Artists without a leading "The"
/// also get a "The"-prefixed variant; artists with one also get the variant
/// without it. Band names are inconsistent about the article across catalogs.
pub fn query_strategies(song: &Song) -> Vec<String> {
    let title = clean_term(&song.title);
    let artist = clean_term(&song.artist);

    let mut queries = vec![format!("{} {}", title, artist)];

    if artist.to_lowercase().starts_with("the ") {
        queries.push(format!("{} {}", title, &artist[4..]));
    } else {
        queries.push(format!("{} The {}", title, artist));
    }

    let mut seen: FxHashSet<String> = FxHashSet::default();
    queries
        .into_iter()
        .filter(|q| seen.insert(q.to_lowercase()))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
