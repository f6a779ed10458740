//! Cheap, order-insensitive string similarity.
//!
//! Intentionally no edit-distance or phonetic matching: exact and substring
//! checks first, then word-overlap over whitespace tokens.

use rustc_hash::FxHashSet;

/// Trim and lowercase a string for comparison. Stored strings are never
/// mutated; this is comparison-only.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Compute similarity between two strings (0.0 to 1.0).
///
/// Checks in order, first match wins:
/// 1. Case-insensitive exact match -> 1.0
/// 2. Either string contains the other -> 0.8
/// 3. Word overlap: |intersection| / max(|a|, |b|), 0.0 if either is empty
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return 1.0;
    }

    // Every string contains the empty string; a blank side must not read as
    // a substring hit
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    if a.contains(&b) || b.contains(&a) {
        return 0.8;
    }

    let tokens_a: FxHashSet<&str> = a.split_whitespace().collect();
    let tokens_b: FxHashSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f64 / tokens_a.len().max(tokens_b.len()) as f64
}

// ============================================================================
// TESTS
// ============================================================================
