//! Multi-provider result merging keyed by info hash.

use std::collections::HashSet;

use crate::magnet::InfoHash;
use crate::parsing;
use crate::types::{CandidateStream, ProviderBatch, ProviderResult};

/// Placeholder when a result carries no usable release name.
const UNKNOWN_FILENAME: &str = "Unknown";

/// Merges per-provider batches into a unique-by-hash candidate list.
///
/// The first occurrence of a hash wins; later duplicates are dropped no
/// matter which provider they came from, preserving the first occurrence's
/// filename, quality, and size. Results without an extractable `btih` hash
/// are skipped. Output order follows input order, so identical inputs
/// always merge to identical output.
pub fn merge_results(batches: Vec<ProviderBatch>) -> Vec<CandidateStream> {
    let mut seen: HashSet<InfoHash> = HashSet::new();
    let mut merged = Vec::new();

    for batch in batches {
        for result in batch.results {
            match normalize(result, &batch.source_name) {
                Ok(candidate) => {
                    if seen.insert(candidate.info_hash) {
                        merged.push(candidate);
                    }
                }
                Err(reason) => {
                    tracing::debug!("Dropping result from {}: {}", batch.source_name, reason);
                }
            }
        }
    }

    merged
}

/// Normalizes one raw provider result into a candidate stream.
///
/// Missing quality and size are mined out of the title text; the filename
/// falls back from the explicit field to the first title line to a
/// placeholder.
fn normalize(result: ProviderResult, source_name: &str) -> Result<CandidateStream, String> {
    let ProviderResult {
        magnet_link,
        title,
        filename,
        quality,
        size,
    } = result;

    let info_hash = InfoHash::from_magnet(&magnet_link).map_err(|e| e.to_string())?;

    let filename = filename
        .filter(|name| !name.trim().is_empty())
        .or_else(|| title.as_deref().and_then(first_line))
        .unwrap_or_else(|| UNKNOWN_FILENAME.to_string());
    let title = title.unwrap_or_else(|| filename.clone());

    let quality = quality
        .filter(|q| !q.trim().is_empty())
        .or_else(|| parsing::extract_quality(&title))
        .unwrap_or_default();
    let size_mb = size
        .as_deref()
        .and_then(parsing::extract_size_mb)
        .or_else(|| parsing::extract_size_mb(&title))
        .unwrap_or(0);

    Ok(CandidateStream {
        info_hash,
        magnet_uri: magnet_link,
        filename,
        title,
        quality,
        size_mb,
        source: source_name.to_string(),
    })
}

/// First non-empty line of a title, trimmed.
fn first_line(title: &str) -> Option<String> {
    title
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const HASH_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn raw(hash: &str, title: &str) -> ProviderResult {
        ProviderResult {
            magnet_link: format!("magnet:?xt=urn:btih:{hash}"),
            title: Some(title.to_string()),
            filename: None,
            quality: None,
            size: None,
        }
    }

    fn batch(source_name: &str, results: Vec<ProviderResult>) -> ProviderBatch {
        ProviderBatch {
            source_name: source_name.to_string(),
            results,
        }
    }

    #[test]
    fn test_same_hash_merges_to_one_candidate() {
        let batches = vec![
            batch("Alpha", vec![raw(HASH_A, "Movie.1080p.First")]),
            batch("Beta", vec![raw(&HASH_A.to_uppercase(), "Movie.720p.Second")]),
        ];

        let merged = merge_results(batches);

        assert_eq!(merged.len(), 1);
        // First occurrence wins, including its metadata and source
        assert_eq!(merged[0].filename, "Movie.1080p.First");
        assert_eq!(merged[0].quality, "1080p");
        assert_eq!(merged[0].source, "Alpha");
    }

    #[test]
    fn test_distinct_hashes_kept() {
        let batches = vec![batch(
            "Alpha",
            vec![raw(HASH_A, "Movie.A"), raw(HASH_B, "Movie.B")],
        )];
        assert_eq!(merge_results(batches).len(), 2);
    }

    #[test]
    fn test_malformed_magnet_skipped() {
        let mut bad = raw(HASH_A, "Movie.A");
        bad.magnet_link = "magnet:?dn=no-hash-here".to_string();

        let merged = merge_results(vec![batch("Alpha", vec![bad, raw(HASH_B, "Movie.B")])]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "Movie.B");
    }

    #[test]
    fn test_quality_and_size_derived_from_title() {
        let merged = merge_results(vec![batch(
            "Alpha",
            vec![raw(HASH_A, "Movie.2024.720p.WEB 1.4 GB")],
        )]);

        assert_eq!(merged[0].quality, "720p");
        assert_eq!(merged[0].size_mb, 1434);
    }

    #[test]
    fn test_explicit_fields_preferred_over_title() {
        let mut result = raw(HASH_A, "Movie.2024.720p 1.4 GB");
        result.quality = Some("1080p".to_string());
        result.size = Some("2.0 GB".to_string());

        let merged = merge_results(vec![batch("Alpha", vec![result])]);

        assert_eq!(merged[0].quality, "1080p");
        assert_eq!(merged[0].size_mb, 2048);
    }

    #[test]
    fn test_filename_fallback_chain() {
        // Explicit filename wins
        let mut explicit = raw(HASH_A, "Title Line");
        explicit.filename = Some("movie.mkv".to_string());
        // First line of a multi-line title
        let multiline = raw(HASH_B, "Movie.2024.mkv\nExtra provider decoration");
        // Neither title nor filename
        let mut bare = raw("cccccccccccccccccccccccccccccccccccccccc", "");
        bare.title = None;

        let merged = merge_results(vec![batch("Alpha", vec![explicit, multiline, bare])]);

        assert_eq!(merged[0].filename, "movie.mkv");
        assert_eq!(merged[1].filename, "Movie.2024.mkv");
        assert_eq!(merged[2].filename, "Unknown");
        assert_eq!(merged[2].title, "Unknown");
    }
}
