//! Quality and size-fit ordering for deduplicated candidates.
//!
//! Quality tiers rank first, but providers sometimes mislabel releases, so
//! plausible file size acts as a corroborating signal: within a tier,
//! candidates whose size sits inside the tier's ideal range beat those that
//! are implausibly small or large.

use std::cmp::Ordering;

use crate::parsing;
use crate::types::{CandidateStream, QualityTier, RankedStream};

/// Scores how far a size sits from its tier's ideal range, in MB.
///
/// Zero inside the range, otherwise the distance to the nearest bound.
/// Lower is better.
pub fn size_fit_score(tier: QualityTier, size_mb: u64) -> u64 {
    let (low, high) = tier.ideal_size_mb();
    if size_mb < low {
        return low - size_mb;
    }
    match high {
        Some(high) if size_mb > high => size_mb - high,
        _ => 0,
    }
}

/// Attaches quality tiers and orders candidates best-first.
pub fn rank_streams(candidates: Vec<CandidateStream>) -> Vec<RankedStream> {
    let mut ranked: Vec<RankedStream> = candidates
        .into_iter()
        .map(|stream| {
            let tier = parsing::classify_quality(&stream.quality);
            RankedStream { stream, tier }
        })
        .collect();

    ranked.sort_by(compare);
    ranked
}

/// Total order over ranked streams, best first.
///
/// Quality tier descending, then size-fit score ascending, then raw size
/// descending.
pub fn compare(a: &RankedStream, b: &RankedStream) -> Ordering {
    b.tier
        .rank()
        .cmp(&a.tier.rank())
        .then_with(|| {
            size_fit_score(a.tier, a.stream.size_mb).cmp(&size_fit_score(b.tier, b.stream.size_mb))
        })
        .then_with(|| b.stream.size_mb.cmp(&a.stream.size_mb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magnet::InfoHash;

    fn candidate(id: u8, quality: &str, size_mb: u64) -> CandidateStream {
        CandidateStream {
            info_hash: InfoHash::new([id; 20]),
            magnet_uri: "magnet:?xt=urn:btih:0000000000000000000000000000000000000000".to_string(),
            filename: format!("file-{id}.mkv"),
            title: format!("file-{id}"),
            quality: quality.to_string(),
            size_mb,
            source: "Test".to_string(),
        }
    }

    #[test]
    fn test_size_fit_score_inside_range() {
        assert_eq!(size_fit_score(QualityTier::FullHd, 4_000), 0);
        assert_eq!(size_fit_score(QualityTier::FullHd, 2_000), 0);
        assert_eq!(size_fit_score(QualityTier::FullHd, 16_000), 0);
    }

    #[test]
    fn test_size_fit_score_outside_range() {
        // Below: distance to the lower bound
        assert_eq!(size_fit_score(QualityTier::FullHd, 500), 1_500);
        // Above: distance to the upper bound
        assert_eq!(size_fit_score(QualityTier::FullHd, 20_000), 4_000);
        // Unbounded tier accepts anything
        assert_eq!(size_fit_score(QualityTier::Unknown, 0), 0);
        assert_eq!(size_fit_score(QualityTier::Unknown, 500_000), 0);
    }

    #[test]
    fn test_quality_tier_dominates() {
        let ranked = rank_streams(vec![
            candidate(1, "480p", 2_000),
            candidate(2, "2160p", 200),
            candidate(3, "1080p", 4_000),
        ]);

        assert_eq!(ranked[0].tier, QualityTier::UltraHd);
        assert_eq!(ranked[1].tier, QualityTier::FullHd);
        assert_eq!(ranked[2].tier, QualityTier::Sd);
    }

    #[test]
    fn test_size_fit_breaks_quality_ties() {
        // Both 1080p: the well-sized release beats the implausibly small one
        let ranked = rank_streams(vec![
            candidate(1, "1080p", 300),
            candidate(2, "1080p", 4_000),
        ]);

        assert_eq!(ranked[0].stream.size_mb, 4_000);
        assert_eq!(ranked[1].stream.size_mb, 300);
    }

    #[test]
    fn test_larger_size_breaks_fit_ties() {
        // Both inside the 1080p ideal range, equal fit score of zero
        let ranked = rank_streams(vec![
            candidate(1, "1080p", 3_000),
            candidate(2, "1080p", 8_000),
        ]);

        assert_eq!(ranked[0].stream.size_mb, 8_000);
        assert_eq!(ranked[1].stream.size_mb, 3_000);
    }

    #[test]
    fn test_compare_is_total_order() {
        let streams = rank_streams(vec![
            candidate(1, "1080p", 4_000),
            candidate(2, "720p", 2_000),
            candidate(3, "1080p", 100),
            candidate(4, "", 0),
            candidate(5, "2160p", 20_000),
            candidate(6, "CAM", 900),
        ]);

        for pair in streams.windows(2) {
            assert_ne!(
                compare(&pair[0], &pair[1]),
                Ordering::Greater,
                "ranking must be non-decreasing in comparator order"
            );
        }
    }
}
