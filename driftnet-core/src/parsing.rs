//! Heuristic quality, size, and feature extraction from release names.
//!
//! Providers frequently omit structured quality/size fields, so the
//! pipeline falls back to mining them out of the free-text title. The
//! pattern tables live here as declarative statics and the functions are
//! pure, keeping the matching policy testable without any network code.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::QualityTier;

static QUALITY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(2160p|1080p|720p|480p|4k|uhd|hdts|cam)\b")
        .expect("quality pattern is valid")
});

static SIZE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(gb|mb)\b").expect("size pattern is valid")
});

/// Encoding features surfaced in rendered titles, checked in order.
const FEATURE_TOKENS: &[(&str, &str)] = &[
    ("remux", "REMUX"),
    ("hevc", "HEVC"),
    ("x265", "x265"),
    ("x264", "x264"),
    ("10bit", "10bit"),
    ("hdr", "HDR"),
    ("atmos", "Atmos"),
];

/// Extracts the first recognized quality token from a release name.
///
/// Returns the token as it appears in the text; absence means the
/// provider's name carries no quality information.
pub fn extract_quality(text: &str) -> Option<String> {
    QUALITY_TOKEN
        .find(text)
        .map(|token| token.as_str().to_string())
}

/// Extracts the first size annotation from a release name, in whole MB.
pub fn extract_size_mb(text: &str) -> Option<u64> {
    let caps = SIZE_TOKEN.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;

    let mb = if caps[2].eq_ignore_ascii_case("gb") {
        value * 1024.0
    } else {
        value
    };
    Some(mb.round() as u64)
}

/// Maps a raw quality string onto its coarse tier.
///
/// Substring checks run in priority order; the first match wins, so a
/// string like "4K 1080p upscale" classifies as UltraHd.
pub fn classify_quality(quality: &str) -> QualityTier {
    let lower = quality.to_lowercase();

    if lower.contains("2160") || lower.contains("4k") || lower.contains("uhd") {
        QualityTier::UltraHd
    } else if lower.contains("1080") {
        QualityTier::FullHd
    } else if lower.contains("720") {
        QualityTier::Hd
    } else if lower.contains("480") {
        QualityTier::Sd
    } else if lower.contains("cam") || lower.contains("hdts") {
        QualityTier::Cam
    } else {
        QualityTier::Unknown
    }
}

/// Collects recognized encoding feature labels from a release name.
pub fn extract_features(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    FEATURE_TOKENS
        .iter()
        .filter(|(needle, _)| lower.contains(needle))
        .map(|(_, label)| *label)
        .collect()
}
