//! Data types for the stream aggregation pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AggregationError;
use crate::magnet::InfoHash;
use crate::parsing;

/// Media classification accepted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Series,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::Series => write!(f, "series"),
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "series" => Ok(MediaType::Series),
            _ => Err(format!("Invalid media type: {s}")),
        }
    }
}

/// Validated content identifier.
///
/// Two shapes are recognized: IMDB-style (`tt` followed by digits) and
/// TMDB-style (digits, with an optional `tmdb-` prefix that is stripped).
/// Anything else is rejected so the pipeline can degrade to an empty
/// result set without callers branching on identifier format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentId {
    /// IMDB identifier kept verbatim, e.g. `tt0133093`.
    Imdb(String),
    /// TMDB numeric identifier with any `tmdb-` prefix stripped.
    Tmdb(String),
}

impl ContentId {
    /// Returns the identifier as sent to providers in query strings.
    pub fn query_value(&self) -> &str {
        match self {
            ContentId::Imdb(id) | ContentId::Tmdb(id) => id,
        }
    }
}

impl FromStr for ContentId {
    type Err = AggregationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(digits) = raw.strip_prefix("tt") {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return Ok(ContentId::Imdb(raw.to_string()));
            }
        }

        let digits = raw.strip_prefix("tmdb-").unwrap_or(raw);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return Ok(ContentId::Tmdb(digits.to_string()));
        }

        Err(AggregationError::InvalidIdentifier {
            id: raw.to_string(),
        })
    }
}

/// A configured upstream search provider.
///
/// Static configuration data, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct ProviderSource {
    /// Short stable key used in logs and overrides
    pub key: String,
    /// Base URL of the provider's search API
    pub url: String,
    /// Human-readable name shown in rendered results
    pub display_name: String,
}

impl ProviderSource {
    /// Creates a provider entry.
    pub fn new(
        key: impl Into<String>,
        url: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            display_name: display_name.into(),
        }
    }
}

/// Single unnormalized search result as returned by a provider.
///
/// This is the strict ingest schema: `magnetLink` is mandatory, everything
/// else optional. A response that does not fit this shape is treated as a
/// malformed payload and the whole provider degrades to zero results.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderResult {
    #[serde(rename = "magnetLink")]
    pub magnet_link: String,
    pub title: Option<String>,
    pub filename: Option<String>,
    pub quality: Option<String>,
    pub size: Option<String>,
}

/// Results of one provider query, tagged with the provider's display name.
#[derive(Debug, Clone)]
pub struct ProviderBatch {
    pub source_name: String,
    pub results: Vec<ProviderResult>,
}

/// Normalized stream candidate produced by deduplication.
///
/// The info hash is the unique key: two candidates sharing a hash are the
/// same torrent regardless of which provider returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStream {
    pub info_hash: InfoHash,
    pub magnet_uri: String,
    pub filename: String,
    pub title: String,
    /// Raw quality token as supplied or extracted, may be empty
    pub quality: String,
    /// File size in whole megabytes, 0 when unknown
    pub size_mb: u64,
    /// Display name of the provider that first returned this candidate
    pub source: String,
}

impl CandidateStream {
    /// Formats the size for display ("1.4 GB", "812 MB", empty if unknown).
    pub fn format_size(&self) -> String {
        if self.size_mb == 0 {
            String::new()
        } else if self.size_mb >= 1024 {
            format!("{:.1} GB", self.size_mb as f64 / 1024.0)
        } else {
            format!("{} MB", self.size_mb)
        }
    }
}

/// Coarse quality bucket used for primary ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    UltraHd,
    FullHd,
    Hd,
    Sd,
    Cam,
    Unknown,
}

impl QualityTier {
    /// Numeric rank for sorting, higher is better. Cam rips rank with
    /// unrecognized qualities at the bottom.
    pub fn rank(self) -> u8 {
        match self {
            QualityTier::UltraHd => 4,
            QualityTier::FullHd => 3,
            QualityTier::Hd => 2,
            QualityTier::Sd => 1,
            QualityTier::Cam | QualityTier::Unknown => 0,
        }
    }

    /// Short presentation symbol, empty for unrecognized qualities.
    pub fn symbol(self) -> &'static str {
        match self {
            QualityTier::UltraHd => "4K",
            QualityTier::FullHd => "FHD",
            QualityTier::Hd => "HD",
            QualityTier::Sd => "SD",
            QualityTier::Cam => "CAM",
            QualityTier::Unknown => "",
        }
    }

    /// Plausible file size range in MB for this tier.
    ///
    /// Files inside the range score best during ranking; the distance to
    /// the nearest bound penalizes implausibly small ("fake"/incomplete)
    /// or implausibly large files within the same tier.
    pub fn ideal_size_mb(self) -> (u64, Option<u64>) {
        match self {
            QualityTier::UltraHd => (10_000, Some(80_000)),
            QualityTier::FullHd => (2_000, Some(16_000)),
            QualityTier::Hd => (1_000, Some(8_000)),
            QualityTier::Sd => (500, Some(4_000)),
            QualityTier::Cam | QualityTier::Unknown => (0, None),
        }
    }
}

/// Ranked stream: a candidate plus its resolved quality tier.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStream {
    pub stream: CandidateStream,
    pub tier: QualityTier,
}

impl RankedStream {
    /// One-line label: quality symbol, raw quality, size, and source,
    /// blank segments omitted.
    pub fn display_name(&self) -> String {
        let size = self.stream.format_size();
        join_nonempty(&[
            self.tier.symbol(),
            self.stream.quality.as_str(),
            size.as_str(),
            self.stream.source.as_str(),
        ])
    }

    /// Two-line description: the filename, then the source marker and any
    /// recognized encoding features.
    pub fn display_title(&self) -> String {
        let marker = format!("[{}]", self.stream.source);
        let features = parsing::extract_features(&self.stream.filename).join(" ");
        format!(
            "{}\n{}",
            self.stream.filename,
            join_nonempty(&[marker.as_str(), features.as_str()])
        )
    }

    /// Renders the item handed to a downstream player or consumer.
    pub fn to_output(&self) -> StreamOutput {
        StreamOutput {
            name: self.display_name(),
            title: self.display_title(),
            url: self.stream.magnet_uri.clone(),
            info_hash: self.stream.info_hash.to_string(),
            behavior_hints: BehaviorHints { not_web_ready: true },
        }
    }
}

/// Rendered output item for downstream consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamOutput {
    pub name: String,
    pub title: String,
    /// The candidate's magnet URI
    pub url: String,
    pub info_hash: String,
    pub behavior_hints: BehaviorHints,
}

/// Playback hints attached to every rendered stream.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub not_web_ready: bool,
}

/// Joins non-empty segments with " | ".
fn join_nonempty(segments: &[&str]) -> String {
    segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" | ")
}
