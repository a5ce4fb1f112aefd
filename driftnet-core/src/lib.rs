//! Driftnet Core - Multi-provider torrent stream aggregation
//!
//! This crate provides the aggregation pipeline behind Driftnet: resilient
//! concurrent provider fetch, hash-based deduplication, quality/size
//! heuristics, season/episode disambiguation, and ranking. The pipeline is
//! fed a content identifier and answers with a capped, best-first list of
//! playable stream candidates; every internal failure degrades to
//! "contribute nothing" rather than surfacing as an error.

pub mod config;
pub mod dedup;
pub mod episode;
pub mod errors;
pub mod fetch;
pub mod magnet;
pub mod parsing;
pub mod rank;
pub mod service;
pub mod transport;
pub mod types;

// Re-export main types for convenient access
pub use config::DriftnetConfig;
pub use errors::{AggregationError, FetchError};
pub use magnet::InfoHash;
pub use service::StreamAggregator;
pub use transport::SearchTransport;
pub use types::{
    CandidateStream, ContentId, MediaType, ProviderResult, ProviderSource, QualityTier,
    RankedStream, StreamOutput,
};

/// Convenience type alias for Results with AggregationError.
pub type Result<T> = std::result::Result<T, AggregationError>;
