//! Stream aggregation orchestration.
//!
//! Fans one search out to every configured provider concurrently, merges
//! and deduplicates the raw results, filters series results down to the
//! requested episode, ranks, and caps the final list. No failure escapes:
//! a provider that times out, errors, or returns garbage contributes zero
//! results and the pipeline still answers.

use futures::future;

use crate::config::{DriftnetConfig, SearchConfig};
use crate::dedup;
use crate::episode;
use crate::rank;
use crate::transport::{HttpTransport, SearchTransport};
use crate::types::{ContentId, MediaType, ProviderBatch, ProviderSource, RankedStream};

/// Aggregates torrent stream search results across providers.
///
/// The provider table and limits are injected at construction and stay
/// immutable for the aggregator's lifetime. All state is request-scoped;
/// one aggregator can serve any number of concurrent requests.
#[derive(Debug)]
pub struct StreamAggregator {
    search: SearchConfig,
    transport: Box<dyn SearchTransport>,
}

impl StreamAggregator {
    /// Creates an aggregator backed by the HTTP provider transport.
    pub fn new(config: DriftnetConfig) -> Self {
        let transport = HttpTransport::new(&config.network, config.search.provider_timeout);
        Self {
            search: config.search,
            transport: Box::new(transport),
        }
    }

    /// Creates an aggregator with a custom transport.
    ///
    /// The seam used by tests and by embedders that already have their own
    /// provider plumbing.
    pub fn with_transport(config: DriftnetConfig, transport: Box<dyn SearchTransport>) -> Self {
        Self {
            search: config.search,
            transport,
        }
    }

    /// Unified entry point: fetches ranked streams for any media type.
    ///
    /// Unrecognized identifiers yield an empty list, never an error.
    ///
    /// # Panics
    /// Panics when `media_type` is [`MediaType::Series`] and `season` or
    /// `episode` is `None`. That is a caller contract violation, not a
    /// runtime condition, so it fails fast instead of silently defaulting.
    pub async fn fetch_streams(
        &self,
        media_type: MediaType,
        id: &str,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Vec<RankedStream> {
        match media_type {
            MediaType::Movie => self.movie_streams(id).await,
            MediaType::Series => {
                let (Some(season), Some(episode)) = (season, episode) else {
                    panic!("series stream requests require both season and episode");
                };
                self.series_streams(id, season, episode).await
            }
        }
    }

    /// Fetches ranked streams for a movie.
    pub async fn movie_streams(&self, id: &str) -> Vec<RankedStream> {
        self.aggregate(MediaType::Movie, id, None).await
    }

    /// Fetches ranked streams for one episode of a series.
    pub async fn series_streams(&self, id: &str, season: u32, episode: u32) -> Vec<RankedStream> {
        self.aggregate(MediaType::Series, id, Some((season, episode)))
            .await
    }

    /// Runs the full pipeline: fan-out, merge, filter, rank, cap.
    async fn aggregate(
        &self,
        media_type: MediaType,
        id: &str,
        episode: Option<(u32, u32)>,
    ) -> Vec<RankedStream> {
        let content_id: ContentId = match id.parse() {
            Ok(content_id) => content_id,
            Err(error) => {
                tracing::debug!("Returning no streams: {}", error);
                return Vec::new();
            }
        };

        // The season/episode suffix is informational for providers; the
        // authoritative filter is re-applied after the merge below.
        let query = match episode {
            Some((season, number)) => format!("{}:{season}:{number}", content_id.query_value()),
            None => content_id.query_value().to_string(),
        };

        let fetches = self
            .search
            .sources
            .iter()
            .map(|source| self.query_provider(source, media_type, &query));
        let batches = future::join_all(fetches).await;

        let mut candidates = dedup::merge_results(batches);
        if let Some((season, number)) = episode {
            candidates.retain(|candidate| {
                episode::matches_episode(&candidate.filename, season, number)
            });
        }

        let mut ranked = rank::rank_streams(candidates);
        ranked.truncate(self.search.max_results);

        tracing::info!(
            "Aggregated {} streams for {} {}",
            ranked.len(),
            media_type,
            id
        );
        ranked
    }

    /// Queries one provider, degrading every failure to an empty batch.
    async fn query_provider(
        &self,
        source: &ProviderSource,
        media_type: MediaType,
        query: &str,
    ) -> ProviderBatch {
        match self.transport.search(source, media_type, query).await {
            Ok(results) => {
                tracing::debug!("Provider {} returned {} results", source.key, results.len());
                ProviderBatch {
                    source_name: source.display_name.clone(),
                    results,
                }
            }
            Err(error) => {
                tracing::warn!("Provider {} degraded to zero results: {}", source.key, error);
                ProviderBatch {
                    source_name: source.display_name.clone(),
                    results: Vec::new(),
                }
            }
        }
    }
}
