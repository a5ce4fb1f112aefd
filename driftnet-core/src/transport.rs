//! Provider search transport.
//!
//! The [`SearchTransport`] trait is the seam between the aggregation
//! pipeline and the network: production code goes through the resilient
//! HTTP client, tests swap in scripted implementations.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::NetworkConfig;
use crate::errors::{AggregationError, FetchError};
use crate::fetch::ResilientFetchClient;
use crate::types::{MediaType, ProviderResult, ProviderSource};

/// Trait for querying one upstream search provider.
#[async_trait]
pub trait SearchTransport: Send + Sync + fmt::Debug {
    /// Runs one search against the given provider.
    ///
    /// # Errors
    /// - `AggregationError::ProviderTimeout` - provider did not answer in time
    /// - `AggregationError::ProviderHttpError` - non-success HTTP status
    /// - `AggregationError::ProviderUnreachable` - connection failure
    /// - `AggregationError::MalformedPayload` - response failed schema validation
    async fn search(
        &self,
        source: &ProviderSource,
        media_type: MediaType,
        query: &str,
    ) -> Result<Vec<ProviderResult>, AggregationError>;
}

/// Expected JSON envelope of every provider response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ProviderResult>,
}

/// Production transport speaking the provider search contract over HTTP.
#[derive(Debug)]
pub struct HttpTransport {
    fetch: ResilientFetchClient,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates the transport with the configured user agent and timeout.
    pub fn new(network: &NetworkConfig, timeout: Duration) -> Self {
        Self {
            fetch: ResilientFetchClient::new(network.user_agent),
            timeout,
        }
    }

    /// Builds the provider search URL for a query.
    fn search_url(source: &ProviderSource, media_type: MediaType, query: &str) -> String {
        format!(
            "{}/api/search?type={}&query={}",
            source.url,
            media_type,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn search(
        &self,
        source: &ProviderSource,
        media_type: MediaType,
        query: &str,
    ) -> Result<Vec<ProviderResult>, AggregationError> {
        let url = Self::search_url(source, media_type, query);

        let payload = self.fetch.get_json(&url, self.timeout).await.map_err(|e| match e {
            FetchError::Timeout => AggregationError::ProviderTimeout {
                provider: source.key.clone(),
            },
            FetchError::HttpStatus { status } => AggregationError::ProviderHttpError {
                provider: source.key.clone(),
                status,
            },
            FetchError::Network { reason } => AggregationError::ProviderUnreachable {
                provider: source.key.clone(),
                reason,
            },
        })?;

        let response: SearchResponse =
            serde_json::from_value(payload).map_err(|e| AggregationError::MalformedPayload {
                provider: source.key.clone(),
                reason: e.to_string(),
            })?;

        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        let source = ProviderSource::new("alpha", "https://alpha.example", "Alpha");

        assert_eq!(
            HttpTransport::search_url(&source, MediaType::Movie, "tt0133093"),
            "https://alpha.example/api/search?type=movie&query=tt0133093"
        );
        assert_eq!(
            HttpTransport::search_url(&source, MediaType::Series, "tt0944947:2:5"),
            "https://alpha.example/api/search?type=series&query=tt0944947%3A2%3A5"
        );
    }

    #[test]
    fn test_search_response_schema() {
        let payload = serde_json::json!({
            "results": [
                { "magnetLink": "magnet:?xt=urn:btih:aa", "title": "A", "quality": "1080p" },
                { "magnetLink": "magnet:?xt=urn:btih:bb" }
            ]
        });
        let response: SearchResponse = serde_json::from_value(payload).unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].quality.as_deref(), Some("1080p"));
        assert!(response.results[1].title.is_none());
    }

    #[test]
    fn test_search_response_rejects_missing_magnet() {
        let payload = serde_json::json!({
            "results": [ { "title": "no magnet here" } ]
        });
        assert!(serde_json::from_value::<SearchResponse>(payload).is_err());
    }
}
