//! Error types for the aggregation pipeline.
//!
//! None of these escape [`crate::service::StreamAggregator`]'s public
//! methods: every failure mode degrades to "contribute nothing" so the
//! pipeline always returns a (possibly empty) result list. The variants
//! exist so degradation points can log precisely what went wrong.

use thiserror::Error;

/// Errors that can occur while aggregating provider search results.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// Content identifier matched neither the IMDB nor the TMDB shape.
    #[error("unrecognized content identifier: {id}")]
    InvalidIdentifier {
        /// The identifier as supplied by the caller
        id: String,
    },

    /// Provider did not answer within its allotted timeout.
    #[error("provider '{provider}' timed out")]
    ProviderTimeout {
        /// Key of the provider that timed out
        provider: String,
    },

    /// Provider answered with a non-success HTTP status.
    #[error("provider '{provider}' returned HTTP {status}")]
    ProviderHttpError {
        /// Key of the provider that failed
        provider: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// Provider could not be reached at all.
    #[error("provider '{provider}' unreachable: {reason}")]
    ProviderUnreachable {
        /// Key of the provider that failed
        provider: String,
        /// The underlying connection failure
        reason: String,
    },

    /// Provider response did not match the expected results schema.
    #[error("provider '{provider}' returned a malformed payload: {reason}")]
    MalformedPayload {
        /// Key of the provider that failed
        provider: String,
        /// The schema violation detail
        reason: String,
    },

    /// Magnet URI carried no extractable info hash.
    #[error("malformed magnet link: {reason}")]
    MalformedMagnet {
        /// Why the magnet was rejected
        reason: String,
    },
}

/// Errors produced by the resilient HTTP fetch client.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the hard timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("HTTP status {status}")]
    HttpStatus {
        /// The HTTP status code returned
        status: u16,
    },

    /// Connection, transfer, or body decode failure.
    #[error("network error: {reason}")]
    Network {
        /// The underlying failure
        reason: String,
    },
}
