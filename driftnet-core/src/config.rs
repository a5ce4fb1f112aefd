//! Centralized configuration for Driftnet.
//!
//! All tunable parameters live here to avoid hard-coded values scattered
//! throughout the pipeline. The provider table is plain configuration data:
//! adding or removing a search provider never requires a pipeline change.

use std::time::Duration;

use crate::types::ProviderSource;

/// Central configuration for all Driftnet components.
///
/// Groups related settings into logical sections and supports environment
/// variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct DriftnetConfig {
    pub search: SearchConfig,
    pub network: NetworkConfig,
}

/// Search aggregation configuration.
///
/// Controls the provider table, per-provider timeout, and the cap applied
/// to the final ranked result list.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Upstream search providers queried on every request
    pub sources: Vec<ProviderSource>,
    /// Hard timeout applied to each provider independently
    pub provider_timeout: Duration,
    /// Maximum number of ranked streams returned to the caller
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            provider_timeout: Duration::from_secs(10),
            max_results: 50,
        }
    }
}

/// Network communication configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// User agent for outbound provider requests
    pub user_agent: &'static str,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: "driftnet/0.1.0",
        }
    }
}

/// Built-in provider table: the Driftnet community bridge instances.
fn default_sources() -> Vec<ProviderSource> {
    vec![
        ProviderSource::new("bitsearch", "https://bitsearch.driftnet.stream", "BitSearch"),
        ProviderSource::new("snowfl", "https://snowfl.driftnet.stream", "Snowfl"),
        ProviderSource::new("magnetdl", "https://magnetdl.driftnet.stream", "MagnetDL"),
        ProviderSource::new("glotorrents", "https://glo.driftnet.stream", "GloTorrents"),
    ]
}

impl DriftnetConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Recognized variables: `DRIFTNET_PROVIDER_TIMEOUT` (seconds),
    /// `DRIFTNET_MAX_RESULTS`, and `DRIFTNET_SOURCES` (comma-separated
    /// `key=url` pairs replacing the built-in provider table).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(timeout) = std::env::var("DRIFTNET_PROVIDER_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.search.provider_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(max_results) = std::env::var("DRIFTNET_MAX_RESULTS") {
            if let Ok(count) = max_results.parse::<usize>() {
                config.search.max_results = count;
            }
        }

        if let Ok(raw) = std::env::var("DRIFTNET_SOURCES") {
            if let Some(sources) = parse_sources(&raw) {
                config.search.sources = sources;
            }
        }

        config
    }

    /// Creates a configuration optimized for tests: a tiny provider table
    /// and a timeout short enough to keep failure paths fast.
    pub fn for_testing() -> Self {
        Self {
            search: SearchConfig {
                sources: vec![
                    ProviderSource::new("alpha", "http://alpha.test", "Alpha"),
                    ProviderSource::new("beta", "http://beta.test", "Beta"),
                ],
                provider_timeout: Duration::from_millis(250),
                max_results: 50,
            },
            network: NetworkConfig::default(),
        }
    }
}

/// Parses `key=url,key=url` into a provider table.
///
/// Returns `None` when any entry is malformed so a typo falls back to the
/// built-in table instead of silently dropping providers.
fn parse_sources(raw: &str) -> Option<Vec<ProviderSource>> {
    let mut sources = Vec::new();

    for entry in raw.split(',') {
        let (key, url) = entry.split_once('=')?;
        let key = key.trim();
        let url = url.trim().trim_end_matches('/');
        if key.is_empty() || url.is_empty() {
            return None;
        }
        sources.push(ProviderSource::new(key, url, display_name_for(key)));
    }

    if sources.is_empty() { None } else { Some(sources) }
}

/// Derives a display name from a provider key ("bitsearch" -> "Bitsearch").
fn display_name_for(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
