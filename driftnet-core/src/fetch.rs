//! Resilient HTTP fetch with DNS pinning and hard timeouts.

use std::time::Duration;

use crate::errors::FetchError;

/// HTTP client hardened for unreliable edge deployments.
///
/// Resolves the target hostname itself and pins the outbound connection to
/// the resolved address, which sidesteps transient resolver failures seen
/// under containerized DNS. Every request races a hard timeout; a provider
/// that stalls is abandoned, never awaited.
#[derive(Debug, Clone)]
pub struct ResilientFetchClient {
    client: reqwest::Client,
    user_agent: String,
}

impl ResilientFetchClient {
    /// Creates a fetch client with the given user agent on all requests.
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .expect("HTTP client creation should not fail"),
            user_agent: user_agent.to_string(),
        }
    }

    /// Fetches a URL and decodes the response body as JSON.
    ///
    /// A single attempt is made; there are no retries. The timeout covers
    /// the whole exchange including the body read.
    ///
    /// # Errors
    /// - `FetchError::Timeout` - the exchange did not finish within `timeout`
    /// - `FetchError::HttpStatus` - the server answered with a non-2xx status
    /// - `FetchError::Network` - connection, transfer, or JSON decode failure
    pub async fn get_json(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, FetchError> {
        let client = self.pinned_client(url).await;

        let exchange = async {
            let response = client.get(url).send().await.map_err(|e| FetchError::Network {
                reason: e.to_string(),
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::HttpStatus {
                    status: status.as_u16(),
                });
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| FetchError::Network {
                    reason: format!("body decode failed: {e}"),
                })
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        }
    }

    /// Builds a client pinned to the URL host's resolved socket address.
    ///
    /// Any failure along the way (unparseable URL, resolver error, empty
    /// answer) falls back to the default client unmodified.
    async fn pinned_client(&self, url: &str) -> reqwest::Client {
        let Ok(parsed) = url::Url::parse(url) else {
            return self.client.clone();
        };
        let Some(host) = parsed.host_str() else {
            return self.client.clone();
        };
        let Some(port) = parsed.port_or_known_default() else {
            return self.client.clone();
        };

        match tokio::net::lookup_host((host, port)).await {
            Ok(mut addresses) => match addresses.next() {
                Some(address) => reqwest::Client::builder()
                    .user_agent(self.user_agent.as_str())
                    .resolve(host, address)
                    .build()
                    .unwrap_or_else(|_| self.client.clone()),
                None => self.client.clone(),
            },
            Err(e) => {
                tracing::debug!("DNS resolution for {} failed, using default resolver: {}", host, e);
                self.client.clone()
            }
        }
    }
}
