// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Endpoint settings for the HTTP providers the binary builds

/// Where to connect and how hard to push the endpoint.
///
/// Public BSC endpoints reject bursts well below what the replay can issue at
/// its default concurrency, so a rate limit is usually worth setting.
///
/// # Example
///
/// ```rust
/// use tradescan::provider::ProviderConfig;
///
/// let config = ProviderConfig::new("https://bsc-dataseed.bnbchain.org")
///     .with_rate_limit(10);
/// assert!(config.has_rate_limiting());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Rate limit in requests per second (None for unlimited)
    pub rate_limit_per_second: Option<u32>,
}

impl ProviderConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            rate_limit_per_second: None,
        }
    }

    /// Set rate limiting (requests per second)
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limit_per_second = Some(requests_per_second);
        self
    }

    /// Set rate limiting from an optional value
    #[must_use]
    pub fn with_rate_limit_opt(mut self, requests_per_second: Option<u32>) -> Self {
        self.rate_limit_per_second = requests_per_second;
        self
    }

    #[must_use]
    pub fn has_rate_limiting(&self) -> bool {
        self.rate_limit_per_second.is_some()
    }

    /// Public endpoints throttle aggressively; start conservative
    #[must_use]
    pub fn public_endpoint(url: impl Into<String>) -> Self {
        Self::new(url).with_rate_limit(5)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("http://localhost:8545")
    }
}
