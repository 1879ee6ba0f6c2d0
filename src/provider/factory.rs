// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_network::{AnyNetwork, Ethereum, Network};
use alloy_provider::{ProviderBuilder, RootProvider};
use alloy_rpc_client::ClientBuilder;

use crate::errors::RpcError;
use crate::transport::RateLimitLayer;

use super::config::ProviderConfig;
use super::{AnyHttpProvider, EthereumHttpProvider};

/// Create an `AnyNetwork` HTTP provider with the given configuration
///
/// `AnyNetwork` accepts receipts and transactions from any EVM chain, which
/// is what the replay needs for chains alloy has no dedicated network type
/// for (BNB Smart Chain among them).
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: ProviderConfig) -> Result<AnyHttpProvider, RpcError> {
    create_typed_http_provider::<AnyNetwork>(config)
}

/// Create an `Ethereum` HTTP provider
pub fn create_ethereum_http_provider(
    config: ProviderConfig,
) -> Result<EthereumHttpProvider, RpcError> {
    create_typed_http_provider::<Ethereum>(config)
}

/// Create an HTTP provider for network `N`
///
/// Recommended fillers are disabled: the replay only reads.
pub fn create_typed_http_provider<N: Network>(
    config: ProviderConfig,
) -> Result<RootProvider<N>, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    let builder = ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<N>();

    Ok(match config.rate_limit_per_second {
        Some(rps) => {
            tracing::debug!(requests_per_second = rps, "Rate limiting RPC requests");
            let client = ClientBuilder::default()
                .layer(RateLimitLayer::per_second(rps))
                .http(url);
            builder.connect_client(client)
        }
        None => builder.connect_http(url),
    })
}
