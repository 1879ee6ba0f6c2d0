// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP provider construction
//!
//! The replay is generic over `Provider<N: Network>` through
//! [`RpcChainSource`](crate::source::RpcChainSource). This module builds the
//! concrete providers the binary uses.
//!
//! # Example
//!
//! ```rust,ignore
//! use tradescan::provider::{create_http_provider, ProviderConfig};
//!
//! let provider = create_http_provider(
//!     ProviderConfig::new("https://bsc-dataseed.bnbchain.org").with_rate_limit(10),
//! )?;
//! let head = provider.get_block_number().await?;
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::{create_ethereum_http_provider, create_http_provider, create_typed_http_provider};

use alloy_network::{AnyNetwork, Ethereum};

/// HTTP provider using `AnyNetwork`
pub type AnyHttpProvider = alloy_provider::RootProvider<AnyNetwork>;

/// HTTP provider using the `Ethereum` network type
pub type EthereumHttpProvider = alloy_provider::RootProvider<Ethereum>;
