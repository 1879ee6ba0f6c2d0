// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer utilities for alloy providers.
//!
//! Request-rate limiting is applied here, below the provider, so it holds
//! regardless of how many replay futures are in flight.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tradescan::transport::RateLimitLayer;
//! use alloy_rpc_client::ClientBuilder;
//!
//! let client = ClientBuilder::default()
//!     .layer(RateLimitLayer::per_second(10))
//!     .http(rpc_url);
//! ```

mod rate_limit;

pub use rate_limit::{RateLimitLayer, RateLimitService};
