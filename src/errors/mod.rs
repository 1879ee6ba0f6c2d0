// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the tradescan library.
//!
//! The layout mirrors the rest of the crate:
//!
//! - **Module-specific errors** for fine-grained handling ([`RpcError`],
//!   [`ReplayError`], [`ConfigError`])
//! - **Unified error type** ([`TradescanError`]) when the source doesn't matter
//!
//! Classification misses (a transaction or log that doesn't match the
//! contract interface) and missing chain data are not errors anywhere in this
//! crate. They resolve to zero contributions inside the replay.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tradescan::{HistoricalReplay, ReplayError, RpcError};
//!
//! match replay.run(start, Some(end)).await {
//!     Ok(report) => println!("{} records", report.records().len()),
//!     Err(ReplayError::InvalidRange { start, end }) => {
//!         eprintln!("Bad range {start}..={end}");
//!     }
//!     Err(ReplayError::Rpc(e)) => eprintln!("Node failed: {e}"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

mod config;
mod replay;
mod rpc;

pub use config::ConfigError;
pub use replay::ReplayError;
pub use rpc::RpcError;

/// Unified error type for all tradescan operations.
///
/// Module-specific errors convert via `From`, so `?` works across module
/// boundaries.
#[derive(Debug, thiserror::Error)]
pub enum TradescanError {
    /// Error from process configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a replay invocation.
    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    /// Error from provider construction or a direct source call.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}
