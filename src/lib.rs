// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block-by-block replay of historical trading metrics for one token contract.
//!
//! For every block in a range, tradescan fetches the block's transactions,
//! decodes each one against the token's ABI, pulls the receipts of trades and
//! liquidity adds, and folds the decoded event amounts into one
//! [`BlockRecord`] per block. Price (and optionally liquidity) is read from the
//! contract's view functions as of each block.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tradescan::provider::{create_http_provider, ProviderConfig};
//! use tradescan::source::{AnyNetworkLogAdapter, RpcChainSource};
//! use tradescan::{HistoricalReplay, ReplayConfig};
//!
//! let provider = create_http_provider(ProviderConfig::new(rpc_url))?;
//! let source = Arc::new(RpcChainSource::new(provider, AnyNetworkLogAdapter));
//! let replay = HistoricalReplay::new(source, token, ReplayConfig::default());
//!
//! let report = replay.run(29_443_557, Some(29_443_657)).await?;
//! assert_eq!(report.records().len(), 101);
//! ```

pub mod abi;
pub mod bootstrap;
pub mod config;
pub mod decode;
pub mod errors;
pub mod extract;
pub mod provider;
pub mod reader;
pub mod replay;
pub mod source;
mod tracing;
pub mod transport;
pub mod types;

pub use config::{LiquidityStrategy, MetricSelection, ReplayConfig, ReplayConfigBuilder};
pub use decode::{decode_log, decode_method, DecodedCall, DecodedLog};
pub use errors::{ConfigError, ReplayError, RpcError, TradescanError};
pub use extract::{LiquidityLogExtractor, TransactionExtractor, VolumeDenomination, VolumeExtractor};
pub use reader::{PointInTimeReader, PointMetric};
pub use replay::{BlockAggregator, HistoricalReplay, ReplayReport, ReplayTotals};
pub use source::ChainSource;
pub use types::amount::MetricAmount;
pub use types::chain::{BlockHandle, LogEntry, ReceiptHandle, TransactionHandle};
pub use types::range::BlockRange;
pub use types::record::{BlockRecord, BlockRecordDisplay, BlockStatus, Metric, MetricReading};
