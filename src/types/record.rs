// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-block output records

use alloy_primitives::BlockNumber;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::MetricAmount;

/// The metrics a replay can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Volume,
    Liquidity,
    Price,
}

impl Metric {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Volume => "volume",
            Metric::Liquidity => "liquidity",
            Metric::Price => "price",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A metric value that may not have been obtainable.
///
/// `Unavailable` renders as zero but stays distinguishable from a genuine
/// zero, e.g. when the node no longer serves historical state for the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricReading {
    Value { amount: MetricAmount },
    Unavailable { reason: String },
}

impl MetricReading {
    pub fn value(amount: impl Into<MetricAmount>) -> Self {
        MetricReading::Value {
            amount: amount.into(),
        }
    }

    pub fn zero() -> Self {
        Self::value(MetricAmount::zero())
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        MetricReading::Unavailable {
            reason: reason.into(),
        }
    }

    /// Numeric rendering: `Unavailable` counts as zero.
    pub fn amount(&self) -> MetricAmount {
        match self {
            MetricReading::Value { amount } => amount.clone(),
            MetricReading::Unavailable { .. } => MetricAmount::zero(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, MetricReading::Unavailable { .. })
    }
}

impl Default for MetricReading {
    fn default() -> Self {
        Self::zero()
    }
}

/// Whether the block itself could be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Resolved,
    /// The source had no block at this height; every metric is zero.
    Missing,
}

/// Aggregated metrics for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub block_number: BlockNumber,
    pub status: BlockStatus,
    /// Unix seconds; zero when the block is missing
    pub timestamp: u64,
    pub transaction_count: usize,
    pub volume: MetricAmount,
    pub liquidity: MetricReading,
    pub price: MetricReading,
}

impl BlockRecord {
    /// Record for a block the source could not provide.
    pub fn missing(block_number: BlockNumber) -> Self {
        Self {
            block_number,
            status: BlockStatus::Missing,
            timestamp: 0,
            transaction_count: 0,
            volume: MetricAmount::zero(),
            liquidity: MetricReading::zero(),
            price: MetricReading::zero(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.status == BlockStatus::Missing
    }

    /// Convert to display format with token decimal scaling
    pub fn to_display(&self, decimals: u8) -> BlockRecordDisplay {
        let render = |reading: &MetricReading| match reading {
            MetricReading::Value { amount } => amount.scaled_string(decimals),
            MetricReading::Unavailable { .. } => "0".to_string(),
        };

        BlockRecordDisplay {
            block_number: self.block_number,
            timestamp: self.timestamp,
            datetime: match self.status {
                BlockStatus::Resolved => i64::try_from(self.timestamp)
                    .ok()
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                    .map(|dt| dt.to_rfc3339()),
                BlockStatus::Missing => None,
            },
            missing: self.is_missing(),
            volume: self.volume.scaled_string(decimals),
            liquidity: render(&self.liquidity),
            liquidity_unavailable: self.liquidity.is_unavailable(),
            price: render(&self.price),
            price_unavailable: self.price.is_unavailable(),
        }
    }
}

/// Human-readable version of [`BlockRecord`] with formatted values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecordDisplay {
    pub block_number: BlockNumber,
    pub timestamp: u64,
    pub datetime: Option<String>,
    pub missing: bool,
    pub volume: String,
    pub liquidity: String,
    pub liquidity_unavailable: bool,
    pub price: String,
    pub price_unavailable: bool,
}
