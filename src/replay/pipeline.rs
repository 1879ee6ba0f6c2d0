// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Replay driver: range resolution, chunking and the result report

use std::sync::Arc;

use alloy_primitives::{Address, BlockNumber};
use serde::Serialize;
use tracing::{info, warn, Instrument};

use super::aggregator::BlockAggregator;
use crate::config::ReplayConfig;
use crate::errors::ReplayError;
use crate::source::ChainSource;
use crate::tracing::spans;
use crate::types::amount::MetricAmount;
use crate::types::range::BlockRange;
use crate::types::record::{BlockRecord, BlockRecordDisplay};

/// Replays a block range for one token contract.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tradescan::{HistoricalReplay, ReplayConfig};
///
/// let replay = HistoricalReplay::new(Arc::new(source), token, ReplayConfig::default());
/// let report = replay.run(29_443_557, Some(29_443_600)).await?;
/// for record in report.records() {
///     println!("{} {}", record.block_number, record.volume);
/// }
/// ```
pub struct HistoricalReplay<S> {
    source: Arc<S>,
    contract: Address,
    config: ReplayConfig,
    aggregator: BlockAggregator<S>,
}

impl<S: ChainSource> HistoricalReplay<S> {
    pub fn new(source: Arc<S>, contract: Address, config: ReplayConfig) -> Self {
        Self {
            aggregator: BlockAggregator::new(Arc::clone(&source), contract, &config),
            source,
            contract,
            config,
        }
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Replay `start..=end`; `end = None` replays through the current chain head.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptySelection`] when no metric is selected
    /// - [`ReplayError::InvalidRange`] when `start` is past `end`
    /// - [`ReplayError::Rpc`] on any transport failure; no records are returned
    pub async fn run(
        &self,
        start: BlockNumber,
        end: Option<BlockNumber>,
    ) -> Result<ReplayReport, ReplayError> {
        if self.config.metrics.is_empty() {
            return Err(ReplayError::EmptySelection);
        }
        let end = match end {
            Some(end) => end,
            None => self.source.block_number().await?,
        };
        let range = BlockRange::new(start, end)?;

        self.run_range(range)
            .instrument(spans::replay_run(self.contract, range.start(), range.end()))
            .await
    }

    /// Replay an already validated range, one chunk at a time.
    pub async fn run_range(&self, range: BlockRange) -> Result<ReplayReport, ReplayError> {
        info!(
            range = %range,
            blocks = range.len(),
            chunk_size = self.config.chunk_size,
            max_concurrency = self.config.max_concurrency,
            "Starting replay"
        );

        let mut records = Vec::new();
        for chunk in range.chunks(self.config.chunk_size) {
            let chunk_records = self
                .aggregator
                .aggregate(chunk)
                .instrument(spans::replay_chunk(chunk.start(), chunk.end()))
                .await?;
            info!(
                chunk = %chunk,
                records = chunk_records.len(),
                "Chunk replayed"
            );
            records.extend(chunk_records);
        }

        let report = ReplayReport::new(range, records);
        if report.unavailable_readings() > 0 {
            warn!(
                unavailable = report.unavailable_readings(),
                "Some point-in-time reads were unavailable; the node may not serve historical state for this range"
            );
        }
        info!(
            records = report.len(),
            missing_blocks = report.missing_blocks(),
            "Replay complete"
        );

        Ok(report)
    }
}

/// Range-wide sums
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayTotals {
    pub volume: MetricAmount,
    /// Sum of available liquidity readings
    pub liquidity: MetricAmount,
}

/// Ordered records for a replayed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    range: BlockRange,
    records: Vec<BlockRecord>,
}

impl ReplayReport {
    pub fn new(range: BlockRange, records: Vec<BlockRecord>) -> Self {
        Self { range, records }
    }

    pub fn range(&self) -> BlockRange {
        self.range
    }

    /// One record per block, `records()[i]` is block `range().start() + i`
    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<BlockRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn totals(&self) -> ReplayTotals {
        ReplayTotals {
            volume: self.records.iter().map(|r| &r.volume).sum(),
            liquidity: self.records.iter().map(|r| r.liquidity.amount()).sum(),
        }
    }

    pub fn missing_blocks(&self) -> usize {
        self.records.iter().filter(|r| r.is_missing()).count()
    }

    /// Point-in-time readings that came back unavailable, across both metrics
    pub fn unavailable_readings(&self) -> usize {
        self.records
            .iter()
            .map(|r| usize::from(r.liquidity.is_unavailable()) + usize::from(r.price.is_unavailable()))
            .sum()
    }

    pub fn to_display(&self, decimals: u8) -> Vec<BlockRecordDisplay> {
        self.records.iter().map(|r| r.to_display(decimals)).collect()
    }
}
