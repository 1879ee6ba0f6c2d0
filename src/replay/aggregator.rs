// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Staged fan-out over a block range, folded into one record per block
//!
//! Each stage issues its requests through `buffered(max_concurrency)`, which
//! keeps at most that many in flight and yields results in input order. Every
//! stage therefore produces a vector index-aligned with its input, and the
//! next stage starts only once the previous one has fully resolved.
//!
//! 1. blocks, aligned with the range
//! 2. transactions, one flat list across all blocks in block order
//! 3. receipts and extraction, aligned with the transaction list
//! 4. point-in-time reads, aligned with the range
//!
//! [`fold_block_records`] then walks the block list with a cursor into the
//! flat transaction results, using each block's transaction count to find its
//! slice.

use std::sync::Arc;

use alloy_primitives::{Address, TxHash};
use futures::{stream, StreamExt, TryStreamExt};
use tracing::{debug, trace, Instrument};

use crate::config::ReplayConfig;
use crate::decode::{decode_method, method_name};
use crate::errors::{ReplayError, RpcError};
use crate::extract::{LiquidityLogExtractor, TransactionExtractor, VolumeExtractor};
use crate::reader::{PointInTimeReader, PointMetric};
use crate::source::ChainSource;
use crate::tracing::spans;
use crate::types::amount::MetricAmount;
use crate::types::chain::{BlockHandle, TransactionHandle};
use crate::types::range::BlockRange;
use crate::types::record::{BlockRecord, BlockStatus, Metric, MetricReading};

/// What one transaction adds to its block's totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionContribution {
    pub volume: MetricAmount,
    /// Log-replay liquidity only
    pub liquidity: MetricAmount,
}

impl TransactionContribution {
    pub fn new(volume: impl Into<MetricAmount>, liquidity: impl Into<MetricAmount>) -> Self {
        Self {
            volume: volume.into(),
            liquidity: liquidity.into(),
        }
    }

    fn add(&mut self, metric: Metric, amount: MetricAmount) {
        match metric {
            Metric::Volume => self.volume += amount,
            Metric::Liquidity => self.liquidity += amount,
            Metric::Price => {}
        }
    }
}

/// Point-in-time readings for one block; `None` when not selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointReadings {
    pub liquidity: Option<MetricReading>,
    pub price: Option<MetricReading>,
}

impl PointReadings {
    fn set(&mut self, metric: PointMetric, reading: MetricReading) {
        match metric {
            PointMetric::Liquidity => self.liquidity = Some(reading),
            PointMetric::Price => self.price = Some(reading),
        }
    }
}

/// Builds the extractors a metric selection needs.
pub fn extractors_for(config: &ReplayConfig) -> Vec<Box<dyn TransactionExtractor>> {
    let mut extractors: Vec<Box<dyn TransactionExtractor>> = Vec::with_capacity(2);
    if config.metrics.volume {
        extractors.push(Box::new(VolumeExtractor::new(config.volume_denomination)));
    }
    if config.metrics.log_liquidity() {
        extractors.push(Box::new(LiquidityLogExtractor::new()));
    }
    extractors
}

/// Aggregates chain data for a block range into ordered [`BlockRecord`]s.
pub struct BlockAggregator<S> {
    source: Arc<S>,
    reader: PointInTimeReader<S>,
    extractors: Vec<Box<dyn TransactionExtractor>>,
    point_metrics: Vec<PointMetric>,
    /// Whether transactions and receipts are read at all
    needs_receipts: bool,
    max_concurrency: usize,
}

impl<S: ChainSource> BlockAggregator<S> {
    pub fn new(source: Arc<S>, contract: Address, config: &ReplayConfig) -> Self {
        Self {
            reader: PointInTimeReader::new(Arc::clone(&source), contract),
            source,
            extractors: extractors_for(config),
            point_metrics: config.metrics.point_metrics(),
            needs_receipts: config.metrics.needs_receipts(),
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    /// Produce one record per block in `range`, in range order.
    ///
    /// Absent blocks, transactions and receipts degrade to zero. Any
    /// transport failure aborts the whole range.
    pub async fn aggregate(&self, range: BlockRange) -> Result<Vec<BlockRecord>, ReplayError> {
        let blocks = self
            .fetch_blocks(range)
            .instrument(spans::fetch_blocks(range.start(), range.end()))
            .await?;

        let hashes: Vec<_> = blocks
            .iter()
            .flatten()
            .flat_map(|block| block.transaction_hashes.iter().copied())
            .collect();

        let transactions = if !self.needs_receipts {
            Vec::new()
        } else {
            stream::iter(hashes.iter().copied())
                .map(|hash| self.source.transaction(hash))
                .buffered(self.max_concurrency)
                .try_collect::<Vec<_>>()
                .instrument(spans::fetch_transactions(hashes.len()))
                .await?
        };

        let contributions: Vec<TransactionContribution> = stream::iter(hashes.iter().zip(&transactions))
            .map(|(hash, transaction)| self.extract_transaction(*hash, transaction.as_ref()))
            .buffered(self.max_concurrency)
            .try_collect()
            .instrument(spans::extract_transactions(transactions.len()))
            .await?;

        let readings = if self.point_metrics.is_empty() {
            Vec::new()
        } else {
            stream::iter(blocks.iter())
                .map(|block| self.read_points(block.as_ref()))
                .buffered(self.max_concurrency)
                .try_collect::<Vec<_>>()
                .instrument(spans::read_point_metrics(blocks.len()))
                .await?
        };

        debug!(
            range = %range,
            blocks = blocks.iter().flatten().count(),
            transactions = transactions.len(),
            "Chunk data resolved"
        );

        Ok(fold_block_records(range, &blocks, &contributions, &readings))
    }

    async fn fetch_blocks(&self, range: BlockRange) -> Result<Vec<Option<BlockHandle>>, RpcError> {
        let blocks: Vec<Option<BlockHandle>> = stream::iter(range.blocks())
            .map(|number| self.source.block(number))
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        for (number, block) in range.blocks().zip(&blocks) {
            if block.is_none() {
                debug!(block_number = number, "Block not available from source");
            }
        }

        Ok(blocks)
    }

    /// Decode once, fetch the receipt only if some extractor wants it.
    async fn extract_transaction(
        &self,
        hash: TxHash,
        transaction: Option<&TransactionHandle>,
    ) -> Result<TransactionContribution, RpcError> {
        let mut contribution = TransactionContribution::default();

        let Some(transaction) = transaction else {
            debug!(tx_hash = %hash, "Transaction not available from source, contributing zero");
            return Ok(contribution);
        };
        let span = spans::extract_transaction(hash);

        let Some(call) = decode_method(&transaction.input) else {
            return Ok(contribution);
        };
        let accepting: Vec<&dyn TransactionExtractor> = self
            .extractors
            .iter()
            .map(|e| e.as_ref())
            .filter(|e| e.accepts(&call))
            .collect();
        if accepting.is_empty() {
            return Ok(contribution);
        }

        let receipt = self
            .source
            .receipt(transaction.hash)
            .instrument(span.clone())
            .await?;

        let _guard = span.enter();
        let Some(receipt) = receipt else {
            debug!(
                tx_hash = %transaction.hash,
                "Receipt not available from source, contributing zero"
            );
            return Ok(contribution);
        };

        for extractor in accepting {
            contribution.add(extractor.metric(), extractor.extract_from_logs(&receipt.logs));
        }
        trace!(
            method = method_name(&call),
            volume = %contribution.volume,
            liquidity = %contribution.liquidity,
            "Extracted transaction"
        );

        Ok(contribution)
    }

    async fn read_points(&self, block: Option<&BlockHandle>) -> Result<PointReadings, RpcError> {
        let mut readings = PointReadings::default();
        // Missing blocks keep zero metrics
        let Some(block) = block else {
            return Ok(readings);
        };
        for metric in &self.point_metrics {
            let reading = self.reader.read_at_block(*metric, Some(block.hash)).await?;
            readings.set(*metric, reading);
        }
        Ok(readings)
    }
}

/// Fold stage results into one record per block slot.
///
/// `blocks` and `readings` are aligned with `range`; `readings` may be empty
/// when no point metric is selected. `contributions` holds one entry per
/// transaction of every resolved block, in block order; it may be empty when
/// no extractor is selected.
pub fn fold_block_records(
    range: BlockRange,
    blocks: &[Option<BlockHandle>],
    contributions: &[TransactionContribution],
    readings: &[PointReadings],
) -> Vec<BlockRecord> {
    let span = spans::fold_block_records(range.start(), range.end());
    let _guard = span.enter();

    let mut cursor = 0usize;
    range
        .blocks()
        .zip(blocks)
        .enumerate()
        .map(|(index, (number, block))| {
            let Some(block) = block else {
                return BlockRecord::missing(number);
            };

            let count = block.transaction_count();
            let group = contributions
                .get(cursor..cursor + count)
                .unwrap_or_default();
            cursor += count;

            let volume: MetricAmount = group.iter().map(|c| &c.volume).sum();
            let log_liquidity: MetricAmount = group.iter().map(|c| &c.liquidity).sum();
            let point = readings.get(index).cloned().unwrap_or_default();

            BlockRecord {
                block_number: number,
                status: BlockStatus::Resolved,
                timestamp: block.timestamp,
                transaction_count: count,
                volume,
                liquidity: point
                    .liquidity
                    .unwrap_or_else(|| MetricReading::value(log_liquidity)),
                price: point.price.unwrap_or_default(),
            }
        })
        .collect()
}
