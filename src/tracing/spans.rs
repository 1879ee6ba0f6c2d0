// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for replay operations.
//!
//! Each instrumented operation has a span function here rather than an
//! `#[instrument]` attribute on the operation itself. Async operations attach
//! the span with [`tracing::Instrument`]; synchronous ones enter it:
//!
//! ```rust,ignore
//! let span = spans::fold_block_records(range.start(), range.end());
//! let _guard = span.enter();
//! ```

use alloy_primitives::{Address, BlockHash, BlockNumber, TxHash};
use tracing::{Level, Span};

use crate::reader::PointMetric;

/// Create span for a full replay invocation.
///
/// Parent: None (root span for this operation)
/// Children: replay_chunk spans
#[inline]
pub(crate) fn replay_run(contract: Address, start: BlockNumber, end: BlockNumber) -> Span {
    tracing::span!(
        Level::INFO,
        "tradescan.replay_run",
        contract = %contract,
        start_block = start,
        end_block = end,
    )
}

/// Create span for one chunk of a replay.
///
/// Parent: replay_run
/// Children: fetch_blocks, fetch_transactions, extract_transactions, read_point_metrics
#[inline]
pub(crate) fn replay_chunk(start: BlockNumber, end: BlockNumber) -> Span {
    tracing::debug_span!("tradescan.replay_chunk", start_block = start, end_block = end)
}

#[inline]
pub(crate) fn fetch_blocks(start: BlockNumber, end: BlockNumber) -> Span {
    tracing::debug_span!("tradescan.fetch_blocks", start_block = start, end_block = end)
}

#[inline]
pub(crate) fn fetch_transactions(transaction_count: usize) -> Span {
    tracing::debug_span!(
        "tradescan.fetch_transactions",
        transaction_count = transaction_count,
    )
}

/// Create span for receipt fetch and extraction across a chunk.
///
/// Parent: replay_chunk
/// Children: extract_transaction spans (one per transaction)
#[inline]
pub(crate) fn extract_transactions(transaction_count: usize) -> Span {
    tracing::debug_span!(
        "tradescan.extract_transactions",
        transaction_count = transaction_count,
    )
}

#[inline]
pub(crate) fn extract_transaction(tx_hash: TxHash) -> Span {
    tracing::trace_span!("tradescan.extract_transaction", tx_hash = %tx_hash)
}

#[inline]
pub(crate) fn read_point_metrics(block_count: usize) -> Span {
    tracing::debug_span!("tradescan.read_point_metrics", block_count = block_count)
}

/// Create span for one point-in-time read.
///
/// Parent: read_point_metrics
/// Children: contract_call
#[inline]
pub(crate) fn read_at_block(metric: PointMetric, block_hash: Option<BlockHash>) -> Span {
    tracing::debug_span!(
        "tradescan.read_at_block",
        metric = %metric,
        block_hash = ?block_hash,
    )
}

#[inline]
pub(crate) fn contract_call(contract: Address, at: BlockHash) -> Span {
    tracing::trace_span!("tradescan.contract_call", contract = %contract, block_hash = %at)
}

#[inline]
pub(crate) fn fold_block_records(start: BlockNumber, end: BlockNumber) -> Span {
    tracing::trace_span!(
        "tradescan.fold_block_records",
        start_block = start,
        end_block = end,
    )
}
