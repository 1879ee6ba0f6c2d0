// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-transaction metric extraction
//!
//! An extractor decides from a transaction's decoded method whether the
//! transaction contributes to its metric, then sums one numeric field across
//! the matching events in the receipt.
//!
//! # Architecture
//!
//! 1. The aggregator decodes the method once per transaction
//! 2. If any selected extractor [`accepts`](TransactionExtractor::accepts) it,
//!    the receipt is fetched
//! 3. Each extractor runs [`extract_from_logs`](TransactionExtractor::extract_from_logs)
//!    over the receipt, which calls
//!    [`amount_from_log`](TransactionExtractor::amount_from_log) per decoded log
//!
//! Implementations only provide the gate and the per-log field; the summing
//! and the zero-on-missing handling live in the default methods.

mod liquidity;
mod volume;

pub use liquidity::LiquidityLogExtractor;
pub use volume::{VolumeDenomination, VolumeExtractor};

use alloy_primitives::U256;

use crate::decode::{decode_log_entry, decode_method, DecodedCall, DecodedLog};
use crate::types::amount::MetricAmount;
use crate::types::chain::{LogEntry, ReceiptHandle, TransactionHandle};
use crate::types::record::Metric;

/// Classifies transactions and sums one event field for a single metric.
///
/// Synchronous: by the time an extractor runs, all chain data it needs has
/// already been fetched.
pub trait TransactionExtractor: Send + Sync {
    /// Metric this extractor contributes to
    fn metric(&self) -> Metric;

    /// Whether a transaction calling `call` counts toward the metric
    fn accepts(&self, call: &DecodedCall) -> bool;

    /// Field to sum from a decoded log, or `None` if the log doesn't count
    fn amount_from_log(&self, log: &DecodedLog) -> Option<U256>;

    /// Sum the matching field over every log that decodes and counts.
    ///
    /// Logs from other contracts or with unknown signatures contribute zero.
    fn extract_from_logs(&self, logs: &[LogEntry]) -> MetricAmount {
        logs.iter()
            .filter_map(decode_log_entry)
            .filter_map(|log| self.amount_from_log(&log))
            .map(MetricAmount::from_u256)
            .sum()
    }

    /// Full per-transaction extraction.
    ///
    /// Returns zero when the transaction or receipt is unavailable, or when
    /// the method doesn't pass [`accepts`](Self::accepts). Logs are never
    /// inspected for a rejected method.
    fn extract(
        &self,
        transaction: Option<&TransactionHandle>,
        receipt: Option<&ReceiptHandle>,
    ) -> MetricAmount {
        let Some(call) = transaction.and_then(|tx| decode_method(&tx.input)) else {
            return MetricAmount::zero();
        };
        if !self.accepts(&call) {
            return MetricAmount::zero();
        }
        match receipt {
            Some(receipt) => self.extract_from_logs(&receipt.logs),
            None => MetricAmount::zero(),
        }
    }
}
