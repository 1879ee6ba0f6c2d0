// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block-range replay
//!
//! [`HistoricalReplay`] resolves the range and walks it in chunks;
//! [`BlockAggregator`] turns each chunk into ordered [`BlockRecord`](crate::BlockRecord)s.

mod aggregator;
mod pipeline;

pub use aggregator::{
    extractors_for, fold_block_records, BlockAggregator, PointReadings, TransactionContribution,
};
pub use pipeline::{HistoricalReplay, ReplayReport, ReplayTotals};
