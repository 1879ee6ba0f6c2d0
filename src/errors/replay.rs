// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for block-range replay.

use alloy_primitives::BlockNumber;

use super::RpcError;

/// Errors that abort a replay invocation.
///
/// Missing blocks, transactions and receipts never appear here; they degrade
/// to zero-valued contributions. Only invalid input and transport failures
/// reach the caller, and when they do no partial output is produced.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The requested block range is empty or inverted.
    #[error("Invalid block range: start {start} is after end {end}")]
    InvalidRange {
        start: BlockNumber,
        end: BlockNumber,
    },

    /// No metric was selected, so there is nothing to replay.
    #[error("No metrics selected for replay")]
    EmptySelection,

    /// The chain-data source failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl ReplayError {
    /// Create an `InvalidRange` error.
    pub fn invalid_range(start: BlockNumber, end: BlockNumber) -> Self {
        ReplayError::InvalidRange { start, end }
    }
}
