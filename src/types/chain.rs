// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network-agnostic views of the chain data the replay consumes.
//!
//! Sources convert whatever their transport returns into these handles so the
//! decode/aggregate code never depends on a particular alloy network type.

use alloy_primitives::{BlockHash, BlockNumber, Bytes, TxHash, B256};
use serde::{Deserialize, Serialize};

/// A block as seen by the replay: header fields plus transaction hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHandle {
    pub number: BlockNumber,
    /// Unix seconds
    pub timestamp: u64,
    pub hash: BlockHash,
    /// In block order
    pub transaction_hashes: Vec<TxHash>,
}

impl BlockHandle {
    pub fn transaction_count(&self) -> usize {
        self.transaction_hashes.len()
    }
}

/// A transaction's hash and calldata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle {
    pub hash: TxHash,
    pub input: Bytes,
}

/// A receipt reduced to its logs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReceiptHandle {
    pub transaction_hash: TxHash,
    /// In emission order
    pub logs: Vec<LogEntry>,
}

/// Raw, undecoded log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogEntry {
    pub topics: Vec<B256>,
    pub data: Bytes,
}

impl LogEntry {
    pub fn new(topics: Vec<B256>, data: impl Into<Bytes>) -> Self {
        Self {
            topics,
            data: data.into(),
        }
    }
}

impl From<&alloy_primitives::LogData> for LogEntry {
    fn from(log: &alloy_primitives::LogData) -> Self {
        Self {
            topics: log.topics().to_vec(),
            data: log.data.clone(),
        }
    }
}
