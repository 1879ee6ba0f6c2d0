// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for chain-data source operations.
//!
//! "Not found" is never an error here: sources report absent blocks,
//! transactions and receipts as `Ok(None)`. These variants describe the
//! source itself failing.

use alloy_primitives::{BlockNumber, TxHash};

/// Errors that can occur while talking to a chain-data source.
///
/// Every variant except [`RpcError::StateUnavailable`] is a transport-level
/// failure and aborts the replay invocation that observed it.
///
/// # Examples
///
/// ```rust
/// use tradescan::RpcError;
///
/// let error = RpcError::StateUnavailable {
///     operation: "calculatePrice() at 0xabc".to_string(),
///     message: "missing trie node".to_string(),
/// };
/// assert!(error.is_state_unavailable());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Failed to fetch the current chain head.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The `eth_getBlockByNumber` request itself failed.
    ///
    /// This is different from a missing block, which is reported as `Ok(None)`.
    #[error("Failed to fetch block {block_number}")]
    GetBlockFailed {
        block_number: BlockNumber,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The `eth_getTransactionByHash` request itself failed.
    #[error("Failed to fetch transaction {tx_hash}")]
    GetTransactionFailed {
        tx_hash: TxHash,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The `eth_getTransactionReceipt` request itself failed.
    #[error("Failed to fetch receipt for transaction {tx_hash}")]
    GetReceiptFailed {
        tx_hash: TxHash,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An `eth_call` failed at the transport level (connection loss, timeout).
    #[error("Contract call failed during {operation}")]
    CallFailed {
        /// Description of the call (method and block)
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node answered an `eth_call` with an error response.
    ///
    /// Nodes outside their state-retention window answer historical calls
    /// with "missing trie node" or "header not found"; reverted calls land
    /// here too. Point-in-time readers turn this into an unavailable reading
    /// instead of aborting.
    #[error("State unavailable for {operation}: {message}")]
    StateUnavailable { operation: String, message: String },

    /// The RPC endpoint URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockFailed` error from any error type.
    pub fn get_block_failed(
        block_number: BlockNumber,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetBlockFailed {
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetTransactionFailed` error from any error type.
    pub fn get_transaction_failed(
        tx_hash: TxHash,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetTransactionFailed {
            tx_hash,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetReceiptFailed` error from any error type.
    pub fn get_receipt_failed(
        tx_hash: TxHash,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetReceiptFailed {
            tx_hash,
            source: Box::new(source),
        }
    }

    /// Helper to create a `CallFailed` error from any error type.
    pub fn call_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::CallFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `StateUnavailable` error.
    pub fn state_unavailable(operation: impl Into<String>, message: impl Into<String>) -> Self {
        RpcError::StateUnavailable {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Whether the node served an error response rather than failing to respond.
    #[must_use]
    pub fn is_state_unavailable(&self) -> bool {
        matches!(self, RpcError::StateUnavailable { .. })
    }
}
