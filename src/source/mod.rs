// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain-data sources
//!
//! The replay reads everything it needs through [`ChainSource`]. Absent
//! blocks, transactions and receipts are `Ok(None)`; an `Err` always means the
//! source itself failed and the invocation should stop.
//!
//! [`RpcChainSource`] implements the trait over any alloy `Provider<N>`. Tests
//! substitute an in-memory implementation.

mod rpc;

pub use rpc::{AnyNetworkLogAdapter, EthereumLogAdapter, ReceiptLogAdapter, RpcChainSource};

use std::sync::Arc;

use alloy_primitives::{Address, BlockHash, BlockNumber, Bytes, TxHash};
use async_trait::async_trait;

use crate::errors::RpcError;
use crate::types::chain::{BlockHandle, ReceiptHandle, TransactionHandle};

/// Read access to historical chain data.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Current chain head
    async fn block_number(&self) -> Result<BlockNumber, RpcError>;

    /// Block header and transaction hashes at `number`
    async fn block(&self, number: BlockNumber) -> Result<Option<BlockHandle>, RpcError>;

    async fn transaction(&self, hash: TxHash) -> Result<Option<TransactionHandle>, RpcError>;

    async fn receipt(&self, hash: TxHash) -> Result<Option<ReceiptHandle>, RpcError>;

    /// Execute a read-only call against `contract` in the state of block `at`.
    ///
    /// Responses meaning the state cannot be served (pruned state, revert) are
    /// reported as [`RpcError::StateUnavailable`]. Rate limiting, internal node
    /// errors and transport failures are [`RpcError::CallFailed`].
    async fn call(
        &self,
        contract: Address,
        calldata: Bytes,
        at: BlockHash,
    ) -> Result<Bytes, RpcError>;
}

#[async_trait]
impl<S: ChainSource + ?Sized> ChainSource for Arc<S> {
    async fn block_number(&self) -> Result<BlockNumber, RpcError> {
        (**self).block_number().await
    }

    async fn block(&self, number: BlockNumber) -> Result<Option<BlockHandle>, RpcError> {
        (**self).block(number).await
    }

    async fn transaction(&self, hash: TxHash) -> Result<Option<TransactionHandle>, RpcError> {
        (**self).transaction(hash).await
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<ReceiptHandle>, RpcError> {
        (**self).receipt(hash).await
    }

    async fn call(
        &self,
        contract: Address,
        calldata: Bytes,
        at: BlockHash,
    ) -> Result<Bytes, RpcError> {
        (**self).call(contract, calldata, at).await
    }
}
