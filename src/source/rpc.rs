// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`ChainSource`] over an alloy provider
//!
//! Block, transaction and receipt responses differ per network, so the source
//! is generic over `N: Network`. Header and calldata access goes through
//! alloy's response traits; receipt logs go through a [`ReceiptLogAdapter`]
//! because their location in the receipt type varies.
//!
//! # Example
//!
//! ```rust,ignore
//! use tradescan::provider::{create_http_provider, ProviderConfig};
//! use tradescan::source::{AnyNetworkLogAdapter, RpcChainSource};
//!
//! let provider = create_http_provider(ProviderConfig::new("https://bsc-dataseed.bnbchain.org"))?;
//! let source = RpcChainSource::new(provider, AnyNetworkLogAdapter);
//! ```

use std::future::IntoFuture;
use std::marker::PhantomData;

use alloy_consensus::BlockHeader;
use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_network::primitives::HeaderResponse;
use alloy_network::{AnyNetwork, BlockResponse, Ethereum, Network, TransactionBuilder};
use alloy_primitives::{Address, BlockHash, BlockNumber, Bytes, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionTrait;
use alloy_transport::TransportError;
use async_trait::async_trait;
use tracing::Instrument;

use super::ChainSource;
use crate::errors::RpcError;
use crate::tracing::spans;
use crate::types::chain::{BlockHandle, LogEntry, ReceiptHandle, TransactionHandle};

/// Extracts raw logs from a network-specific receipt.
pub trait ReceiptLogAdapter<N: Network>: Send + Sync {
    /// Logs in emission order
    fn logs(&self, receipt: &N::ReceiptResponse) -> Vec<LogEntry>;
}

/// Receipt adapter for the `Ethereum` network type
#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumLogAdapter;

impl ReceiptLogAdapter<Ethereum> for EthereumLogAdapter {
    fn logs(&self, receipt: &<Ethereum as Network>::ReceiptResponse) -> Vec<LogEntry> {
        receipt
            .inner
            .logs()
            .iter()
            .map(|log| LogEntry::from(log.data()))
            .collect()
    }
}

/// Receipt adapter for `AnyNetwork`, used for chains selected at runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyNetworkLogAdapter;

impl ReceiptLogAdapter<AnyNetwork> for AnyNetworkLogAdapter {
    fn logs(&self, receipt: &<AnyNetwork as Network>::ReceiptResponse) -> Vec<LogEntry> {
        receipt
            .inner
            .inner
            .logs()
            .iter()
            .map(|log| LogEntry::from(log.data()))
            .collect()
    }
}

/// Chain source backed by an alloy `Provider<N>`.
pub struct RpcChainSource<N, P, A> {
    provider: P,
    adapter: A,
    network_marker: PhantomData<fn() -> N>,
}

impl<N, P, A> RpcChainSource<N, P, A>
where
    N: Network,
    P: Provider<N>,
    A: ReceiptLogAdapter<N>,
{
    pub fn new(provider: P, adapter: A) -> Self {
        Self {
            provider,
            adapter,
            network_marker: PhantomData,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<N, P, A> ChainSource for RpcChainSource<N, P, A>
where
    N: Network,
    N::TransactionResponse: TransactionTrait,
    P: Provider<N> + Send + Sync,
    A: ReceiptLogAdapter<N>,
{
    async fn block_number(&self) -> Result<BlockNumber, RpcError> {
        self.provider
            .get_block_number()
            .await
            .map_err(RpcError::get_block_number_failed)
    }

    async fn block(&self, number: BlockNumber) -> Result<Option<BlockHandle>, RpcError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .map_err(|e| RpcError::get_block_failed(number, e))?;

        Ok(block.map(|block| {
            let header = block.header();
            BlockHandle {
                number,
                timestamp: header.timestamp(),
                hash: header.hash(),
                transaction_hashes: block.transactions().hashes().collect(),
            }
        }))
    }

    async fn transaction(&self, hash: TxHash) -> Result<Option<TransactionHandle>, RpcError> {
        let transaction = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| RpcError::get_transaction_failed(hash, e))?;

        Ok(transaction.map(|tx| TransactionHandle {
            hash,
            input: tx.input().clone(),
        }))
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<ReceiptHandle>, RpcError> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| RpcError::get_receipt_failed(hash, e))?;

        Ok(receipt.map(|receipt| ReceiptHandle {
            transaction_hash: hash,
            logs: self.adapter.logs(&receipt),
        }))
    }

    async fn call(
        &self,
        contract: Address,
        calldata: Bytes,
        at: BlockHash,
    ) -> Result<Bytes, RpcError> {
        let request = N::TransactionRequest::default()
            .with_to(contract)
            .with_input(calldata);

        self.provider
            .call(request)
            .block(BlockId::hash(at))
            .into_future()
            .instrument(spans::contract_call(contract, at))
            .await
            .map_err(|e| classify_call_error(contract, at, e))
    }
}

/// JSON-RPC error code nodes use for reverted execution
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Message fragments nodes return when a block's state cannot be served
const STATE_UNAVAILABLE_MARKERS: &[&str] = &[
    "execution reverted",
    "missing trie node",
    "header not found",
    "pruned",
    "historical state",
];

/// Whether a node error response means the call cannot be answered at this
/// block, as opposed to the node being throttled or failing.
fn is_state_unavailable_response(code: i64, message: &str) -> bool {
    if code == EXECUTION_REVERTED_CODE {
        return true;
    }
    let message = message.to_ascii_lowercase();
    STATE_UNAVAILABLE_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
        || (message.contains("state") && message.contains("not available"))
}

/// Split state-unavailable responses from every other failure.
///
/// Rate-limit and internal node errors are failures of the source and abort
/// the replay like transport errors do.
fn classify_call_error(contract: Address, at: BlockHash, error: TransportError) -> RpcError {
    let operation = format!("eth_call to {contract} at {at}");
    match error.as_error_resp() {
        Some(payload) if is_state_unavailable_response(payload.code, &payload.message) => {
            RpcError::state_unavailable(operation, payload.message.to_string())
        }
        _ => RpcError::call_failed(operation, error),
    }
}
