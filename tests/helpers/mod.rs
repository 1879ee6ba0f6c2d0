// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for tradescan integration tests
//!
//! Provides an in-memory [`ChainSource`] and builders for ABI-encoded
//! transactions and logs, so replays can run without a node.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use alloy_primitives::{address, Address, BlockHash, BlockNumber, Bytes, TxHash, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use tradescan::abi::SRG20;
use tradescan::source::ChainSource;
use tradescan::{BlockHandle, LogEntry, PointMetric, ReceiptHandle, RpcError, TransactionHandle};

pub const TOKEN: Address = address!("4343434343434343434343434343434343434343");
pub const BASE_TIMESTAMP: u64 = 1_700_000_000;

pub fn tx_hash(id: u64) -> TxHash {
    B256::from(U256::from(id))
}

pub fn block_hash(number: BlockNumber) -> BlockHash {
    B256::from(U256::from(number) | (U256::from(1u64) << 255))
}

// ---------------------------------------------------------------------------
// ABI builders
// ---------------------------------------------------------------------------

pub fn buy_input() -> Bytes {
    SRG20::_buyCall {
        minTokenOut: U256::ZERO,
        deadline: U256::from(BASE_TIMESTAMP),
    }
    .abi_encode()
    .into()
}

pub fn sell_input(amount: u64) -> Bytes {
    SRG20::_sellCall {
        tokenAmount: U256::from(amount),
        deadline: U256::from(BASE_TIMESTAMP),
        minBNBOut: U256::ZERO,
    }
    .abi_encode()
    .into()
}

pub fn add_liquidity_input(amount: u64) -> Bytes {
    SRG20::addLiquidityCall {
        amount: U256::from(amount),
    }
    .abi_encode()
    .into()
}

pub fn approve_input() -> Bytes {
    SRG20::approveCall {
        spender: Address::repeat_byte(7),
        amount: U256::MAX,
    }
    .abi_encode()
    .into()
}

pub fn bought_log(tokens: U256) -> LogEntry {
    LogEntry::from(
        &SRG20::Bought {
            from: Address::repeat_byte(1),
            to: Address::repeat_byte(2),
            tokens,
            beans: tokens / U256::from(10u64),
            dollarBuy: tokens / U256::from(100u64),
        }
        .encode_log_data(),
    )
}

pub fn sold_log(tokens: U256) -> LogEntry {
    LogEntry::from(
        &SRG20::Sold {
            from: Address::repeat_byte(2),
            to: Address::repeat_byte(1),
            tokens,
            beans: tokens / U256::from(10u64),
            dollarSell: tokens / U256::from(100u64),
        }
        .encode_log_data(),
    )
}

pub fn transfer_log(value: U256) -> LogEntry {
    LogEntry::from(
        &SRG20::Transfer {
            from: Address::repeat_byte(1),
            to: TOKEN,
            value,
        }
        .encode_log_data(),
    )
}

/// A log from some other contract's event
pub fn foreign_log() -> LogEntry {
    LogEntry::new(
        vec![B256::repeat_byte(0xee), B256::ZERO],
        U256::from(999u64).to_be_bytes::<32>().to_vec(),
    )
}

// ---------------------------------------------------------------------------
// Mock transactions
// ---------------------------------------------------------------------------

/// A transaction as the mock will serve it; `None` fields are absent.
#[derive(Debug, Clone)]
pub struct MockTx {
    pub hash: TxHash,
    pub input: Option<Bytes>,
    pub logs: Option<Vec<LogEntry>>,
}

impl MockTx {
    pub fn new(id: u64, input: Bytes, logs: Vec<LogEntry>) -> Self {
        Self {
            hash: tx_hash(id),
            input: Some(input),
            logs: Some(logs),
        }
    }

    pub fn buy(id: u64, bought: &[u64]) -> Self {
        let logs = bought.iter().map(|t| bought_log(U256::from(*t))).collect();
        Self::new(id, buy_input(), logs)
    }

    pub fn sell(id: u64, sold: &[u64]) -> Self {
        let logs = sold.iter().map(|t| sold_log(U256::from(*t))).collect();
        Self::new(id, sell_input(sold.iter().sum()), logs)
    }

    pub fn add_liquidity(id: u64, transfers: &[u64]) -> Self {
        let logs = transfers
            .iter()
            .map(|v| transfer_log(U256::from(*v)))
            .collect();
        Self::new(id, add_liquidity_input(transfers.iter().sum()), logs)
    }

    /// Calldata matching no method, with a `Bought` log that must be ignored
    pub fn unrelated(id: u64) -> Self {
        Self::new(
            id,
            Bytes::from_static(&[0xa9, 0x05, 0x9c, 0xbb, 0x00]),
            vec![bought_log(U256::from(1_000u64))],
        )
    }

    pub fn without_transaction(mut self) -> Self {
        self.input = None;
        self
    }

    pub fn without_receipt(mut self) -> Self {
        self.logs = None;
        self
    }
}

// ---------------------------------------------------------------------------
// Mock source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum CallOutcome {
    Value(U256),
    Unavailable(String),
    Raw(Bytes),
    TransportFailure,
}

/// In-memory chain source with failure injection and per-item latency.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockChainSource::new()
///     .with_block(10, vec![MockTx::buy(1, &[100])])
///     .with_price(10, U256::from(5));
/// ```
#[derive(Default)]
pub struct MockChainSource {
    head: BlockNumber,
    blocks: HashMap<BlockNumber, BlockHandle>,
    transactions: HashMap<TxHash, TransactionHandle>,
    receipts: HashMap<TxHash, ReceiptHandle>,
    calls: HashMap<(BlockHash, PointMetric), CallOutcome>,
    failing_blocks: HashSet<BlockNumber>,
    failing_transactions: HashSet<TxHash>,
    failing_receipts: HashSet<TxHash>,
    latency: HashMap<TxHash, Duration>,
    transaction_requests: AtomicUsize,
    receipt_requests: AtomicUsize,
    call_requests: AtomicUsize,
}

impl MockChainSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_head(mut self, head: BlockNumber) -> Self {
        self.head = head;
        self
    }

    pub fn with_block(mut self, number: BlockNumber, txs: Vec<MockTx>) -> Self {
        let hashes = txs.iter().map(|tx| tx.hash).collect();
        for tx in txs {
            if let Some(input) = tx.input {
                self.transactions.insert(
                    tx.hash,
                    TransactionHandle {
                        hash: tx.hash,
                        input,
                    },
                );
            }
            if let Some(logs) = tx.logs {
                self.receipts.insert(
                    tx.hash,
                    ReceiptHandle {
                        transaction_hash: tx.hash,
                        logs,
                    },
                );
            }
        }
        self.blocks.insert(
            number,
            BlockHandle {
                number,
                timestamp: BASE_TIMESTAMP + number,
                hash: block_hash(number),
                transaction_hashes: hashes,
            },
        );
        self.head = self.head.max(number);
        self
    }

    pub fn with_empty_blocks(mut self, numbers: impl IntoIterator<Item = BlockNumber>) -> Self {
        for number in numbers {
            self = self.with_block(number, Vec::new());
        }
        self
    }

    pub fn with_call(mut self, number: BlockNumber, metric: PointMetric, outcome: CallOutcome) -> Self {
        self.calls.insert((block_hash(number), metric), outcome);
        self
    }

    pub fn with_price(self, number: BlockNumber, price: U256) -> Self {
        self.with_call(number, PointMetric::Price, CallOutcome::Value(price))
    }

    pub fn with_liquidity(self, number: BlockNumber, liquidity: U256) -> Self {
        self.with_call(number, PointMetric::Liquidity, CallOutcome::Value(liquidity))
    }

    pub fn failing_block(mut self, number: BlockNumber) -> Self {
        self.failing_blocks.insert(number);
        self
    }

    pub fn failing_transaction(mut self, hash: TxHash) -> Self {
        self.failing_transactions.insert(hash);
        self
    }

    pub fn failing_receipt(mut self, hash: TxHash) -> Self {
        self.failing_receipts.insert(hash);
        self
    }

    /// Delay transaction and receipt responses for `hash`
    pub fn with_latency(mut self, hash: TxHash, latency: Duration) -> Self {
        self.latency.insert(hash, latency);
        self
    }

    pub fn transaction_requests(&self) -> usize {
        self.transaction_requests.load(Ordering::SeqCst)
    }

    pub fn receipt_requests(&self) -> usize {
        self.receipt_requests.load(Ordering::SeqCst)
    }

    pub fn call_requests(&self) -> usize {
        self.call_requests.load(Ordering::SeqCst)
    }

    async fn delay(&self, hash: TxHash) {
        if let Some(latency) = self.latency.get(&hash) {
            tokio::time::sleep(*latency).await;
        }
    }
}

fn io_error(message: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::ConnectionReset, message.to_string())
}

#[async_trait]
impl ChainSource for MockChainSource {
    async fn block_number(&self) -> Result<BlockNumber, RpcError> {
        Ok(self.head)
    }

    async fn block(&self, number: BlockNumber) -> Result<Option<BlockHandle>, RpcError> {
        if self.failing_blocks.contains(&number) {
            return Err(RpcError::get_block_failed(number, io_error("block")));
        }
        Ok(self.blocks.get(&number).cloned())
    }

    async fn transaction(&self, hash: TxHash) -> Result<Option<TransactionHandle>, RpcError> {
        self.transaction_requests.fetch_add(1, Ordering::SeqCst);
        self.delay(hash).await;
        if self.failing_transactions.contains(&hash) {
            return Err(RpcError::get_transaction_failed(hash, io_error("transaction")));
        }
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<ReceiptHandle>, RpcError> {
        self.receipt_requests.fetch_add(1, Ordering::SeqCst);
        self.delay(hash).await;
        if self.failing_receipts.contains(&hash) {
            return Err(RpcError::get_receipt_failed(hash, io_error("receipt")));
        }
        Ok(self.receipts.get(&hash).cloned())
    }

    async fn call(
        &self,
        _contract: Address,
        calldata: Bytes,
        at: BlockHash,
    ) -> Result<Bytes, RpcError> {
        self.call_requests.fetch_add(1, Ordering::SeqCst);

        let metric = if calldata[..] == SRG20::calculatePriceCall::SELECTOR[..] {
            PointMetric::Price
        } else if calldata[..] == SRG20::getLiquidityCall::SELECTOR[..] {
            PointMetric::Liquidity
        } else {
            return Err(RpcError::state_unavailable("eth_call", "execution reverted"));
        };

        match self.calls.get(&(at, metric)) {
            None => Ok(U256::ZERO.to_be_bytes::<32>().to_vec().into()),
            Some(CallOutcome::Value(v)) => Ok(v.to_be_bytes::<32>().to_vec().into()),
            Some(CallOutcome::Raw(bytes)) => Ok(bytes.clone()),
            Some(CallOutcome::Unavailable(message)) => {
                Err(RpcError::state_unavailable("eth_call", message.clone()))
            }
            Some(CallOutcome::TransportFailure) => {
                Err(RpcError::call_failed("eth_call", io_error("call")))
            }
        }
    }
}
