// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Point-in-time contract reads
//!
//! Price and liquidity can be read directly from the token contract's view
//! functions as of a historical block. Whether the node can answer depends on
//! its state retention: archive nodes serve any block, full nodes only a
//! recent window. Reads outside that window come back as
//! [`MetricReading::Unavailable`] rather than zero.

use std::sync::Arc;

use alloy_primitives::{Address, BlockHash, Bytes, U256};
use alloy_sol_types::SolCall;
use tracing::{warn, Instrument};

use crate::abi::SRG20;
use crate::errors::RpcError;
use crate::source::ChainSource;
use crate::tracing::spans;
use crate::types::amount::MetricAmount;
use crate::types::record::MetricReading;

/// A metric the contract exposes as a view function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointMetric {
    /// `calculatePrice()`
    Price,
    /// `getLiquidity()`
    Liquidity,
}

impl PointMetric {
    /// Solidity signature of the view function backing this metric
    pub fn signature(&self) -> &'static str {
        match self {
            PointMetric::Price => SRG20::calculatePriceCall::SIGNATURE,
            PointMetric::Liquidity => SRG20::getLiquidityCall::SIGNATURE,
        }
    }

    /// ABI-encoded calldata for the view function
    pub fn calldata(&self) -> Bytes {
        match self {
            PointMetric::Price => SRG20::calculatePriceCall {}.abi_encode().into(),
            PointMetric::Liquidity => SRG20::getLiquidityCall {}.abi_encode().into(),
        }
    }

    /// Decode the view function's return data
    pub fn decode_return(&self, data: &[u8]) -> Result<U256, alloy_sol_types::Error> {
        match self {
            PointMetric::Price => SRG20::calculatePriceCall::abi_decode_returns(data),
            PointMetric::Liquidity => SRG20::getLiquidityCall::abi_decode_returns(data),
        }
    }
}

impl std::fmt::Display for PointMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointMetric::Price => f.write_str("price"),
            PointMetric::Liquidity => f.write_str("liquidity"),
        }
    }
}

/// Reads contract view functions at a given block.
pub struct PointInTimeReader<S> {
    source: Arc<S>,
    contract: Address,
}

impl<S> Clone for PointInTimeReader<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            contract: self.contract,
        }
    }
}

impl<S: ChainSource> PointInTimeReader<S> {
    pub fn new(source: Arc<S>, contract: Address) -> Self {
        Self { source, contract }
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Read `metric` as of the block with hash `block`.
    ///
    /// * `None` block hash: `Value(0)`, no call is made
    /// * pruned state, revert or undecodable return data: `Unavailable`
    /// * transport failure or any other node error: `Err`
    pub async fn read_at_block(
        &self,
        metric: PointMetric,
        block: Option<BlockHash>,
    ) -> Result<MetricReading, RpcError> {
        let Some(block_hash) = block else {
            return Ok(MetricReading::zero());
        };

        self.read_at_hash(metric, block_hash)
            .instrument(spans::read_at_block(metric, block))
            .await
    }

    async fn read_at_hash(
        &self,
        metric: PointMetric,
        block_hash: BlockHash,
    ) -> Result<MetricReading, RpcError> {
        match self
            .source
            .call(self.contract, metric.calldata(), block_hash)
            .await
        {
            Ok(data) => match metric.decode_return(&data) {
                Ok(value) => Ok(MetricReading::value(MetricAmount::from_u256(value))),
                Err(e) => {
                    warn!(
                        %metric,
                        block_hash = %block_hash,
                        return_len = data.len(),
                        error = %e,
                        "Undecodable return data from point-in-time read"
                    );
                    Ok(MetricReading::unavailable(format!(
                        "undecodable {} return data: {e}",
                        metric.signature()
                    )))
                }
            },
            Err(RpcError::StateUnavailable { message, .. }) => {
                warn!(
                    %metric,
                    block_hash = %block_hash,
                    reason = %message,
                    "Historical state unavailable for point-in-time read"
                );
                Ok(MetricReading::unavailable(message))
            }
            Err(e) => Err(e),
        }
    }
}
