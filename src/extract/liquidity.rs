// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Liquidity reconstructed from `addLiquidity` receipts

use alloy_primitives::U256;

use super::TransactionExtractor;
use crate::abi::SRG20::{SRG20Calls, SRG20Events};
use crate::decode::{DecodedCall, DecodedLog};
use crate::types::record::Metric;

/// Sums `Transfer.value` across the receipts of `addLiquidity` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityLogExtractor;

impl LiquidityLogExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TransactionExtractor for LiquidityLogExtractor {
    fn metric(&self) -> Metric {
        Metric::Liquidity
    }

    fn accepts(&self, call: &DecodedCall) -> bool {
        matches!(call, SRG20Calls::addLiquidity(_))
    }

    fn amount_from_log(&self, log: &DecodedLog) -> Option<U256> {
        match log {
            SRG20Events::Transfer(transfer) => Some(transfer.value),
            _ => None,
        }
    }
}
