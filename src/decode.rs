// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Calldata and log decoding against the token interface.
//!
//! Most transactions in a block and most logs in a receipt belong to other
//! contracts, so failing to decode is the common case. Both functions map any
//! decode error to `None`.

use alloy_primitives::B256;
use alloy_sol_types::{SolEventInterface, SolInterface};

use crate::abi::SRG20::{SRG20Calls, SRG20Events};
use crate::types::chain::LogEntry;

/// A decoded call to the token contract.
pub type DecodedCall = SRG20Calls;

/// A decoded event emitted by the token contract.
pub type DecodedLog = SRG20Events;

/// Decode transaction calldata into a typed method call.
///
/// Returns `None` when the selector is unknown or the arguments don't match
/// the method's layout.
pub fn decode_method(input: &[u8]) -> Option<DecodedCall> {
    SRG20Calls::abi_decode(input).ok()
}

/// Decode a raw log into a typed event.
///
/// Returns `None` when the first topic is not a known event signature or the
/// indexed/data layout doesn't match.
pub fn decode_log(topics: &[B256], data: &[u8]) -> Option<DecodedLog> {
    SRG20Events::decode_raw_log(topics, data).ok()
}

/// Convenience wrapper over [`decode_log`] for a [`LogEntry`].
pub fn decode_log_entry(log: &LogEntry) -> Option<DecodedLog> {
    decode_log(&log.topics, &log.data)
}

/// Short method name for tracing, e.g. `"_buy"`.
pub fn method_name(call: &DecodedCall) -> &'static str {
    match call {
        SRG20Calls::_buy(_) => "_buy",
        SRG20Calls::_sell(_) => "_sell",
        SRG20Calls::addLiquidity(_) => "addLiquidity",
        SRG20Calls::calculatePrice(_) => "calculatePrice",
        SRG20Calls::getLiquidity(_) => "getLiquidity",
        SRG20Calls::getMarketCap(_) => "getMarketCap",
        SRG20Calls::totalSupply(_) => "totalSupply",
        SRG20Calls::decimals(_) => "decimals",
        SRG20Calls::balanceOf(_) => "balanceOf",
        SRG20Calls::transfer(_) => "transfer",
        SRG20Calls::transferFrom(_) => "transferFrom",
        SRG20Calls::approve(_) => "approve",
    }
}
