// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Defaults and well-known addresses

use alloy_primitives::{address, Address, BlockNumber};

/// SRG20 token on BNB Smart Chain, the default replay target
///
/// Contract: 0x43C3EBaFdF32909aC60E80ee34aE46637E743d65
pub const DEFAULT_TOKEN_ADDRESS: Address = address!("43c3ebafdf32909ac60e80ee34ae46637e743d65");

/// First block of the default replay window
pub const DEFAULT_START_BLOCK: BlockNumber = 29_443_557;

/// Last block of the default replay window
pub const DEFAULT_END_BLOCK: BlockNumber = 30_701_582;

/// In-flight requests per replay stage
pub const DEFAULT_MAX_CONCURRENCY: usize = 32;

/// Blocks per barrier run
pub const DEFAULT_CHUNK_SIZE: u64 = 500;

/// Token decimals used when rendering amounts
pub const DEFAULT_DISPLAY_DECIMALS: u8 = 18;
