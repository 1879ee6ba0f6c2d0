// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types shared across tradescan.
//!
//! - Arbitrary-precision metric amounts
//! - Network-agnostic block, transaction, receipt and log handles
//! - Validated block ranges
//! - Per-block output records

pub mod amount;
pub mod chain;
pub mod range;
pub mod record;

// Note: Public types are re-exported from lib.rs, not here
