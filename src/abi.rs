// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token contract interface, generated from the JSON ABI in `abi/SRG20.json`.
//!
//! The `sol!` macro turns the ABI into one typed struct per method and event,
//! plus the tagged enums [`SRG20::SRG20Calls`] and [`SRG20::SRG20Events`] the
//! decoder dispatches on. Swapping the JSON file is all it takes to point the
//! replay at a contract with different selectors.
//!
//! # Example
//!
//! ```rust
//! use alloy_sol_types::SolEvent;
//! use tradescan::abi::SRG20;
//!
//! assert_eq!(
//!     SRG20::Bought::SIGNATURE,
//!     "Bought(address,address,uint256,uint256,uint256)"
//! );
//! ```

#![allow(non_camel_case_types, clippy::too_many_arguments)]

use alloy_sol_types::sol;

sol!(
    #[derive(Debug, PartialEq, Eq)]
    SRG20,
    "abi/SRG20.json"
);
