// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Trade volume from `Bought`/`Sold` events

use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::TransactionExtractor;
use crate::abi::SRG20::{SRG20Calls, SRG20Events};
use crate::decode::{DecodedCall, DecodedLog};
use crate::errors::ConfigError;
use crate::types::record::Metric;

/// Which field of a trade event counts as volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeDenomination {
    /// Token units (`tokens`)
    #[default]
    Tokens,
    /// Base-asset units (`beans`)
    Base,
    /// Dollar value reported by the contract (`dollarBuy`/`dollarSell`)
    Dollar,
}

impl FromStr for VolumeDenomination {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tokens" | "token" => Ok(Self::Tokens),
            "base" | "beans" => Ok(Self::Base),
            "dollar" | "usd" => Ok(Self::Dollar),
            other => Err(ConfigError::invalid(
                "VOLUME_DENOMINATION",
                other,
                "expected one of: tokens, base, dollar",
            )),
        }
    }
}

/// Sums traded amounts for `_buy` and `_sell` transactions.
///
/// # Example
///
/// ```rust
/// use tradescan::extract::{TransactionExtractor, VolumeDenomination, VolumeExtractor};
///
/// let extractor = VolumeExtractor::new(VolumeDenomination::Tokens);
/// let volume = extractor.extract(None, None);
/// assert!(volume.is_zero());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeExtractor {
    denomination: VolumeDenomination,
}

impl VolumeExtractor {
    pub fn new(denomination: VolumeDenomination) -> Self {
        Self { denomination }
    }

    pub fn denomination(&self) -> VolumeDenomination {
        self.denomination
    }
}

impl TransactionExtractor for VolumeExtractor {
    fn metric(&self) -> Metric {
        Metric::Volume
    }

    fn accepts(&self, call: &DecodedCall) -> bool {
        matches!(call, SRG20Calls::_buy(_) | SRG20Calls::_sell(_))
    }

    fn amount_from_log(&self, log: &DecodedLog) -> Option<U256> {
        match (log, self.denomination) {
            (SRG20Events::Bought(e), VolumeDenomination::Tokens) => Some(e.tokens),
            (SRG20Events::Bought(e), VolumeDenomination::Base) => Some(e.beans),
            (SRG20Events::Bought(e), VolumeDenomination::Dollar) => Some(e.dollarBuy),
            (SRG20Events::Sold(e), VolumeDenomination::Tokens) => Some(e.tokens),
            (SRG20Events::Sold(e), VolumeDenomination::Base) => Some(e.beans),
            (SRG20Events::Sold(e), VolumeDenomination::Dollar) => Some(e.dollarSell),
            _ => None,
        }
    }
}
