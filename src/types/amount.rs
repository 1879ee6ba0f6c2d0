// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary-precision metric amount

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use alloy_primitives::U256;
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// Non-negative decimal amount accumulated by the replay.
///
/// Token amounts routinely exceed `u64` (and `U256` sums could in principle
/// overflow), so the value is held as a [`BigDecimal`]. Raw on-chain units
/// are stored unscaled; use [`scaled`](Self::scaled) to render with token
/// decimals.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use tradescan::MetricAmount;
///
/// let a = MetricAmount::from_u256(U256::from(u64::MAX));
/// let b = MetricAmount::from(1u64);
/// assert_eq!((a + b).to_string(), "18446744073709551616");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricAmount(BigDecimal);

impl MetricAmount {
    /// The additive identity.
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    /// Lossless conversion from a raw on-chain `U256`.
    pub fn from_u256(value: U256) -> Self {
        let digits = BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>());
        Self(BigDecimal::new(digits, 0))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_bigdecimal(&self) -> &BigDecimal {
        &self.0
    }

    /// Divide by `10^decimals` for display.
    ///
    /// ```
    /// use tradescan::MetricAmount;
    ///
    /// let raw = MetricAmount::from(1_500_000u64);
    /// assert_eq!(raw.scaled(6).to_string(), "1.5");
    /// ```
    pub fn scaled(&self, decimals: u8) -> BigDecimal {
        let (digits, scale) = self.0.as_bigint_and_exponent();
        let value = BigDecimal::new(digits, scale + i64::from(decimals)).normalized();
        // normalized() moves trailing integer zeros into a negative exponent
        if value.as_bigint_and_exponent().1 < 0 {
            value.with_scale(0)
        } else {
            value
        }
    }

    /// [`scaled`](Self::scaled) rendered in positional notation.
    ///
    /// `BigDecimal`'s `Display` switches to exponent form for small
    /// magnitudes, which is where 18-decimal prices land.
    ///
    /// ```
    /// use tradescan::MetricAmount;
    ///
    /// assert_eq!(MetricAmount::from(1u64).scaled_string(18), "0.000000000000000001");
    /// ```
    pub fn scaled_string(&self, decimals: u8) -> String {
        self.scaled(decimals).to_plain_string()
    }
}

impl From<U256> for MetricAmount {
    fn from(value: U256) -> Self {
        Self::from_u256(value)
    }
}

impl From<u64> for MetricAmount {
    fn from(value: u64) -> Self {
        Self(BigDecimal::from(value))
    }
}

impl From<BigDecimal> for MetricAmount {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl Add for MetricAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a MetricAmount> for MetricAmount {
    type Output = Self;

    fn add(self, rhs: &'a MetricAmount) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl AddAssign for MetricAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl<'a> AddAssign<&'a MetricAmount> for MetricAmount {
    fn add_assign(&mut self, rhs: &'a MetricAmount) {
        self.0 += &rhs.0;
    }
}

impl Sum for MetricAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a MetricAmount> for MetricAmount {
    fn sum<I: Iterator<Item = &'a MetricAmount>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, amount| acc + amount)
    }
}

impl std::fmt::Display for MetricAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}
