// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for replay operations
//!
//! Controls which metrics a replay produces, how they are denominated, and how
//! hard the replay leans on the RPC endpoint.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use tradescan::ReplayConfig;
//!
//! // Volume, log-replay liquidity and price; 32 in-flight requests; 500-block chunks
//! let config = ReplayConfig::default();
//! assert_eq!(config.max_concurrency, 32);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use tradescan::{LiquidityStrategy, ReplayConfigBuilder, VolumeDenomination};
//!
//! let config = ReplayConfigBuilder::with_defaults()
//!     .max_concurrency(8)
//!     .liquidity(Some(LiquidityStrategy::PointInTime))
//!     .volume_denomination(VolumeDenomination::Base)
//!     .build();
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::extract::VolumeDenomination;
use crate::reader::PointMetric;

pub mod constants;

use constants::{DEFAULT_CHUNK_SIZE, DEFAULT_DISPLAY_DECIMALS, DEFAULT_MAX_CONCURRENCY};

/// How liquidity is obtained.
///
/// The two strategies measure different things: log replay sums tokens moved
/// by `addLiquidity` transactions within each block, point-in-time reads the
/// contract's reported pool liquidity at the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityStrategy {
    /// Sum `Transfer` values emitted by `addLiquidity` transactions
    LogReplay,
    /// Call `getLiquidity()` at each block
    PointInTime,
}

impl FromStr for LiquidityStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logs" | "log" | "log_replay" => Ok(Self::LogReplay),
            "point" | "point_in_time" | "call" => Ok(Self::PointInTime),
            other => Err(ConfigError::invalid(
                "LIQUIDITY_STRATEGY",
                other,
                "expected one of: logs, point, none",
            )),
        }
    }
}

/// Which metrics a replay computes. Unselected metrics are reported as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSelection {
    pub volume: bool,
    /// At most one liquidity strategy per invocation
    pub liquidity: Option<LiquidityStrategy>,
    pub price: bool,
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl MetricSelection {
    /// Volume, log-replay liquidity and price
    pub const fn all() -> Self {
        Self {
            volume: true,
            liquidity: Some(LiquidityStrategy::LogReplay),
            price: true,
        }
    }

    pub const fn volume_only() -> Self {
        Self {
            volume: true,
            liquidity: None,
            price: false,
        }
    }

    pub const fn none() -> Self {
        Self {
            volume: false,
            liquidity: None,
            price: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.volume && self.liquidity.is_none() && !self.price
    }

    /// Whether liquidity is reconstructed from receipts
    pub fn log_liquidity(&self) -> bool {
        self.liquidity == Some(LiquidityStrategy::LogReplay)
    }

    /// Whether any metric requires receipts
    pub fn needs_receipts(&self) -> bool {
        self.volume || self.log_liquidity()
    }

    /// View-function reads to issue per block, in a fixed order
    pub fn point_metrics(&self) -> Vec<PointMetric> {
        let mut metrics = Vec::with_capacity(2);
        if self.liquidity == Some(LiquidityStrategy::PointInTime) {
            metrics.push(PointMetric::Liquidity);
        }
        if self.price {
            metrics.push(PointMetric::Price);
        }
        metrics
    }
}

/// Configuration for a replay
///
/// Use [`ReplayConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Maximum in-flight requests per stage
    /// Default: 32
    pub max_concurrency: usize,

    /// Blocks per barrier run; memory use scales with this
    /// Default: 500
    pub chunk_size: u64,

    pub metrics: MetricSelection,

    /// Default: token units
    pub volume_denomination: VolumeDenomination,

    /// Decimals applied when rendering amounts
    /// Default: 18
    pub display_decimals: u8,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ReplayConfig {
    /// All metrics, 32 in-flight requests, 500-block chunks
    pub fn with_defaults() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            metrics: MetricSelection::all(),
            volume_denomination: VolumeDenomination::Tokens,
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
        }
    }

    /// Create minimal config: volume only, low concurrency
    ///
    /// Suitable for testing or public endpoints with tight limits.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tradescan::ReplayConfig;
    ///
    /// let config = ReplayConfig::minimal();
    /// assert!(config.metrics.volume);
    /// assert!(config.metrics.point_metrics().is_empty());
    /// ```
    pub fn minimal() -> Self {
        Self {
            max_concurrency: 4,
            chunk_size: DEFAULT_CHUNK_SIZE,
            metrics: MetricSelection::volume_only(),
            volume_denomination: VolumeDenomination::Tokens,
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
        }
    }
}

/// Builder for [`ReplayConfig`]
///
/// # Example
///
/// ```rust
/// use tradescan::ReplayConfigBuilder;
///
/// let config = ReplayConfigBuilder::new()
///     .chunk_size(100)
///     .price(true)
///     .build();
/// assert_eq!(config.chunk_size, 100);
/// ```
pub struct ReplayConfigBuilder {
    config: ReplayConfig,
}

impl Default for ReplayConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayConfigBuilder {
    /// Create a new builder from [`ReplayConfig::minimal`]
    pub fn new() -> Self {
        Self {
            config: ReplayConfig::minimal(),
        }
    }

    /// Start from [`ReplayConfig::with_defaults`]
    pub fn with_defaults() -> Self {
        Self {
            config: ReplayConfig::with_defaults(),
        }
    }

    /// Set in-flight request limit per stage (values below 1 are raised to 1)
    pub fn max_concurrency(mut self, max: usize) -> Self {
        self.config.max_concurrency = max.max(1);
        self
    }

    /// Set blocks per chunk (values below 1 are raised to 1)
    pub fn chunk_size(mut self, blocks: u64) -> Self {
        self.config.chunk_size = blocks.max(1);
        self
    }

    /// Replace the whole metric selection
    pub fn metrics(mut self, metrics: MetricSelection) -> Self {
        self.config.metrics = metrics;
        self
    }

    pub fn volume(mut self, enabled: bool) -> Self {
        self.config.metrics.volume = enabled;
        self
    }

    pub fn liquidity(mut self, strategy: Option<LiquidityStrategy>) -> Self {
        self.config.metrics.liquidity = strategy;
        self
    }

    pub fn price(mut self, enabled: bool) -> Self {
        self.config.metrics.price = enabled;
        self
    }

    pub fn volume_denomination(mut self, denomination: VolumeDenomination) -> Self {
        self.config.volume_denomination = denomination;
        self
    }

    pub fn display_decimals(mut self, decimals: u8) -> Self {
        self.config.display_decimals = decimals;
        self
    }

    pub fn build(self) -> ReplayConfig {
        self.config
    }
}
