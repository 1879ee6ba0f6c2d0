// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block range types

use alloy_primitives::BlockNumber;
use serde::{Deserialize, Serialize};

use crate::errors::ReplayError;

/// Inclusive, non-empty range of block numbers.
///
/// # Examples
///
/// ```
/// use tradescan::BlockRange;
///
/// let range = BlockRange::new(100, 104).unwrap();
/// assert_eq!(range.len(), 5);
/// assert!(BlockRange::new(5, 4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRange {
    start: BlockNumber,
    end: BlockNumber,
}

impl BlockRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: BlockNumber, end: BlockNumber) -> Result<Self, ReplayError> {
        if start > end {
            return Err(ReplayError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one block.
    pub const fn single(block: BlockNumber) -> Self {
        Self {
            start: block,
            end: block,
        }
    }

    pub const fn start(&self) -> BlockNumber {
        self.start
    }

    pub const fn end(&self) -> BlockNumber {
        self.end
    }

    /// Number of blocks in the range. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> u64 {
        (self.end - self.start).saturating_add(1)
    }

    /// Block numbers in ascending order.
    pub fn blocks(&self) -> impl Iterator<Item = BlockNumber> {
        self.start..=self.end
    }

    /// Split into consecutive sub-ranges of at most `max_blocks` blocks.
    ///
    /// ```
    /// use tradescan::BlockRange;
    ///
    /// let range = BlockRange::new(0, 2500).unwrap();
    /// let chunks: Vec<_> = range.chunks(1000).collect();
    /// assert_eq!(chunks.len(), 3); // 0-999, 1000-1999, 2000-2500
    /// assert_eq!(chunks[2].start(), 2000);
    /// assert_eq!(chunks[2].end(), 2500);
    /// ```
    pub fn chunks(&self, max_blocks: u64) -> impl Iterator<Item = BlockRange> {
        let step = max_blocks.max(1);
        let end = self.end;
        let mut next = Some(self.start);
        std::iter::from_fn(move || {
            let start = next?;
            let chunk_end = start.saturating_add(step - 1).min(end);
            next = if chunk_end < end {
                Some(chunk_end + 1)
            } else {
                None
            };
            Some(BlockRange {
                start,
                end: chunk_end,
            })
        })
    }
}

impl std::fmt::Display for BlockRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
