// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persisted scroll position.

/// Identifies the first visible line: the adapter index of its first item and
/// its leading main-axis coordinate.
///
/// This is the entire state a flow layout needs to restore its scroll position;
/// everything else is recomputed on the next layout pass. An unknown `offset`
/// is re-established as the leading padding, exactly like a first layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    /// Adapter index of the first item of the first visible line.
    pub index: usize,
    /// Leading coordinate of the first visible line, if known.
    pub offset: Option<i32>,
}

impl ScrollAnchor {
    /// An anchor at `index` whose coordinate will be decided by the next layout.
    #[must_use]
    pub const fn at_index(index: usize) -> Self {
        Self {
            index,
            offset: None,
        }
    }

    /// An anchor with a known coordinate.
    #[must_use]
    pub const fn new(index: usize, offset: i32) -> Self {
        Self {
            index,
            offset: Some(offset),
        }
    }
}
