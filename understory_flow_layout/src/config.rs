// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregate configuration for a [`FlowLayout`](crate::FlowLayout).

use crate::axis::Orientation;
use crate::error::{ConfigError, SpacingKind};
use crate::gravity::Gravity;

/// Well-known look-behind depths.
#[derive(Copy, Clone, Debug)]
pub struct LookBehind;

impl LookBehind {
    /// Never look behind; backward scrolling packs lines greedily in reverse.
    pub const NONE: usize = 0;
    /// Look behind as far as needed (up to the previous full-line item, or the
    /// first item) so backward scrolling reproduces forward line breaks.
    pub const EXACT: usize = usize::MAX;
}

/// Every setting of a flow layout.
///
/// Hosts that load settings from their own resource format can build this
/// directly (or deserialize it with the `serde` feature) and hand it to
/// [`FlowLayout::from_config`](crate::FlowLayout::from_config).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowConfig {
    /// Scroll direction.
    pub orientation: Orientation,
    /// Alignment of lines and of items within lines.
    pub gravity: Gravity,
    /// Maximum number of items in one line (at least 1).
    pub max_items_per_line: usize,
    /// Maximum number of lines (at least 1).
    pub max_lines: usize,
    /// Show a trailing "+N more" item when `max_lines` hides content.
    pub ellipsize: bool,
    /// Gap between items in a line, in pixels.
    pub item_spacing: i32,
    /// Gap between lines, in pixels.
    pub line_spacing: i32,
    /// Extra items re-measured when scrolling backwards; see [`LookBehind`].
    pub look_behind: usize,
    /// Size-weighted scrollbar estimates instead of item-count based ones.
    pub smooth_scrollbar: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            gravity: Gravity::default(),
            max_items_per_line: usize::MAX,
            max_lines: usize::MAX,
            ellipsize: false,
            item_spacing: 0,
            line_spacing: 0,
            look_behind: LookBehind::NONE,
            smooth_scrollbar: true,
        }
    }
}

impl FlowConfig {
    /// Checks every field, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_max_items(self.max_items_per_line)?;
        check_max_lines(self.max_lines)?;
        check_spacing(SpacingKind::Item, self.item_spacing)?;
        check_spacing(SpacingKind::Line, self.line_spacing)
    }
}

pub(crate) fn check_max_items(value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroMaxItemsPerLine)
    } else {
        Ok(())
    }
}

pub(crate) fn check_max_lines(value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroMaxLines)
    } else {
        Ok(())
    }
}

pub(crate) fn check_spacing(kind: SpacingKind, value: i32) -> Result<(), ConfigError> {
    if value < 0 {
        Err(ConfigError::NegativeSpacing { kind, value })
    } else {
        Ok(())
    }
}
