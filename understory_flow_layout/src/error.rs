// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! Every error here is a caller contract violation: the rejected call leaves the
//! layout untouched and retrying with the same input will fail again.

use crate::flow::LayoutState;

/// Which spacing a [`ConfigError::NegativeSpacing`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpacingKind {
    /// Gap between items in a line.
    Item,
    /// Gap between lines.
    Line,
}

/// A rejected configuration change.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `max_items_per_line` must be at least one.
    #[error("max items per line must be at least 1")]
    ZeroMaxItemsPerLine,
    /// `max_lines` must be at least one.
    #[error("max lines must be at least 1")]
    ZeroMaxLines,
    /// Spacing must not be negative.
    #[error("{kind:?} spacing must not be negative, got {value}")]
    NegativeSpacing {
        /// The spacing that was rejected.
        kind: SpacingKind,
        /// The rejected value.
        value: i32,
    },
    /// The value does not name an orientation.
    #[error("unknown orientation {0}")]
    UnknownOrientation(i32),
    /// Configuration cannot change while a layout or scroll pass is running.
    #[error("cannot reconfigure while {state:?}")]
    Busy {
        /// The state the layout was in.
        state: LayoutState,
    },
}
