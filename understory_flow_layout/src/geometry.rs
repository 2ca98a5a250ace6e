// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer pixel geometry shared between the layout core and its host.
//!
//! Hosts measure and position views in whole device pixels, so every type here
//! uses `i32` coordinates. Coordinates may be negative: lines that have scrolled
//! past the leading edge keep their real positions until they are recycled.

/// Width and height of a view or viewport, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a size from a width and a height.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Per-edge distances, used for both viewport padding and view margins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    /// Distance from the left edge.
    pub left: i32,
    /// Distance from the top edge.
    pub top: i32,
    /// Distance from the right edge.
    pub right: i32,
    /// Distance from the bottom edge.
    pub bottom: i32,
}

impl Insets {
    /// No insets on any edge.
    pub const ZERO: Self = Self::uniform(0);

    /// Creates insets from the four edges.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates insets with the same value on every edge.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the left and right insets.
    #[must_use]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    #[must_use]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// An axis-aligned rectangle in pixels, `left..right` by `top..bottom`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// Creates a rectangle from its four edges.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_origin_size(left: i32, top: i32, size: Size) -> Self {
        Self::new(left, top, left + size.width, top + size.height)
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns the rectangle translated by `(dx, dy)`.
    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

/// How the host constrains one viewport dimension.
///
/// Mirrors the measure modes of common view toolkits: a dimension is either
/// fixed, capped, or left for the content to decide.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MeasureMode {
    /// The dimension is exactly the reported size.
    #[default]
    Exactly,
    /// The dimension may be at most the reported size.
    AtMost,
    /// The dimension is not yet known; the content decides.
    Unspecified,
}

/// The host viewport: its size, padding, and measure modes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// Current size of the scrolling container.
    pub size: Size,
    /// Padding inside the container.
    pub padding: Insets,
    /// Measure mode of the width.
    pub width_mode: MeasureMode,
    /// Measure mode of the height.
    pub height_mode: MeasureMode,
}

impl Viewport {
    /// Creates an exactly-sized viewport with the given padding.
    #[must_use]
    pub const fn new(size: Size, padding: Insets) -> Self {
        Self {
            size,
            padding,
            width_mode: MeasureMode::Exactly,
            height_mode: MeasureMode::Exactly,
        }
    }
}

/// Requested size of a view along one dimension.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// The view wants to size itself to its content.
    #[default]
    WrapContent,
    /// The view wants to fill its parent; in a flow this forces a line of its own.
    MatchParent,
    /// A fixed pixel size.
    Exact(i32),
}

/// The layout parameters a host attaches to a view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutParams {
    /// Requested width.
    pub width: Dimension,
    /// Requested height.
    pub height: Dimension,
}

/// The outcome of measuring a view: its measured size and its margins.
///
/// The size excludes margins; the layout core adds them when it needs the
/// "decorated" extent of a view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Measured {
    /// Measured size of the view.
    pub size: Size,
    /// Margins around the view.
    pub margins: Insets,
}

impl Measured {
    /// Measured width plus horizontal margins.
    #[must_use]
    pub const fn decorated_width(&self) -> i32 {
        self.size.width + self.margins.horizontal()
    }

    /// Measured height plus vertical margins.
    #[must_use]
    pub const fn decorated_height(&self) -> i32 {
        self.size.height + self.margins.vertical()
    }
}

#[cfg(test)]
mod tests {
    use super::{Insets, Measured, Rect, Size};

    #[test]
    fn decorated_measurements_include_margins() {
        let m = Measured {
            size: Size::new(40, 20),
            margins: Insets::new(1, 2, 3, 4),
        };
        assert_eq!(m.decorated_width(), 44);
        assert_eq!(m.decorated_height(), 26);
    }

    #[test]
    fn rect_translate_preserves_size() {
        let r = Rect::from_origin_size(10, 20, Size::new(5, 7)).translate(-3, 4);
        assert_eq!(r, Rect::new(7, 24, 12, 31));
        assert_eq!((r.width(), r.height()), (5, 7));
    }
}
