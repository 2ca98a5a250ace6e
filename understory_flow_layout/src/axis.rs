// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orientation and gravity adapter.
//!
//! [`AxisAdapter`] presents a two-axis layout as a single scrolling *main*
//! axis and a perpendicular *cross* axis, so line building and scrolling are
//! written once for both orientations. Every method is a pure function of the
//! viewport and view measurements passed in.

use crate::error::ConfigError;
use crate::geometry::{Dimension, LayoutParams, MeasureMode, Measured, Rect, Viewport};
use crate::gravity::{Gravity, LayoutDirection};
use crate::host::LayoutHost;

/// Scroll direction of a flow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    /// Lines are columns; the flow scrolls left to right.
    Horizontal,
    /// Lines are rows; the flow scrolls top to bottom.
    #[default]
    Vertical,
}

impl Orientation {
    /// Host constant for [`Orientation::Horizontal`].
    pub const HORIZONTAL: i32 = 0;
    /// Host constant for [`Orientation::Vertical`].
    pub const VERTICAL: i32 = 1;

    /// The physical axis content scrolls along.
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::Horizontal,
            Self::Vertical => Axis::Vertical,
        }
    }
}

impl TryFrom<i32> for Orientation {
    type Error = ConfigError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            Self::HORIZONTAL => Ok(Self::Horizontal),
            Self::VERTICAL => Ok(Self::Vertical),
            other => Err(ConfigError::UnknownOrientation(other)),
        }
    }
}

/// A physical axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

/// Maps main/cross-axis concepts onto physical coordinates for one orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisAdapter {
    orientation: Orientation,
    gravity: Gravity,
}

impl AxisAdapter {
    /// Creates an adapter for an orientation and gravity.
    #[must_use]
    pub const fn new(orientation: Orientation, gravity: Gravity) -> Self {
        Self {
            orientation,
            gravity,
        }
    }

    /// The orientation this adapter maps.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The gravity this adapter resolves.
    #[must_use]
    pub const fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// Viewport size along the main axis.
    #[must_use]
    pub const fn main_extent(&self, viewport: &Viewport) -> i32 {
        match self.orientation {
            Orientation::Horizontal => viewport.size.width,
            Orientation::Vertical => viewport.size.height,
        }
    }

    /// Padding before content along the main axis.
    #[must_use]
    pub const fn main_padding_start(&self, viewport: &Viewport) -> i32 {
        match self.orientation {
            Orientation::Horizontal => viewport.padding.left,
            Orientation::Vertical => viewport.padding.top,
        }
    }

    /// Padding after content along the main axis.
    #[must_use]
    pub const fn main_padding_end(&self, viewport: &Viewport) -> i32 {
        match self.orientation {
            Orientation::Horizontal => viewport.padding.right,
            Orientation::Vertical => viewport.padding.bottom,
        }
    }

    /// Room along the main axis once padding is removed.
    #[must_use]
    pub const fn main_total_space(&self, viewport: &Viewport) -> i32 {
        self.main_extent(viewport)
            - self.main_padding_start(viewport)
            - self.main_padding_end(viewport)
    }

    /// Usable room across the main axis: the maximum size of a line.
    #[must_use]
    pub const fn cross_available(&self, viewport: &Viewport) -> i32 {
        match self.orientation {
            Orientation::Horizontal => viewport.size.height - viewport.padding.vertical(),
            Orientation::Vertical => viewport.size.width - viewport.padding.horizontal(),
        }
    }

    /// Whether the main-axis extent is a fixed, known value.
    ///
    /// A zero-sized, unconstrained viewport is still being measured; layout must
    /// not stop early on overflow in that case.
    #[must_use]
    pub fn is_bounded(&self, viewport: &Viewport) -> bool {
        let mode = match self.orientation {
            Orientation::Horizontal => viewport.width_mode,
            Orientation::Vertical => viewport.height_mode,
        };
        self.main_extent(viewport) != 0 || mode != MeasureMode::Unspecified
    }

    /// Decorated size of an item along the main axis (its contribution to line thickness).
    #[must_use]
    pub const fn item_main_size(&self, measured: &Measured) -> i32 {
        match self.orientation {
            Orientation::Horizontal => measured.decorated_width(),
            Orientation::Vertical => measured.decorated_height(),
        }
    }

    /// Decorated size of an item across the main axis (its room within a line).
    #[must_use]
    pub const fn item_cross_size(&self, measured: &Measured) -> i32 {
        match self.orientation {
            Orientation::Horizontal => measured.decorated_height(),
            Orientation::Vertical => measured.decorated_width(),
        }
    }

    /// Whether a view asks to fill the whole line.
    #[must_use]
    pub fn fills_line(&self, params: &LayoutParams) -> bool {
        let dim = match self.orientation {
            Orientation::Horizontal => params.height,
            Orientation::Vertical => params.width,
        };
        dim == Dimension::MatchParent
    }

    /// Leading main-axis coordinate of laid-out bounds.
    #[must_use]
    pub const fn bounds_start(&self, bounds: &Rect) -> i32 {
        match self.orientation {
            Orientation::Horizontal => bounds.left,
            Orientation::Vertical => bounds.top,
        }
    }

    /// Trailing main-axis coordinate of laid-out bounds.
    #[must_use]
    pub const fn bounds_end(&self, bounds: &Rect) -> i32 {
        match self.orientation {
            Orientation::Horizontal => bounds.right,
            Orientation::Vertical => bounds.bottom,
        }
    }

    /// Cross-axis coordinate of the first item of a line whose items span `items_size`.
    ///
    /// The line is aligned inside the padded area according to gravity.
    #[must_use]
    pub fn line_origin(
        &self,
        viewport: &Viewport,
        direction: LayoutDirection,
        items_size: i32,
    ) -> i32 {
        let room = self.cross_available(viewport);
        match self.orientation {
            Orientation::Horizontal => {
                viewport.padding.top + self.gravity.vertical().offset(room, items_size)
            }
            Orientation::Vertical => {
                viewport.padding.left
                    + self.gravity.horizontal(direction).offset(room, items_size)
            }
        }
    }

    /// Offset of an item inside a line of the given thickness.
    #[must_use]
    pub fn offset_within_line(
        &self,
        direction: LayoutDirection,
        thickness: i32,
        item_main_size: i32,
    ) -> i32 {
        let align = match self.orientation {
            Orientation::Horizontal => self.gravity.horizontal(direction),
            Orientation::Vertical => self.gravity.vertical(),
        };
        align.offset(thickness, item_main_size)
    }

    /// Builds the physical rectangle of an item from main/cross coordinates.
    #[must_use]
    pub const fn item_rect(
        &self,
        main_start: i32,
        cross_start: i32,
        main_size: i32,
        cross_size: i32,
    ) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(
                main_start,
                cross_start,
                main_start + main_size,
                cross_start + cross_size,
            ),
            Orientation::Vertical => Rect::new(
                cross_start,
                main_start,
                cross_start + cross_size,
                main_start + main_size,
            ),
        }
    }

    /// Positions one attached view within a line and returns its cross-axis size.
    ///
    /// `line_start` and `thickness` describe the line's band along the main axis;
    /// `cross_start` is where this item begins across it.
    pub fn place_item<H: LayoutHost>(
        &self,
        host: &mut H,
        view: H::View,
        line_start: i32,
        thickness: i32,
        cross_start: i32,
    ) -> i32 {
        let measured = host.measured(view);
        let main = self.item_main_size(&measured);
        let cross = self.item_cross_size(&measured);
        let direction = host.layout_direction();
        let main_start = line_start + self.offset_within_line(direction, thickness, main);
        host.layout_view(view, self.item_rect(main_start, cross_start, main, cross));
        cross
    }

    /// Shifts every attached child along the main axis.
    pub fn translate_children<H: LayoutHost>(&self, host: &mut H, amount: i32) {
        host.offset_children(self.orientation.main_axis(), amount);
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisAdapter, Orientation};
    use crate::error::ConfigError;
    use crate::geometry::{Insets, MeasureMode, Measured, Size, Viewport};
    use crate::gravity::{Gravity, LayoutDirection};

    fn viewport() -> Viewport {
        Viewport::new(Size::new(300, 500), Insets::new(10, 20, 30, 40))
    }

    #[test]
    fn vertical_maps_height_to_main_axis() {
        let vp = viewport();
        let axis = AxisAdapter::new(Orientation::Vertical, Gravity::default());
        assert_eq!(axis.main_extent(&vp), 500);
        assert_eq!(axis.main_padding_start(&vp), 20);
        assert_eq!(axis.main_padding_end(&vp), 40);
        assert_eq!(axis.main_total_space(&vp), 440);
        assert_eq!(axis.cross_available(&vp), 260);
    }

    #[test]
    fn horizontal_maps_width_to_main_axis() {
        let vp = viewport();
        let axis = AxisAdapter::new(Orientation::Horizontal, Gravity::default());
        assert_eq!(axis.main_extent(&vp), 300);
        assert_eq!(axis.main_padding_start(&vp), 10);
        assert_eq!(axis.main_padding_end(&vp), 30);
        assert_eq!(axis.cross_available(&vp), 440);

        let m = Measured {
            size: Size::new(50, 20),
            margins: Insets::uniform(1),
        };
        assert_eq!(axis.item_main_size(&m), 52);
        assert_eq!(axis.item_cross_size(&m), 22);
        let rect = axis.item_rect(100, 5, 52, 22);
        assert_eq!((rect.left, rect.top, rect.width(), rect.height()), (100, 5, 52, 22));
    }

    #[test]
    fn line_origin_follows_gravity() {
        let vp = viewport();
        let ltr = LayoutDirection::Ltr;
        let start = AxisAdapter::new(Orientation::Vertical, Gravity::START);
        let center = AxisAdapter::new(Orientation::Vertical, Gravity::CENTER_HORIZONTAL);
        let end = AxisAdapter::new(Orientation::Vertical, Gravity::END);
        assert_eq!(start.line_origin(&vp, ltr, 100), 10);
        assert_eq!(center.line_origin(&vp, ltr, 100), 10 + 80);
        assert_eq!(end.line_origin(&vp, ltr, 100), 10 + 160);
        assert_eq!(end.line_origin(&vp, LayoutDirection::Rtl, 100), 10);
    }

    #[test]
    fn items_align_within_line_thickness() {
        let ltr = LayoutDirection::Ltr;
        let bottom = AxisAdapter::new(Orientation::Vertical, Gravity::BOTTOM);
        assert_eq!(bottom.offset_within_line(ltr, 40, 10), 30);
        let centered = AxisAdapter::new(Orientation::Horizontal, Gravity::CENTER);
        assert_eq!(centered.offset_within_line(ltr, 40, 10), 15);
    }

    #[test]
    fn unconstrained_empty_viewport_is_unbounded() {
        let axis = AxisAdapter::new(Orientation::Vertical, Gravity::default());
        let mut vp = Viewport::new(Size::new(300, 0), Insets::ZERO);
        assert!(axis.is_bounded(&vp));
        vp.height_mode = MeasureMode::Unspecified;
        assert!(!axis.is_bounded(&vp));
        vp.size.height = 10;
        assert!(axis.is_bounded(&vp));
    }

    #[test]
    fn orientation_from_host_constants() {
        assert_eq!(Orientation::try_from(0), Ok(Orientation::Horizontal));
        assert_eq!(Orientation::try_from(1), Ok(Orientation::Vertical));
        assert_eq!(
            Orientation::try_from(7),
            Err(ConfigError::UnknownOrientation(7))
        );
    }
}
