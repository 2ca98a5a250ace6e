// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capabilities a host view toolkit provides to the layout core.

use core::fmt::Debug;

use crate::axis::Axis;
use crate::geometry::{LayoutParams, Measured, Rect, Viewport};
use crate::gravity::LayoutDirection;

/// What a realized view represents.
///
/// The kind is resolved once, when the layout core asks for the view, so the
/// host never has to inspect a view to decide how to bind it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    /// A regular data item at the given adapter index.
    Content(usize),
    /// The synthetic trailing "+N more" item.
    Ellipsis {
        /// Adapter index of the ellipsis slot (one past the last content item).
        index: usize,
        /// Number of content items currently hidden.
        hidden: usize,
    },
}

impl Item {
    /// Adapter index of the item.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Content(index) | Self::Ellipsis { index, .. } => index,
        }
    }
}

/// Where a newly realized view joins the attached-children order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttachAt {
    /// Before every attached child.
    Start,
    /// After every attached child.
    End,
}

/// A host view toolkit, as seen by the layout core.
///
/// All calls are synchronous and happen on the thread that owns the UI. The host
/// owns view instances, their pool, and their drawing; the layout core only
/// orders, measures, and positions them through this trait.
///
/// Attached children are kept in a single ordered list. The layout core relies
/// on that list mirroring adapter order: child `0` is the first item of the
/// first visible line.
pub trait LayoutHost {
    /// Handle to a view instance. Handles may be reused after recycling.
    type View: Copy + PartialEq + Debug;

    /// Current viewport size, padding, and measure modes.
    fn viewport(&self) -> Viewport;

    /// Reading direction used to resolve relative gravity.
    fn layout_direction(&self) -> LayoutDirection {
        LayoutDirection::Ltr
    }

    /// Number of adapter items, including the ellipsis slot when ellipsizing.
    fn item_count(&self) -> usize;

    /// Realizes a view for `item`, possibly reusing a recycled instance.
    ///
    /// The returned view is not attached.
    fn obtain_view(&mut self, item: Item) -> Self::View;

    /// Re-binds an ellipsis view with a new hidden count, without a structural change.
    fn bind_ellipsis(&mut self, view: Self::View, hidden: usize);

    /// Attaches a realized view.
    fn attach_view(&mut self, view: Self::View, at: AttachAt);

    /// Detaches `view` if it is attached and returns it to the pool.
    fn recycle_view(&mut self, view: Self::View);

    /// Detaches and recycles every attached child.
    fn detach_all(&mut self);

    /// Measures a view, honoring its margins.
    fn measure_view(&mut self, view: Self::View);

    /// Reads back the last measurement of a view.
    fn measured(&self, view: Self::View) -> Measured;

    /// Layout parameters the view was created with.
    fn layout_params(&self, view: Self::View) -> LayoutParams;

    /// Positions a view; `bounds` includes the view's margins.
    fn layout_view(&mut self, view: Self::View, bounds: Rect);

    /// Current bounds of a view, including margins.
    fn bounds(&self, view: Self::View) -> Rect;

    /// Number of attached children.
    fn child_count(&self) -> usize;

    /// Attached child at `index` in the attached-children order.
    fn child_at(&self, index: usize) -> Option<Self::View>;

    /// Adapter index a view is bound to.
    fn position_of(&self, view: Self::View) -> usize;

    /// Translates every attached child by `amount` pixels along `axis`.
    fn offset_children(&mut self, axis: Axis, amount: i32);
}
