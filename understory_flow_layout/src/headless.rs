// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`LayoutHost`].
//!
//! [`HeadlessHost`] keeps fixed item measurements, a view pool, and an ordered
//! list of attached children. It is what the tests and benchmarks lay out
//! against, and a reference for how a real toolkit binding behaves.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::axis::Axis;
use crate::geometry::{Dimension, Insets, LayoutParams, Measured, Rect, Size, Viewport};
use crate::gravity::LayoutDirection;
use crate::host::{AttachAt, Item, LayoutHost};

/// How one item measures.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemSpec {
    /// Size when the layout parameters wrap content.
    pub size: Size,
    /// Margins around the item.
    pub margins: Insets,
    /// Requested dimensions.
    pub params: LayoutParams,
}

impl ItemSpec {
    /// A wrap-content item of the given size with no margins.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            margins: Insets::ZERO,
            params: LayoutParams {
                width: Dimension::WrapContent,
                height: Dimension::WrapContent,
            },
        }
    }

    /// Sets the margins.
    #[must_use]
    pub const fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the layout parameters.
    #[must_use]
    pub const fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }
}

/// Handle to a view owned by a [`HeadlessHost`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

#[derive(Copy, Clone, Debug, Default)]
struct ViewSlot {
    item: Option<Item>,
    params: LayoutParams,
    measured: Measured,
    bounds: Rect,
}

/// In-memory host with fixed-size items.
///
/// The adapter holds [`HeadlessHost::content_len`] data items, plus one trailing
/// ellipsis slot once [`HeadlessHost::set_ellipsis`] has been given a size.
#[derive(Clone, Debug, Default)]
pub struct HeadlessHost {
    viewport: Viewport,
    direction: LayoutDirection,
    items: Vec<ItemSpec>,
    ellipsis: Option<ItemSpec>,
    views: Vec<ViewSlot>,
    pool: Vec<ViewId>,
    children: VecDeque<ViewId>,
    recycled: usize,
}

impl HeadlessHost {
    /// Creates an empty host with the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Replaces the viewport; the caller is expected to lay out again.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Sets the reading direction.
    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }

    /// Appends one item of the given size.
    pub fn push_item(&mut self, size: Size) {
        self.items.push(ItemSpec::new(size));
    }

    /// Appends `count` items of the same size.
    pub fn push_items(&mut self, count: usize, size: Size) {
        self.items
            .extend(core::iter::repeat_n(ItemSpec::new(size), count));
    }

    /// Appends one fully specified item.
    pub fn push_spec(&mut self, spec: ItemSpec) {
        self.items.push(spec);
    }

    /// Drops data items past `len`.
    pub fn truncate_items(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Adds (or with `None`, removes) the trailing ellipsis slot.
    pub fn set_ellipsis(&mut self, size: Option<Size>) {
        self.ellipsis = size.map(ItemSpec::new);
    }

    /// Number of data items, excluding the ellipsis slot.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.items.len()
    }

    /// Total number of views returned to the pool so far.
    #[must_use]
    pub fn recycled_count(&self) -> usize {
        self.recycled
    }

    /// Number of distinct view instances ever created.
    #[must_use]
    pub fn views_created(&self) -> usize {
        self.views.len()
    }

    /// Bounds of the attached child at `index`, or an empty rectangle.
    #[must_use]
    pub fn child_bounds(&self, index: usize) -> Rect {
        self.child_at(index)
            .map_or(Rect::default(), |view| self.slot(view).bounds)
    }

    /// Adapter positions of the attached children, in order.
    #[must_use]
    pub fn attached_positions(&self) -> Vec<usize> {
        self.children
            .iter()
            .map(|&view| self.position_of(view))
            .collect()
    }

    /// Hidden count bound to the attached ellipsis view, if one is attached.
    #[must_use]
    pub fn ellipsis_hidden(&self) -> Option<usize> {
        self.children
            .iter()
            .find_map(|&view| match self.slot(view).item {
                Some(Item::Ellipsis { hidden, .. }) => Some(hidden),
                _ => None,
            })
    }

    fn slot(&self, view: ViewId) -> ViewSlot {
        self.views.get(view.0 as usize).copied().unwrap_or_default()
    }

    fn slot_mut(&mut self, view: ViewId) -> Option<&mut ViewSlot> {
        self.views.get_mut(view.0 as usize)
    }

    fn spec(&self, item: Item) -> ItemSpec {
        match item {
            Item::Content(index) => self.items.get(index).copied().unwrap_or_default(),
            Item::Ellipsis { .. } => self.ellipsis.unwrap_or_default(),
        }
    }

    fn resolve(dimension: Dimension, wrapped: i32, parent: i32) -> i32 {
        match dimension {
            Dimension::WrapContent => wrapped,
            Dimension::MatchParent => parent.max(0),
            Dimension::Exact(value) => value,
        }
    }
}

impl LayoutHost for HeadlessHost {
    type View = ViewId;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    fn item_count(&self) -> usize {
        self.items.len() + usize::from(self.ellipsis.is_some())
    }

    fn obtain_view(&mut self, item: Item) -> ViewId {
        let params = self.spec(item).params;
        let slot = ViewSlot {
            item: Some(item),
            params,
            ..ViewSlot::default()
        };
        if let Some(view) = self.pool.pop() {
            if let Some(existing) = self.slot_mut(view) {
                *existing = slot;
            }
            return view;
        }
        let view = ViewId(u32::try_from(self.views.len()).unwrap_or(u32::MAX));
        self.views.push(slot);
        view
    }

    fn bind_ellipsis(&mut self, view: ViewId, hidden: usize) {
        if let Some(slot) = self.slot_mut(view) {
            if let Some(Item::Ellipsis { index, .. }) = slot.item {
                slot.item = Some(Item::Ellipsis { index, hidden });
            }
        }
    }

    fn attach_view(&mut self, view: ViewId, at: AttachAt) {
        match at {
            AttachAt::Start => self.children.push_front(view),
            AttachAt::End => self.children.push_back(view),
        }
    }

    fn recycle_view(&mut self, view: ViewId) {
        if let Some(index) = self.children.iter().position(|&child| child == view) {
            self.children.remove(index);
        }
        self.pool.push(view);
        self.recycled += 1;
    }

    fn detach_all(&mut self) {
        self.recycled += self.children.len();
        self.pool.extend(self.children.drain(..));
    }

    fn measure_view(&mut self, view: ViewId) {
        let Some(item) = self.slot(view).item else {
            return;
        };
        let spec = self.spec(item);
        let room = Size::new(
            self.viewport.size.width - self.viewport.padding.horizontal() - spec.margins.horizontal(),
            self.viewport.size.height - self.viewport.padding.vertical() - spec.margins.vertical(),
        );
        let size = Size::new(
            Self::resolve(spec.params.width, spec.size.width, room.width),
            Self::resolve(spec.params.height, spec.size.height, room.height),
        );
        if let Some(slot) = self.slot_mut(view) {
            slot.measured = Measured {
                size,
                margins: spec.margins,
            };
        }
    }

    fn measured(&self, view: ViewId) -> Measured {
        self.slot(view).measured
    }

    fn layout_params(&self, view: ViewId) -> LayoutParams {
        self.slot(view).params
    }

    fn layout_view(&mut self, view: ViewId, bounds: Rect) {
        if let Some(slot) = self.slot_mut(view) {
            slot.bounds = bounds;
        }
    }

    fn bounds(&self, view: ViewId) -> Rect {
        self.slot(view).bounds
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<ViewId> {
        self.children.get(index).copied()
    }

    fn position_of(&self, view: ViewId) -> usize {
        self.slot(view).item.map_or(0, Item::index)
    }

    fn offset_children(&mut self, axis: Axis, amount: i32) {
        let (dx, dy) = match axis {
            Axis::Horizontal => (amount, 0),
            Axis::Vertical => (0, amount),
        };
        for index in 0..self.children.len() {
            let view = self.children[index];
            if let Some(slot) = self.slot_mut(view) {
                slot.bounds = slot.bounds.translate(dx, dy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessHost, ItemSpec};
    use crate::axis::Axis;
    use crate::geometry::{Dimension, Insets, LayoutParams, Rect, Size, Viewport};
    use crate::host::{AttachAt, Item, LayoutHost};

    #[test]
    fn views_are_pooled() {
        let mut host = HeadlessHost::new(Viewport::new(Size::new(100, 100), Insets::ZERO));
        host.push_items(2, Size::new(10, 10));
        let a = host.obtain_view(Item::Content(0));
        host.attach_view(a, AttachAt::End);
        host.recycle_view(a);
        assert_eq!(host.child_count(), 0);
        let b = host.obtain_view(Item::Content(1));
        assert_eq!(a, b);
        assert_eq!(host.position_of(b), 1);
        assert_eq!(host.views_created(), 1);
    }

    #[test]
    fn match_parent_fills_padded_room() {
        let mut host = HeadlessHost::new(Viewport::new(Size::new(100, 80), Insets::uniform(5)));
        host.push_spec(
            ItemSpec::new(Size::new(10, 10))
                .with_margins(Insets::uniform(2))
                .with_params(LayoutParams {
                    width: Dimension::MatchParent,
                    height: Dimension::Exact(30),
                }),
        );
        let view = host.obtain_view(Item::Content(0));
        host.measure_view(view);
        let measured = host.measured(view);
        assert_eq!(measured.size, Size::new(86, 30));
        assert_eq!(measured.decorated_width(), 90);
    }

    #[test]
    fn ellipsis_slot_counts_as_an_item() {
        let mut host = HeadlessHost::new(Viewport::new(Size::new(100, 100), Insets::ZERO));
        host.push_items(4, Size::new(10, 10));
        assert_eq!(host.item_count(), 4);
        host.set_ellipsis(Some(Size::new(20, 10)));
        assert_eq!(host.item_count(), 5);

        let view = host.obtain_view(Item::Ellipsis {
            index: 4,
            hidden: 2,
        });
        host.attach_view(view, AttachAt::End);
        host.bind_ellipsis(view, 3);
        assert_eq!(host.ellipsis_hidden(), Some(3));
        assert_eq!(host.position_of(view), 4);
    }

    #[test]
    fn offset_moves_attached_children_only() {
        let mut host = HeadlessHost::new(Viewport::new(Size::new(100, 100), Insets::ZERO));
        host.push_items(2, Size::new(10, 10));
        let a = host.obtain_view(Item::Content(0));
        let b = host.obtain_view(Item::Content(1));
        host.attach_view(a, AttachAt::End);
        host.layout_view(a, Rect::new(0, 0, 10, 10));
        host.layout_view(b, Rect::new(0, 20, 10, 30));
        host.offset_children(Axis::Vertical, -5);
        assert_eq!(host.bounds(a), Rect::new(0, -5, 10, 5));
        assert_eq!(host.bounds(b), Rect::new(0, 20, 10, 30));
    }
}
