// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line building: packing consecutive items into one row or column.
//!
//! A line is built in one of two directions:
//!
//! - **Appending** walks indices upwards from a known leading coordinate. Only an
//!   appended line can be the last allowed line, so only it may be ellipsized.
//! - **Prepending** walks indices downwards from a known trailing coordinate.
//!   Greedy packing in reverse may split lines differently from a forward pass;
//!   [`LineContext::look_behind`] re-measures a run of earlier items forwards to
//!   avoid that.
//!
//! In both cases the line's children are positioned as soon as its membership
//! is final.

use smallvec::SmallVec;

use crate::axis::AxisAdapter;
use crate::geometry::Viewport;
use crate::gravity::LayoutDirection;
use crate::host::{AttachAt, Item, LayoutHost};

/// One laid-out row (vertical flow) or column (horizontal flow).
///
/// `start..end` is the band the line occupies along the main axis; its size is
/// the largest decorated main-axis size of the line's items. `item_count`
/// consecutive attached children belong to the line, including the ellipsis
/// item if present.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Line {
    pub(crate) start: i32,
    pub(crate) end: i32,
    pub(crate) item_count: usize,
}

impl Line {
    pub(crate) const fn starting_at(start: i32) -> Self {
        Self {
            start,
            end: start,
            item_count: 0,
        }
    }

    pub(crate) const fn ending_at(end: i32) -> Self {
        Self {
            start: end,
            end,
            item_count: 0,
        }
    }

    /// Leading main-axis coordinate.
    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    /// Trailing main-axis coordinate.
    #[must_use]
    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Number of items (attached children) in the line.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Main-axis size of the line.
    #[must_use]
    pub const fn thickness(&self) -> i32 {
        self.end - self.start
    }

    pub(crate) fn offset(&mut self, delta: i32) {
        self.start += delta;
        self.end += delta;
    }

    /// Adds an item growing the line away from its fixed leading edge.
    fn push_from_start(&mut self, thickness: &mut i32, item_main_size: i32) {
        if item_main_size > *thickness {
            *thickness = item_main_size;
            self.end = self.start + item_main_size;
        }
        self.item_count += 1;
    }

    /// Adds an item growing the line away from its fixed trailing edge.
    fn push_from_end(&mut self, thickness: &mut i32, item_main_size: i32) {
        if item_main_size > *thickness {
            *thickness = item_main_size;
            self.start = self.end - item_main_size;
        }
        self.item_count += 1;
    }
}

/// Everything needed to build lines during one layout or scroll pass.
///
/// Captured once per pass so the viewport and configuration cannot change
/// underneath a half-built line.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LineContext {
    pub(crate) axis: AxisAdapter,
    pub(crate) viewport: Viewport,
    pub(crate) direction: LayoutDirection,
    pub(crate) max_items: usize,
    pub(crate) item_spacing: i32,
    pub(crate) line_spacing: i32,
    /// Number of real data items; the ellipsis slot, if any, sits at this index.
    pub(crate) content_count: usize,
    pub(crate) ellipsize: bool,
}

impl LineContext {
    /// Whether an item of `cross` size fits after `line_size` already used.
    ///
    /// The first item of a line always fits.
    fn fits(&self, line_size: i32, cross: i32) -> bool {
        line_size == 0 || line_size + cross <= self.axis.cross_available(&self.viewport)
    }

    fn realize<H: LayoutHost>(&self, host: &mut H, item: Item, at: AttachAt) -> H::View {
        let view = host.obtain_view(item);
        host.attach_view(view, at);
        host.measure_view(view);
        view
    }

    /// Appends a line at the end of the attached children, starting at item
    /// `start_index` and main-axis coordinate `start`.
    ///
    /// Pass `ellipsis` for the last allowed line: it receives the number of
    /// hidden items (or `None` when ellipsizing is disabled), and a trailing
    /// ellipsis item replaces as many real items as needed to fit.
    pub(crate) fn append_line<H: LayoutHost>(
        &self,
        host: &mut H,
        start_index: usize,
        start: i32,
        ellipsis: Option<&mut Option<usize>>,
    ) -> Line {
        let _span = tracing::trace_span!("append_line", start_index, start).entered();
        let mut line = Line::starting_at(start);
        let mut thickness = 0;
        let mut line_size = 0;
        let mut index = start_index;

        while line.item_count != self.max_items && index < self.content_count {
            let view = self.realize(host, Item::Content(index), AttachAt::End);
            let measured = host.measured(view);
            let cross = self.axis.item_cross_size(&measured);
            if !self.fits(line_size, cross) {
                host.recycle_view(view);
                break;
            }
            line.push_from_start(&mut thickness, self.axis.item_main_size(&measured));
            line_size += cross + self.item_spacing;
            index += 1;
        }

        if let Some(count) = ellipsis {
            *count = None;
            if self.ellipsize {
                let hidden = self.content_count - index;
                if hidden > 0 {
                    let (hidden, size) =
                        self.ellipsize_line(host, &mut line, &mut thickness, line_size, hidden);
                    line_size = size;
                    *count = Some(hidden);
                } else {
                    *count = Some(0);
                }
            }
        }

        self.layout_items_to_end(host, &line, line_size - self.item_spacing);
        tracing::trace!(?line, "appended line");
        line
    }

    /// Adds the ellipsis item to `line`, evicting trailing real items until it
    /// fits. Returns the final hidden count and the new line size.
    fn ellipsize_line<H: LayoutHost>(
        &self,
        host: &mut H,
        line: &mut Line,
        thickness: &mut i32,
        mut line_size: i32,
        mut hidden: usize,
    ) -> (usize, i32) {
        let _span = tracing::trace_span!("ellipsize", hidden).entered();
        let slot = self.content_count;
        let view = self.realize(host, Item::Ellipsis { index: slot, hidden }, AttachAt::End);
        let measured = host.measured(view);
        let mut cross = self.axis.item_cross_size(&measured);
        line.push_from_start(thickness, self.axis.item_main_size(&measured));

        let available = self.axis.cross_available(&self.viewport);
        // TODO: recompute the thickness once evicted items leave the line; it
        // currently keeps the size of the tallest item ever added.
        while line.item_count > 1
            && (line.item_count > self.max_items || line_size + cross > available)
        {
            // The ellipsis is the last child, its victim the one before it.
            let victim = host
                .child_count()
                .checked_sub(2)
                .and_then(|index| host.child_at(index));
            let Some(victim) = victim else {
                break;
            };
            line_size -= self.axis.item_cross_size(&host.measured(victim)) + self.item_spacing;
            line.item_count -= 1;
            hidden += 1;
            host.recycle_view(victim);

            host.bind_ellipsis(view, hidden);
            host.measure_view(view);
            cross = self.axis.item_cross_size(&host.measured(view));
        }

        tracing::debug!(hidden, "ellipsized last line");
        (hidden, line_size + cross + self.item_spacing)
    }

    /// Prepends a line before the attached children, walking indices down from
    /// `start_index`, with its trailing edge at `end`.
    pub(crate) fn prepend_line<H: LayoutHost>(
        &self,
        host: &mut H,
        start_index: usize,
        end: i32,
    ) -> Line {
        let _span = tracing::trace_span!("prepend_line", start_index, end).entered();
        let mut line = Line::ending_at(end);
        let mut thickness = 0;
        let mut line_size = 0;
        let mut next = Some(start_index);

        while line.item_count != self.max_items {
            let Some(index) = next else {
                break;
            };
            let view = self.realize(host, Item::Content(index), AttachAt::Start);
            let measured = host.measured(view);
            let cross = self.axis.item_cross_size(&measured);
            if !self.fits(line_size, cross) {
                host.recycle_view(view);
                break;
            }
            line.push_from_end(&mut thickness, self.axis.item_main_size(&measured));
            line_size += cross + self.item_spacing;
            next = index.checked_sub(1);
        }

        self.layout_items_to_start(host, &line, line_size - self.item_spacing, 0);
        tracing::trace!(?line, "prepended line");
        line
    }

    /// Re-attaches up to `depth` items ending at `index` and splits them into
    /// lines in reading order, the last of which ends at `end`.
    ///
    /// Gathering stops early at an item that fills a whole line; such an item
    /// always starts a line of its own in forward layout, so the items after it
    /// split exactly as they did going forwards. Returns the new lines in
    /// reading order, already laid out; empty if nothing was gathered.
    pub(crate) fn look_behind<H: LayoutHost>(
        &self,
        host: &mut H,
        index: usize,
        end: i32,
        depth: usize,
    ) -> SmallVec<[Line; 4]> {
        let _span = tracing::trace_span!("look_behind", index, depth).entered();

        let mut gathered = 0;
        while gathered < depth && gathered <= index {
            let view = host.obtain_view(Item::Content(index - gathered));
            if self.axis.fills_line(&host.layout_params(view)) {
                host.recycle_view(view);
                break;
            }
            host.attach_view(view, AttachAt::Start);
            gathered += 1;
        }
        if gathered == 0 {
            return SmallVec::new();
        }

        // Walk forwards, splitting exactly like an appended line would.
        let mut split: SmallVec<[(Line, i32); 4]> = SmallVec::new();
        let mut line = Line::ending_at(end);
        let mut thickness = 0;
        let mut line_size = 0;
        for child in 0..gathered {
            let Some(view) = host.child_at(child) else {
                break;
            };
            host.measure_view(view);
            let measured = host.measured(view);
            let cross = self.axis.item_cross_size(&measured);
            if line.item_count == self.max_items || !self.fits(line_size, cross) {
                split.push((line, line_size - self.item_spacing));
                line = Line::ending_at(end);
                thickness = 0;
                line_size = 0;
            }
            line.push_from_end(&mut thickness, self.axis.item_main_size(&measured));
            line_size += cross + self.item_spacing;
        }
        split.push((line, line_size - self.item_spacing));

        // Every line was measured against `end`; stack them backwards from there.
        let mut offset = 0;
        let mut first_child = gathered;
        for (line, items_size) in split.iter_mut().rev() {
            line.offset(offset);
            first_child -= line.item_count;
            self.layout_items_to_start(host, line, *items_size, first_child);
            offset -= line.thickness() + self.line_spacing;
        }

        tracing::debug!(gathered, lines = split.len(), "looked behind");
        split.into_iter().map(|(line, _)| line).collect()
    }

    /// Positions the last `line.item_count` attached children.
    fn layout_items_to_end<H: LayoutHost>(&self, host: &mut H, line: &Line, items_size: i32) {
        let Some(first_child) = host.child_count().checked_sub(line.item_count) else {
            return;
        };
        self.layout_items_to_start(host, line, items_size, first_child);
    }

    /// Positions `line.item_count` attached children starting at `first_child`.
    fn layout_items_to_start<H: LayoutHost>(
        &self,
        host: &mut H,
        line: &Line,
        items_size: i32,
        first_child: usize,
    ) {
        let mut cross = self
            .axis
            .line_origin(&self.viewport, self.direction, items_size);
        let thickness = line.thickness();
        for child in first_child..first_child + line.item_count {
            let Some(view) = host.child_at(child) else {
                break;
            };
            cross += self
                .axis
                .place_item(host, view, line.start, thickness, cross)
                + self.item_spacing;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{Line, LineContext};
    use crate::axis::{AxisAdapter, Orientation};
    use crate::geometry::{Insets, Size, Viewport};
    use crate::gravity::{Gravity, LayoutDirection};
    use crate::headless::HeadlessHost;
    use crate::host::LayoutHost;

    fn context(host: &HeadlessHost, max_items: usize, ellipsize: bool) -> LineContext {
        LineContext {
            axis: AxisAdapter::new(Orientation::Vertical, Gravity::default()),
            viewport: host.viewport(),
            direction: LayoutDirection::Ltr,
            max_items,
            item_spacing: 0,
            line_spacing: 0,
            content_count: host.content_len(),
            ellipsize,
        }
    }

    fn host(items: usize) -> HeadlessHost {
        let mut host = HeadlessHost::new(Viewport::new(Size::new(300, 400), Insets::ZERO));
        host.push_items(items, Size::new(100, 50));
        host
    }

    #[test]
    fn line_bookkeeping() {
        let mut line = Line::starting_at(10);
        let mut thickness = 0;
        line.push_from_start(&mut thickness, 20);
        line.push_from_start(&mut thickness, 5);
        assert_eq!((line.start(), line.end(), line.item_count()), (10, 30, 2));
        line.offset(-15);
        assert_eq!((line.start(), line.end(), line.thickness()), (-5, 15, 20));

        let mut line = Line::ending_at(100);
        let mut thickness = 0;
        line.push_from_end(&mut thickness, 30);
        assert_eq!((line.start(), line.end()), (70, 100));
    }

    #[test]
    fn append_packs_until_cross_axis_is_full() {
        let mut host = host(5);
        let ctx = context(&host, usize::MAX, false);
        let line = ctx.append_line(&mut host, 0, 0, None);
        assert_eq!(line.item_count(), 3);
        assert_eq!(line.thickness(), 50);
        assert_eq!(host.child_count(), 3);
        // The overflowing fourth item was realized and handed straight back.
        assert_eq!(host.recycled_count(), 1);
        assert_eq!(host.child_bounds(2).left, 200);
    }

    #[test]
    fn oversized_item_still_gets_a_line() {
        let mut host = HeadlessHost::new(Viewport::new(Size::new(300, 400), Insets::ZERO));
        host.push_item(Size::new(500, 40));
        host.push_item(Size::new(50, 40));
        let ctx = context(&host, usize::MAX, false);
        let line = ctx.append_line(&mut host, 0, 0, None);
        assert_eq!(line.item_count(), 1);
    }

    #[test]
    fn prepend_walks_indices_downwards() {
        let mut host = host(5);
        let ctx = context(&host, 2, false);
        let line = ctx.prepend_line(&mut host, 4, 200);
        assert_eq!(line.item_count(), 2);
        assert_eq!((line.start(), line.end()), (150, 200));
        let first = host.child_at(0).map(|v| host.position_of(v));
        assert_eq!(first, Some(3));
    }

    #[test]
    fn look_behind_matches_forward_split() {
        let mut host = host(7);
        let ctx = context(&host, usize::MAX, false);
        // Items 0..=6 forwards split as [0,1,2] [3,4,5] [6].
        let lines = ctx.look_behind(&mut host, 6, 500, usize::MAX);
        let counts: Vec<usize> = lines.iter().map(Line::item_count).collect();
        assert_eq!(counts, [3, 3, 1]);
        assert_eq!(lines[2].end(), 500);
        assert_eq!(lines[0].start(), 350);
    }

    #[test]
    fn last_line_with_room_reports_zero_hidden() {
        let mut host = host(2);
        host.set_ellipsis(Some(Size::new(60, 50)));
        let ctx = context(&host, usize::MAX, true);
        let mut hidden = None;
        let line = ctx.append_line(&mut host, 0, 0, Some(&mut hidden));
        assert_eq!(line.item_count(), 2);
        assert_eq!(hidden, Some(0));
    }
}
