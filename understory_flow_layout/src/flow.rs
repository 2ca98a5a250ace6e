// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flow layout engine.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::anchor::ScrollAnchor;
use crate::axis::{AxisAdapter, Orientation};
use crate::config::{FlowConfig, check_max_items, check_max_lines, check_spacing};
use crate::error::{ConfigError, SpacingKind};
use crate::gravity::Gravity;
use crate::host::LayoutHost;
use crate::line::{Line, LineContext};

/// Where the engine is in its lifecycle.
///
/// Configuration setters are rejected with [`ConfigError::Busy`] while a pass
/// is running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutState {
    /// No lines yet, or a full layout has been requested.
    #[default]
    Uninitialized,
    /// A full layout pass is running.
    LayingOut,
    /// Lines mirror the attached children.
    LaidOut,
    /// A scroll pass is running.
    Scrolling,
}

bitflags::bitflags! {
    /// Work the engine asks its host to schedule.
    ///
    /// Drained with [`FlowLayout::take_requests`].
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayoutRequests: u8 {
        /// A full layout pass is needed.
        const LAYOUT = 1 << 0;
        /// The ellipsis slot (the last adapter item) should be re-bound.
        const NOTIFY_ELLIPSIS = 1 << 1;
    }
}

/// A flow layout: items packed into wrapped lines and scrolled along one axis.
///
/// The engine owns only line bookkeeping and the scroll anchor; views belong to
/// the [`LayoutHost`] passed into each pass.
#[derive(Clone, Debug)]
pub struct FlowLayout {
    pub(crate) config: FlowConfig,
    pub(crate) axis: AxisAdapter,
    pub(crate) lines: Vec<Line>,
    pub(crate) anchor: ScrollAnchor,
    pub(crate) ellipsis_count: Option<usize>,
    pub(crate) state: LayoutState,
    requests: LayoutRequests,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::build(FlowConfig::default())
    }
}

impl FlowLayout {
    /// Creates a layout with default settings and the given orientation.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self::build(FlowConfig {
            orientation,
            ..FlowConfig::default()
        })
    }

    /// Creates a layout with default settings, an orientation, and a gravity.
    #[must_use]
    pub fn with_gravity(orientation: Orientation, gravity: Gravity) -> Self {
        Self::build(FlowConfig {
            orientation,
            gravity,
            ..FlowConfig::default()
        })
    }

    /// Creates a layout from a complete configuration.
    pub fn from_config(config: FlowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: FlowConfig) -> Self {
        Self {
            axis: AxisAdapter::new(config.orientation, config.gravity),
            config,
            lines: Vec::new(),
            anchor: ScrollAnchor::default(),
            ellipsis_count: None,
            state: LayoutState::Uninitialized,
            requests: LayoutRequests::empty(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Scroll direction.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Alignment of lines and items.
    #[must_use]
    pub const fn gravity(&self) -> Gravity {
        self.config.gravity
    }

    /// Maximum number of items per line.
    #[must_use]
    pub const fn max_items_per_line(&self) -> usize {
        self.config.max_items_per_line
    }

    /// Maximum number of lines.
    #[must_use]
    pub const fn max_lines(&self) -> usize {
        self.config.max_lines
    }

    /// Whether hidden content is summarized by an ellipsis item.
    #[must_use]
    pub const fn ellipsize(&self) -> bool {
        self.config.ellipsize
    }

    /// Gap between items in a line.
    #[must_use]
    pub const fn item_spacing(&self) -> i32 {
        self.config.item_spacing
    }

    /// Gap between lines.
    #[must_use]
    pub const fn line_spacing(&self) -> i32 {
        self.config.line_spacing
    }

    /// Look-behind depth used when scrolling backwards.
    #[must_use]
    pub const fn look_behind(&self) -> usize {
        self.config.look_behind
    }

    /// Whether scrollbar metrics are size-weighted.
    #[must_use]
    pub const fn smooth_scrollbar(&self) -> bool {
        self.config.smooth_scrollbar
    }

    /// Number of content items hidden behind the ellipsis.
    ///
    /// `None` until a layout pass has determined it, and always `None` while
    /// ellipsizing is disabled.
    #[must_use]
    pub const fn ellipsis_count(&self) -> Option<usize> {
        self.ellipsis_count
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LayoutState {
        self.state
    }

    /// Current lines, in main-axis order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Current scroll anchor.
    #[must_use]
    pub const fn anchor(&self) -> ScrollAnchor {
        self.anchor
    }

    /// Whether a full layout has been requested and not yet drained.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.requests.contains(LayoutRequests::LAYOUT)
    }

    /// Returns and clears pending requests.
    pub fn take_requests(&mut self) -> LayoutRequests {
        core::mem::replace(&mut self.requests, LayoutRequests::empty())
    }

    fn ensure_idle(&self) -> Result<(), ConfigError> {
        match self.state {
            LayoutState::LayingOut | LayoutState::Scrolling => {
                tracing::warn!(state = ?self.state, "configuration change rejected");
                Err(ConfigError::Busy { state: self.state })
            }
            LayoutState::Uninitialized | LayoutState::LaidOut => Ok(()),
        }
    }

    fn request_layout(&mut self) {
        self.requests.insert(LayoutRequests::LAYOUT);
    }

    /// Sets the scroll direction.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        if self.config.orientation != orientation {
            self.config.orientation = orientation;
            self.axis = AxisAdapter::new(orientation, self.config.gravity);
            self.request_layout();
        }
        Ok(())
    }

    /// Sets line and item alignment.
    pub fn set_gravity(&mut self, gravity: Gravity) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        if self.config.gravity != gravity {
            self.config.gravity = gravity;
            self.axis = AxisAdapter::new(self.config.orientation, gravity);
            self.request_layout();
        }
        Ok(())
    }

    /// Sets the maximum number of items per line (at least 1).
    pub fn set_max_items_per_line(&mut self, max: usize) -> Result<(), ConfigError> {
        check_max_items(max)?;
        self.ensure_idle()?;
        self.config.max_items_per_line = max;
        self.request_layout();
        Ok(())
    }

    /// Sets the line limit and ellipsizing.
    ///
    /// When either value changes, the hidden count becomes unknown until the
    /// next layout and a layout is requested. With `ellipsize` and `notify` set,
    /// the host is also asked to re-bind the ellipsis slot. Setting the current
    /// values again does nothing.
    pub fn set_max_lines(
        &mut self,
        max: usize,
        ellipsize: bool,
        notify: bool,
    ) -> Result<(), ConfigError> {
        check_max_lines(max)?;
        self.ensure_idle()?;
        if self.config.max_lines == max && self.config.ellipsize == ellipsize {
            return Ok(());
        }
        self.config.max_lines = max;
        self.config.ellipsize = ellipsize;
        self.ellipsis_count = None;
        if ellipsize && notify {
            self.requests.insert(LayoutRequests::NOTIFY_ELLIPSIS);
        }
        self.request_layout();
        Ok(())
    }

    /// Sets how many earlier items are re-measured when scrolling backwards.
    ///
    /// Takes effect on the next backward scroll; no layout is requested.
    pub fn set_look_behind(&mut self, depth: usize) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        self.config.look_behind = depth;
        Ok(())
    }

    /// Sets the gap between items in a line.
    pub fn set_item_spacing(&mut self, spacing: i32) -> Result<(), ConfigError> {
        check_spacing(SpacingKind::Item, spacing)?;
        self.ensure_idle()?;
        self.config.item_spacing = spacing;
        self.request_layout();
        Ok(())
    }

    /// Sets the gap between lines.
    pub fn set_line_spacing(&mut self, spacing: i32) -> Result<(), ConfigError> {
        check_spacing(SpacingKind::Line, spacing)?;
        self.ensure_idle()?;
        self.config.line_spacing = spacing;
        self.request_layout();
        Ok(())
    }

    /// Sets the item and line gaps together.
    pub fn set_spacing(&mut self, items: i32, lines: i32) -> Result<(), ConfigError> {
        check_spacing(SpacingKind::Item, items)?;
        check_spacing(SpacingKind::Line, lines)?;
        self.ensure_idle()?;
        self.config.item_spacing = items;
        self.config.line_spacing = lines;
        self.request_layout();
        Ok(())
    }

    /// Chooses between size-weighted and item-count scrollbar metrics.
    pub fn set_smooth_scrollbar(&mut self, smooth: bool) {
        self.config.smooth_scrollbar = smooth;
    }

    /// Number of real data items; one less than the host's count when ellipsizing.
    pub(crate) fn content_count<H: LayoutHost>(&self, host: &H) -> usize {
        let count = host.item_count();
        if self.config.ellipsize {
            count.saturating_sub(1)
        } else {
            count
        }
    }

    fn line_context<H: LayoutHost>(&self, host: &H) -> LineContext {
        LineContext {
            axis: self.axis,
            viewport: host.viewport(),
            direction: host.layout_direction(),
            max_items: self.config.max_items_per_line,
            item_spacing: self.config.item_spacing,
            line_spacing: self.config.line_spacing,
            content_count: self.content_count(host),
            ellipsize: self.config.ellipsize,
        }
    }

    /// Rebuilds every line from the anchor.
    ///
    /// All children are detached first. Lines are appended until the line limit
    /// is reached, content runs out, or (for a bounded viewport) the viewport is
    /// full. If the anchor is past the first item and content no longer reaches
    /// the trailing padding, the layout scrolls back to close the gap.
    pub fn layout_children<H: LayoutHost>(&mut self, host: &mut H) {
        let _span = tracing::debug_span!("layout_children").entered();
        self.requests.remove(LayoutRequests::LAYOUT);
        self.state = LayoutState::LayingOut;

        let ctx = self.line_context(host);
        let start = *self
            .anchor
            .offset
            .get_or_insert(ctx.axis.main_padding_start(&ctx.viewport));
        host.detach_all();
        self.lines.clear();
        if ctx.content_count > 0 && self.anchor.index >= ctx.content_count {
            tracing::debug!(
                anchor = self.anchor.index,
                content = ctx.content_count,
                "anchor past content, clamping"
            );
            self.anchor.index = ctx.content_count - 1;
        }

        let bounded = ctx.axis.is_bounded(&ctx.viewport);
        let extent = ctx.axis.main_extent(&ctx.viewport);
        let mut index = self.anchor.index;
        let mut line_start = start;
        let mut built_last_line = false;
        while index < ctx.content_count && self.lines.len() < self.config.max_lines {
            let is_last = self.lines.len() + 1 == self.config.max_lines;
            built_last_line |= is_last;
            let line = ctx.append_line(
                host,
                index,
                line_start,
                is_last.then_some(&mut self.ellipsis_count),
            );
            self.lines.push(line);
            index += line.item_count;
            line_start = line.end + ctx.line_spacing;
            if bounded && line.end > extent {
                break;
            }
        }
        if !built_last_line && index >= ctx.content_count {
            self.ellipsis_count = self.config.ellipsize.then_some(0);
        }
        self.state = LayoutState::LaidOut;
        tracing::debug!(
            lines = self.lines.len(),
            children = host.child_count(),
            "layout complete"
        );

        if self.anchor.index > 0 {
            if let Some(last) = self.lines.last() {
                let gap = last.end - extent + ctx.axis.main_padding_end(&ctx.viewport);
                if gap < 0 {
                    tracing::debug!(gap, "content ends early, scrolling back");
                    self.scroll_by(gap, host);
                }
            }
        }
    }

    /// Scrolls content by `delta` pixels along the main axis and returns the
    /// distance actually scrolled.
    ///
    /// Positive values reveal later content. The result has the sign of `delta`
    /// and never exceeds it in magnitude; it is smaller when the content edge
    /// is reached.
    pub fn scroll_by<H: LayoutHost>(&mut self, delta: i32, host: &mut H) -> i32 {
        if delta == 0 || self.lines.is_empty() || host.child_count() == 0 {
            return 0;
        }
        let _span = tracing::trace_span!("scroll_by", delta).entered();
        self.state = LayoutState::Scrolling;

        let ctx = self.line_context(host);
        let consumed = if delta > 0 {
            self.fill_towards_end(&ctx, host, delta)
        } else {
            self.fill_towards_start(&ctx, host, delta)
        };
        if consumed != 0 {
            for line in &mut self.lines {
                line.offset(-consumed);
            }
            ctx.axis.translate_children(host, -consumed);
        }
        if consumed != delta {
            tracing::trace!(delta, consumed, "scroll reached content edge");
        }
        self.update_anchor(host);
        self.state = LayoutState::LaidOut;
        consumed
    }

    /// Scrolls vertically; a no-op for horizontal flows.
    pub fn scroll_vertically_by<H: LayoutHost>(&mut self, dy: i32, host: &mut H) -> i32 {
        match self.config.orientation {
            Orientation::Vertical => self.scroll_by(dy, host),
            Orientation::Horizontal => 0,
        }
    }

    /// Scrolls horizontally; a no-op for vertical flows.
    pub fn scroll_horizontally_by<H: LayoutHost>(&mut self, dx: i32, host: &mut H) -> i32 {
        match self.config.orientation {
            Orientation::Horizontal => self.scroll_by(dx, host),
            Orientation::Vertical => 0,
        }
    }

    /// Whether this flow scrolls vertically.
    #[must_use]
    pub const fn can_scroll_vertically(&self) -> bool {
        matches!(self.config.orientation, Orientation::Vertical)
    }

    /// Whether this flow scrolls horizontally.
    #[must_use]
    pub const fn can_scroll_horizontally(&self) -> bool {
        matches!(self.config.orientation, Orientation::Horizontal)
    }

    /// Makes `position` the first item of the first line on the next layout.
    ///
    /// Out-of-range positions are ignored.
    pub fn scroll_to_position<H: LayoutHost>(&mut self, position: usize, host: &H) {
        if position >= self.content_count(host) {
            tracing::debug!(position, "scroll target out of range");
            return;
        }
        self.anchor = ScrollAnchor::at_index(position);
        self.state = LayoutState::Uninitialized;
        self.request_layout();
    }

    /// Snapshot of the scroll position.
    #[must_use]
    pub const fn save_state(&self) -> ScrollAnchor {
        self.anchor
    }

    /// Restores a saved scroll position; it takes effect on the next layout.
    pub fn restore_state(&mut self, anchor: ScrollAnchor) {
        self.anchor = anchor;
        self.request_layout();
    }

    fn update_anchor<H: LayoutHost>(&mut self, host: &H) {
        if let (Some(first), Some(view)) = (self.lines.first(), host.child_at(0)) {
            self.anchor = ScrollAnchor::new(host.position_of(view), first.start);
        }
    }

    /// Appends lines until `delta` pixels of content exist past the trailing
    /// padding, then recycles lines scrolled out at the start.
    fn fill_towards_end<H: LayoutHost>(
        &mut self,
        ctx: &LineContext,
        host: &mut H,
        delta: i32,
    ) -> i32 {
        let Some(mut last) = self.lines.last().copied() else {
            return 0;
        };
        let limit = ctx.axis.main_extent(&ctx.viewport) - ctx.axis.main_padding_end(&ctx.viewport);
        let mut available = (last.end - limit).max(0);
        let mut index = host
            .child_count()
            .checked_sub(1)
            .and_then(|child| host.child_at(child))
            .map_or(ctx.content_count, |view| host.position_of(view) + 1);

        while available < delta
            && index < ctx.content_count
            && self.lines.len() < self.config.max_lines
        {
            self.recycle_leading_lines(host, available);
            let is_last = self.lines.len() + 1 == self.config.max_lines;
            last = ctx.append_line(
                host,
                index,
                last.end + ctx.line_spacing,
                is_last.then_some(&mut self.ellipsis_count),
            );
            self.lines.push(last);
            index += last.item_count;
            available = (last.end - limit).max(0);
        }

        let consumed = available.min(delta);
        self.recycle_leading_lines(host, consumed);
        consumed
    }

    /// Prepends lines until `-delta` pixels of content exist before the
    /// leading padding, then recycles lines scrolled out at the end.
    fn fill_towards_start<H: LayoutHost>(
        &mut self,
        ctx: &LineContext,
        host: &mut H,
        delta: i32,
    ) -> i32 {
        let Some(mut first) = self.lines.first().copied() else {
            return 0;
        };
        let pad_start = ctx.axis.main_padding_start(&ctx.viewport);
        let mut available = first.start - pad_start;
        let mut next = host
            .child_at(0)
            .and_then(|view| host.position_of(view).checked_sub(1));

        while available > delta {
            let Some(index) = next else {
                break;
            };
            self.recycle_trailing_lines(ctx, host, available);
            let end = first.start - ctx.line_spacing;
            let behind = if self.config.look_behind > 0 {
                ctx.look_behind(host, index, end, self.config.look_behind)
            } else {
                SmallVec::new()
            };
            let added = if let Some(&head) = behind.first() {
                first = head;
                let items = behind.iter().map(Line::item_count).sum();
                self.lines.splice(0..0, behind);
                items
            } else {
                first = ctx.prepend_line(host, index, end);
                self.lines.insert(0, first);
                first.item_count
            };
            next = index.checked_sub(added);
            available = first.start - pad_start;
        }

        let consumed = available.min(0).max(delta);
        self.recycle_trailing_lines(ctx, host, consumed);
        consumed
    }

    /// Recycles leading lines that end before the viewport once scrolled by
    /// `offset`. The last remaining line is always kept.
    fn recycle_leading_lines<H: LayoutHost>(&mut self, host: &mut H, offset: i32) {
        let mut removed = 0;
        while self.lines.len() - removed > 1 && self.lines[removed].end - offset < 0 {
            for _ in 0..self.lines[removed].item_count {
                if let Some(view) = host.child_at(0) {
                    host.recycle_view(view);
                }
            }
            removed += 1;
        }
        if removed > 0 {
            self.lines.drain(..removed);
            tracing::trace!(removed, "recycled leading lines");
        }
    }

    /// Recycles trailing lines that start past the viewport once scrolled by
    /// `offset`. The first remaining line is always kept.
    fn recycle_trailing_lines<H: LayoutHost>(
        &mut self,
        ctx: &LineContext,
        host: &mut H,
        offset: i32,
    ) {
        let extent = ctx.axis.main_extent(&ctx.viewport);
        let mut removed = 0;
        while self.lines.len() > 1 {
            let Some(last) = self.lines.last().copied() else {
                break;
            };
            if last.start - offset <= extent {
                break;
            }
            for _ in 0..last.item_count {
                let view = host
                    .child_count()
                    .checked_sub(1)
                    .and_then(|child| host.child_at(child));
                if let Some(view) = view {
                    host.recycle_view(view);
                }
            }
            self.lines.pop();
            removed += 1;
        }
        if removed > 0 {
            tracing::trace!(removed, "recycled trailing lines");
        }
    }
}
