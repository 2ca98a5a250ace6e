// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollbar estimates.
//!
//! Only a window of items is ever attached, so the scrollbar is extrapolated
//! from the visible children. With smooth metrics enabled, the units are pixels
//! extrapolated from the average laid-out size per item; otherwise the units are
//! items.

use crate::flow::FlowLayout;
use crate::host::LayoutHost;

/// How much of a child must be inside the padded viewport to count as visible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Both main-axis edges lie inside the padded viewport.
    Complete,
    /// Some part lies inside the padded viewport.
    Partial,
}

/// Result of `numerator / denominator` rounded half away from zero, for a
/// non-negative numerator and a positive denominator.
fn div_round(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator) / (2 * denominator)
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

impl FlowLayout {
    /// Finds the first visible child searching from the leading edge.
    ///
    /// When asking for a completely visible child and none exists, the last
    /// partially visible child found is returned instead.
    pub fn first_visible_child<H: LayoutHost>(
        &self,
        host: &H,
        visibility: Visibility,
    ) -> Option<H::View> {
        self.find_visible_child(host, 0..host.child_count(), visibility)
    }

    /// Finds the first visible child searching from the trailing edge.
    ///
    /// Falls back like [`FlowLayout::first_visible_child`].
    pub fn last_visible_child<H: LayoutHost>(
        &self,
        host: &H,
        visibility: Visibility,
    ) -> Option<H::View> {
        self.find_visible_child(host, (0..host.child_count()).rev(), visibility)
    }

    fn find_visible_child<H: LayoutHost>(
        &self,
        host: &H,
        order: impl Iterator<Item = usize>,
        visibility: Visibility,
    ) -> Option<H::View> {
        let viewport = host.viewport();
        let start = self.axis.main_padding_start(&viewport);
        let end = self.axis.main_extent(&viewport) - self.axis.main_padding_end(&viewport);
        let mut fallback = None;
        for view in order.filter_map(|index| host.child_at(index)) {
            let bounds = host.bounds(view);
            let child_start = self.axis.bounds_start(&bounds);
            let child_end = self.axis.bounds_end(&bounds);
            let partial = child_start < end && child_end > start;
            match visibility {
                Visibility::Complete if child_start >= start && child_end <= end => {
                    return Some(view);
                }
                Visibility::Partial if partial => return Some(view),
                _ if partial => fallback = Some(view),
                _ => {}
            }
        }
        fallback
    }

    fn scrollbar_children<H: LayoutHost>(&self, host: &H) -> Option<(H::View, H::View)> {
        if host.child_count() == 0 || host.item_count() == 0 {
            return None;
        }
        let visibility = if self.config.smooth_scrollbar {
            Visibility::Partial
        } else {
            Visibility::Complete
        };
        Some((
            self.first_visible_child(host, visibility)?,
            self.last_visible_child(host, visibility)?,
        ))
    }

    /// Position of the scrollbar thumb.
    #[must_use]
    pub fn compute_scroll_offset<H: LayoutHost>(&self, host: &H) -> i32 {
        let Some((first, last)) = self.scrollbar_children(host) else {
            return 0;
        };
        let first_pos = host.position_of(first);
        let last_pos = host.position_of(last);
        let items_before = first_pos.min(last_pos) as i64;
        if !self.config.smooth_scrollbar {
            return saturate(items_before);
        }
        let first_start = self.axis.bounds_start(&host.bounds(first));
        let laid_out = i64::from(self.axis.bounds_end(&host.bounds(last)) - first_start).abs();
        let item_range = first_pos.abs_diff(last_pos) as i64 + 1;
        let viewport = host.viewport();
        let scrolled_into_first = self.axis.main_padding_start(&viewport) - first_start;
        saturate(div_round(items_before * laid_out, item_range) + i64::from(scrolled_into_first))
    }

    /// Size of the scrollbar thumb.
    #[must_use]
    pub fn compute_scroll_extent<H: LayoutHost>(&self, host: &H) -> i32 {
        let Some((first, last)) = self.scrollbar_children(host) else {
            return 0;
        };
        if !self.config.smooth_scrollbar {
            let items = host.position_of(first).abs_diff(host.position_of(last)) + 1;
            return saturate(items as i64);
        }
        let viewport = host.viewport();
        let laid_out =
            self.axis.bounds_end(&host.bounds(last)) - self.axis.bounds_start(&host.bounds(first));
        self.axis.main_total_space(&viewport).min(laid_out)
    }

    /// Total scrollable range.
    #[must_use]
    pub fn compute_scroll_range<H: LayoutHost>(&self, host: &H) -> i32 {
        let Some((first, last)) = self.scrollbar_children(host) else {
            return 0;
        };
        let item_count = host.item_count() as i64;
        if !self.config.smooth_scrollbar {
            return saturate(item_count);
        }
        let laid_out = i64::from(
            self.axis.bounds_end(&host.bounds(last)) - self.axis.bounds_start(&host.bounds(first)),
        );
        let item_range = host.position_of(first).abs_diff(host.position_of(last)) as i64 + 1;
        saturate(laid_out * item_count / item_range)
    }
}

#[cfg(test)]
mod tests {
    use super::{Visibility, div_round};
    use crate::flow::FlowLayout;
    use crate::geometry::{Insets, Size, Viewport};
    use crate::headless::HeadlessHost;
    use crate::host::LayoutHost;

    fn scrolled_grid() -> (FlowLayout, HeadlessHost) {
        // 3 items per 50px line, 30 items, 200px viewport.
        let mut host = HeadlessHost::new(Viewport::new(Size::new(300, 200), Insets::ZERO));
        host.push_items(30, Size::new(100, 50));
        let mut layout = FlowLayout::default();
        layout.layout_children(&mut host);
        (layout, host)
    }

    #[test]
    fn rounding_division() {
        assert_eq!(div_round(7, 2), 4);
        assert_eq!(div_round(5, 3), 2);
        assert_eq!(div_round(4, 3), 1);
        assert_eq!(div_round(0, 3), 0);
    }

    #[test]
    fn empty_host_reports_zero() {
        let mut host = HeadlessHost::new(Viewport::new(Size::new(300, 200), Insets::ZERO));
        let layout = FlowLayout::default();
        assert_eq!(layout.compute_scroll_offset(&host), 0);
        assert_eq!(layout.compute_scroll_extent(&host), 0);
        host.push_items(3, Size::new(10, 10));
        assert_eq!(layout.compute_scroll_range(&host), 0);
    }

    #[test]
    fn visible_children_respect_padding() {
        let (mut layout, mut host) = scrolled_grid();
        layout.scroll_by(25, &mut host);
        // Line 0 now spans -25..25; line 4 spans 175..225.
        let first = layout.first_visible_child(&host, Visibility::Complete);
        assert_eq!(first.map(|v| host.position_of(v)), Some(3));
        let first = layout.first_visible_child(&host, Visibility::Partial);
        assert_eq!(first.map(|v| host.position_of(v)), Some(0));
        let last = layout.last_visible_child(&host, Visibility::Complete);
        assert_eq!(last.map(|v| host.position_of(v)), Some(11));
        let last = layout.last_visible_child(&host, Visibility::Partial);
        assert_eq!(last.map(|v| host.position_of(v)), Some(14));
    }

    #[test]
    fn smooth_metrics_extrapolate_pixels() {
        let (mut layout, mut host) = scrolled_grid();
        layout.scroll_by(60, &mut host);
        // Lines now start at -10, 40, 90, 140, 190; the first partially
        // visible child is item 3 (-10..40), the last is item 17 (190..240).
        // 15 items cover 250px.
        assert_eq!(layout.compute_scroll_offset(&host), 3 * 250 / 15 + 10);
        assert_eq!(layout.compute_scroll_extent(&host), 200);
        assert_eq!(layout.compute_scroll_range(&host), 250 * 30 / 15);
    }

    #[test]
    fn item_metrics_count_completely_visible_items() {
        let (mut layout, mut host) = scrolled_grid();
        layout.set_smooth_scrollbar(false);
        layout.scroll_by(60, &mut host);
        // Completely visible: items 6..=14 (lines 40..90 through 140..190).
        assert_eq!(layout.compute_scroll_offset(&host), 6);
        assert_eq!(layout.compute_scroll_extent(&host), 9);
        assert_eq!(layout.compute_scroll_range(&host), 30);
    }
}
