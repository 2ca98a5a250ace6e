// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated scrolling towards an item.
//!
//! The host drives a [`SmoothScroller`] one step per frame. While the target is
//! not attached, each step seeks towards it along the scroll vector; once it is
//! attached, a final step snaps it to the edge it approached from.

use crate::axis::Orientation;
use crate::flow::FlowLayout;
use crate::host::LayoutHost;

/// Direction in which content must scroll to reveal a position.
///
/// Exactly one component is non-zero, and it is `-1` or `1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScrollVector {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl ScrollVector {
    /// The component along the main axis of `orientation`.
    #[must_use]
    pub const fn main(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}

impl FlowLayout {
    /// Direction towards `target` relative to the first attached child.
    ///
    /// Returns `None` when nothing is attached.
    #[must_use]
    pub fn compute_scroll_vector_for_position<H: LayoutHost>(
        &self,
        target: usize,
        host: &H,
    ) -> Option<ScrollVector> {
        let first = host.child_at(0)?;
        let direction = if target < host.position_of(first) { -1 } else { 1 };
        Some(match self.config.orientation {
            Orientation::Horizontal => ScrollVector { x: direction, y: 0 },
            Orientation::Vertical => ScrollVector { x: 0, y: direction },
        })
    }

    /// Starts an animated scroll towards `position`.
    #[must_use]
    pub fn smooth_scroll_to_position(&self, position: usize) -> SmoothScroller {
        SmoothScroller::new(position)
    }
}

/// Outcome of one [`SmoothScroller::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SmoothScrollStep {
    /// The target is not attached yet; content scrolled towards it.
    Seeking {
        /// Pixels scrolled this step.
        scrolled: i32,
    },
    /// The target is attached and snapped into place.
    Finished {
        /// Pixels scrolled this step.
        scrolled: i32,
    },
    /// The target is out of range or cannot be reached.
    Aborted,
}

/// Frame-by-frame scroll towards a target position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SmoothScroller {
    target: usize,
    seek_distance: i32,
    /// Main-axis direction of the first step; decides the snap edge.
    approach: Option<i32>,
    done: bool,
}

impl SmoothScroller {
    /// Pixels scrolled per seeking step unless overridden.
    pub const DEFAULT_SEEK_DISTANCE: i32 = 10_000;

    /// A scroller towards `target` with the default seek distance.
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self {
            target,
            seek_distance: Self::DEFAULT_SEEK_DISTANCE,
            approach: None,
            done: false,
        }
    }

    /// Sets the pixels scrolled per seeking step; clamped to at least 1.
    #[must_use]
    pub const fn with_seek_distance(mut self, distance: i32) -> Self {
        self.seek_distance = if distance < 1 { 1 } else { distance };
        self
    }

    /// The target adapter position.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Whether the scroller has finished or aborted.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Advances the scroll by one frame.
    pub fn step<H: LayoutHost>(&mut self, layout: &mut FlowLayout, host: &mut H) -> SmoothScrollStep {
        if self.done {
            return SmoothScrollStep::Finished { scrolled: 0 };
        }
        let _span = tracing::trace_span!("smooth_scroll_step", target = self.target).entered();
        if self.target >= layout.content_count(host) {
            return self.abort();
        }
        let orientation = layout.orientation();
        let Some(vector) = layout.compute_scroll_vector_for_position(self.target, host) else {
            return self.abort();
        };
        let approach = *self.approach.get_or_insert(vector.main(orientation));

        if let Some(view) = self.attached_target(host) {
            let viewport = host.viewport();
            let bounds = host.bounds(view);
            let axis = layout.axis;
            let distance = if approach > 0 {
                axis.bounds_end(&bounds)
                    - (axis.main_extent(&viewport) - axis.main_padding_end(&viewport))
            } else {
                axis.bounds_start(&bounds) - axis.main_padding_start(&viewport)
            };
            let scrolled = layout.scroll_by(distance, host);
            self.done = true;
            tracing::debug!(target = self.target, scrolled, "smooth scroll snapped");
            return SmoothScrollStep::Finished { scrolled };
        }

        let scrolled = layout.scroll_by(vector.main(orientation) * self.seek_distance, host);
        if scrolled == 0 {
            return self.abort();
        }
        SmoothScrollStep::Seeking { scrolled }
    }

    fn attached_target<H: LayoutHost>(&self, host: &H) -> Option<H::View> {
        (0..host.child_count())
            .filter_map(|index| host.child_at(index))
            .find(|&view| host.position_of(view) == self.target)
    }

    fn abort(&mut self) -> SmoothScrollStep {
        tracing::debug!(target = self.target, "smooth scroll aborted");
        self.done = true;
        SmoothScrollStep::Aborted
    }
}
