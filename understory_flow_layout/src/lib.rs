// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_flow_layout --heading-base-level=0

//! Understory Flow Layout: wrapped-line layout for virtualized list views.
//!
//! This crate arranges a sequence of variably-sized items into lines that wrap
//! when the cross axis is full, like words in a paragraph, and scrolls them
//! incrementally along the main axis. Only lines intersecting the viewport are
//! realized; views scrolled out are handed back to the host for reuse.
//!
//! The core concepts are:
//!
//! - [`FlowLayout`]: the engine. It owns line bookkeeping and the scroll
//!   [`ScrollAnchor`], performs full layout passes and incremental scrolls, and
//!   validates configuration changes.
//! - [`LayoutHost`]: the toolkit seam. The host owns views, their pool, and
//!   their measurement; the engine only orders and positions them.
//! - [`Orientation`] and [`Gravity`]: which axis scrolls and how lines and
//!   items are aligned. [`AxisAdapter`] maps both onto main/cross coordinates.
//! - Line limits: `max_lines` with an optional trailing ellipsis item that
//!   summarizes hidden content ("+N more"), see [`FlowLayout::set_max_lines`].
//! - Look-behind: re-measuring earlier items when scrolling backwards so lines
//!   split exactly as they did going forwards, see [`LookBehind`].
//!
//! [`HeadlessHost`] is a complete in-memory host, useful for tests and as a
//! reference for toolkit bindings.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_flow_layout::{
//!     FlowLayout, HeadlessHost, Insets, LayoutHost, Orientation, Size, Viewport,
//! };
//!
//! // A 300x200 viewport with 30 items of 100x50: three per line.
//! let mut host = HeadlessHost::new(Viewport::new(Size::new(300, 200), Insets::ZERO));
//! host.push_items(30, Size::new(100, 50));
//!
//! let mut layout = FlowLayout::new(Orientation::Vertical);
//! layout.layout_children(&mut host);
//! assert_eq!(layout.lines()[0].item_count(), 3);
//!
//! // Scrolling reports how far content actually moved.
//! let scrolled = layout.scroll_by(75, &mut host);
//! assert_eq!(scrolled, 75);
//! assert_eq!(host.position_of(host.child_at(0).unwrap()), 3);
//!
//! // The anchor is all that needs persisting.
//! let saved = layout.save_state();
//! let mut restored = FlowLayout::new(Orientation::Vertical);
//! restored.restore_state(saved);
//! restored.layout_children(&mut host);
//! assert_eq!(restored.lines()[0].start(), -25);
//! ```
//!
//! ## Features
//!
//! - `std` (default): builds dependencies with their standard library support.
//! - `serde`: serialization for [`FlowConfig`], [`ScrollAnchor`], and the
//!   types they contain.
//!
//! Passes emit `tracing` spans and events; install any subscriber to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod axis;
mod config;
mod error;
mod flow;
mod geometry;
mod gravity;
mod headless;
mod host;
mod line;
mod scrollbar;
mod smooth;

pub use anchor::ScrollAnchor;
pub use axis::{Axis, AxisAdapter, Orientation};
pub use config::{FlowConfig, LookBehind};
pub use error::{ConfigError, SpacingKind};
pub use flow::{FlowLayout, LayoutRequests, LayoutState};
pub use geometry::{Dimension, Insets, LayoutParams, MeasureMode, Measured, Rect, Size, Viewport};
pub use gravity::{Align, Gravity, LayoutDirection};
pub use headless::{HeadlessHost, ItemSpec, ViewId};
pub use host::{AttachAt, Item, LayoutHost};
pub use line::Line;
pub use scrollbar::Visibility;
pub use smooth::{ScrollVector, SmoothScrollStep, SmoothScroller};
