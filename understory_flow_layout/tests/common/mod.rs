// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use understory_flow_layout::{
    FlowLayout, HeadlessHost, Insets, LayoutHost, Line, Orientation, Size, Viewport,
};

/// Installs a `tracing` subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A host with `count` equal items in a viewport without padding.
pub fn uniform_host(viewport: Size, count: usize, item: Size) -> HeadlessHost {
    let mut host = HeadlessHost::new(Viewport::new(viewport, Insets::ZERO));
    host.push_items(count, item);
    host
}

/// A vertical layout, laid out once against `host`.
pub fn laid_out(host: &mut HeadlessHost) -> FlowLayout {
    let mut layout = FlowLayout::new(Orientation::Vertical);
    layout.layout_children(host);
    layout
}

/// Item count of every current line.
pub fn line_counts(layout: &FlowLayout) -> Vec<usize> {
    layout.lines().iter().map(Line::item_count).collect()
}

/// Adapter position of the first item of every line.
pub fn line_starts(layout: &FlowLayout, host: &HeadlessHost) -> Vec<usize> {
    let mut child = 0;
    let mut starts = Vec::new();
    for line in layout.lines() {
        if let Some(view) = host.child_at(child) {
            starts.push(host.position_of(view));
        }
        child += line.item_count();
    }
    starts
}

/// Adapter position of the first attached child.
pub fn first_position(host: &HeadlessHost) -> Option<usize> {
    host.child_at(0).map(|view| host.position_of(view))
}

/// Checks that lines and attached children agree.
pub fn assert_consistent(layout: &FlowLayout, host: &HeadlessHost) {
    let lines = layout.lines();
    let total: usize = lines.iter().map(Line::item_count).sum();
    assert_eq!(total, host.child_count(), "line counts must cover children");

    let positions: Vec<usize> = host
        .attached_positions()
        .into_iter()
        .filter(|&position| position < host.content_len())
        .collect();
    for pair in positions.windows(2) {
        assert_eq!(pair[0] + 1, pair[1], "children must be contiguous: {positions:?}");
    }
    for pair in lines.windows(2) {
        assert!(pair[0].end() <= pair[1].start(), "lines overlap: {lines:?}");
    }
    for line in lines {
        assert!(line.item_count() >= 1, "empty line in {lines:?}");
        assert!(line.item_count() <= layout.max_items_per_line());
    }
}
