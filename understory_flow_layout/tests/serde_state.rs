// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisting the scroll anchor and configuration with `serde`.

mod common;

use common::{laid_out, uniform_host};
use understory_flow_layout::{
    FlowConfig, FlowLayout, Gravity, LookBehind, Orientation, ScrollAnchor, Size,
};

#[test]
fn anchor_survives_json() {
    let mut host = uniform_host(Size::new(300, 200), 30, Size::new(100, 50));
    let mut layout = laid_out(&mut host);
    layout.scroll_by(130, &mut host);
    let saved = layout.save_state();

    let json = serde_json::to_string(&saved).unwrap();
    assert_eq!(json, r#"{"index":6,"offset":-30}"#);
    let loaded: ScrollAnchor = serde_json::from_str(&json).unwrap();

    let mut restored = FlowLayout::new(Orientation::Vertical);
    restored.restore_state(loaded);
    restored.layout_children(&mut host);
    assert_eq!(restored.lines()[0], layout.lines()[0]);
}

#[test]
fn unknown_offset_is_null() {
    let json = serde_json::to_string(&ScrollAnchor::at_index(4)).unwrap();
    assert_eq!(json, r#"{"index":4,"offset":null}"#);
}

#[test]
fn partial_config_uses_defaults() {
    let config: FlowConfig =
        serde_json::from_str(r#"{"orientation":"horizontal","max_lines":3,"ellipsize":true}"#)
            .unwrap();
    assert_eq!(config.orientation, Orientation::Horizontal);
    assert_eq!(config.max_lines, 3);
    assert!(config.ellipsize);
    assert_eq!(config.max_items_per_line, usize::MAX);
    assert_eq!(config.look_behind, LookBehind::NONE);
    assert_eq!(config.gravity, Gravity::default());
    assert!(FlowLayout::from_config(config).is_ok());
}

#[test]
fn config_round_trips() {
    let config = FlowConfig {
        gravity: Gravity::CENTER | Gravity::BOTTOM,
        item_spacing: 4,
        ..FlowConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: FlowConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
