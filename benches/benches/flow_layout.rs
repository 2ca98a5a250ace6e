// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_flow_layout::{
    FlowLayout, HeadlessHost, Insets, LookBehind, Orientation, Size, Viewport,
};

/// Items with a repeating mix of widths so lines hold a varying number of items.
fn tag_cloud(len: usize) -> HeadlessHost {
    let mut host = HeadlessHost::new(Viewport::new(Size::new(360, 640), Insets::uniform(8)));
    for index in 0..len {
        let width = 40 + (index * 37 % 120) as i32;
        let height = 24 + (index % 3) as i32 * 4;
        host.push_item(Size::new(width, height));
    }
    host
}

fn laid_out(len: usize, look_behind: usize) -> (FlowLayout, HeadlessHost) {
    let mut host = tag_cloud(len);
    let mut layout = FlowLayout::new(Orientation::Vertical);
    layout
        .set_look_behind(look_behind)
        .expect("layout is idle");
    layout.layout_children(&mut host);
    (layout, host)
}

fn bench_full_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow_layout/layout_children");
    for len in [100_usize, 10_000] {
        let (layout, host) = laid_out(len, LookBehind::NONE);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter_batched(
                || (layout.clone(), host.clone()),
                |(mut layout, mut host)| {
                    layout.layout_children(&mut host);
                    black_box(layout.lines().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow_layout/scroll");
    let steps = 200;
    group.throughput(Throughput::Elements(steps as u64 * 2));

    // Scroll down and back up again in fixed steps.
    for (name, look_behind) in [
        ("look_behind_none", LookBehind::NONE),
        ("look_behind_8", 8),
        ("look_behind_exact", LookBehind::EXACT),
    ] {
        let (layout, host) = laid_out(10_000, look_behind);
        group.bench_function(name, |b| {
            b.iter_batched(
                || (layout.clone(), host.clone()),
                |(mut layout, mut host)| {
                    for _ in 0..steps {
                        black_box(layout.scroll_by(48, &mut host));
                    }
                    for _ in 0..steps {
                        black_box(layout.scroll_by(-48, &mut host));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_layout, bench_scroll);
criterion_main!(benches);
