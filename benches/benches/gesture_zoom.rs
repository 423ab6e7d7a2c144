// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Size, Vec2};
use std::time::Duration;
use understory_gesture_zoom::{BoundsPolicy, GestureZoom, ZoomEvent};

const VIEWPORT: Size = Size::new(1170.0, 2532.0);

/// A simultaneous pinch+pan lifecycle with `steps` change events each.
fn scripted_gesture(steps: usize) -> Vec<ZoomEvent> {
    let focal = Point::new(400.0, 900.0);
    let mut events = vec![ZoomEvent::PinchBegin { focal }];
    for i in 0..steps {
        let t = i as f64 / steps as f64;
        events.push(ZoomEvent::PinchChange {
            scale: 1.0 + 4.0 * t,
            focal,
        });
        events.push(ZoomEvent::PanChange {
            translation: Vec2::new(900.0 * t, -300.0 * t),
            pointers: 2,
        });
    }
    events.push(ZoomEvent::PanEnd);
    events.push(ZoomEvent::PinchEnd);
    events
}

fn bench_gesture_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_zoom/events");

    for steps in [16usize, 128, 1_024] {
        let events = scripted_gesture(steps);
        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(steps), &events, |b, events| {
            b.iter_batched(
                || GestureZoom::new(VIEWPORT),
                |mut zoom| {
                    for &event in events {
                        zoom.handle(event);
                    }
                    black_box(zoom.current_transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_snap_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_zoom/snap_back");
    let events = scripted_gesture(32);

    for frame_ms in [8u64, 16, 33] {
        let dt = Duration::from_millis(frame_ms);
        group.bench_with_input(BenchmarkId::new("settle", frame_ms), &dt, |b, &dt| {
            b.iter_batched(
                || {
                    let mut zoom = GestureZoom::new(VIEWPORT);
                    for &event in &events {
                        zoom.handle(event);
                    }
                    zoom
                },
                |mut zoom| {
                    let mut frames = 0_u32;
                    while zoom.tick(dt) {
                        frames += 1;
                    }
                    black_box(frames);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    c.bench_function("gesture_zoom/bounds_rest_target", |b| {
        b.iter(|| {
            BoundsPolicy::rest_target(
                black_box(2.5),
                black_box(Vec2::new(1_200.0, -40.0)),
                black_box(VIEWPORT),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_gesture_events,
    bench_snap_back,
    bench_bounds
);
criterion_main!(benches);
