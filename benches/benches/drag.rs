// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use monomap_event_state::drag::RackDrag;
use monomap_inventory::NewRack;
use monomap_inventory::memory::MemoryInventory;
use monomap_layout::{CanvasBounds, RackLayoutStore};
use monomap_view2d::{CanvasViewport, PointerButton, to_canvas};

fn loaded_store(racks: usize) -> RackLayoutStore {
    let backend = MemoryInventory::new();
    for n in 0..racks {
        let x = (n % 20) as f64 * 40.0;
        let y = (n / 20 % 14) as f64 * 40.0;
        backend.seed_rack(NewRack::with_frame(
            format!("R{n}"),
            Rect::new(x, y, x + 40.0, y + 40.0),
        ));
    }
    let mut store = RackLayoutStore::new(CanvasBounds::default());
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(store.load(&backend))
        .unwrap();
    store
}

fn bench_drag_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag/moves");

    // One pointer frame costs a clamp plus a lookup of the dragged rack; the
    // lookup is linear in the number of racks and the last one is the worst case.
    for racks in [16usize, 256, 4_096] {
        let mut store = loaded_store(racks);
        let last = store.list()[racks - 1].clone();
        let path: Vec<Point> = (0..256)
            .map(|i| {
                let t = f64::from(i);
                Point::new(t * 7.0 - 400.0, 600.0 - t * 5.0)
            })
            .collect();
        group.throughput(Throughput::Elements(path.len() as u64));

        group.bench_function(BenchmarkId::from_parameter(racks), |b| {
            b.iter(|| {
                let mut drag = RackDrag::default();
                drag.press(&last, PointerButton::Primary, last.origin() + Vec2::new(5.0, 5.0));
                for &pointer in &path {
                    black_box(drag.drag_to(&mut store, pointer));
                }
                black_box(drag.release(&store))
            });
        });
    }

    group.finish();
}

fn bench_to_canvas(c: &mut Criterion) {
    let mut viewport = CanvasViewport::new(Size::new(900.0, 600.0));
    viewport.set_screen_origin(Some(Point::new(120.0, 64.0)));
    viewport.set_zoom(1.5);
    let points: Vec<Point> = (0..1_024)
        .map(|i| Point::new(f64::from(i % 97) * 13.0, f64::from(i % 61) * 11.0))
        .collect();

    let mut group = c.benchmark_group("drag/to_canvas");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("viewport", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(to_canvas(&viewport, p));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_drag_moves, bench_to_canvas);
criterion_main!(benches);
