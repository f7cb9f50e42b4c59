// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use monomap_inventory::{RackHits, RackId};
use monomap_search::{HighlightSet, SearchHighlight, Submission};

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight/replace_with");

    // De-duplication scans the accumulated set, so replacing is quadratic in
    // the hit count. Search hits are one id per matching item, so duplicates
    // are common; half of the input here repeats an earlier id.
    for len in [8usize, 64, 512] {
        let hits: Vec<RackId> = (0..len as i64).map(|i| RackId(i / 2)).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &hits, |b, hits| {
            b.iter_batched(
                HighlightSet::new,
                |mut set| {
                    set.replace_with(hits.iter().copied());
                    black_box(set);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_unchanged_resolve(c: &mut Criterion) {
    let rack_ids: Vec<RackId> = (0..64).map(RackId).collect();
    let mut search = SearchHighlight::new();
    if let Submission::Pending(ticket) = search.submit("cable") {
        search.resolve(ticket, Ok(RackHits { rack_ids: rack_ids.clone() }));
    }

    // Re-running the same query must not bump the revision; this measures the
    // comparison path the renderer relies on to skip repaints.
    c.bench_function("highlight/resolve_unchanged", |b| {
        b.iter(|| {
            if let Submission::Pending(ticket) = search.submit("cable") {
                black_box(search.resolve(
                    ticket,
                    Ok(RackHits {
                        rack_ids: rack_ids.clone(),
                    }),
                ));
            }
            black_box(search.highlight().revision())
        });
    });
}

criterion_group!(benches, bench_replace, bench_unchanged_resolve);
criterion_main!(benches);
