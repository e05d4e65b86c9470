//! Benchmark: `SelectionStore::select_range` during long drags.
//!
//! Run with: `cargo bench -p dragselect-core --bench select_range_bench`
//!
//! Simulates a finger sweeping down and back up a large list, one item per
//! move event, the way the drag controller feeds the store.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dragselect_core::{SelectionAdapter, SelectionStore};

struct Flat(usize);

impl SelectionAdapter for Flat {
    fn item_count(&self) -> usize {
        self.0
    }
}

fn sweep(store: &mut SelectionStore<Flat>, anchor: usize, span: usize) {
    let mut min = anchor;
    let mut max = anchor;
    for current in (anchor + 1..=anchor + span).chain((anchor..anchor + span).rev()) {
        min = min.min(current);
        max = max.max(current);
        store.select_range(anchor, current, min, max);
        if current == anchor {
            min = anchor;
            max = anchor;
        }
    }
}

fn bench_select_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_range/sweep");
    for span in [16usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(span), &span, |b, &span| {
            b.iter(|| {
                let mut store = SelectionStore::new(Flat(span * 2 + 1));
                store.set_selected(0, true);
                sweep(&mut store, 0, span);
                black_box(store.selected_count())
            });
        });
    }
    group.finish();
}

fn bench_select_all(c: &mut Criterion) {
    c.bench_function("select_all/10k", |b| {
        let mut store = SelectionStore::new(Flat(10_000));
        b.iter(|| {
            store.select_all();
            black_box(store.selected_count())
        });
    });
}

criterion_group!(benches, bench_select_range, bench_select_all);
criterion_main!(benches);
