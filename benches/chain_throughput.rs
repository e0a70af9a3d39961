use brainstorm::{Aggregator, CollectorSink, Debouncer, Handle, Selector, attach};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Synthetic stream where every `period`-th item is selected.
fn stream(len: usize, period: usize) -> Vec<usize> {
    (0..len).map(|i| if i % period == 0 { 0 } else { i }).collect()
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_debounce_aggregate");

    for period in [2usize, 5, 20] {
        let input = stream(10_000, period);
        group.bench_with_input(BenchmarkId::from_parameter(period), &input, |b, input| {
            b.iter(|| {
                let head = Handle::new(Selector::new(|n: &usize| *n == 0));
                let blocks = CollectorSink::new();
                attach(
                    &head.compose(Debouncer::new(3)).compose(Aggregator::new()),
                    blocks.clone(),
                );
                for &n in input {
                    head.call(n);
                }
                head.flush();
                black_box(blocks.drain())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chain);
criterion_main!(benches);
