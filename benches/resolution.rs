use ai_coursework::resolution::{self, ProverConfig, ResolutionInput};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A chain of `n` rules `Step{i}(x) => Step{i+1}(x)` with the query at the end.
fn chain(n: usize) -> ResolutionInput {
    let mut text = format!("Step{n}(Guest)\n{}\nStep0(Guest)\nTable(Window)\n", n + 2);
    for i in 0..n {
        text.push_str(&format!("Step{i}(x) & Table(y) => Step{}(x)\n", i + 1));
    }
    text.parse().unwrap_or_else(|e| panic!("bench corpus: {e}"))
}

fn bench_resolution(c: &mut Criterion) {
    let cfg = ProverConfig::default();
    for n in [5, 20] {
        let input = chain(n);
        c.bench_function(&format!("resolution/chain{n}"), |bch| {
            bch.iter(|| black_box(resolution::answer(black_box(&input), &cfg)))
        });
    }
}

criterion_group!(resolution_benches, bench_resolution);
criterion_main!(resolution_benches);
