use ai_coursework::pente::{AlphaBeta, Board, PlayerConfig};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(7777);
    [4, 8, 16, 24, 32].iter().map(|&n| Board::new().with_random_stones(&mut rng, n)).collect()
}

fn bench_alpha_beta(c: &mut Criterion) {
    let boards = corpus();

    let mut full = AlphaBeta::new();
    c.bench_function("alpha_beta/depth1_full", |bch| {
        bch.iter(|| {
            let mut acc = 0usize;
            for b in &boards {
                let mut b = b.clone();
                acc ^= full.best_move(&mut b).map(|m| m.row * 19 + m.col).unwrap_or(0);
            }
            black_box(acc)
        })
    });

    let cfg = PlayerConfig { depth: 2, candidate_radius: Some(1), ..Default::default() };
    let mut narrow = AlphaBeta::with_config(cfg);
    c.bench_function("alpha_beta/depth2_radius1", |bch| {
        bch.iter(|| {
            let mut acc = 0.0;
            for b in &boards {
                let mut b = b.clone();
                acc += narrow.state_value(&mut b, 2);
            }
            black_box(acc)
        })
    });
}

criterion_group!(alpha_beta, bench_alpha_beta);
criterion_main!(alpha_beta);
