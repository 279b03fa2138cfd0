//! Benchmarks for the constrained soundtrack sampler.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tactus_sequence::{SoundtrackSpec, generate_soundtrack};

fn bench_generate(c: &mut Criterion) {
    let pool: Vec<u32> = (0..84).collect();
    let spec = SoundtrackSpec {
        sequence_len: 30,
        sequence_no: 5,
        rep_prob: 0.05,
    };

    c.bench_function("soundtrack_84x150", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| {
            let track = generate_soundtrack(black_box(&pool), black_box(&spec), &mut rng).unwrap();
            black_box(track.n_reps())
        });
    });

    let small_pool: Vec<u32> = (0..10).collect();
    let small_spec = SoundtrackSpec {
        sequence_len: 20,
        sequence_no: 5,
        rep_prob: 0.05,
    };
    c.bench_function("soundtrack_10x100", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| {
            let track =
                generate_soundtrack(black_box(&small_pool), black_box(&small_spec), &mut rng)
                    .unwrap();
            black_box(track.n_reps())
        });
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
