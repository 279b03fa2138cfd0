//! Benchmarks for tone rendering and timeline assembly.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tactus_core::{TimingSpec, ToneSpec, TrialRenderer};

fn bench_render_trial(c: &mut Criterion) {
    let renderer = TrialRenderer::new(48000, 5.0);
    let tone = ToneSpec {
        frequency: 440.0,
        num_harmonics: 5,
        duration_ms: 50.0,
        harmonic_factor: 0.7,
        max_amplitude: 1.0,
    };
    let timing = TimingSpec {
        isi_ms: 600.0,
        no_tones: 7,
        delta_ms: 50.0,
    };

    c.bench_function("render_trial_7x600ms", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| {
            let trial = renderer
                .render_trial(black_box(&tone), black_box(&timing), &mut rng)
                .unwrap();
            black_box(trial.samples.len())
        });
    });

    c.bench_function("render_tone_50ms", |b| {
        b.iter(|| renderer.render_tone(black_box(&tone)).unwrap());
    });
}

criterion_group!(benches, bench_render_trial);
criterion_main!(benches);
