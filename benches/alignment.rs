//! Performance benchmarks for track alignment.
//!
//! Run with: `cargo bench`
//!
//! Compares the full score matrix against the two-row similarity variant, and
//! measures how redistribution spacing trades matrix size for fidelity.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use track_aligner::{align, alignment_similarity, compare_tracks, AlignConfig, GpsPoint};

/// Generate a gently winding track of `points` samples roughly `step_m` apart.
///
/// `phase` shifts the lateral wobble so two tracks follow the same corridor
/// without sharing coordinates.
fn synthetic_track(points: usize, step_m: f64, phase: f64) -> Vec<GpsPoint> {
    let step_deg = step_m / 111_000.0;
    (0..points)
        .map(|i| {
            let t = i as f64;
            let wobble = (t * 0.05 + phase).sin() * 3.0 * step_deg;
            GpsPoint::new(46.5 + t * step_deg, 6.6 + wobble)
        })
        .collect()
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");

    for size in [100, 500, 1000] {
        let track1 = synthetic_track(size, 5.0, 0.0);
        let track2 = synthetic_track(size * 4 / 5, 6.0, 0.3);

        group.bench_with_input(BenchmarkId::new("full_matrix", size), &size, |b, _| {
            b.iter(|| align(black_box(&track1), black_box(&track2), -10.0, false))
        });

        group.bench_with_input(BenchmarkId::new("two_rows", size), &size, |b, _| {
            b.iter(|| alignment_similarity(black_box(&track1), black_box(&track2), -10.0, false))
        });
    }

    group.finish();
}

fn bench_redistribution_spacing(c: &mut Criterion) {
    let track1 = synthetic_track(2000, 2.0, 0.0);
    let track2 = synthetic_track(1500, 2.7, 0.3);

    let mut group = c.benchmark_group("compare_with_spacing");
    group.sample_size(20);

    for spacing in [5.0, 10.0, 25.0] {
        let config = AlignConfig {
            redistribute_spacing: Some(spacing),
            ..AlignConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}m", spacing)),
            &config,
            |b, config| b.iter(|| compare_tracks(black_box(&track1), black_box(&track2), config)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_align, bench_redistribution_spacing);
criterion_main!(benches);
