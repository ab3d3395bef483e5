//! Plotting benchmarks using Criterion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Matrix2;

use mht_plot_rs::{
    covariance_ellipse, plot, Axes, GaussianEstimate, GlobalHypothesis, Report, Scan,
    TrackHistory,
};

/// A hypothesis with `n` tracks of `len` states each and `n` unassigned detections.
fn create_hypothesis(n: usize, len: usize) -> GlobalHypothesis {
    let tracks = (0..n)
        .map(|i| {
            let states = (0..len)
                .map(|k| {
                    let x = (i * 10) as f64 + k as f64;
                    let y = (i * 5) as f64 + 0.5 * k as f64;
                    GaussianEstimate::from_slices(&[x, y], &[3.0, 1.0, 1.0, 2.0]).expect("valid state")
                })
                .collect();
            TrackHistory::new(states).expect("non-empty trace")
        })
        .collect();
    let unassigned = (0..n).map(|i| Report::at(i as f64, -(i as f64))).collect();
    GlobalHypothesis::new(tracks, unassigned)
}

fn create_scan(n: usize) -> Scan {
    Scan::new((0..n).map(|i| Report::at(i as f64 * 0.7, i as f64 * 1.3)).collect())
}

fn benchmark_covariance_ellipse(c: &mut Criterion) {
    let cov = Matrix2::new(3.0, 1.0, 1.0, 2.0);

    c.bench_function("covariance_ellipse", |b| {
        b.iter(|| covariance_ellipse(black_box(&cov), [0.0, 0.0], 2.0))
    });
}

fn benchmark_plot_hypothesis_trace_10_tracks(c: &mut Criterion) {
    let gh = create_hypothesis(10, 20);

    c.bench_function("plot_hypothesis_trace_10_tracks", |b| {
        b.iter(|| {
            let mut ax = Axes::new();
            plot::plot_hypothesis_trace(&mut ax, black_box(&gh), 0, true).expect("plot");
            ax
        })
    });
}

fn benchmark_plot_hypothesis_50_tracks(c: &mut Criterion) {
    let gh = create_hypothesis(50, 1);

    c.bench_function("plot_hypothesis_50_tracks", |b| {
        b.iter(|| {
            let mut ax = Axes::new();
            plot::plot_hypothesis(&mut ax, black_box(&gh), 0, true, true).expect("plot");
            ax
        })
    });
}

fn benchmark_outline_200_ellipses(c: &mut Criterion) {
    let gh = create_hypothesis(10, 20);
    let scan = create_scan(100);
    let mut ax = Axes::new();
    plot::plot_hypothesis_trace(&mut ax, &gh, 0, true).expect("plot");
    plot::plot_scan(&mut ax, &scan).expect("plot");

    c.bench_function("outline_200_ellipses", |b| {
        b.iter(|| {
            let ax = black_box(&ax);
            ax.draw_order().len()
                + ax.ellipses().iter().map(|e| e.geometry.boundary(72).len()).sum::<usize>()
                + ax.lines().iter().map(|l| l.segments().len()).sum::<usize>()
        })
    });
}

criterion_group!(
    benches,
    benchmark_covariance_ellipse,
    benchmark_plot_hypothesis_trace_10_tracks,
    benchmark_plot_hypothesis_50_tracks,
    benchmark_outline_200_ellipses,
);
criterion_main!(benches);
