//! Record a synthetic MHT scenario to a Rerun file.
//!
//! Three targets move on straight lines for a few scans; the final global
//! hypothesis is drawn with its traces, current positions, unassigned
//! detections and the last scan's reports.
//!
//! Run with: cargo run --example render_hypothesis --features visualization -- [output.rrd]
//! View with: rerun output.rrd
//! Set RUST_LOG=debug to see every plotting call.

use tracing::info;
use tracing_subscriber::EnvFilter;

use mht_plot_rs::visualization::DEFAULT_APP_ID;
use mht_plot_rs::{
    plot, GaussianEstimate, GlobalHypothesis, PlotConfig, Plotter, Report, RerunVisualizer, Scan,
    TrackHistory,
};

const SCANS: usize = 8;

/// Constant-velocity estimate whose positional uncertainty shrinks with every scan.
fn estimate(x: f64, y: f64, vx: f64, vy: f64, scan: usize) -> mht_plot_rs::Result<GaussianEstimate> {
    let s = 4.0 / (1.0 + scan as f64);
    let c = 0.4 * s * (vx * vy).signum();
    GaussianEstimate::from_slices(
        &[x, y, vx, vy],
        &[
            s, c, 0.0, 0.0, //
            c, 0.6 * s, 0.0, 0.0, //
            0.0, 0.0, 0.5, 0.0, //
            0.0, 0.0, 0.0, 0.5,
        ],
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hypothesis.rrd".to_string());

    let targets = [(0.0, 0.0, 2.0, 1.0), (0.0, 20.0, 1.5, -1.5), (10.0, -5.0, 0.0, 2.5)];

    let mut tracks = Vec::with_capacity(targets.len());
    for &(x0, y0, vx, vy) in &targets {
        let states = (0..SCANS)
            .map(|k| estimate(x0 + vx * k as f64, y0 + vy * k as f64, vx, vy, k))
            .collect::<mht_plot_rs::Result<Vec<_>>>()?;
        tracks.push(TrackHistory::new(states)?);
    }

    let last = (SCANS - 1) as f64;
    let mut reports: Vec<Report> = targets
        .iter()
        .map(|&(x0, y0, vx, vy)| Report::at(x0 + vx * last + 0.3, y0 + vy * last - 0.2))
        .collect();
    let clutter = vec![Report::at(4.0, 12.0), Report::at(18.0, 2.0)];
    reports.extend(clutter.iter().cloned());

    let hypothesis = GlobalHypothesis::new(tracks, clutter);
    let scan = Scan::new(reports);

    let plotter = Plotter::new(PlotConfig::with_n_std(2.0))?;
    let mut viz = RerunVisualizer::new_to_file(DEFAULT_APP_ID, &output)?;
    viz.gca()
        .set_title(format!("Global hypothesis after {} scans", SCANS))
        .set_xlabel("x [m]")
        .set_ylabel("y [m]");

    plotter.plot_hypothesis_trace(&mut viz, &hypothesis, 0, true)?;
    plotter.plot_hypothesis(&mut viz, &hypothesis, 0, false, true)?;
    plot::plot_scan(&mut viz, &scan)?;

    let markers = viz.gca().marker_count();
    let artists = viz.flush()?;
    info!(artists, markers, "recorded {}", output);

    Ok(())
}
