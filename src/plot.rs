//! Plotting helpers for MHT output: traces, hypotheses, covariance ellipses, scans.
//!
//! All operations only read the tracker objects they are given and add
//! artists to the supplied canvas. Any error aborts the operation; artists
//! added before the failure stay on the canvas.

use nalgebra::DMatrix;
use tracing::debug;

use crate::canvas::{Canvas, Ellipse, ScatterPoint};
use crate::config::PlotConfig;
use crate::ellipse::covariance_ellipse;
use crate::internal::numpy::{component, leading_block, leading_position};
use crate::model::{HypothesisSource, Measurement, ScanSource, StateEstimate, TrackSource};
use crate::palette;
use crate::style::{LineStyle, PlotStyle};
use crate::Result;

/// Draws tracker output onto a canvas according to a [`PlotConfig`].
#[derive(Debug, Clone, Default)]
pub struct Plotter {
    config: PlotConfig,
}

impl Plotter {
    /// Create a plotter with the given configuration.
    pub fn new(config: PlotConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Plot one track's history as a starred line, colored by `color_index`.
    ///
    /// With `draw_ellipse`, every historical state also gets a translucent
    /// covariance ellipse in the same color.
    pub fn plot_trace<C, I>(&self, canvas: &mut C, trace: I, color_index: usize, draw_ellipse: bool) -> Result<()>
    where
        C: Canvas + ?Sized,
        I: IntoIterator,
        I::Item: StateEstimate,
    {
        self.plot_trace_styled(canvas, trace, color_index, draw_ellipse, &PlotStyle::default())
    }

    /// [`Self::plot_trace`] with style overrides.
    ///
    /// `color` replaces the palette color of the line, `marker` and
    /// `linestyle` restyle it; `alpha`, `facecolor` and `edgecolor` restyle
    /// the ellipses.
    pub fn plot_trace_styled<C, I>(
        &self,
        canvas: &mut C,
        trace: I,
        color_index: usize,
        draw_ellipse: bool,
        style: &PlotStyle,
    ) -> Result<()>
    where
        C: Canvas + ?Sized,
        I: IntoIterator,
        I::Item: StateEstimate,
    {
        style.validate()?;
        let color = style.color.unwrap_or_else(|| palette::color(color_index));

        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for state in trace {
            let pos = leading_position(state.mean())?;
            xs.push(pos[0]);
            ys.push(pos[1]);

            if draw_ellipse {
                let ellipse = self.plot_covariance_ellipse(canvas, state.covariance(), pos)?;
                ellipse
                    .set_alpha(style.alpha.unwrap_or(self.config.trace_ellipse_alpha))
                    .set_facecolor(style.facecolor.unwrap_or(color));
                if let Some(edge) = style.edgecolor {
                    ellipse.set_edgecolor(edge);
                }
            }
        }

        debug!(
            points = xs.len(),
            color_index,
            draw_ellipse,
            "plot_trace"
        );

        if xs.is_empty() && self.config.skip_empty {
            return Ok(());
        }

        canvas.plot(
            &xs,
            &ys,
            color,
            Some(style.marker.unwrap_or(self.config.trace_marker)),
            style.linestyle.unwrap_or(LineStyle::Solid),
        )?;
        Ok(())
    }

    /// Plot the trace of every track in a hypothesis; track `i` uses color
    /// index `i + color_seed`.
    pub fn plot_hypothesis_trace<C, H>(&self, canvas: &mut C, hypothesis: &H, color_seed: usize, draw_ellipse: bool) -> Result<()>
    where
        C: Canvas + ?Sized,
        H: HypothesisSource + ?Sized,
    {
        self.plot_hypothesis_trace_styled(canvas, hypothesis, color_seed, draw_ellipse, &PlotStyle::default())
    }

    /// [`Self::plot_hypothesis_trace`] with style overrides passed to each trace.
    pub fn plot_hypothesis_trace_styled<C, H>(
        &self,
        canvas: &mut C,
        hypothesis: &H,
        color_seed: usize,
        draw_ellipse: bool,
        style: &PlotStyle,
    ) -> Result<()>
    where
        C: Canvas + ?Sized,
        H: HypothesisSource + ?Sized,
    {
        debug!(tracks = hypothesis.tracks().len(), color_seed, "plot_hypothesis_trace");
        self.plot_traces_styled(
            canvas,
            hypothesis.tracks().iter().map(|track| track.trace()),
            color_seed,
            draw_ellipse,
            style,
        )
    }

    /// Plot several traces; trace `i` uses color index `i + color_seed`.
    ///
    /// Empty traces are accepted and follow the `skip_empty` setting.
    pub fn plot_traces<C, T>(&self, canvas: &mut C, traces: T, color_seed: usize, draw_ellipse: bool) -> Result<()>
    where
        C: Canvas + ?Sized,
        T: IntoIterator,
        T::Item: IntoIterator,
        <T::Item as IntoIterator>::Item: StateEstimate,
    {
        self.plot_traces_styled(canvas, traces, color_seed, draw_ellipse, &PlotStyle::default())
    }

    /// [`Self::plot_traces`] with style overrides passed to each trace.
    pub fn plot_traces_styled<C, T>(
        &self,
        canvas: &mut C,
        traces: T,
        color_seed: usize,
        draw_ellipse: bool,
        style: &PlotStyle,
    ) -> Result<()>
    where
        C: Canvas + ?Sized,
        T: IntoIterator,
        T::Item: IntoIterator,
        <T::Item as IntoIterator>::Item: StateEstimate,
    {
        for (i, trace) in traces.into_iter().enumerate() {
            // Indices past the palette take its last color, so saturating is exact.
            self.plot_trace_styled(canvas, trace, color_seed.saturating_add(i), draw_ellipse, style)?;
        }
        Ok(())
    }

    /// Add the `n_std` confidence ellipse (from the config) of the positional
    /// block of `covariance`, centered at `position`.
    ///
    /// Returns the added ellipse for further styling.
    pub fn plot_covariance_ellipse<'c, C>(
        &self,
        canvas: &'c mut C,
        covariance: &DMatrix<f64>,
        position: [f64; 2],
    ) -> Result<&'c mut Ellipse>
    where
        C: Canvas + ?Sized,
    {
        plot_cov_ellipse_n_std(canvas, covariance, position, self.config.n_std)
    }

    /// Plot current track positions as scatter points, colored by index.
    ///
    /// With `draw_ellipse`, each position gets its covariance ellipse; with
    /// `show_unassigned`, the hypothesis's unassigned detections are drawn as
    /// unconnected red stars.
    pub fn plot_hypothesis<C, H>(
        &self,
        canvas: &mut C,
        hypothesis: &H,
        color_seed: usize,
        draw_ellipse: bool,
        show_unassigned: bool,
    ) -> Result<()>
    where
        C: Canvas + ?Sized,
        H: HypothesisSource + ?Sized,
    {
        self.plot_hypothesis_styled(canvas, hypothesis, color_seed, draw_ellipse, show_unassigned, &PlotStyle::default())
    }

    /// [`Self::plot_hypothesis`] with style overrides for the track artists.
    ///
    /// Unassigned detections keep the configured marker and color.
    pub fn plot_hypothesis_styled<C, H>(
        &self,
        canvas: &mut C,
        hypothesis: &H,
        color_seed: usize,
        draw_ellipse: bool,
        show_unassigned: bool,
        style: &PlotStyle,
    ) -> Result<()>
    where
        C: Canvas + ?Sized,
        H: HypothesisSource + ?Sized,
    {
        style.validate()?;

        for (i, track) in hypothesis.tracks().iter().enumerate() {
            let state = track.filter();
            let pos = leading_position(state.mean())?;
            let color = style
                .facecolor
                .or(style.color)
                .unwrap_or_else(|| palette::color(color_seed.saturating_add(i)));

            let mut point = ScatterPoint::new(pos, color)
                .with_edgecolor(style.edgecolor.unwrap_or(self.config.scatter_edgecolor));
            if let Some(marker) = style.marker {
                point.marker = marker;
            }
            canvas.add_scatter(point);

            if draw_ellipse {
                self.plot_covariance_ellipse(canvas, state.covariance(), pos)?
                    .set_alpha(style.alpha.unwrap_or(self.config.hypothesis_ellipse_alpha))
                    .set_facecolor(color);
            }
        }

        let unassigned = hypothesis.unassigned();
        debug!(
            tracks = hypothesis.tracks().len(),
            unassigned = unassigned.len(),
            show_unassigned,
            "plot_hypothesis"
        );

        if show_unassigned && !(unassigned.is_empty() && self.config.skip_empty) {
            let xs = component(unassigned.iter().map(|m| m.z()), 0)?;
            let ys = component(unassigned.iter().map(|m| m.z()), 1)?;
            canvas.plot(
                &xs,
                &ys,
                self.config.unassigned_color,
                Some(self.config.unassigned_marker),
                LineStyle::None,
            )?;
        }
        Ok(())
    }

    /// Plot every report of a scan as an unconnected red plus.
    pub fn plot_scan<C, S>(&self, canvas: &mut C, scan: &S) -> Result<()>
    where
        C: Canvas + ?Sized,
        S: ScanSource + ?Sized,
    {
        self.plot_scan_styled(canvas, scan, &PlotStyle::default())
    }

    /// [`Self::plot_scan`] with style overrides.
    pub fn plot_scan_styled<C, S>(&self, canvas: &mut C, scan: &S, style: &PlotStyle) -> Result<()>
    where
        C: Canvas + ?Sized,
        S: ScanSource + ?Sized,
    {
        style.validate()?;
        let reports = scan.reports();
        debug!(reports = reports.len(), "plot_scan");

        if reports.is_empty() && self.config.skip_empty {
            return Ok(());
        }

        let xs = component(reports.iter().map(|m| m.z()), 0)?;
        let ys = component(reports.iter().map(|m| m.z()), 1)?;
        let line = canvas.plot(
            &xs,
            &ys,
            style.color.unwrap_or(self.config.report_color),
            Some(style.marker.unwrap_or(self.config.report_marker)),
            style.linestyle.unwrap_or(LineStyle::None),
        )?;
        if let Some(alpha) = style.alpha {
            line.set_alpha(alpha);
        }
        Ok(())
    }
}

/// Add the `n_std` confidence ellipse of `covariance`'s positional block.
///
/// Only the leading 2×2 block is read, so a full state covariance can be
/// passed directly.
pub fn plot_cov_ellipse_n_std<'c, C>(
    canvas: &'c mut C,
    covariance: &DMatrix<f64>,
    position: [f64; 2],
    n_std: f64,
) -> Result<&'c mut Ellipse>
where
    C: Canvas + ?Sized,
{
    let block = leading_block(covariance)?;
    let geometry = covariance_ellipse(&block, position, n_std)?;
    Ok(canvas.add_ellipse(Ellipse::new(geometry)))
}

// ============================================================================
// Free functions with the default configuration
// ============================================================================

/// [`Plotter::plot_trace`] with the default configuration.
pub fn plot_trace<C, I>(canvas: &mut C, trace: I, color_index: usize, draw_ellipse: bool) -> Result<()>
where
    C: Canvas + ?Sized,
    I: IntoIterator,
    I::Item: StateEstimate,
{
    Plotter::default().plot_trace(canvas, trace, color_index, draw_ellipse)
}

/// [`Plotter::plot_hypothesis_trace`] with the default configuration.
pub fn plot_hypothesis_trace<C, H>(canvas: &mut C, hypothesis: &H, color_seed: usize, draw_ellipse: bool) -> Result<()>
where
    C: Canvas + ?Sized,
    H: HypothesisSource + ?Sized,
{
    Plotter::default().plot_hypothesis_trace(canvas, hypothesis, color_seed, draw_ellipse)
}

/// Add a confidence ellipse; `n_std` is usually 2.
pub fn plot_covariance_ellipse<'c, C>(
    canvas: &'c mut C,
    covariance: &DMatrix<f64>,
    position: [f64; 2],
    n_std: f64,
) -> Result<&'c mut Ellipse>
where
    C: Canvas + ?Sized,
{
    plot_cov_ellipse_n_std(canvas, covariance, position, n_std)
}

/// [`Plotter::plot_hypothesis`] with the default configuration.
pub fn plot_hypothesis<C, H>(
    canvas: &mut C,
    hypothesis: &H,
    color_seed: usize,
    draw_ellipse: bool,
    show_unassigned: bool,
) -> Result<()>
where
    C: Canvas + ?Sized,
    H: HypothesisSource + ?Sized,
{
    Plotter::default().plot_hypothesis(canvas, hypothesis, color_seed, draw_ellipse, show_unassigned)
}

/// [`Plotter::plot_scan`] with the default configuration.
pub fn plot_scan<C, S>(canvas: &mut C, scan: &S) -> Result<()>
where
    C: Canvas + ?Sized,
    S: ScanSource + ?Sized,
{
    Plotter::default().plot_scan(canvas, scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Axes;
    use crate::model::{GaussianEstimate, GlobalHypothesis, Report, Scan, TrackHistory};
    use crate::style::{Color, Marker};
    use crate::Error;
    use approx::assert_relative_eq;

    fn straight_track(n: usize, y: f64) -> TrackHistory {
        let states = (0..n)
            .map(|k| GaussianEstimate::at(k as f64, y, 0.25))
            .collect();
        TrackHistory::new(states).unwrap()
    }

    #[test]
    fn test_plot_trace_one_ellipse_per_point() {
        let track = straight_track(5, 0.0);
        let mut ax = Axes::new();
        plot_trace(&mut ax, track.trace(), 3, true).unwrap();

        assert_eq!(ax.ellipses().len(), 5);
        assert_eq!(ax.lines().len(), 1);
        let line = &ax.lines()[0];
        assert_eq!(line.len(), 5);
        assert_eq!(line.marker, Some(Marker::Star));
        assert_eq!(line.color, palette::color(3));
        for e in ax.ellipses() {
            assert_eq!(e.alpha, Some(0.3));
            assert_eq!(e.facecolor, palette::color(3));
            // 2 sigma of variance 0.25 -> full width 2.
            assert_relative_eq!(e.geometry.width, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_plot_trace_without_ellipses() {
        let track = straight_track(4, 1.0);
        let mut ax = Axes::new();
        plot_trace(&mut ax, track.history(), 0, false).unwrap();

        assert!(ax.ellipses().is_empty());
        assert_eq!(ax.lines()[0].ys, vec![1.0; 4]);
    }

    #[test]
    fn test_plot_trace_empty_is_skipped() {
        let mut ax = Axes::new();
        plot_trace(&mut ax, Vec::<GaussianEstimate>::new(), 0, true).unwrap();
        assert!(ax.is_empty());

        let plotter = Plotter::new(PlotConfig { skip_empty: false, ..PlotConfig::default() }).unwrap();
        plotter.plot_trace(&mut ax, Vec::<GaussianEstimate>::new(), 0, true).unwrap();
        assert_eq!(ax.lines().len(), 1);
        assert!(ax.lines()[0].is_empty());
    }

    #[test]
    fn test_hypothesis_trace_colors_offset_by_seed() {
        let gh = GlobalHypothesis::new(vec![straight_track(2, 0.0), straight_track(3, 5.0)], Vec::new());
        let mut ax = Axes::new();
        plot_hypothesis_trace(&mut ax, &gh, 10, true).unwrap();

        assert_eq!(ax.lines().len(), 2);
        assert_eq!(ax.lines()[0].color, palette::color(10));
        assert_eq!(ax.lines()[1].color, palette::color(11));
        assert_eq!(ax.ellipses().len(), 5);
    }

    #[test]
    fn test_color_seed_at_usize_max_takes_last_color() {
        let gh = GlobalHypothesis::new(
            vec![straight_track(2, 0.0), straight_track(2, 3.0)],
            vec![Report::at(1.0, 1.0)],
        );
        let last = palette::color(palette::PALETTE_SIZE - 1);

        let mut ax = Axes::new();
        plot_hypothesis_trace(&mut ax, &gh, usize::MAX, false).unwrap();
        assert_eq!(ax.lines().len(), 2);
        assert!(ax.lines().iter().all(|l| l.color == last));

        let mut ax = Axes::new();
        plot_hypothesis(&mut ax, &gh, usize::MAX - 1, false, false).unwrap();
        assert_eq!(ax.scatter_points().len(), 2);
        assert!(ax.scatter_points().iter().all(|p| p.facecolor == last));
    }

    #[test]
    fn test_plot_traces_accepts_empty_trace() {
        let second = straight_track(3, 2.0);
        let traces: Vec<Vec<GaussianEstimate>> = vec![Vec::new(), second.history().to_vec()];
        let mut ax = Axes::new();
        Plotter::default().plot_traces(&mut ax, traces, 4, true).unwrap();

        // The empty trace draws nothing but still consumes its color index.
        assert_eq!(ax.lines().len(), 1);
        assert_eq!(ax.lines()[0].color, palette::color(5));
        assert_eq!(ax.ellipses().len(), 3);
    }

    #[test]
    fn test_plot_hypothesis_current_positions_and_unassigned() {
        let gh = GlobalHypothesis::new(
            vec![straight_track(3, 0.0), straight_track(1, 4.0)],
            vec![Report::at(9.0, 9.0), Report::at(-1.0, 2.0), Report::at(0.5, 0.5)],
        );
        let mut ax = Axes::new();
        plot_hypothesis(&mut ax, &gh, 2, true, true).unwrap();

        let points = ax.scatter_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, [2.0, 0.0]);
        assert_eq!(points[1].position, [0.0, 4.0]);
        assert_eq!(points[0].facecolor, palette::color(2));
        assert_eq!(points[0].edgecolor, Color::BLACK);

        assert_eq!(ax.ellipses().len(), 2);
        assert_eq!(ax.ellipses()[1].alpha, Some(0.5));
        assert_eq!(ax.ellipses()[1].facecolor, palette::color(3));

        let unassigned = &ax.lines()[0];
        assert_eq!(unassigned.marker_count(), 3);
        assert_eq!(unassigned.linestyle, LineStyle::None);
        assert_eq!(unassigned.color, Color::RED);
    }

    #[test]
    fn test_plot_hypothesis_hides_unassigned() {
        let gh = GlobalHypothesis::new(vec![straight_track(1, 0.0)], vec![Report::at(1.0, 1.0)]);
        let mut ax = Axes::new();
        plot_hypothesis(&mut ax, &gh, 0, false, false).unwrap();

        assert!(ax.lines().is_empty());
        assert!(ax.ellipses().is_empty());
        assert_eq!(ax.marker_count(), 1);
    }

    #[test]
    fn test_plot_scan_one_marker_per_report() {
        let scan = Scan::new((0..7).map(|i| Report::at(i as f64, -(i as f64))).collect());
        let mut ax = Axes::new();
        plot_scan(&mut ax, &scan).unwrap();

        assert_eq!(ax.marker_count(), 7);
        let line = &ax.lines()[0];
        assert_eq!(line.marker, Some(Marker::Plus));
        assert_eq!(line.linestyle, LineStyle::None);
        assert_eq!(line.color, Color::RED);
    }

    #[test]
    fn test_plot_scan_short_measurement_is_error() {
        let scan = Scan::new(vec![Report::new(nalgebra::DVector::from_vec(vec![1.0]))]);
        let mut ax = Axes::new();
        assert!(matches!(plot_scan(&mut ax, &scan), Err(Error::InvalidState(_))));
        assert!(ax.is_empty());
    }

    #[test]
    fn test_plot_covariance_ellipse_uses_leading_block() {
        let mut p = DMatrix::identity(4, 4) * 100.0;
        p[(0, 0)] = 4.0;
        p[(1, 1)] = 1.0;
        let mut ax = Axes::new();
        let e = plot_covariance_ellipse(&mut ax, &p, [1.0, 1.0], 1.0).unwrap();
        e.set_alpha(0.7);

        let stored = &ax.ellipses()[0];
        assert_relative_eq!(stored.geometry.width, 4.0, epsilon = 1e-12);
        assert_relative_eq!(stored.geometry.height, 2.0, epsilon = 1e-12);
        assert_eq!(stored.alpha, Some(0.7));
    }

    #[test]
    fn test_styled_overrides() {
        let track = straight_track(2, 0.0);
        let mut ax = Axes::new();
        let style = PlotStyle::new()
            .color(Color::BLACK)
            .alpha(0.9)
            .marker(Marker::Circle)
            .linestyle(LineStyle::Dashed)
            .edgecolor(Color::RED);
        Plotter::default()
            .plot_trace_styled(&mut ax, track.trace(), 0, true, &style)
            .unwrap();

        let line = &ax.lines()[0];
        assert_eq!(line.color, Color::BLACK);
        assert_eq!(line.marker, Some(Marker::Circle));
        assert_eq!(line.linestyle, LineStyle::Dashed);
        let e = &ax.ellipses()[0];
        assert_eq!(e.alpha, Some(0.9));
        assert_eq!(e.facecolor, Color::BLACK);
        assert_eq!(e.edgecolor, Some(Color::RED));
    }

    #[test]
    fn test_invalid_covariance_aborts_trace() {
        let bad = GaussianEstimate::new(
            nalgebra::DVector::from_vec(vec![0.0, 0.0]),
            DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -4.0]),
        )
        .unwrap();
        let mut ax = Axes::new();
        let result = plot_trace(&mut ax, vec![GaussianEstimate::at(0.0, 0.0, 1.0), bad], 0, true);

        assert!(matches!(result, Err(Error::InvalidCovariance(_))));
        assert_eq!(ax.ellipses().len(), 1);
        assert!(ax.lines().is_empty());
    }

    #[test]
    fn test_plotter_config_n_std() {
        let plotter = Plotter::new(PlotConfig::with_n_std(1.0)).unwrap();
        let mut ax = Axes::new();
        plotter
            .plot_covariance_ellipse(&mut ax, &DMatrix::identity(2, 2), [0.0, 0.0])
            .unwrap();
        assert_relative_eq!(ax.ellipses()[0].geometry.width, 2.0, epsilon = 1e-12);

        assert!(Plotter::new(PlotConfig::with_n_std(-1.0)).is_err());
    }
}
