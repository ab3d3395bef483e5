//! Visualization of plotted MHT output using Rerun.io
//!
//! Artists recorded on an [`Axes`] are logged as Rerun 2D archetypes:
//! - lines as `LineStrips2D`, broken at non-finite vertices
//! - markers and scatter points as `Points2D`
//! - covariance ellipses as closed `LineStrips2D` outlines
//! - the title and axis labels as a `TextDocument`
//!
//! Enable with the `visualization` feature flag.

use std::path::Path;

use rerun::{RecordingStream, RecordingStreamBuilder};
use tracing::{debug, info};

use crate::canvas::{ArtistRef, Axes, Canvas, Ellipse, Line2D, ScatterPoint};
use crate::style::{Color, LineStyle};
use crate::{Error, Result};

/// Application id used when none is given.
pub const DEFAULT_APP_ID: &str = "mht_plot";

/// Entity path under which artists are logged.
pub const DEFAULT_ROOT: &str = "plot";

/// Vertices used to approximate an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 72;

fn recording_err(e: impl std::fmt::Display) -> Error {
    Error::Recording(e.to_string())
}

fn rgba8(color: &Color, alpha: Option<f64>) -> [u8; 4] {
    color.with_alpha(alpha.unwrap_or(color.a)).to_rgba8()
}

fn to_f32(points: &[[f64; 2]]) -> Vec<[f32; 2]> {
    points.iter().map(|[x, y]| [*x as f32, *y as f32]).collect()
}

/// Rerun-backed canvas: plotting operations record onto an [`Axes`], and
/// [`RerunVisualizer::flush`] logs what was recorded.
///
/// Artists stay editable until they are flushed, so handles returned by the
/// plotting operations can still be restyled.
pub struct RerunVisualizer {
    rec: RecordingStream,
    axes: Axes,
    root: String,
}

impl RerunVisualizer {
    /// Create a visualizer that spawns the Rerun viewer.
    pub fn new(app_id: &str) -> Result<Self> {
        let rec = RecordingStreamBuilder::new(app_id).spawn().map_err(recording_err)?;
        Ok(Self::from_stream(rec))
    }

    /// Create a visualizer that saves to an `.rrd` file.
    pub fn new_to_file(app_id: &str, path: impl AsRef<Path>) -> Result<Self> {
        let rec = RecordingStreamBuilder::new(app_id)
            .save(path.as_ref())
            .map_err(recording_err)?;
        info!(path = %path.as_ref().display(), "recording to file");
        Ok(Self::from_stream(rec))
    }

    /// Wrap an existing recording stream.
    pub fn from_stream(rec: RecordingStream) -> Self {
        Self {
            rec,
            axes: Axes::new(),
            root: DEFAULT_ROOT.to_string(),
        }
    }

    /// Log under `root` instead of [`DEFAULT_ROOT`].
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// The axes collecting artists until the next flush.
    pub fn gca(&mut self) -> &mut Axes {
        &mut self.axes
    }

    pub fn stream(&self) -> &RecordingStream {
        &self.rec
    }

    /// Log every recorded artist, then clear them. Titles and labels are kept.
    ///
    /// Returns the number of artists logged.
    pub fn flush(&mut self) -> Result<usize> {
        self.log_labels()?;

        let order = self.axes.draw_order();
        for artist in &order {
            let draw_order = artist.zorder() as f32;
            match *artist {
                ArtistRef::Ellipse(i) => self.log_ellipse(i, &self.axes.ellipses()[i], draw_order)?,
                ArtistRef::Scatter(i) => self.log_scatter(i, &self.axes.scatter_points()[i], draw_order)?,
                ArtistRef::Line(i) => self.log_line(i, &self.axes.lines()[i], draw_order)?,
            }
        }

        debug!(
            artists = order.len(),
            markers = self.axes.marker_count(),
            root = %self.root,
            "flushed axes"
        );
        self.axes.clear();
        Ok(order.len())
    }

    fn log_labels(&self) -> Result<()> {
        let mut text = Vec::new();
        if let Some(title) = &self.axes.title {
            text.push(format!("# {}", title));
        }
        if let Some(label) = &self.axes.xlabel {
            text.push(format!("x: {}", label));
        }
        if let Some(label) = &self.axes.ylabel {
            text.push(format!("y: {}", label));
        }
        if text.is_empty() {
            return Ok(());
        }
        self.rec
            .log(
                format!("{}/title", self.root),
                &rerun::TextDocument::new(text.join("\n")),
            )
            .map_err(recording_err)
    }

    fn log_ellipse(&self, i: usize, ellipse: &Ellipse, draw_order: f32) -> Result<()> {
        let mut ring = to_f32(&ellipse.geometry.boundary(ELLIPSE_SEGMENTS));
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        let color = match &ellipse.edgecolor {
            Some(edge) => rgba8(edge, ellipse.alpha),
            None => rgba8(&ellipse.facecolor, Some(ellipse.fill_opacity())),
        };

        self.rec
            .log(
                format!("{}/ellipses/{}", self.root, i),
                &rerun::LineStrips2D::new([ring])
                    .with_colors([color])
                    .with_radii([rerun::Radius::new_ui_points(1.0)])
                    .with_draw_order(draw_order),
            )
            .map_err(recording_err)
    }

    fn log_scatter(&self, i: usize, point: &ScatterPoint, draw_order: f32) -> Result<()> {
        let [x, y] = point.position;
        if !(x.is_finite() && y.is_finite()) {
            return Ok(());
        }
        self.rec
            .log(
                format!("{}/scatter/{}", self.root, i),
                &rerun::Points2D::new([[x as f32, y as f32]])
                    .with_colors([rgba8(&point.facecolor, point.alpha)])
                    .with_radii([rerun::Radius::new_ui_points((point.size / 2.0) as f32)])
                    .with_draw_order(draw_order),
            )
            .map_err(recording_err)
    }

    fn log_line(&self, i: usize, line: &Line2D, draw_order: f32) -> Result<()> {
        let path = format!("{}/lines/{}", self.root, i);
        let color = rgba8(&line.color, line.alpha);

        if line.linestyle != LineStyle::None {
            let strips: Vec<Vec<[f32; 2]>> = line.segments().iter().map(|s| to_f32(s)).collect();
            if !strips.is_empty() {
                self.rec
                    .log(
                        path.clone(),
                        &rerun::LineStrips2D::new(strips)
                            .with_colors([color])
                            .with_radii([rerun::Radius::new_ui_points((line.linewidth / 2.0) as f32)])
                            .with_draw_order(draw_order),
                    )
                    .map_err(recording_err)?;
            }
        }

        if line.marker.is_some() {
            let points: Vec<[f64; 2]> = line
                .points()
                .filter(|[x, y]| x.is_finite() && y.is_finite())
                .collect();
            if !points.is_empty() {
                self.rec
                    .log(
                        format!("{}/markers", path),
                        &rerun::Points2D::new(to_f32(&points))
                            .with_colors([color])
                            .with_radii([rerun::Radius::new_ui_points((line.markersize / 2.0) as f32)])
                            .with_draw_order(draw_order),
                    )
                    .map_err(recording_err)?;
            }
        }
        Ok(())
    }
}

impl Canvas for RerunVisualizer {
    fn add_line(&mut self, line: Line2D) -> &mut Line2D {
        self.axes.add_line(line)
    }

    fn add_scatter(&mut self, point: ScatterPoint) -> &mut ScatterPoint {
        self.axes.add_scatter(point)
    }

    fn add_ellipse(&mut self, ellipse: Ellipse) -> &mut Ellipse {
        self.axes.add_ellipse(ellipse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GlobalHypothesis, Report, Scan, TrackHistory};
    use crate::model::GaussianEstimate;
    use crate::plot;

    fn buffered() -> RerunVisualizer {
        let rec = RecordingStreamBuilder::new("mht_plot_test").buffered().unwrap();
        RerunVisualizer::from_stream(rec)
    }

    fn hypothesis() -> GlobalHypothesis {
        let track = TrackHistory::new(vec![
            GaussianEstimate::at(0.0, 0.0, 1.0),
            GaussianEstimate::at(1.0, 0.5, 1.0),
        ])
        .unwrap();
        GlobalHypothesis::new(vec![track], vec![Report::at(4.0, 4.0)])
    }

    #[test]
    fn test_rgba8_applies_alpha_override() {
        assert_eq!(rgba8(&Color::RED, None), [255, 0, 0, 255]);
        assert_eq!(rgba8(&Color::RED, Some(0.5)), [255, 0, 0, 128]);
    }

    #[test]
    fn test_flush_logs_and_clears() {
        let mut viz = buffered();
        viz.gca().set_title("scan 2");
        plot::plot_hypothesis_trace(&mut viz, &hypothesis(), 0, true).unwrap();
        plot::plot_hypothesis(&mut viz, &hypothesis(), 0, true, true).unwrap();

        // 2 trace ellipses + 1 trace line, 1 point + 1 ellipse + 1 unassigned line
        assert_eq!(viz.flush().unwrap(), 6);
        assert!(viz.gca().is_empty());
        assert_eq!(viz.gca().title.as_deref(), Some("scan 2"));
        assert_eq!(viz.flush().unwrap(), 0);
    }

    #[test]
    fn test_saves_recording_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.rrd");
        {
            let mut viz = RerunVisualizer::new_to_file("mht_plot_test", &path).unwrap();
            plot::plot_scan(&mut viz, &Scan::new(vec![Report::at(1.0, 2.0)])).unwrap();
            assert_eq!(viz.flush().unwrap(), 1);
        }
        assert!(path.exists());
    }
}
