//! Drawing surface abstraction and the recording `Axes`.
//!
//! Plotting operations never talk to a renderer directly; they add artists to
//! a [`Canvas`]. [`Axes`] keeps every artist it is given so callers can inspect
//! what was drawn, and the `visualization` feature streams an `Axes` to Rerun.

use crate::ellipse::EllipseGeometry;
use crate::style::{Color, LineStyle, Marker};
use crate::{Error, Result};

/// Default `lines.markersize`, in pixels.
pub const DEFAULT_MARKER_SIZE: f64 = 6.0;

/// Default `lines.linewidth`, in pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 1.5;

/// A polyline with optional markers at its vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Line2D {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub color: Color,
    pub marker: Option<Marker>,
    pub linestyle: LineStyle,
    pub alpha: Option<f64>,
    pub linewidth: f64,
    pub markersize: f64,
}

impl Line2D {
    /// A solid line without markers in the default patch color.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} y values", xs.len()),
                got: format!("{}", ys.len()),
            });
        }
        Ok(Self {
            xs,
            ys,
            color: Color::DEFAULT_PATCH,
            marker: None,
            linestyle: LineStyle::Solid,
            alpha: None,
            linewidth: DEFAULT_LINE_WIDTH,
            markersize: DEFAULT_MARKER_SIZE,
        })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_marker(mut self, marker: Option<Marker>) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_linestyle(mut self, linestyle: LineStyle) -> Self {
        self.linestyle = linestyle;
        self
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = Some(alpha);
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Number of marker glyphs this line draws.
    pub fn marker_count(&self) -> usize {
        if self.marker.is_some() {
            self.xs.len()
        } else {
            0
        }
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs.iter().zip(&self.ys).map(|(&x, &y)| [x, y])
    }

    /// Connected runs of finite vertices. A non-finite vertex breaks the
    /// line, as in matplotlib; runs of a single vertex draw no segment.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut runs: Vec<Vec<[f64; 2]>> = vec![Vec::new()];
        for [x, y] in self.points() {
            if x.is_finite() && y.is_finite() {
                if let Some(current) = runs.last_mut() {
                    current.push([x, y]);
                }
            } else if runs.last().map_or(false, |r| !r.is_empty()) {
                runs.push(Vec::new());
            }
        }
        runs.retain(|r| r.len() > 1);
        runs
    }
}

/// A single scattered point.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub position: [f64; 2],
    pub facecolor: Color,
    pub edgecolor: Color,
    pub marker: Marker,
    pub size: f64,
    pub alpha: Option<f64>,
}

impl ScatterPoint {
    pub fn new(position: [f64; 2], facecolor: Color) -> Self {
        Self {
            position,
            facecolor,
            edgecolor: facecolor,
            marker: Marker::Circle,
            size: DEFAULT_MARKER_SIZE,
            alpha: None,
        }
    }

    pub fn with_edgecolor(mut self, edgecolor: Color) -> Self {
        self.edgecolor = edgecolor;
        self
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = Some(alpha);
    }
}

/// An ellipse patch.
///
/// Returned mutably by [`Canvas::add_ellipse`] so callers can restyle it after
/// it has been placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub geometry: EllipseGeometry,
    pub facecolor: Color,
    pub edgecolor: Option<Color>,
    pub alpha: Option<f64>,
}

impl Ellipse {
    pub fn new(geometry: EllipseGeometry) -> Self {
        Self {
            geometry,
            facecolor: Color::DEFAULT_PATCH,
            edgecolor: None,
            alpha: None,
        }
    }

    /// Opacity applied to both fill and edge, overriding the colors' own alpha.
    pub fn set_alpha(&mut self, alpha: f64) -> &mut Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn set_facecolor(&mut self, color: Color) -> &mut Self {
        self.facecolor = color;
        self
    }

    pub fn set_edgecolor(&mut self, color: Color) -> &mut Self {
        self.edgecolor = Some(color);
        self
    }

    /// Fill opacity after applying `alpha`.
    pub fn fill_opacity(&self) -> f64 {
        self.alpha.unwrap_or(self.facecolor.a)
    }
}

/// Where an artist lives inside an [`Axes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistRef {
    Line(usize),
    Scatter(usize),
    Ellipse(usize),
}

impl ArtistRef {
    /// matplotlib's default z-order: patches and collections under lines.
    pub fn zorder(&self) -> u8 {
        match self {
            ArtistRef::Ellipse(_) | ArtistRef::Scatter(_) => 1,
            ArtistRef::Line(_) => 2,
        }
    }
}

/// A 2D drawing surface.
pub trait Canvas {
    fn add_line(&mut self, line: Line2D) -> &mut Line2D;

    fn add_scatter(&mut self, point: ScatterPoint) -> &mut ScatterPoint;

    fn add_ellipse(&mut self, ellipse: Ellipse) -> &mut Ellipse;

    /// `plt.plot(xs, ys, marker=.., color=.., linestyle=..)`.
    fn plot(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        color: Color,
        marker: Option<Marker>,
        linestyle: LineStyle,
    ) -> Result<&mut Line2D> {
        let line = Line2D::new(xs.to_vec(), ys.to_vec())?
            .with_color(color)
            .with_marker(marker)
            .with_linestyle(linestyle);
        Ok(self.add_line(line))
    }
}

/// A recording canvas: keeps every artist in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    lines: Vec<Line2D>,
    scatter: Vec<ScatterPoint>,
    ellipses: Vec<Ellipse>,
    order: Vec<ArtistRef>,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn lines(&self) -> &[Line2D] {
        &self.lines
    }

    pub fn scatter_points(&self) -> &[ScatterPoint] {
        &self.scatter
    }

    pub fn ellipses(&self) -> &[Ellipse] {
        &self.ellipses
    }

    /// Artists in insertion order.
    pub fn artists(&self) -> &[ArtistRef] {
        &self.order
    }

    /// Artists in drawing order: stable sort by z-order.
    pub fn draw_order(&self) -> Vec<ArtistRef> {
        let mut order = self.order.clone();
        order.sort_by_key(|a| a.zorder());
        order
    }

    /// Marker glyphs across lines and scatter points.
    pub fn marker_count(&self) -> usize {
        self.lines.iter().map(Line2D::marker_count).sum::<usize>() + self.scatter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove all artists; titles and labels are kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.scatter.clear();
        self.ellipses.clear();
        self.order.clear();
    }
}

impl Canvas for Axes {
    fn add_line(&mut self, line: Line2D) -> &mut Line2D {
        self.order.push(ArtistRef::Line(self.lines.len()));
        self.lines.push(line);
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    fn add_scatter(&mut self, point: ScatterPoint) -> &mut ScatterPoint {
        self.order.push(ArtistRef::Scatter(self.scatter.len()));
        self.scatter.push(point);
        let last = self.scatter.len() - 1;
        &mut self.scatter[last]
    }

    fn add_ellipse(&mut self, ellipse: Ellipse) -> &mut Ellipse {
        self.order.push(ArtistRef::Ellipse(self.ellipses.len()));
        self.ellipses.push(ellipse);
        let last = self.ellipses.len() - 1;
        &mut self.ellipses[last]
    }
}
