//! Function plotting.
//!
//! A plot request takes an expression of `x` and a [`Viewport`], and draws a
//! background grid, labelled axes and the sampled curve onto a
//! [`DrawingSurface`]. Sampling is one evaluation per pixel column; any
//! column whose value is missing, NaN or infinite breaks the curve into a new
//! subpath instead of connecting across it.
//!
//! Failures never propagate: an empty or malformed expression is reported
//! through [`PlotStatus`] and leaves only the grid and axes on the surface.

pub mod canvas;
pub mod expr;
pub mod surface;

use std::fmt;

use crate::config::PlotConfig;
use crate::error::{MathSimError, Result};

pub use expr::{Evaluator, Expression, MevalEvaluator};
pub use surface::{DrawOp, DrawingSurface, RecordingSurface, Rgb, StrokedPath, TextLabel};

/// Closest two axis ticks may sit, in pixels. Denser ticks are thinned out.
pub const MIN_TICK_SPACING: f64 = 4.0;

/// Smallest grid spacing drawn, in pixels.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Mapping between pixel coordinates and world `(x, y)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    origin_x: f64,
    origin_y: f64,
    scale: f64,
}

impl Viewport {
    /// Create a viewport. `scale` is in pixels per world unit.
    ///
    /// Fails when `scale` is not a positive finite number or the origin lies
    /// outside the canvas.
    pub fn new(width: u32, height: u32, origin: (f64, f64), scale: f64) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(MathSimError::InvalidViewport(format!(
                "scale must be positive, got {}",
                scale
            )));
        }
        let (origin_x, origin_y) = origin;
        let inside_x = (0.0..=width as f64).contains(&origin_x);
        let inside_y = (0.0..=height as f64).contains(&origin_y);
        if !(inside_x && inside_y) {
            return Err(MathSimError::InvalidViewport(format!(
                "origin ({}, {}) outside {}x{} canvas",
                origin_x, origin_y, width, height
            )));
        }
        Ok(Self {
            width,
            height,
            origin_x,
            origin_y,
            scale,
        })
    }

    /// Create a viewport with the origin at the canvas centre.
    pub fn centered(width: u32, height: u32, scale: f64) -> Result<Self> {
        Self::new(width, height, (width as f64 / 2.0, height as f64 / 2.0), scale)
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Origin pixel.
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    /// Pixels per world unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// World x of a pixel column.
    pub fn world_x(&self, pixel_x: f64) -> f64 {
        (pixel_x - self.origin_x) / self.scale
    }

    /// Pixel column of a world x.
    pub fn pixel_x(&self, x: f64) -> f64 {
        self.origin_x + x * self.scale
    }

    /// Pixel row of a world y.
    pub fn pixel_y(&self, y: f64) -> f64 {
        self.origin_y - y * self.scale
    }

    /// Integer world x values whose ticks fall on the canvas.
    pub fn x_ticks(&self) -> std::ops::RangeInclusive<i64> {
        let left = (self.origin_x / self.scale).floor() as i64;
        let right = ((self.width as f64 - self.origin_x) / self.scale).floor() as i64;
        -left..=right
    }

    /// Tick steps `i` along the y axis, where step `i` sits at pixel row
    /// `origin_y + i * scale` and shows the world value `-i`.
    pub fn y_ticks(&self) -> std::ops::RangeInclusive<i64> {
        let up = (self.origin_y / self.scale).floor() as i64;
        let down = ((self.height as f64 - self.origin_y) / self.scale).floor() as i64;
        -up..=down
    }
}

/// Nonzero steps of `range` kept after thinning so neighbouring ticks are at
/// least [`MIN_TICK_SPACING`] pixels apart.
fn visible_ticks(range: std::ops::RangeInclusive<i64>, scale: f64) -> impl Iterator<Item = i64> {
    let stride = (MIN_TICK_SPACING / scale).ceil().max(1.0) as i64;
    let (lo, hi) = range.into_inner();
    (lo.div_euclid(stride)..=hi.div_euclid(stride))
        .filter_map(move |k| k.checked_mul(stride))
        .filter(move |i| (lo..=hi).contains(i))
        .filter(move |&i| (i as f64 * scale).abs() >= MIN_TICK_SPACING / 2.0)
}

/// One evaluated pixel column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Pixel column.
    pub pixel_x: u32,
    /// World y, or `None` when the value is unusable.
    pub y: Option<f64>,
}

/// Evaluate `expression` at every pixel column of the viewport, inclusive of
/// both edges.
pub fn sample_columns<'a>(
    expression: &'a dyn Expression,
    viewport: &'a Viewport,
) -> impl Iterator<Item = Sample> + 'a {
    (0..=viewport.width()).map(move |pixel_x| {
        let x = viewport.world_x(pixel_x as f64);
        let y = expression.evaluate(x).ok().filter(|y| y.is_finite());
        Sample { pixel_x, y }
    })
}

/// The sampled curve in pixel space, split wherever a sample was unusable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurvePath {
    subpaths: Vec<Vec<(f64, f64)>>,
}

impl CurvePath {
    /// Build the path from samples.
    pub fn from_samples(samples: impl IntoIterator<Item = Sample>, viewport: &Viewport) -> Self {
        let mut subpaths: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for sample in samples {
            let point = sample
                .y
                .map(|y| (sample.pixel_x as f64, viewport.pixel_y(y)))
                .filter(|(_, py)| py.is_finite());
            match point {
                Some(p) => current.push(p),
                None if !current.is_empty() => subpaths.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            subpaths.push(current);
        }

        Self { subpaths }
    }

    /// Subpaths in column order.
    pub fn subpaths(&self) -> &[Vec<(f64, f64)>] {
        &self.subpaths
    }

    /// Number of connected segments across all subpaths.
    pub fn segment_count(&self) -> usize {
        self.subpaths
            .iter()
            .map(|sub| sub.len().saturating_sub(1))
            .sum()
    }

    /// Whether nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// All points in drawing order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.subpaths.iter().flatten().copied()
    }

    fn stroke_onto(&self, surface: &mut dyn DrawingSurface) {
        surface.begin_path();
        for sub in &self.subpaths {
            let mut points = sub.iter();
            if let Some(&(x, y)) = points.next() {
                surface.move_to(x, y);
            }
            for &(x, y) in points {
                surface.line_to(x, y);
            }
        }
        surface.stroke();
    }
}

/// Colors used for a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotStyle {
    /// Background grid.
    pub grid: Rgb,
    /// Axis lines and ticks.
    pub axis: Rgb,
    /// Tick labels.
    pub label: Rgb,
    /// Plotted curve.
    pub curve: Rgb,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            grid: Rgb::from_hex(0x444444),
            axis: Rgb::from_hex(0x7ecfff),
            label: Rgb::from_hex(0xf2f2f2),
            curve: Rgb::from_hex(0x0078d7),
        }
    }
}

/// Result of a plot request as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotStatus {
    /// Nothing to plot.
    EmptyExpression,
    /// The evaluator rejected the expression.
    InvalidExpression(String),
    /// The curve was drawn.
    Plotted {
        /// Trimmed expression text.
        expression: String,
    },
}

impl PlotStatus {
    /// Whether a curve was drawn.
    pub fn is_plotted(&self) -> bool {
        matches!(self, PlotStatus::Plotted { .. })
    }
}

impl fmt::Display for PlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotStatus::EmptyExpression => write!(f, "Please enter a function to plot."),
            PlotStatus::InvalidExpression(_) => write!(f, "Invalid equation format. Try again."),
            PlotStatus::Plotted { expression } => write!(f, "Plotting: y = {}", expression),
        }
    }
}

/// Outcome of a single plot request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutcome {
    /// User-facing status.
    pub status: PlotStatus,
    /// Curve that was stroked; empty on failure.
    pub curve: CurvePath,
}

/// Renders function plots onto a drawing surface.
pub struct PlotRenderer {
    evaluator: Box<dyn Evaluator>,
    config: PlotConfig,
    style: PlotStyle,
}

impl fmt::Debug for PlotRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotRenderer")
            .field("config", &self.config)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl PlotRenderer {
    /// Create a renderer using the given evaluator.
    pub fn new(evaluator: impl Evaluator + 'static, config: PlotConfig) -> Self {
        Self {
            evaluator: Box::new(evaluator),
            config,
            style: PlotStyle::default(),
        }
    }

    /// Replace the color scheme.
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    /// Change the color scheme in place.
    pub fn set_style(&mut self, style: PlotStyle) {
        self.style = style;
    }

    /// Current color scheme.
    pub fn style(&self) -> PlotStyle {
        self.style
    }

    /// Configuration in use.
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Default viewport: configured canvas size, origin at the centre.
    pub fn default_viewport(&self) -> Result<Viewport> {
        Viewport::centered(self.config.width, self.config.height, self.config.scale)
    }

    /// Clear the surface and draw grid, axes and the curve of `expression`.
    pub fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        expression: &str,
        viewport: &Viewport,
    ) -> PlotOutcome {
        surface.clear(viewport.width() as f64, viewport.height() as f64);
        self.draw_grid(surface, viewport);
        self.draw_axes(surface, viewport);

        let expression = expression.trim();
        if expression.is_empty() {
            return PlotOutcome {
                status: PlotStatus::EmptyExpression,
                curve: CurvePath::default(),
            };
        }

        let compiled = match self.evaluator.compile(expression) {
            Ok(compiled) => compiled,
            Err(e) => {
                tracing::debug!("Rejected expression {:?}: {}", expression, e);
                return PlotOutcome {
                    status: PlotStatus::InvalidExpression(e.to_string()),
                    curve: CurvePath::default(),
                };
            },
        };

        let curve = CurvePath::from_samples(sample_columns(compiled.as_ref(), viewport), viewport);
        surface.set_stroke_color(self.style.curve);
        surface.set_line_width(self.config.curve_width);
        curve.stroke_onto(surface);

        tracing::debug!(
            "Plotted {:?}: {} subpaths, {} segments",
            expression,
            curve.subpaths().len(),
            curve.segment_count()
        );

        PlotOutcome {
            status: PlotStatus::Plotted {
                expression: expression.to_string(),
            },
            curve,
        }
    }

    fn draw_grid(&self, surface: &mut dyn DrawingSurface, viewport: &Viewport) {
        let width = viewport.width() as f64;
        let height = viewport.height() as f64;
        let spacing = self.config.grid_spacing.max(MIN_GRID_SPACING);

        surface.set_stroke_color(self.style.grid);
        surface.set_line_width(1.0);
        for x in grid_positions(width, spacing) {
            surface.begin_path();
            surface.move_to(x, 0.0);
            surface.line_to(x, height);
            surface.stroke();
        }
        for y in grid_positions(height, spacing) {
            surface.begin_path();
            surface.move_to(0.0, y);
            surface.line_to(width, y);
            surface.stroke();
        }
    }

    fn draw_axes(&self, surface: &mut dyn DrawingSurface, viewport: &Viewport) {
        let width = viewport.width() as f64;
        let height = viewport.height() as f64;
        let (ox, oy) = viewport.origin();
        let scale = viewport.scale();
        let tick = self.config.tick_half_length;

        surface.set_stroke_color(self.style.axis);
        surface.set_line_width(self.config.axis_width);
        surface.begin_path();
        surface.move_to(0.0, oy);
        surface.line_to(width, oy);
        surface.stroke();
        surface.begin_path();
        surface.move_to(ox, 0.0);
        surface.line_to(ox, height);
        surface.stroke();

        surface.set_font(&self.config.label_font);
        surface.set_fill_color(self.style.label);

        for i in visible_ticks(viewport.x_ticks(), scale) {
            let px = viewport.pixel_x(i as f64);
            surface.fill_text(&i.to_string(), px - 5.0, oy + 15.0);
            surface.begin_path();
            surface.move_to(px, oy - tick);
            surface.line_to(px, oy + tick);
            surface.stroke();
        }
        for i in visible_ticks(viewport.y_ticks(), scale) {
            let py = oy + i as f64 * scale;
            surface.fill_text(&(-i).to_string(), ox + 5.0, py + 5.0);
            surface.begin_path();
            surface.move_to(ox - tick, py);
            surface.line_to(ox + tick, py);
            surface.stroke();
        }
    }
}

/// Every multiple of `spacing` in `[0, extent]`, both ends included.
pub fn grid_positions(extent: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let count = if spacing > 0.0 {
        (extent / spacing + 1e-9).floor() as u64
    } else {
        0
    };
    (0..=count).map(move |k| k as f64 * spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_bad_scale() {
        assert!(Viewport::centered(100, 100, 0.0).is_err());
        assert!(Viewport::centered(100, 100, -1.0).is_err());
        assert!(Viewport::centered(100, 100, f64::NAN).is_err());
    }

    #[test]
    fn viewport_rejects_origin_outside() {
        assert!(Viewport::new(100, 100, (101.0, 50.0), 10.0).is_err());
        assert!(Viewport::new(100, 100, (50.0, -1.0), 10.0).is_err());
        assert!(Viewport::new(100, 100, (100.0, 0.0), 10.0).is_ok());
    }

    #[test]
    fn ticks_cover_visible_range() {
        let vp = Viewport::centered(500, 400, 40.0).unwrap();
        assert_eq!(vp.x_ticks(), -6..=6);
        assert_eq!(vp.y_ticks(), -5..=5);

        let off_centre = Viewport::new(100, 100, (0.0, 100.0), 25.0).unwrap();
        assert_eq!(off_centre.x_ticks(), 0..=4);
        assert_eq!(off_centre.y_ticks(), -4..=0);
    }

    #[test]
    fn grid_positions_include_boundaries() {
        let xs: Vec<f64> = grid_positions(120.0, 40.0).collect();
        assert_eq!(xs, vec![0.0, 40.0, 80.0, 120.0]);
        let ys: Vec<f64> = grid_positions(130.0, 40.0).collect();
        assert_eq!(ys, vec![0.0, 40.0, 80.0, 120.0]);
    }

    #[test]
    fn dense_ticks_are_thinned() {
        let every: Vec<i64> = visible_ticks(-3..=3, 40.0).collect();
        assert_eq!(every, vec![-3, -2, -1, 1, 2, 3]);

        let thinned: Vec<i64> = visible_ticks(-10..=10, 1.5).collect();
        assert_eq!(thinned, vec![-9, -6, -3, 3, 6, 9]);

        let count = visible_ticks(-2_500_000_000..=2_500_000_000, 1e-7).count();
        assert!(count <= 2 * (500.0 / MIN_TICK_SPACING) as usize + 2, "{}", count);
    }

    #[test]
    fn gaps_split_the_curve() {
        let vp = Viewport::new(4, 10, (0.0, 5.0), 1.0).unwrap();
        let samples = [
            Sample { pixel_x: 0, y: Some(0.0) },
            Sample { pixel_x: 1, y: Some(1.0) },
            Sample { pixel_x: 2, y: None },
            Sample { pixel_x: 3, y: Some(2.0) },
            Sample { pixel_x: 4, y: Some(3.0) },
        ];
        let curve = CurvePath::from_samples(samples, &vp);
        assert_eq!(
            curve.subpaths(),
            &[vec![(0.0, 5.0), (1.0, 4.0)], vec![(3.0, 3.0), (4.0, 2.0)]]
        );
        assert_eq!(curve.segment_count(), 2);
    }

    #[test]
    fn status_messages() {
        assert_eq!(
            PlotStatus::EmptyExpression.to_string(),
            "Please enter a function to plot."
        );
        assert_eq!(
            PlotStatus::InvalidExpression("x".into()).to_string(),
            "Invalid equation format. Try again."
        );
        assert_eq!(
            PlotStatus::Plotted { expression: "x^2".into() }.to_string(),
            "Plotting: y = x^2"
        );
    }
}
