//! Drawing surface abstraction.
//!
//! The plot renderer only talks to a [`DrawingSurface`]: a fixed-size pixel
//! grid addressed by `(column, row)` with the origin at the top-left and rows
//! growing downward. [`RecordingSurface`] keeps every operation so that the
//! terminal canvas can replay it and tests can inspect it.

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }
}

/// Primitive operations of a 2D drawing surface.
pub trait DrawingSurface {
    /// Clear the region `[0, width] x [0, height]` and drop any pending path.
    fn clear(&mut self, width: f64, height: f64);

    /// Set the color used by [`stroke`](Self::stroke).
    fn set_stroke_color(&mut self, color: Rgb);

    /// Set the color used by [`fill_text`](Self::fill_text).
    fn set_fill_color(&mut self, color: Rgb);

    /// Set the line width used by [`stroke`](Self::stroke).
    fn set_line_width(&mut self, width: f64);

    /// Start a new, empty path.
    fn begin_path(&mut self);

    /// Start a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the current subpath to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Stroke the current path with the current stroke color and width.
    fn stroke(&mut self);

    /// Set the font for text, e.g. `"12px monospace"`.
    fn set_font(&mut self, font: &str);

    /// Draw text with its baseline-left corner at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Surface cleared.
    Clear {
        /// Cleared width.
        width: f64,
        /// Cleared height.
        height: f64,
    },
    /// Stroke color changed.
    StrokeColor(Rgb),
    /// Fill color changed.
    FillColor(Rgb),
    /// Line width changed.
    LineWidth(f64),
    /// Path reset.
    BeginPath,
    /// Subpath start.
    MoveTo {
        /// Column.
        x: f64,
        /// Row.
        y: f64,
    },
    /// Subpath extension.
    LineTo {
        /// Column.
        x: f64,
        /// Row.
        y: f64,
    },
    /// Path stroked.
    Stroke,
    /// Font changed.
    Font(String),
    /// Text drawn.
    Text {
        /// Label text.
        text: String,
        /// Baseline-left column.
        x: f64,
        /// Baseline row.
        y: f64,
    },
}

/// A path as it was stroked: color, width and its subpaths.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokedPath {
    /// Stroke color at the time of the stroke.
    pub color: Rgb,
    /// Line width at the time of the stroke.
    pub width: f64,
    /// Subpaths in drawing order; each is a polyline of pixel points.
    pub subpaths: Vec<Vec<(f64, f64)>>,
}

impl StrokedPath {
    /// Number of straight segments across all subpaths.
    pub fn segment_count(&self) -> usize {
        self.subpaths
            .iter()
            .map(|sub| sub.len().saturating_sub(1))
            .sum()
    }
}

/// A text label as it was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// Label text.
    pub text: String,
    /// Baseline-left x position.
    pub x: f64,
    /// Baseline y position.
    pub y: f64,
    /// Fill color at the time of drawing.
    pub color: Rgb,
}

/// Surface that records operations and the resulting strokes and labels.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    size: (f64, f64),
    stroke_color: Rgb,
    fill_color: Rgb,
    line_width: f64,
    path: Vec<Vec<(f64, f64)>>,
    strokes: Vec<StrokedPath>,
    labels: Vec<TextLabel>,
}

impl RecordingSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self {
            line_width: 1.0,
            ..Self::default()
        }
    }

    /// Operations since the last clear, starting with the clear itself.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Size given to the last clear.
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    /// Every stroke since the last clear.
    pub fn strokes(&self) -> &[StrokedPath] {
        &self.strokes
    }

    /// Every text label since the last clear.
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ops.clear();
        self.strokes.clear();
        self.labels.clear();
        self.path.clear();
        self.size = (width, height);
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.stroke_color = color;
        self.ops.push(DrawOp::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
        self.ops.push(DrawOp::FillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
        self.ops.push(DrawOp::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        // A lineTo with no current point behaves like a moveTo.
        match self.path.last_mut() {
            Some(sub) => sub.push((x, y)),
            None => self.path.push(vec![(x, y)]),
        }
        self.ops.push(DrawOp::LineTo { x, y });
    }

    fn stroke(&mut self) {
        self.strokes.push(StrokedPath {
            color: self.stroke_color,
            width: self.line_width,
            subpaths: self.path.clone(),
        });
        self.ops.push(DrawOp::Stroke);
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(DrawOp::Font(font.to_string()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            x,
            y,
            color: self.fill_color,
        });
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_components() {
        assert_eq!(Rgb::from_hex(0x0078d7), Rgb::new(0x00, 0x78, 0xd7));
    }

    #[test]
    fn stroke_keeps_path_until_begin() {
        let mut surface = RecordingSurface::new();
        surface.clear(10.0, 10.0);
        surface.set_stroke_color(Rgb::new(1, 2, 3));
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.line_to(5.0, 5.0);
        surface.stroke();
        surface.line_to(6.0, 6.0);
        surface.stroke();

        let strokes = surface.strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].segment_count(), 1);
        assert_eq!(strokes[1].segment_count(), 2);
        assert_eq!(strokes[1].color, Rgb::new(1, 2, 3));
    }

    #[test]
    fn clear_discards_previous_drawing() {
        let mut surface = RecordingSurface::new();
        surface.clear(10.0, 10.0);
        surface.fill_text("1", 1.0, 1.0);
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.stroke();
        surface.clear(20.0, 20.0);

        assert!(surface.strokes().is_empty());
        assert!(surface.labels().is_empty());
        assert_eq!(surface.ops(), &[DrawOp::Clear { width: 20.0, height: 20.0 }]);
        assert_eq!(surface.size(), (20.0, 20.0));
    }
}
