//! Terminal rendering of a recorded plot.
//!
//! Replays the strokes and labels of a [`RecordingSurface`] onto a ratatui
//! braille [`Canvas`]. The recorded surface uses pixel rows growing
//! downward; the canvas grows upward, so rows are flipped.

use ratatui::{
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Context, Line as CanvasLine},
};

use super::surface::{RecordingSurface, Rgb};

/// Convert a plot color to a terminal color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Build a canvas widget that draws `drawing` scaled to the render area.
pub fn plot_canvas(
    drawing: &RecordingSurface,
    background: Color,
) -> Canvas<'_, impl Fn(&mut Context<'_>) + '_> {
    let (width, height) = drawing.size();

    Canvas::default()
        .background_color(background)
        .marker(Marker::Braille)
        .x_bounds([0.0, width.max(1.0)])
        .y_bounds([0.0, height.max(1.0)])
        .paint(move |ctx| {
            for stroke in drawing.strokes() {
                let color = to_color(stroke.color);
                for sub in &stroke.subpaths {
                    for pair in sub.windows(2) {
                        let (x1, y1) = pair[0];
                        let (x2, y2) = pair[1];
                        ctx.draw(&CanvasLine {
                            x1,
                            y1: height - y1,
                            x2,
                            y2: height - y2,
                            color,
                        });
                    }
                }
            }

            ctx.layer();
            for label in drawing.labels() {
                ctx.print(
                    label.x,
                    height - label.y,
                    Span::styled(label.text.clone(), Style::default().fg(to_color(label.color))),
                );
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::surface::DrawingSurface;
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    #[test]
    fn replays_strokes_into_buffer() {
        let mut surface = RecordingSurface::new();
        surface.clear(100.0, 100.0);
        surface.set_stroke_color(Rgb::new(255, 0, 0));
        surface.begin_path();
        surface.move_to(0.0, 50.0);
        surface.line_to(100.0, 50.0);
        surface.stroke();

        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        plot_canvas(&surface, Color::Reset).render(area, &mut buf);

        let drawn = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(drawn >= 20, "expected a horizontal line, got {} cells", drawn);
    }

    #[test]
    fn prints_labels() {
        let mut surface = RecordingSurface::new();
        surface.clear(100.0, 100.0);
        surface.fill_text("7", 50.0, 50.0);

        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        plot_canvas(&surface, Color::Reset).render(area, &mut buf);

        assert!(buf.content().iter().any(|cell| cell.symbol() == "7"));
    }
}
