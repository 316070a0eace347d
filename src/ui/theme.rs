//! Color themes for the UI.

use crate::app::Theme;
use crate::plot::{PlotStyle, Rgb};
use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Background color.
    pub bg: Color,
    /// Primary text color.
    pub text: Color,
    /// Heading text color.
    pub heading: Color,
    /// Label text color.
    pub label: Color,
    /// Value text color.
    pub value: Color,
    /// Border color.
    pub border: Color,
    /// Border color of the focused pane.
    pub focus_border: Color,
    /// Cursor foreground color.
    pub cursor_fg: Color,
    /// Cursor background color.
    pub cursor_bg: Color,
    /// Status bar foreground color.
    pub status_fg: Color,
    /// Status bar background color.
    pub status_bg: Color,
    /// Pending request color.
    pub warning: Color,
    /// Wrong answer and failure color.
    pub error: Color,
    /// Plot canvas background.
    pub plot_bg: Color,
    plot: PlotStyle,
}

impl ThemeColors {
    /// Create color palette from theme.
    pub fn from_theme(theme: &Theme) -> Self {
        match theme {
            Theme::GruvboxDark => Self {
                bg: Color::Rgb(40, 40, 40),
                text: Color::Rgb(235, 219, 178),
                heading: Color::Rgb(251, 184, 108),
                label: Color::Rgb(184, 187, 38),
                value: Color::Rgb(142, 192, 124),
                border: Color::Rgb(102, 92, 84),
                focus_border: Color::Rgb(131, 165, 152),
                cursor_fg: Color::Rgb(40, 40, 40),
                cursor_bg: Color::Rgb(251, 184, 108),
                status_fg: Color::Rgb(235, 219, 178),
                status_bg: Color::Rgb(60, 56, 54),
                warning: Color::Rgb(250, 189, 47),
                error: Color::Rgb(251, 73, 52),
                plot_bg: Color::Rgb(34, 34, 34),
                plot: PlotStyle::default(),
            },
            Theme::GruvboxLight => Self {
                bg: Color::Rgb(251, 245, 234),
                text: Color::Rgb(60, 56, 54),
                heading: Color::Rgb(175, 58, 3),
                label: Color::Rgb(121, 116, 14),
                value: Color::Rgb(102, 123, 3),
                border: Color::Rgb(213, 196, 161),
                focus_border: Color::Rgb(7, 102, 120),
                cursor_fg: Color::Rgb(251, 245, 234),
                cursor_bg: Color::Rgb(175, 58, 3),
                status_fg: Color::Rgb(60, 56, 54),
                status_bg: Color::Rgb(235, 219, 178),
                warning: Color::Rgb(181, 118, 20),
                error: Color::Rgb(157, 0, 6),
                plot_bg: Color::Rgb(251, 241, 199),
                plot: PlotStyle {
                    grid: Rgb::new(213, 196, 161),
                    axis: Rgb::new(7, 102, 120),
                    label: Rgb::new(60, 56, 54),
                    curve: Rgb::new(0, 120, 215),
                },
            },
        }
    }

    /// Colors handed to the plot renderer.
    pub fn plot_style(&self) -> PlotStyle {
        self.plot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme_uses_default_plot_colors() {
        let colors = ThemeColors::from_theme(&Theme::GruvboxDark);
        assert_eq!(colors.plot_style(), PlotStyle::default());
    }

    #[test]
    fn light_theme_recolors_grid_but_keeps_curve() {
        let light = ThemeColors::from_theme(&Theme::GruvboxLight).plot_style();
        assert_ne!(light.grid, PlotStyle::default().grid);
        assert_eq!(light.curve, PlotStyle::default().curve);
    }
}
