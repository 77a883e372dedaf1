use crate::surface::{Color, Font, LineCap, LineJoin, StrokeStyle};

/// Fixed look of the temperature chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub line: StrokeStyle,
    /// Gradient color at the top edge of the surface
    pub fill_top: Color,
    /// Gradient color at the bottom edge of the surface
    pub fill_bottom: Color,
    pub marker_radius: f64,
    pub marker_color: Color,
    pub label_font: Font,
    pub label_color: Color,
    /// Label origin relative to the marker center
    pub label_offset: (f64, f64),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line: StrokeStyle {
                width: 3.0,
                color: Color::rgba(255, 255, 255, 0.9),
                cap: LineCap::Round,
                join: LineJoin::Round,
            },
            fill_top: Color::rgba(255, 255, 255, 0.3),
            fill_bottom: Color::rgba(255, 255, 255, 0.0),
            marker_radius: 4.0,
            marker_color: Color::WHITE,
            label_font: Font {
                family: "Arial".to_string(),
                size_px: 12.0,
                bold: true,
            },
            label_color: Color::WHITE,
            label_offset: (-10.0, -10.0),
        }
    }
}
