use crate::geometry::{ChartLayout, Point, Size};
use crate::series::TemperatureSeries;
use crate::style::ChartStyle;
use crate::surface::{GradientStop, LinearGradient, Paint, Path, Surface};

/// Draws temperature series with a fixed [`ChartStyle`].
///
/// Holds no state between calls: every render resizes, clears and redraws the
/// whole surface.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    style: ChartStyle,
}

impl ChartRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Size the backing store for the current display and blank it.
    ///
    /// Returns the logical size the surface is now scaled to.
    pub fn clear<S>(&self, surface: &mut S) -> Size
    where
        S: Surface + ?Sized,
    {
        let size = surface.bounding_size();
        let dpr = surface.device_pixel_ratio();

        // The backing store is not retained state: size it for this display every call.
        surface.resize_backing_store(physical_pixels(size.width, dpr), physical_pixels(size.height, dpr));
        surface.set_scale(dpr);
        surface.clear_rect(Point::new(0.0, 0.0), size);
        size
    }

    /// Repaint `surface` with `series` and return the geometry that was drawn.
    pub fn render<S>(&self, surface: &mut S, series: &TemperatureSeries) -> ChartLayout
    where
        S: Surface + ?Sized,
    {
        let size = self.clear(surface);
        let dpr = surface.device_pixel_ratio();

        let layout = ChartLayout::compute(series, size);
        tracing::debug!(
            "Rendering {} samples on {}x{} @{}x (range {}..{}, step {})",
            series.len(),
            size.width,
            size.height,
            dpr,
            layout.min_temp,
            layout.max_temp,
            layout.step_x
        );

        let line = Path::polyline(&layout.vertices);
        surface.stroke_path(&line, &self.style.line);

        let mut area = Path::polyline(&layout.area_outline());
        area.close();
        surface.fill_path(&area, &self.area_paint(size));

        let marker_paint = Paint::Solid(self.style.marker_color);
        let label_paint = Paint::Solid(self.style.label_color);
        let (dx, dy) = self.style.label_offset;
        for marker in &layout.markers {
            surface.fill_circle(marker.center, self.style.marker_radius, &marker_paint);
            surface.fill_text(
                &marker.label,
                marker.center.offset(dx, dy),
                &self.style.label_font,
                &label_paint,
            );
        }

        layout
    }

    /// Vertical gradient anchored to the full surface height.
    fn area_paint(&self, size: Size) -> Paint {
        Paint::Linear(LinearGradient {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, size.height),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: self.style.fill_top,
                },
                GradientStop {
                    offset: 1.0,
                    color: self.style.fill_bottom,
                },
            ],
        })
    }
}

/// Render with the default style.
pub fn render<S>(surface: &mut S, series: &TemperatureSeries) -> ChartLayout
where
    S: Surface + ?Sized,
{
    ChartRenderer::default().render(surface, series)
}

/// Whole physical pixels for a logical length; fractions are dropped.
fn physical_pixels(logical: f64, dpr: f64) -> u32 {
    (logical * dpr).max(0.0) as u32
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::recording::{DrawOp, RecordingSurface};

    fn series(samples: &[f64]) -> TemperatureSeries {
        TemperatureSeries::new(samples.to_vec()).unwrap()
    }

    #[test]
    fn normalizes_for_device_pixels_before_drawing() {
        let mut surface = RecordingSurface::new(Size::new(300.5, 150.0), 2.0);
        render(&mut surface, &series(&[1.0, 2.0]));

        assert_eq!(surface.backing_store(), (601, 300));
        assert_eq!(surface.scale(), 2.0);
        assert!(matches!(surface.ops()[0], DrawOp::Clear { .. }));
    }

    #[test]
    fn draw_order_is_line_area_then_markers() {
        let mut surface = RecordingSurface::new(Size::new(300.0, 150.0), 1.0);
        render(&mut surface, &series(&[10.0, 12.0, 14.0, 12.0, 10.0]));

        let kinds: Vec<&str> = surface.ops().iter().map(DrawOp::kind).collect();
        assert_eq!(
            kinds,
            vec!["clear", "stroke", "fill", "circle", "text", "circle", "text"]
        );
    }

    #[test]
    fn stroke_uses_line_style() {
        let mut surface = RecordingSurface::new(Size::new(300.0, 150.0), 1.0);
        render(&mut surface, &series(&[1.0, 2.0, 3.0]));

        let style = surface
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Stroke { style, .. } => Some(*style),
                _ => None,
            })
            .unwrap();
        assert_eq!(style.width, 3.0);
        assert_eq!(style.color.to_string(), "rgba(255, 255, 255, 0.9)");
    }

    #[test]
    fn area_fill_uses_full_height_gradient() {
        let mut surface = RecordingSurface::new(Size::new(300.0, 150.0), 1.0);
        render(&mut surface, &series(&[1.0, 2.0, 3.0]));

        let paint = surface
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Fill { paint, .. } => Some(paint.clone()),
                _ => None,
            })
            .unwrap();
        match paint {
            Paint::Linear(g) => {
                assert_eq!(g.start, Point::new(0.0, 0.0));
                assert_eq!(g.end, Point::new(0.0, 150.0));
                assert_eq!(g.stops[0].color.alpha, 0.3);
                assert_eq!(g.stops[1].color.alpha, 0.0);
            }
            other => panic!("expected gradient, got {:?}", other),
        }
    }

    #[test]
    fn labels_are_offset_from_markers() {
        let mut surface = RecordingSurface::new(Size::new(300.0, 150.0), 1.0);
        let layout = render(&mut surface, &series(&[10.0, 12.0, 14.0, 12.0, 10.0]));

        let texts: Vec<(String, Point)> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, origin, .. } => Some((text.clone(), *origin)),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0].0, "10°");
        assert_eq!(texts[0].1, layout.vertices[0].offset(-10.0, -10.0));
        assert_eq!(texts[1].1, Point::new(270.0, 92.5));
    }

    #[test]
    fn clear_blanks_a_drawn_chart() {
        let mut surface = RecordingSurface::new(Size::new(300.0, 150.0), 1.0);
        render(&mut surface, &series(&[1.0, 2.0, 3.0]));

        surface.set_device_pixel_ratio(1.5);
        let size = ChartRenderer::default().clear(&mut surface);

        assert_eq!(size, Size::new(300.0, 150.0));
        assert_eq!(surface.backing_store(), (450, 225));
        assert_eq!(surface.ops().len(), 1);
        assert!(surface.stroked_vertices().is_empty());
    }

    #[test]
    fn rerender_replaces_previous_drawing() {
        let mut surface = RecordingSurface::new(Size::new(300.0, 150.0), 1.0);
        render(&mut surface, &series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
        render(&mut surface, &series(&[1.0, 2.0]));

        let strokes = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { .. }))
            .count();
        assert_eq!(strokes, 1);
        assert_eq!(surface.stroked_vertices().len(), 2);
    }
}
