use plotters::backend::DrawingBackend;
use plotters_backend::{BackendCoord, DrawingErrorKind};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, RGBAColor, ShapeStyle, TextStyle};
use plotters_svg::SVGBackend;

use crate::error::{ChartError, ChartResult};
use crate::geometry::{Point, Size};
use crate::surface::{Color, Font, LinearGradient, Paint, Path, PathCommand, StrokeStyle, Surface};

/// Flat strips used to approximate a linear gradient.
const GRADIENT_BANDS: usize = 32;

/// Backdrop behind the chart, also painted by partial clears.
pub const DEFAULT_BACKGROUND: Color = Color::rgb(36, 84, 150);

/// A draw call resolved to physical pixels.
#[derive(Debug, Clone)]
enum Shape {
    Polyline {
        points: Vec<BackendCoord>,
        color: Color,
        width: u32,
    },
    Polygon {
        points: Vec<BackendCoord>,
        color: Color,
    },
    Rect {
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        color: Color,
    },
    Circle {
        center: BackendCoord,
        radius: u32,
        color: Color,
    },
    Text {
        text: String,
        origin: BackendCoord,
        family: String,
        size: f64,
        bold: bool,
        color: Color,
    },
}

impl Shape {
    fn draw<DB: DrawingBackend>(
        &self,
        backend: &mut DB,
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        match self {
            Shape::Polyline {
                points,
                color,
                width,
            } => backend.draw_path(points.iter().copied(), &shape_style(*color, false, *width)),
            Shape::Polygon { points, color } => {
                backend.fill_polygon(points.iter().copied(), &shape_style(*color, true, 0))
            }
            Shape::Rect {
                upper_left,
                bottom_right,
                color,
            } => backend.draw_rect(*upper_left, *bottom_right, &shape_style(*color, true, 0), true),
            Shape::Circle {
                center,
                radius,
                color,
            } => backend.draw_circle(*center, *radius, &shape_style(*color, true, 0), true),
            Shape::Text {
                text,
                origin,
                family,
                size,
                bold,
                color,
            } => {
                let weight = if *bold { FontStyle::Bold } else { FontStyle::Normal };
                let fill = rgba(*color);
                let style = TextStyle::from(FontDesc::new(FontFamily::Name(family), *size, weight))
                    .color(&fill)
                    .pos(Pos::new(HPos::Left, VPos::Bottom));
                backend.draw_text(text, &style, *origin)
            }
        }
    }
}

fn rgba(color: Color) -> RGBAColor {
    RGBAColor(color.red, color.green, color.blue, color.alpha)
}

fn shape_style(color: Color, filled: bool, stroke_width: u32) -> ShapeStyle {
    ShapeStyle {
        color: rgba(color),
        filled,
        stroke_width,
    }
}

fn backend_error<E>(err: DrawingErrorKind<E>) -> ChartError
where
    E: std::error::Error + Send + Sync,
{
    ChartError::Backend(err.to_string())
}

/// Surface that renders to an SVG document through plotters.
///
/// Draw calls are kept in physical pixels and replayed onto an
/// [`SVGBackend`] sized to the backing store, so the file matches what a
/// canvas of the same density would show.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    dpr: f64,
    backing_store: (u32, u32),
    scale: f64,
    background: Color,
    shapes: Vec<Shape>,
}

impl SvgSurface {
    pub fn new(size: Size, dpr: f64) -> Self {
        Self {
            size,
            dpr,
            backing_store: (0, 0),
            scale: 1.0,
            background: DEFAULT_BACKGROUND,
            shapes: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn set_bounding_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    pub fn backing_store(&self) -> (u32, u32) {
        self.backing_store
    }

    /// Render the current frame as an SVG document.
    pub fn to_svg(&self) -> ChartResult<String> {
        let mut out = String::new();
        {
            let (width, height) = self.backing_store;
            let mut backend = SVGBackend::with_string(&mut out, self.backing_store);
            let corner = (
                i32::try_from(width).unwrap_or(i32::MAX),
                i32::try_from(height).unwrap_or(i32::MAX),
            );
            backend
                .draw_rect((0, 0), corner, &shape_style(self.background, true, 0), true)
                .map_err(backend_error)?;
            for shape in &self.shapes {
                shape.draw(&mut backend).map_err(backend_error)?;
            }
            backend.present().map_err(backend_error)?;
        }
        Ok(out)
    }

    fn to_device(&self, p: Point) -> BackendCoord {
        (
            (p.x * self.scale).round() as i32,
            (p.y * self.scale).round() as i32,
        )
    }

    fn to_device_len(&self, len: f64) -> u32 {
        (len * self.scale).round().max(1.0) as u32
    }

    fn polygon(&self, points: &[Point], color: Color) -> Shape {
        Shape::Polygon {
            points: points.iter().map(|p| self.to_device(*p)).collect(),
            color,
        }
    }
}

/// Subpaths of `path` with whether each was closed.
fn subpaths(path: &Path) -> Vec<(Vec<Point>, bool)> {
    let mut out: Vec<(Vec<Point>, bool)> = Vec::new();
    for command in path.commands() {
        match command {
            PathCommand::MoveTo(p) => out.push((vec![*p], false)),
            PathCommand::LineTo(p) => match out.last_mut() {
                Some((points, _)) => points.push(*p),
                None => out.push((vec![*p], false)),
            },
            PathCommand::Close => {
                if let Some((_, closed)) = out.last_mut() {
                    *closed = true;
                }
            }
        }
    }
    out
}

/// Single color for paints drawn without a gradient (marks and text).
fn flat_color(paint: &Paint, at: Point) -> Color {
    match paint {
        Paint::Solid(color) => *color,
        Paint::Linear(gradient) => gradient.color_at(gradient.offset_of(at)),
    }
}

/// Cut `polygon` into strips across the gradient axis, each filled with the
/// gradient's color at the middle of the strip.
fn gradient_bands(polygon: &[Point], gradient: &LinearGradient) -> Vec<(Vec<Point>, Color)> {
    let offsets = polygon.iter().map(|p| gradient.offset_of(*p));
    let low = offsets.clone().fold(f64::INFINITY, f64::min);
    let high = offsets.fold(f64::NEG_INFINITY, f64::max);
    if high <= low {
        return vec![(polygon.to_vec(), gradient.color_at(low))];
    }

    let step = (high - low) / GRADIENT_BANDS as f64;
    (0..GRADIENT_BANDS)
        .filter_map(|i| {
            let from = low + step * i as f64;
            let to = if i + 1 == GRADIENT_BANDS { high } else { from + step };
            let band = clip(&clip(polygon, gradient, from, true), gradient, to, false);
            (band.len() >= 3).then(|| (band, gradient.color_at((from + to) / 2.0)))
        })
        .collect()
}

/// Sutherland-Hodgman clip against one side of the line where the gradient
/// offset equals `bound`.
fn clip(polygon: &[Point], gradient: &LinearGradient, bound: f64, keep_above: bool) -> Vec<Point> {
    let side = |p: Point| {
        let d = gradient.offset_of(p) - bound;
        if keep_above {
            d
        } else {
            -d
        }
    };

    let mut out = Vec::with_capacity(polygon.len() + 2);
    for (i, &current) in polygon.iter().enumerate() {
        let previous = polygon[(i + polygon.len() - 1) % polygon.len()];
        let (d_prev, d_cur) = (side(previous), side(current));
        if d_cur >= 0.0 {
            if d_prev < 0.0 {
                out.push(intersect(previous, current, d_prev, d_cur));
            }
            out.push(current);
        } else if d_prev >= 0.0 {
            out.push(intersect(previous, current, d_prev, d_cur));
        }
    }
    out
}

fn intersect(a: Point, b: Point, da: f64, db: f64) -> Point {
    let t = da / (da - db);
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

impl Surface for SvgSurface {
    fn bounding_size(&self) -> Size {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn resize_backing_store(&mut self, width_px: u32, height_px: u32) {
        self.backing_store = (width_px, height_px);
        self.scale = 1.0;
    }

    fn set_scale(&mut self, factor: f64) {
        self.scale = factor;
    }

    fn clear_rect(&mut self, origin: Point, size: Size) {
        let covers_all = origin.x <= 0.0
            && origin.y <= 0.0
            && origin.x + size.width >= self.size.width
            && origin.y + size.height >= self.size.height;
        if covers_all {
            self.shapes.clear();
            return;
        }
        let corner = Point::new(origin.x + size.width, origin.y + size.height);
        self.shapes.push(Shape::Rect {
            upper_left: self.to_device(origin),
            bottom_right: self.to_device(corner),
            color: self.background,
        });
    }

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        for (mut points, closed) in subpaths(path) {
            if closed {
                if let Some(first) = points.first().copied() {
                    points.push(first);
                }
            }
            if points.len() < 2 {
                continue;
            }
            self.shapes.push(Shape::Polyline {
                points: points.iter().map(|p| self.to_device(*p)).collect(),
                color: style.color,
                width: self.to_device_len(style.width),
            });
        }
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        for (points, _) in subpaths(path) {
            if points.len() < 3 {
                continue;
            }
            match paint {
                Paint::Solid(color) => {
                    let shape = self.polygon(&points, *color);
                    self.shapes.push(shape);
                }
                Paint::Linear(gradient) => {
                    for (band, color) in gradient_bands(&points, gradient) {
                        let shape = self.polygon(&band, color);
                        self.shapes.push(shape);
                    }
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.shapes.push(Shape::Circle {
            center: self.to_device(center),
            radius: self.to_device_len(radius),
            color: flat_color(paint, center),
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &Font, paint: &Paint) {
        self.shapes.push(Shape::Text {
            text: text.to_string(),
            origin: self.to_device(origin),
            family: font.family.clone(),
            size: font.size_px * self.scale,
            bold: font.bold,
            color: flat_color(paint, origin),
        });
    }
}
