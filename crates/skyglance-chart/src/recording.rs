use crate::geometry::{Point, Size};
use crate::surface::{Font, Paint, Path, StrokeStyle, Surface};

/// One recorded draw call, in drawing units.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { origin: Point, size: Size },
    Stroke { path: Path, style: StrokeStyle },
    Fill { path: Path, paint: Paint },
    Circle { center: Point, radius: f64, paint: Paint },
    Text { text: String, origin: Point, font: Font, paint: Paint },
}

impl DrawOp {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Clear { .. } => "clear",
            Self::Stroke { .. } => "stroke",
            Self::Fill { .. } => "fill",
            Self::Circle { .. } => "circle",
            Self::Text { .. } => "text",
        }
    }
}

/// Headless surface that keeps the draw calls of the current frame.
///
/// Clearing the whole surface drops everything recorded before it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    dpr: f64,
    backing_store: (u32, u32),
    scale: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: Size, dpr: f64) -> Self {
        Self {
            size,
            dpr,
            backing_store: (0, 0),
            scale: 1.0,
            ops: Vec::new(),
        }
    }

    /// Simulate the hosting element being laid out at a new size.
    pub fn set_bounding_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Simulate moving to a display with a different density.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    pub fn backing_store(&self) -> (u32, u32) {
        self.backing_store
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Vertices of the most recent stroked path.
    pub fn stroked_vertices(&self) -> Vec<Point> {
        self.ops
            .iter()
            .rev()
            .find_map(|op| match op {
                DrawOp::Stroke { path, .. } => Some(path.points().collect()),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl Surface for RecordingSurface {
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
            self.ops.clear();
        }
        self.ops.push(DrawOp::Clear { origin, size });
    }

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            style: *style,
        });
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &Font, paint: &Paint) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            font: font.clone(),
            paint: paint.clone(),
        });
    }
}
