use std::fmt;

use crate::geometry::{Point, Size};

/// RGB color with a 0..=1 alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Linear blend towards `other`; `t` of 0 is `self`, 1 is `other`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            self.alpha + (other.alpha - self.alpha) * t,
        )
    }
}

/// Formats as a CSS color, e.g. `rgba(255, 255, 255, 0.9)`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
    pub cap: LineCap,
    pub join: LineJoin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Gradient along the line `start -> end`, in drawing units.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Where `p` projects onto the gradient axis: 0 at `start`, 1 at `end`.
    pub fn offset_of(&self, p: Point) -> f64 {
        let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
        let length_sq = dx * dx + dy * dy;
        if length_sq == 0.0 {
            return 0.0;
        }
        ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / length_sq
    }

    /// Color at `offset`, held at the first and last stops beyond them.
    pub fn color_at(&self, offset: f64) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::rgba(0, 0, 0, 0.0);
        };
        if offset <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if offset <= to.offset {
                let span = to.offset - from.offset;
                let t = if span > 0.0 { (offset - from.offset) / span } else { 1.0 };
                return from.color.lerp(to.color, t);
            }
        }
        last.color
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size_px: f64,
    pub bold: bool,
}

/// Formats as a CSS font shorthand, e.g. `bold 12px Arial`.
impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bold {
            write!(f, "bold ")?;
        }
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// Polyline path in drawing units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect `points` in order: a move to the first, lines to the rest.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Self::new();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                path.move_to(*p);
            } else {
                path.line_to(*p);
            }
        }
        path
    }

    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.commands.push(PathCommand::LineTo(p));
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Points visited by move/line commands, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Close => None,
        })
    }
}

/// A 2D drawing target with canvas semantics.
///
/// Drawing units are logical (CSS) pixels once [`Surface::set_scale`] has been
/// applied with the device pixel ratio.
pub trait Surface {
    /// Logical size of the element the surface is laid out in.
    fn bounding_size(&self) -> Size;

    fn device_pixel_ratio(&self) -> f64;

    /// Resize the physical pixel buffer. Resets any transform.
    fn resize_backing_store(&mut self, width_px: u32, height_px: u32);

    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, factor: f64);

    fn clear_rect(&mut self, origin: Point, size: Size);

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle);

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Draw `text` with its alphabetic baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: &Font, paint: &Paint);
}
