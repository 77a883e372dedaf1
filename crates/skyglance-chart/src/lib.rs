//! Temperature chart rendering for SkyGlance.
//!
//! [`ChartRenderer`] turns a [`TemperatureSeries`] into draw calls on any
//! [`Surface`]. Geometry lives in [`ChartLayout`] so it can be inspected
//! without drawing anything.

mod error;
mod geometry;
mod recording;
mod render;
mod series;
mod style;
mod surface;
mod svg;

pub use error::{ChartError, ChartResult};
pub use geometry::{ChartLayout, Marker, Point, Size, MARKER_STRIDE, PADDING, RANGE_MARGIN};
pub use recording::{DrawOp, RecordingSurface};
pub use render::{render, ChartRenderer};
pub use series::{TemperatureSeries, MIN_SAMPLES};
pub use style::ChartStyle;
pub use surface::{
    Color, Font, GradientStop, LineCap, LineJoin, LinearGradient, Paint, Path, PathCommand,
    StrokeStyle, Surface,
};
pub use svg::{SvgSurface, DEFAULT_BACKGROUND};
