use crate::series::TemperatureSeries;

/// Inset on every side of the plot, in logical pixels.
pub const PADDING: f64 = 20.0;
/// Headroom added above the maximum and below the minimum, in degrees.
pub const RANGE_MARGIN: f64 = 2.0;
/// Every n-th sample gets a marker and a label.
pub const MARKER_STRIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An annotated sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub center: Point,
    pub temperature: f64,
    pub label: String,
}

/// Chart geometry for one series on one surface size, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub size: Size,
    pub min_temp: f64,
    pub max_temp: f64,
    pub step_x: f64,
    pub vertices: Vec<Point>,
    pub markers: Vec<Marker>,
}

impl ChartLayout {
    pub fn compute(series: &TemperatureSeries, size: Size) -> Self {
        let max_temp = series.max() + RANGE_MARGIN;
        let min_temp = series.min() - RANGE_MARGIN;
        // `TemperatureSeries` guarantees at least two samples.
        let step_x = (size.width - PADDING * 2.0) / (series.len() - 1) as f64;

        let mut layout = Self {
            size,
            min_temp,
            max_temp,
            step_x,
            vertices: Vec::with_capacity(series.len()),
            markers: Vec::with_capacity(series.len().div_ceil(MARKER_STRIDE)),
        };

        for (i, &temp) in series.samples().iter().enumerate() {
            let vertex = Point::new(layout.x_for(i), layout.y_for(temp));
            layout.vertices.push(vertex);

            if i % MARKER_STRIDE == 0 {
                layout.markers.push(Marker {
                    index: i,
                    center: vertex,
                    temperature: temp,
                    label: temperature_label(temp),
                });
            }
        }

        layout
    }

    pub fn x_for(&self, index: usize) -> f64 {
        PADDING + index as f64 * self.step_x
    }

    /// Linear, inverted: warmer is higher on screen.
    pub fn y_for(&self, temp: f64) -> f64 {
        let h = self.size.height;
        h - PADDING - ((temp - self.min_temp) / (self.max_temp - self.min_temp)) * (h - PADDING * 2.0)
    }

    /// The line vertices followed by the two bottom corners of the filled area.
    pub fn area_outline(&self) -> Vec<Point> {
        let mut outline = self.vertices.clone();
        outline.push(Point::new(self.size.width - PADDING, self.size.height));
        outline.push(Point::new(PADDING, self.size.height));
        outline
    }
}

/// Rounded whole degrees, e.g. `13°`. Halves round away from zero.
pub fn temperature_label(temp: f64) -> String {
    format!("{}°", temp.round() as i64)
}
