//! Chart geometry
//!
//! Chart descriptions and the value/axis scaling shared by the terminal
//! renderer and the canvas frontend.

use crate::model::{Bucket, TimeSeriesPoint};

/// Stroke colour of the Total Analytics line
pub const TOTAL_STROKE: &str = "#8884d8";
/// Stroke colour of the RedListed Analytics line
pub const RED_LISTED_STROKE: &str = "#82ca9d";
/// Stroke colour of the UnListed Analytics line
pub const UNLISTED_STROKE: &str = "#f9c74f";

/// Number of horizontal grid intervals
pub const GRID_INTERVALS: usize = 4;

/// One line chart: title, stroke colour and the points to plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec<'a> {
    pub bucket: Bucket,
    pub stroke: &'static str,
    pub points: &'a [TimeSeriesPoint],
}

impl<'a> ChartSpec<'a> {
    pub fn new(bucket: Bucket, points: &'a [TimeSeriesPoint]) -> Self {
        let stroke = match bucket {
            Bucket::RedListed => RED_LISTED_STROKE,
            Bucket::Unlisted => UNLISTED_STROKE,
            _ => TOTAL_STROKE,
        };
        Self {
            bucket,
            stroke,
            points,
        }
    }

    pub fn title(&self) -> &'static str {
        self.bucket.label()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn scale(&self) -> ValueScale {
        ValueScale::fit(self.points)
    }
}

/// Vertical (count) scale of a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
}

impl ValueScale {
    /// Fit the scale to the present counts. The axis always includes zero
    /// and never collapses to a single value.
    pub fn fit(points: &[TimeSeriesPoint]) -> Self {
        let mut min = 0.0_f64;
        let mut max = f64::NEG_INFINITY;

        for count in points.iter().filter_map(TimeSeriesPoint::value) {
            min = min.min(count);
            max = max.max(count);
        }

        if !max.is_finite() || max <= min {
            max = min + 1.0;
        }

        Self {
            min,
            max: nice_ceiling(max),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Distance from the top of an axis of length `extent` (top = max)
    pub fn project(&self, value: f64, extent: f64) -> f64 {
        ((self.max - value) / self.span()) * extent
    }

    /// Grid tick values from max down to min
    pub fn ticks(&self) -> Vec<f64> {
        (0..=GRID_INTERVALS)
            .map(|i| self.max - (i as f64 / GRID_INTERVALS as f64) * self.span())
            .collect()
    }
}

/// Round up to 1, 2, 2.5 or 5 times a power of ten so ticks stay readable
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 {
        return value;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|s| normalized <= *s)
        .unwrap_or(10.0);
    step * magnitude
}

/// Horizontal position of point `index` out of `len` over `extent`.
/// A lone point sits in the middle.
pub fn x_position(index: usize, len: usize, extent: f64) -> f64 {
    if len <= 1 {
        extent / 2.0
    } else {
        index as f64 / (len - 1) as f64 * extent
    }
}

/// Index of the point closest to horizontal offset `x`
pub fn nearest_index(x: f64, len: usize, extent: f64) -> Option<usize> {
    if len == 0 || extent <= 0.0 {
        return None;
    }
    if len == 1 {
        return Some(0);
    }
    let step = extent / (len - 1) as f64;
    let idx = (x / step).round().clamp(0.0, (len - 1) as f64);
    Some(idx as usize)
}
