use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, LinearScale, PlotArea};
use crate::error::PlotResult;

/// Point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps one data point into the plot area. Y grows upward in data space.
pub fn project_point(
    point: DataPoint,
    x_scale: LinearScale,
    y_scale: LinearScale,
    area: PlotArea,
) -> PlotResult<PixelPoint> {
    let x = x_scale.domain_to_pixel(point.x, area.left, area.right())?;
    let y = y_scale.domain_to_pixel(point.y, area.bottom(), area.top)?;
    Ok(PixelPoint::new(x, y))
}

/// Projects series points into connected pixel runs.
///
/// Non-finite samples break the line, so the result holds one run per
/// contiguous stretch of finite points. Runs shorter than two points are
/// dropped since they draw nothing.
pub fn project_line_runs(
    points: &[DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
    area: PlotArea,
) -> PlotResult<Vec<Vec<PixelPoint>>> {
    let mut runs = Vec::new();
    let mut current: Vec<PixelPoint> = Vec::new();

    for point in points {
        if !point.is_finite() {
            if current.len() >= 2 {
                runs.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            continue;
        }
        current.push(project_point(*point, x_scale, y_scale, area)?);
    }

    if current.len() >= 2 {
        runs.push(current);
    }

    Ok(runs)
}
