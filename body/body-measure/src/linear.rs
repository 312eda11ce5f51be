//! Straight-line and multi-segment distances.

use body_types::Point2;

use crate::CalibrationRatio;

/// Distance between two pixel positions, in centimetres.
///
/// # Example
///
/// ```
/// use body_measure::{CalibrationRatio, distance};
/// use body_types::Point2;
///
/// let ratio = CalibrationRatio::new(0.2125).unwrap();
/// let cm = distance(Point2::new(80.0, 200.0), Point2::new(220.0, 200.0), ratio);
/// assert!((cm - 29.75).abs() < 1e-10);
/// ```
#[must_use]
pub fn distance(from: Point2<f64>, to: Point2<f64>, ratio: CalibrationRatio) -> f64 {
    ratio.to_cm(pixel_distance(from, to))
}

/// Sum of consecutive segment lengths along `points`, in centimetres.
///
/// Fewer than two points give a length of zero.
///
/// # Example
///
/// ```
/// use body_measure::{CalibrationRatio, path_length};
/// use body_types::Point2;
///
/// let ratio = CalibrationRatio::new(0.5).unwrap();
/// // shoulder -> elbow -> wrist
/// let arm = [
///     Point2::new(0.0, 0.0),
///     Point2::new(0.0, 60.0),
///     Point2::new(0.0, 110.0),
/// ];
/// assert!((path_length(&arm, ratio) - 55.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn path_length(points: &[Point2<f64>], ratio: CalibrationRatio) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(pair[0], pair[1], ratio))
        .sum()
}

/// Like [`path_length`], but for points that may be absent.
///
/// Returns `None` as soon as any point is absent. A partial sum would
/// understate the path, so no segment is ever skipped.
#[must_use]
pub fn checked_path_length(points: &[Option<Point2<f64>>], ratio: CalibrationRatio) -> Option<f64> {
    let resolved: Option<Vec<Point2<f64>>> = points.iter().copied().collect();
    resolved.map(|pts| path_length(&pts, ratio))
}

/// Euclidean pixel distance.
pub(crate) fn pixel_distance(from: Point2<f64>, to: Point2<f64>) -> f64 {
    (to - from).norm()
}
