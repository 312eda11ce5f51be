//! Elliptical cross-section model for circumferences.
//!
//! A body part is treated as an ellipse whose width comes from the front
//! view and whose depth comes from the side view.

use std::f64::consts::PI;

use crate::{CalibrationRatio, MeasureError, MeasureResult};

/// Ramanujan's second approximation of an ellipse perimeter.
///
/// `C ≈ π · [3(a+b) − sqrt((3a+b)(a+3b))]` for semi-axes `a` and `b`.
/// Reduces exactly to `2πa` when `a == b`.
///
/// # Example
///
/// ```
/// use body_measure::ramanujan_circumference;
///
/// let circle = ramanujan_circumference(10.0, 10.0);
/// assert!((circle - 2.0 * std::f64::consts::PI * 10.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn ramanujan_circumference(a: f64, b: f64) -> f64 {
    let root = (3.0 * a + b) * (a + 3.0 * b);
    PI * (3.0 * (a + b) - root.sqrt())
}

/// Circumference in centimetres of an ellipse given its pixel width and depth.
///
/// The semi-axes are converted to centimetres first. Scaling the pixel-space
/// perimeter afterwards gives the same value, as the formula is homogeneous.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidEllipseInput`] if either extent is negative
/// or not finite.
///
/// # Example
///
/// ```
/// use body_measure::{CalibrationRatio, ellipse_circumference};
///
/// let ratio = CalibrationRatio::new(1.0).unwrap();
/// let c = ellipse_circumference(30.0, 18.0, ratio).unwrap();
/// assert!((c - 76.58).abs() < 0.01);
///
/// assert!(ellipse_circumference(-1.0, 18.0, ratio).is_err());
/// ```
pub fn ellipse_circumference(
    width_px: f64,
    depth_px: f64,
    ratio: CalibrationRatio,
) -> MeasureResult<f64> {
    let usable = |v: f64| v.is_finite() && v >= 0.0;
    if !usable(width_px) || !usable(depth_px) {
        return Err(MeasureError::InvalidEllipseInput { width_px, depth_px });
    }

    let a = ratio.to_cm(width_px / 2.0);
    let b = ratio.to_cm(depth_px / 2.0);
    Ok(ramanujan_circumference(a, b))
}
