//! Pixel-to-centimetre calibration from a known body height.
//!
//! The head-to-foot span of the front photograph is matched against the
//! height the user supplied. The same ratio is later applied to the side
//! photograph, which assumes both were taken from the same distance.

use std::fmt;

use body_types::{Landmark, LandmarkSet, Point2};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{MeasureError, MeasureParams, MeasureResult};

/// Landmarks averaged for the top reference, in order of preference.
const TOP_REFERENCES: [Landmark; 4] = [
    Landmark::LeftEye,
    Landmark::RightEye,
    Landmark::LeftEar,
    Landmark::RightEar,
];

/// Centimetres per pixel. Always finite and positive.
///
/// # Example
///
/// ```
/// use body_measure::CalibrationRatio;
///
/// let ratio = CalibrationRatio::new(0.2125).unwrap();
/// assert!((ratio.to_cm(140.0) - 29.75).abs() < 1e-10);
///
/// assert!(CalibrationRatio::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CalibrationRatio(f64);

impl CalibrationRatio {
    /// Wraps a ratio after checking it.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidRatio`] for zero, negative or non-finite values.
    pub fn new(cm_per_px: f64) -> MeasureResult<Self> {
        if cm_per_px.is_finite() && cm_per_px > 0.0 {
            Ok(Self(cm_per_px))
        } else {
            Err(MeasureError::InvalidRatio(cm_per_px))
        }
    }

    /// The raw ratio in centimetres per pixel.
    #[must_use]
    pub const fn cm_per_px(self) -> f64 {
        self.0
    }

    /// Converts a pixel length to centimetres.
    #[must_use]
    pub fn to_cm(self, px: f64) -> f64 {
        px * self.0
    }
}

impl fmt::Display for CalibrationRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} cm/px", self.0)
    }
}

/// Derives the ratio from a front view using default parameters.
///
/// See [`calibrate_with`].
///
/// # Errors
///
/// Same as [`calibrate_with`].
///
/// # Example
///
/// ```
/// use body_measure::calibrate;
/// use body_types::{Landmark, LandmarkSet};
///
/// let front = LandmarkSet::from_pixels([
///     (Landmark::LeftEye, 95.0, 50.0),
///     (Landmark::RightEye, 105.0, 50.0),
///     (Landmark::LeftAnkle, 100.0, 850.0),
/// ]).unwrap();
///
/// let ratio = calibrate(&front, 170.0).unwrap();
/// assert!((ratio.cm_per_px() - 0.2125).abs() < 1e-12);
/// ```
pub fn calibrate(front: &LandmarkSet, height_cm: f64) -> MeasureResult<CalibrationRatio> {
    calibrate_with(front, height_cm, &MeasureParams::default())
}

/// Derives the ratio from a front view.
///
/// Landmarks scored below `params.min_confidence` count as absent. The top
/// reference is the mean of whichever eyes and ears are present,
/// falling back to the nose. The bottom reference is the lower of the
/// present ankles, falling back to the lower heel. The ratio is
/// `height_cm / |y_bottom - y_top|`.
///
/// # Errors
///
/// - [`MeasureError::InvalidParams`] if `params` fail validation.
/// - [`MeasureError::InvalidHeight`] if `height_cm` is not finite and positive.
/// - [`MeasureError::DegenerateCalibration`] if a reference is missing or the
///   span is below `params.min_span_px`.
pub fn calibrate_with(
    front: &LandmarkSet,
    height_cm: f64,
    params: &MeasureParams,
) -> MeasureResult<CalibrationRatio> {
    params.validate()?;
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(MeasureError::InvalidHeight(height_cm));
    }

    let front = &front.with_min_confidence(params.min_confidence);

    let top = top_reference(front).ok_or_else(|| {
        MeasureError::degenerate_calibration("no eye, ear or nose landmark in front view")
    })?;
    let bottom = bottom_reference(front).ok_or_else(|| {
        MeasureError::degenerate_calibration("no ankle or heel landmark in front view")
    })?;

    let span_px = (bottom.y - top.y).abs();
    if !span_px.is_finite() || span_px < params.min_span_px {
        return Err(MeasureError::degenerate_calibration(format!(
            "head-to-foot span of {span_px} px is below {} px",
            params.min_span_px
        )));
    }

    let ratio = CalibrationRatio::new(height_cm / span_px)?;
    debug!(
        top_y = top.y,
        bottom_y = bottom.y,
        span_px,
        %ratio,
        "calibrated front view"
    );
    Ok(ratio)
}

/// Centroid of the present eye/ear landmarks, or the nose.
#[allow(clippy::cast_precision_loss)]
fn top_reference(front: &LandmarkSet) -> Option<Point2<f64>> {
    let present: Vec<Point2<f64>> = TOP_REFERENCES
        .iter()
        .filter_map(|&lm| front.position(lm))
        .collect();

    if present.is_empty() {
        return front.position(Landmark::Nose);
    }

    let sum = present
        .iter()
        .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
    Some(Point2::from(sum / present.len() as f64))
}

/// Lowest present ankle, otherwise lowest present heel.
fn bottom_reference(front: &LandmarkSet) -> Option<Point2<f64>> {
    lowest(front, [Landmark::LeftAnkle, Landmark::RightAnkle])
        .or_else(|| lowest(front, [Landmark::LeftHeel, Landmark::RightHeel]))
}

fn lowest(front: &LandmarkSet, candidates: [Landmark; 2]) -> Option<Point2<f64>> {
    candidates
        .into_iter()
        .filter_map(|lm| front.position(lm))
        .max_by(|a, b| a.y.total_cmp(&b.y))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use body_types::LandmarkPoint;

    fn standing() -> LandmarkSet {
        LandmarkSet::from_pixels([
            (Landmark::Nose, 100.0, 60.0),
            (Landmark::LeftEye, 95.0, 50.0),
            (Landmark::RightEye, 105.0, 50.0),
            (Landmark::LeftAnkle, 90.0, 850.0),
            (Landmark::RightAnkle, 110.0, 846.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_worked_example() {
        let ratio = calibrate(&standing(), 170.0).unwrap();
        assert_relative_eq!(ratio.cm_per_px(), 0.2125, epsilon = 1e-12);
    }

    #[test]
    fn test_prefers_lower_ankle() {
        let mut front = standing();
        front.insert(Landmark::LeftAnkle, LandmarkPoint::new(90.0, 800.0));
        // Right ankle at 846 is now the lower one.
        let ratio = calibrate(&front, 170.0).unwrap();
        assert_relative_eq!(ratio.cm_per_px(), 170.0 / 796.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eyes_and_ears_are_averaged() {
        let front = LandmarkSet::from_pixels([
            (Landmark::LeftEye, 95.0, 40.0),
            (Landmark::RightEye, 105.0, 40.0),
            (Landmark::LeftEar, 85.0, 60.0),
            (Landmark::RightEar, 115.0, 60.0),
            (Landmark::RightAnkle, 100.0, 850.0),
        ])
        .unwrap();
        let ratio = calibrate(&front, 160.0).unwrap();
        assert_relative_eq!(ratio.cm_per_px(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_falls_back_to_nose_and_heel() {
        let front = LandmarkSet::from_pixels([
            (Landmark::Nose, 100.0, 100.0),
            (Landmark::LeftHeel, 95.0, 900.0),
        ])
        .unwrap();
        let ratio = calibrate(&front, 180.0).unwrap();
        assert_relative_eq!(ratio.cm_per_px(), 0.225, epsilon = 1e-12);
    }

    #[test]
    fn test_ankle_preferred_over_heel() {
        let mut front = standing();
        front.insert(Landmark::LeftHeel, LandmarkPoint::new(90.0, 870.0));
        let ratio = calibrate(&front, 170.0).unwrap();
        assert_relative_eq!(ratio.cm_per_px(), 0.2125, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_top_is_degenerate() {
        let front = LandmarkSet::from_pixels([(Landmark::LeftAnkle, 0.0, 850.0)]).unwrap();
        let err = calibrate(&front, 170.0).unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateCalibration { .. }));
    }

    #[test]
    fn test_missing_bottom_is_degenerate() {
        let front = LandmarkSet::from_pixels([(Landmark::Nose, 0.0, 50.0)]).unwrap();
        let err = calibrate(&front, 170.0).unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateCalibration { .. }));
    }

    #[test]
    fn test_zero_span_is_degenerate() {
        let front = LandmarkSet::from_pixels([
            (Landmark::Nose, 100.0, 500.0),
            (Landmark::LeftAnkle, 100.0, 500.0),
        ])
        .unwrap();
        let err = calibrate(&front, 170.0).unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateCalibration { .. }));
    }

    #[test]
    fn test_inverted_span_uses_absolute_value() {
        // Upside-down photo: feet above head.
        let front = LandmarkSet::from_pixels([
            (Landmark::Nose, 100.0, 850.0),
            (Landmark::LeftAnkle, 100.0, 50.0),
        ])
        .unwrap();
        let ratio = calibrate(&front, 170.0).unwrap();
        assert_relative_eq!(ratio.cm_per_px(), 0.2125, epsilon = 1e-12);
    }

    #[test]
    fn test_span_threshold_from_params() {
        let params = MeasureParams::new().with_min_span_px(1000.0);
        let err = calibrate_with(&standing(), 170.0, &params).unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateCalibration { .. }));
    }

    #[test]
    fn test_low_confidence_ankle_is_ignored() {
        let front = LandmarkSet::new()
            .with(Landmark::Nose, LandmarkPoint::new(100.0, 50.0))
            .with(
                Landmark::LeftAnkle,
                LandmarkPoint::new(100.0, 850.0).with_confidence(0.1),
            )
            .with(
                Landmark::RightAnkle,
                LandmarkPoint::new(100.0, 650.0).with_confidence(0.99),
            );

        let ratio = calibrate_with(&front, 170.0, &MeasureParams::default()).unwrap();
        assert_relative_eq!(ratio.cm_per_px(), 170.0 / 600.0, epsilon = 1e-12);

        let lenient = MeasureParams::new().with_min_confidence(0.05);
        let ratio = calibrate_with(&front, 170.0, &lenient).unwrap();
        assert_relative_eq!(ratio.cm_per_px(), 0.2125, epsilon = 1e-12);
    }

    #[test]
    fn test_params_are_validated() {
        let front = LandmarkSet::from_pixels([
            (Landmark::Nose, 100.0, 500.0),
            (Landmark::LeftAnkle, 100.0, 500.0),
        ])
        .unwrap();
        let params = MeasureParams::new().with_min_span_px(f64::NAN);
        let err = calibrate_with(&front, 170.0, &params).unwrap_err();
        assert!(matches!(err, MeasureError::InvalidParams(_)));

        let params = MeasureParams::new().with_min_confidence(2.0);
        let err = calibrate_with(&standing(), 170.0, &params).unwrap_err();
        assert!(matches!(err, MeasureError::InvalidParams(_)));
    }

    #[test]
    fn test_invalid_height() {
        for h in [0.0, -170.0, f64::NAN, f64::INFINITY] {
            let err = calibrate(&standing(), h).unwrap_err();
            assert!(matches!(err, MeasureError::InvalidHeight(_)));
        }
    }

    #[test]
    fn test_deterministic() {
        let a = calibrate(&standing(), 175.5).unwrap();
        let b = calibrate(&standing(), 175.5).unwrap();
        assert_eq!(a.cm_per_px().to_bits(), b.cm_per_px().to_bits());
    }

    #[test]
    fn test_ratio_rejects_non_positive() {
        assert!(CalibrationRatio::new(-1.0).is_err());
        assert!(CalibrationRatio::new(f64::NAN).is_err());
        assert!(CalibrationRatio::new(1e-9).is_ok());
    }
}
