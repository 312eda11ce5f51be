//! Detected landmark positions.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Landmark, LandmarkError, LandmarkResult};

/// A landmark position in image pixels.
///
/// Coordinates are already denormalized: `x` grows to the right and `y`
/// grows downwards, as in the source photograph.
///
/// # Example
///
/// ```
/// use body_types::LandmarkPoint;
///
/// let p = LandmarkPoint::new(120.0, 340.0).with_confidence(0.9);
/// assert!((p.x() - 120.0).abs() < 1e-12);
/// assert!(p.meets_confidence(0.5));
/// assert!(!p.meets_confidence(0.95));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LandmarkPoint {
    /// Pixel position.
    pub position: Point2<f64>,
    /// Detector confidence in `[0, 1]`, if the detector reported one.
    pub confidence: Option<f64>,
}

impl LandmarkPoint {
    /// Creates a point without a confidence score.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            confidence: None,
        }
    }

    /// Attaches a confidence score.
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Creates a point after checking that it is usable.
    ///
    /// # Errors
    ///
    /// Returns [`LandmarkError::InvalidCoordinate`] for non-finite coordinates
    /// and [`LandmarkError::InvalidConfidence`] for a score outside `[0, 1]`.
    pub fn checked(
        landmark: Landmark,
        x: f64,
        y: f64,
        confidence: Option<f64>,
    ) -> LandmarkResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(LandmarkError::InvalidCoordinate {
                landmark: landmark.name(),
                x,
                y,
            });
        }
        if let Some(c) = confidence {
            if !(0.0..=1.0).contains(&c) {
                return Err(LandmarkError::InvalidConfidence {
                    landmark: landmark.name(),
                    confidence: c,
                });
            }
        }
        Ok(Self {
            position: Point2::new(x, y),
            confidence,
        })
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Whether this point is trustworthy at the given threshold.
    ///
    /// Points without a score always pass.
    #[must_use]
    pub fn meets_confidence(&self, threshold: f64) -> bool {
        self.confidence.is_none_or(|c| c >= threshold)
    }
}

impl From<Point2<f64>> for LandmarkPoint {
    fn from(position: Point2<f64>) -> Self {
        Self {
            position,
            confidence: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_has_no_confidence() {
        let p = LandmarkPoint::new(1.0, 2.0);
        assert!(p.confidence.is_none());
        assert_relative_eq!(p.x(), 1.0);
        assert_relative_eq!(p.y(), 2.0);
    }

    #[test]
    fn test_checked_rejects_nan() {
        let err = LandmarkPoint::checked(Landmark::LeftKnee, f64::NAN, 2.0, None).unwrap_err();
        assert!(matches!(
            err,
            LandmarkError::InvalidCoordinate {
                landmark: "left_knee",
                ..
            }
        ));
    }

    #[test]
    fn test_checked_rejects_bad_confidence() {
        assert!(LandmarkPoint::checked(Landmark::Nose, 0.0, 0.0, Some(-0.1)).is_err());
        assert!(LandmarkPoint::checked(Landmark::Nose, 0.0, 0.0, Some(1.01)).is_err());
        assert!(LandmarkPoint::checked(Landmark::Nose, 0.0, 0.0, Some(1.0)).is_ok());
    }

    #[test]
    fn test_meets_confidence() {
        let p = LandmarkPoint::new(0.0, 0.0).with_confidence(0.5);
        assert!(p.meets_confidence(0.5));
        assert!(!p.meets_confidence(0.51));
        assert!(LandmarkPoint::new(0.0, 0.0).meets_confidence(1.0));
    }
}
