//! Parameters for a measurement session.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{MeasureError, MeasureResult};

/// Parameters for computing a measurement record.
///
/// Passed explicitly into every call; the engine keeps no global state, so
/// independent sessions may use different parameters concurrently.
///
/// # Example
///
/// ```
/// use body_measure::MeasureParams;
///
/// let params = MeasureParams::default();
/// assert!((params.min_confidence - 0.5).abs() < 1e-10);
///
/// let strict = MeasureParams::new().with_min_confidence(0.8);
/// assert!(strict.validate().is_ok());
///
/// let broken = MeasureParams::new().with_min_confidence(1.5);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeasureParams {
    /// Landmarks scored below this confidence are treated as absent.
    pub min_confidence: f64,

    /// Smallest usable head-to-foot span in pixels for calibration.
    pub min_span_px: f64,
}

impl MeasureParams {
    /// Default confidence threshold, same as the pose detector's own default.
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

    /// Default minimum calibration span.
    pub const DEFAULT_MIN_SPAN_PX: f64 = 1e-6;

    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the confidence threshold.
    #[must_use]
    pub const fn with_min_confidence(mut self, threshold: f64) -> Self {
        self.min_confidence = threshold;
        self
    }

    /// Sets the minimum calibration span.
    #[must_use]
    pub const fn with_min_span_px(mut self, span: f64) -> Self {
        self.min_span_px = span;
        self
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidParams`] if `min_confidence` is outside
    /// `[0, 1]` or `min_span_px` is not finite and positive.
    pub fn validate(&self) -> MeasureResult<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(MeasureError::invalid_params(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        if !self.min_span_px.is_finite() || self.min_span_px <= 0.0 {
            return Err(MeasureError::invalid_params(format!(
                "min_span_px must be finite and positive, got {}",
                self.min_span_px
            )));
        }
        Ok(())
    }
}

impl Default for MeasureParams {
    fn default() -> Self {
        Self {
            min_confidence: Self::DEFAULT_MIN_CONFIDENCE,
            min_span_px: Self::DEFAULT_MIN_SPAN_PX,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let params = MeasureParams::default();
        assert_relative_eq!(params.min_confidence, 0.5);
        assert_relative_eq!(params.min_span_px, 1e-6);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let params = MeasureParams::new()
            .with_min_confidence(0.25)
            .with_min_span_px(2.0);
        assert_relative_eq!(params.min_confidence, 0.25);
        assert_relative_eq!(params.min_span_px, 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MeasureParams::new().with_min_confidence(-0.1).validate().is_err());
        assert!(MeasureParams::new().with_min_confidence(f64::NAN).validate().is_err());
        assert!(MeasureParams::new().with_min_span_px(0.0).validate().is_err());
        assert!(MeasureParams::new().with_min_span_px(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_boundary_confidence_is_valid() {
        assert!(MeasureParams::new().with_min_confidence(0.0).validate().is_ok());
        assert!(MeasureParams::new().with_min_confidence(1.0).validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let params: MeasureParams = serde_json::from_str(r#"{"min_confidence": 0.7}"#).unwrap();
        assert_relative_eq!(params.min_confidence, 0.7);
        assert_relative_eq!(params.min_span_px, MeasureParams::DEFAULT_MIN_SPAN_PX);
    }
}
