//! Error types for measurement operations.

use body_types::LandmarkError;
use thiserror::Error;

use crate::SessionState;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Errors that can occur during measurement operations.
///
/// A missing landmark is deliberately absent from this list: it only makes
/// one record entry unavailable, see [`MissingLandmark`](crate::MissingLandmark).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MeasureError {
    /// No usable pixel-to-centimetre ratio could be derived.
    ///
    /// Fatal for the session: without a ratio no measurement is produced.
    #[error("degenerate calibration: {reason}")]
    DegenerateCalibration {
        /// What was missing or degenerate.
        reason: String,
    },

    /// The supplied height is not a finite positive number.
    #[error("invalid height: {0} cm (must be finite and positive)")]
    InvalidHeight(f64),

    /// A calibration ratio must be finite and positive.
    #[error("invalid calibration ratio: {0} cm/px")]
    InvalidRatio(f64),

    /// Ellipse axes must be finite and non-negative.
    #[error("invalid ellipse input: width {width_px} px, depth {depth_px} px")]
    InvalidEllipseInput {
        /// Front-view width in pixels.
        width_px: f64,
        /// Side-view depth in pixels.
        depth_px: f64,
    },

    /// Measurement parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A session operation was called from the wrong state.
    #[error("invalid session transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// State the session was in.
        from: SessionState,
        /// State the call would have moved to.
        to: SessionState,
    },

    /// Landmark data was malformed.
    #[error("landmark error: {0}")]
    Landmark(#[from] LandmarkError),
}

impl MeasureError {
    /// Create a degenerate calibration error.
    #[must_use]
    pub fn degenerate_calibration(reason: impl Into<String>) -> Self {
        Self::DegenerateCalibration {
            reason: reason.into(),
        }
    }

    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }

    /// Whether this error ends the session.
    ///
    /// Only calibration failures and invalid height are fatal; the others
    /// signal contract violations by the caller.
    #[must_use]
    pub const fn is_calibration_failure(&self) -> bool {
        matches!(
            self,
            Self::DegenerateCalibration { .. } | Self::InvalidHeight(_)
        )
    }
}
