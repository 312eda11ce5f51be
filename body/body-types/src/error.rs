//! Error types for landmark data.

use thiserror::Error;

/// Result type alias for landmark operations.
pub type LandmarkResult<T> = Result<T, LandmarkError>;

/// Errors that can occur when building landmark data.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LandmarkError {
    /// A landmark name did not match any known identifier.
    #[error("unknown landmark name: '{0}'")]
    UnknownLandmark(String),

    /// A coordinate was `NaN` or infinite.
    #[error("invalid coordinate for {landmark}: ({x}, {y})")]
    InvalidCoordinate {
        /// Name of the landmark the coordinate belongs to.
        landmark: &'static str,
        /// Horizontal pixel coordinate.
        x: f64,
        /// Vertical pixel coordinate.
        y: f64,
    },

    /// A confidence score was outside `[0, 1]`.
    #[error("invalid confidence for {landmark}: {confidence} (expected 0..=1)")]
    InvalidConfidence {
        /// Name of the landmark the score belongs to.
        landmark: &'static str,
        /// The rejected score.
        confidence: f64,
    },

    /// Image dimensions used for denormalization were not positive.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImageSize {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
}

impl LandmarkError {
    /// Create an unknown landmark error.
    #[must_use]
    pub fn unknown_landmark(name: impl Into<String>) -> Self {
        Self::UnknownLandmark(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LandmarkError::unknown_landmark("left_toe");
        assert!(format!("{err}").contains("left_toe"));

        let err = LandmarkError::InvalidConfidence {
            landmark: "nose",
            confidence: 1.5,
        };
        let msg = format!("{err}");
        assert!(msg.contains("nose"));
        assert!(msg.contains("1.5"));

        let err = LandmarkError::InvalidImageSize {
            width: 0,
            height: 480,
        };
        assert!(format!("{err}").contains("0x480"));
    }
}
