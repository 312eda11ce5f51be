//! Measurement sessions and the one-shot entry points built on them.
//!
//! A session moves strictly forward:
//!
//! ```text
//! Uninitialized --calibrate--> Calibrated --compute--> Computing --> Complete
//!       |
//!       +--calibrate (error)--> Failed
//! ```
//!
//! Only calibration can fail a session. Once calibrated, missing landmarks
//! and unusable geometry are reported on their entries and the session
//! always completes.
//!
//! `Complete` and `Failed` are terminal. Calling an operation from any other
//! state returns [`MeasureError::InvalidTransition`] and leaves the session
//! untouched.

use std::fmt;

use body_types::{Landmark, LandmarkSet};
use rayon::prelude::*;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::orchestrator::{Views, assemble};
use crate::{
    CalibrationRatio, MeasureError, MeasureParams, MeasureResult, MeasurementRecord,
    calibrate_with,
};

/// Lifecycle state of a [`MeasurementSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SessionState {
    /// Nothing has happened yet.
    Uninitialized,
    /// A ratio was derived from the front view.
    Calibrated,
    /// The catalog is being evaluated.
    Computing,
    /// A record was produced.
    Complete,
    /// Calibration failed.
    Failed,
}

impl SessionState {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Calibrated => "calibrated",
            Self::Computing => "computing",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One user's measurement pass over a front and a side photograph.
///
/// The session owns its parameters and the confidence-filtered front view.
/// Independent sessions share nothing and may run on different threads.
///
/// # Example
///
/// ```
/// use body_measure::{MeasureParams, MeasurementSession, SessionState};
/// use body_types::{Landmark, LandmarkSet};
///
/// let front = LandmarkSet::from_pixels([
///     (Landmark::Nose, 100.0, 50.0),
///     (Landmark::LeftAnkle, 100.0, 850.0),
/// ]).unwrap();
///
/// let mut session = MeasurementSession::new(MeasureParams::default()).unwrap();
/// session.calibrate(&front, 170.0).unwrap();
/// assert_eq!(session.state(), SessionState::Calibrated);
///
/// let record = session.compute(&LandmarkSet::new()).unwrap();
/// assert_eq!(session.state(), SessionState::Complete);
/// assert_eq!(record.len(), 14);
///
/// // Terminal: a second pass is rejected.
/// assert!(session.compute(&LandmarkSet::new()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    params: MeasureParams,
    state: SessionState,
    front: LandmarkSet,
    ratio: Option<CalibrationRatio>,
    height_cm: f64,
}

impl MeasurementSession {
    /// Starts a session.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidParams`] if `params` fail validation.
    pub fn new(params: MeasureParams) -> MeasureResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: SessionState::Uninitialized,
            front: LandmarkSet::new(),
            ratio: None,
            height_cm: 0.0,
        })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Parameters the session runs with.
    #[must_use]
    pub const fn params(&self) -> &MeasureParams {
        &self.params
    }

    /// The ratio, once calibrated.
    #[must_use]
    pub const fn ratio(&self) -> Option<CalibrationRatio> {
        self.ratio
    }

    /// Calibrates against the front view.
    ///
    /// Landmarks below `min_confidence` are dropped first and the filtered
    /// view is kept for [`compute`](Self::compute). On failure the session
    /// moves to [`SessionState::Failed`].
    ///
    /// # Errors
    ///
    /// - [`MeasureError::InvalidTransition`] unless the session is uninitialized.
    /// - Any error of [`calibrate_with`].
    pub fn calibrate(
        &mut self,
        front: &LandmarkSet,
        height_cm: f64,
    ) -> MeasureResult<CalibrationRatio> {
        self.require(SessionState::Uninitialized, SessionState::Calibrated)?;

        let front = front.with_min_confidence(self.params.min_confidence);
        match calibrate_with(&front, height_cm, &self.params) {
            Ok(ratio) => {
                self.front = front;
                self.ratio = Some(ratio);
                self.height_cm = height_cm;
                self.state = SessionState::Calibrated;
                Ok(ratio)
            }
            Err(err) => {
                warn!(error = %err, "calibration failed");
                self.state = SessionState::Failed;
                Err(err)
            }
        }
    }

    /// Evaluates the whole catalog against the calibrated front view and
    /// `side`.
    ///
    /// Missing landmarks and unusable geometry only affect their own entries;
    /// a calibrated session always completes with a full record.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidTransition`] unless the session is
    /// calibrated.
    pub fn compute(&mut self, side: &LandmarkSet) -> MeasureResult<MeasurementRecord> {
        self.require(SessionState::Calibrated, SessionState::Computing)?;
        let Some(ratio) = self.ratio else {
            return Err(self.transition_error(SessionState::Computing));
        };

        self.state = SessionState::Computing;
        let side = side.with_min_confidence(self.params.min_confidence);
        let views = Views {
            front: &self.front,
            side: &side,
        };

        let record = assemble(views, ratio, self.height_cm);
        self.state = SessionState::Complete;
        Ok(record)
    }

    fn require(&self, expected: SessionState, to: SessionState) -> MeasureResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            debug!(from = %self.state, to = %to, "rejected session transition");
            Err(self.transition_error(to))
        }
    }

    const fn transition_error(&self, to: SessionState) -> MeasureError {
        MeasureError::InvalidTransition {
            from: self.state,
            to,
        }
    }
}

/// Computes a full record from both views and the user's height.
///
/// Calibration failure aborts the call: no partial record is produced.
/// Missing landmarks only make their entries unavailable.
///
/// # Errors
///
/// - [`MeasureError::InvalidParams`] if `params` fail validation.
/// - [`MeasureError::InvalidHeight`] or [`MeasureError::DegenerateCalibration`]
///   if no ratio can be derived.
///
/// # Example
///
/// ```
/// use body_measure::{MeasureError, MeasureParams, compute_all};
/// use body_types::{Landmark, LandmarkSet};
///
/// // Head and foot at the same height.
/// let front = LandmarkSet::from_pixels([
///     (Landmark::Nose, 100.0, 400.0),
///     (Landmark::LeftAnkle, 100.0, 400.0),
/// ]).unwrap();
///
/// let err = compute_all(&front, &LandmarkSet::new(), 170.0, &MeasureParams::default())
///     .unwrap_err();
/// assert!(matches!(err, MeasureError::DegenerateCalibration { .. }));
/// ```
pub fn compute_all(
    front: &LandmarkSet,
    side: &LandmarkSet,
    height_cm: f64,
    params: &MeasureParams,
) -> MeasureResult<MeasurementRecord> {
    let mut session = MeasurementSession::new(params.clone())?;
    session.calibrate(front, height_cm)?;
    session.compute(side)
}

/// Inputs of one independent session, for [`compute_batch`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionInput {
    /// Front-view landmarks.
    pub front: LandmarkSet,
    /// Side-view landmarks.
    pub side: LandmarkSet,
    /// The user's reported height.
    pub height_cm: f64,
}

impl SessionInput {
    /// Bundles the inputs of one session.
    #[must_use]
    pub const fn new(front: LandmarkSet, side: LandmarkSet, height_cm: f64) -> Self {
        Self {
            front,
            side,
            height_cm,
        }
    }
}

impl SessionInput {
    /// Builds session inputs from raw detector output.
    ///
    /// Each view is a list of `(landmark, x, y, confidence)` in normalized
    /// image coordinates together with that photograph's `(width, height)`
    /// in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::Landmark`] for a zero-sized image or a
    /// malformed point.
    ///
    /// # Example
    ///
    /// ```
    /// use body_measure::{MeasureError, SessionInput};
    /// use body_types::Landmark;
    ///
    /// let front = [(Landmark::Nose, 0.5, 0.05, 0.99), (Landmark::LeftAnkle, 0.5, 0.9, 0.97)];
    /// let input = SessionInput::from_normalized(front, (640, 960), [], (640, 960), 170.0)
    ///     .unwrap();
    /// assert_eq!(input.front.present_count(), 2);
    ///
    /// let err = SessionInput::from_normalized([], (0, 960), [], (640, 960), 170.0).unwrap_err();
    /// assert!(matches!(err, MeasureError::Landmark(_)));
    /// ```
    pub fn from_normalized(
        front: impl IntoIterator<Item = (Landmark, f64, f64, f64)>,
        front_size: (u32, u32),
        side: impl IntoIterator<Item = (Landmark, f64, f64, f64)>,
        side_size: (u32, u32),
        height_cm: f64,
    ) -> MeasureResult<Self> {
        let front = LandmarkSet::from_normalized(front, front_size.0, front_size.1)?;
        let side = LandmarkSet::from_normalized(side, side_size.0, side_size.1)?;
        Ok(Self::new(front, side, height_cm))
    }
}

/// Runs independent sessions in parallel.
///
/// Results are in input order; one failing session does not affect the others.
#[must_use]
pub fn compute_batch(
    inputs: &[SessionInput],
    params: &MeasureParams,
) -> Vec<MeasureResult<MeasurementRecord>> {
    inputs
        .par_iter()
        .map(|input| compute_all(&input.front, &input.side, input.height_cm, params))
        .collect()
}
