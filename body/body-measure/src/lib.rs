//! Calibrated body measurements from pose landmarks.
//!
//! Given the landmarks of a front and a side photograph and the user's
//! height, this crate derives a fixed record of tailoring measurements:
//!
//! - [`calibrate`] - centimetres per pixel from the front head-to-foot span
//! - [`distance`] / [`path_length`] - straight and multi-segment lengths
//! - [`ellipse_circumference`] - girths from a front width and a side depth
//! - [`compute_all`] - the full [`MeasurementRecord`], one entry per
//!   [`CATALOG`] item
//!
//! # Partial Results
//!
//! A missing landmark never fails the computation. The affected entry is
//! marked unavailable, naming the landmark and view, and every other entry is
//! still derived. Geometry that yields no finite value marks its entry
//! invalid the same way. Only a failed calibration aborts, since without a
//! ratio there is nothing to report.
//!
//! # Configuration
//!
//! All tuning lives in [`MeasureParams`], passed into every call. There is
//! no global state; independent sessions can run concurrently, see
//! [`compute_batch`].
//!
//! # Example
//!
//! ```
//! use body_measure::{MeasureParams, MeasurementName, compute_all};
//! use body_types::{Landmark, LandmarkSet};
//!
//! let front = LandmarkSet::from_pixels([
//!     (Landmark::Nose, 100.0, 50.0),
//!     (Landmark::LeftShoulder, 80.0, 200.0),
//!     (Landmark::RightShoulder, 220.0, 200.0),
//!     (Landmark::LeftAnkle, 100.0, 850.0),
//! ]).unwrap();
//!
//! let record = compute_all(&front, &LandmarkSet::new(), 170.0, &MeasureParams::default())
//!     .unwrap();
//!
//! let shoulders = record.value_cm(MeasurementName::ShoulderWidth).unwrap();
//! assert!((shoulders - 29.75).abs() < 1e-9);
//!
//! // No side view: every circumference is unavailable, not zero.
//! assert!(record.value_cm(MeasurementName::ChestCircumference).is_none());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod calibration;
mod catalog;
mod ellipse;
mod error;
mod linear;
mod orchestrator;
mod params;
mod record;
mod session;

pub use calibration::{CalibrationRatio, calibrate, calibrate_with};
pub use catalog::{
    Anchor, CATALOG, Extent, MeasurementKind, MeasurementName, MeasurementSpec, Span, spec_for,
};
pub use ellipse::{ellipse_circumference, ramanujan_circumference};
pub use error::{MeasureError, MeasureResult};
pub use linear::{checked_path_length, distance, path_length};
pub use params::MeasureParams;
pub use record::{InvalidGeometry, MeasurementEntry, MeasurementRecord, MissingLandmark, Outcome};
pub use session::{
    MeasurementSession, SessionInput, SessionState, compute_all, compute_batch,
};
