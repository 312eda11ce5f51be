//! Pose landmark types for photographic body measurement.
//!
//! This crate holds the data handed from a pose-landmark detector to the
//! measurement engine in `body-measure`:
//!
//! - [`Landmark`] - closed set of anatomical landmark identifiers
//! - [`LandmarkPoint`] - pixel position with optional detector confidence
//! - [`LandmarkSet`] - one optional point per landmark, for one [`View`]
//!
//! # Layer 0 Crate
//!
//! No image decoding and no model inference live here. Detector output is
//! converted at the boundary with [`LandmarkSet::from_normalized`] or
//! [`LandmarkSet::from_pixels`], after which the set is treated as immutable.
//!
//! # Coordinate System
//!
//! Image pixels:
//! - X: grows to the right
//! - Y: grows downwards (the top of the head has the smallest `y`)
//!
//! # Example
//!
//! ```
//! use body_types::{Landmark, LandmarkSet};
//!
//! let front = LandmarkSet::from_pixels([
//!     (Landmark::LeftShoulder, 80.0, 200.0),
//!     (Landmark::RightShoulder, 220.0, 200.0),
//! ]).unwrap();
//!
//! assert!(front.contains(Landmark::LeftShoulder));
//! assert!(!front.contains(Landmark::LeftElbow));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod landmark;
mod point;
mod set;

pub use error::{LandmarkError, LandmarkResult};
pub use landmark::Landmark;
pub use point::LandmarkPoint;
pub use set::{LandmarkSet, View};

// Re-export nalgebra types for convenience
pub use nalgebra::Point2;
