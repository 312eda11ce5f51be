//! Per-view landmark sets.

use std::fmt;

use nalgebra::Point2;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Landmark, LandmarkError, LandmarkPoint, LandmarkResult};

/// Which photograph a landmark set was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum View {
    /// Subject facing the camera. Widths and lengths come from here.
    Front,
    /// Subject in profile. Depths come from here.
    Side,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => f.write_str("front"),
            Self::Side => f.write_str("side"),
        }
    }
}

/// Landmarks detected in one view, keyed by [`Landmark`].
///
/// Every identifier has exactly one slot, which is either a point or absent.
/// Absent means the detector failed to place the landmark or placed it with
/// too little confidence.
///
/// # Example
///
/// ```
/// use body_types::{Landmark, LandmarkPoint, LandmarkSet};
///
/// let set = LandmarkSet::new()
///     .with(Landmark::LeftShoulder, LandmarkPoint::new(80.0, 200.0))
///     .with(Landmark::RightShoulder, LandmarkPoint::new(220.0, 200.0));
///
/// assert_eq!(set.present_count(), 2);
/// assert!(set.get(Landmark::Nose).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LandmarkSet {
    points: [Option<LandmarkPoint>; Landmark::COUNT],
}

impl LandmarkSet {
    /// Creates a set with every landmark absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, landmark: Landmark, point: LandmarkPoint) -> Self {
        self.insert(landmark, point);
        self
    }

    /// Builds a set from `(landmark, x, y)` pixel triples.
    ///
    /// # Errors
    ///
    /// Returns [`LandmarkError::InvalidCoordinate`] if any coordinate is not finite.
    pub fn from_pixels(
        points: impl IntoIterator<Item = (Landmark, f64, f64)>,
    ) -> LandmarkResult<Self> {
        let mut set = Self::new();
        for (landmark, x, y) in points {
            set.insert(landmark, LandmarkPoint::checked(landmark, x, y, None)?);
        }
        Ok(set)
    }

    /// Builds a set from detector output in normalized image coordinates.
    ///
    /// Each item is `(landmark, x, y, confidence)` with `x` and `y` in `[0, 1]`
    /// relative to the image; they are scaled by `width` and `height`.
    ///
    /// # Errors
    ///
    /// Returns [`LandmarkError::InvalidImageSize`] for a zero dimension, and
    /// the [`LandmarkPoint::checked`] errors for malformed points.
    ///
    /// # Example
    ///
    /// ```
    /// use body_types::{Landmark, LandmarkSet};
    ///
    /// let set = LandmarkSet::from_normalized(
    ///     [(Landmark::Nose, 0.5, 0.1, 0.98)],
    ///     640,
    ///     480,
    /// ).unwrap();
    ///
    /// let nose = set.position(Landmark::Nose).unwrap();
    /// assert!((nose.x - 320.0).abs() < 1e-9);
    /// assert!((nose.y - 48.0).abs() < 1e-9);
    /// ```
    pub fn from_normalized(
        points: impl IntoIterator<Item = (Landmark, f64, f64, f64)>,
        width: u32,
        height: u32,
    ) -> LandmarkResult<Self> {
        if width == 0 || height == 0 {
            return Err(LandmarkError::InvalidImageSize { width, height });
        }
        let (w, h) = (f64::from(width), f64::from(height));

        let mut set = Self::new();
        for (landmark, nx, ny, confidence) in points {
            let point = LandmarkPoint::checked(landmark, nx * w, ny * h, Some(confidence))?;
            set.insert(landmark, point);
        }
        Ok(set)
    }

    /// Converts a detector outcome into a set.
    ///
    /// A failed detection is not fatal here: it is the same as a view in
    /// which no landmark was found.
    pub fn from_detection<E: fmt::Display>(result: Result<Self, E>, view: View) -> Self {
        match result {
            Ok(set) => {
                if set.is_empty() {
                    warn!(%view, "detector returned no landmarks");
                }
                set
            }
            Err(e) => {
                warn!(%view, error = %e, "landmark detection failed, treating view as empty");
                Self::new()
            }
        }
    }

    /// Sets the point for a landmark, replacing any previous one.
    pub fn insert(&mut self, landmark: Landmark, point: LandmarkPoint) {
        self.points[landmark.index()] = Some(point);
    }

    /// Marks a landmark absent and returns the point it held.
    pub fn remove(&mut self, landmark: Landmark) -> Option<LandmarkPoint> {
        self.points[landmark.index()].take()
    }

    /// The point for a landmark, if present.
    #[must_use]
    pub fn get(&self, landmark: Landmark) -> Option<&LandmarkPoint> {
        self.points[landmark.index()].as_ref()
    }

    /// The pixel position for a landmark, if present.
    #[must_use]
    pub fn position(&self, landmark: Landmark) -> Option<Point2<f64>> {
        self.get(landmark).map(|p| p.position)
    }

    /// Whether a landmark is present.
    #[must_use]
    pub fn contains(&self, landmark: Landmark) -> bool {
        self.points[landmark.index()].is_some()
    }

    /// Number of present landmarks.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.points.iter().flatten().count()
    }

    /// Whether no landmark is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Option::is_none)
    }

    /// Present landmarks with their points, in index order.
    pub fn iter_present(&self) -> impl Iterator<Item = (Landmark, &LandmarkPoint)> {
        Landmark::ALL
            .into_iter()
            .zip(self.points.iter())
            .filter_map(|(lm, p)| p.as_ref().map(|p| (lm, p)))
    }

    /// Copy of this set with low-confidence points made absent.
    ///
    /// Points scored below `threshold` are dropped. Points with no score
    /// are kept.
    ///
    /// # Example
    ///
    /// ```
    /// use body_types::{Landmark, LandmarkPoint, LandmarkSet};
    ///
    /// let set = LandmarkSet::new()
    ///     .with(Landmark::LeftKnee, LandmarkPoint::new(0.0, 0.0).with_confidence(0.3))
    ///     .with(Landmark::RightKnee, LandmarkPoint::new(1.0, 0.0).with_confidence(0.8));
    ///
    /// let filtered = set.with_min_confidence(0.5);
    /// assert!(!filtered.contains(Landmark::LeftKnee));
    /// assert!(filtered.contains(Landmark::RightKnee));
    /// ```
    #[must_use]
    pub fn with_min_confidence(&self, threshold: f64) -> Self {
        let mut filtered = self.clone();
        for slot in &mut filtered.points {
            if slot.is_some_and(|p| !p.meets_confidence(threshold)) {
                *slot = None;
            }
        }
        filtered
    }
}
