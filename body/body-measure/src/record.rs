//! The assembled measurement record.

use std::fmt;

use body_types::{Landmark, View};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{CalibrationRatio, MeasurementName};

/// The landmark whose absence made an entry unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MissingLandmark {
    /// View the landmark was looked up in.
    pub view: View,
    /// The absent landmark.
    pub landmark: Landmark,
}

impl fmt::Display for MissingLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} missing in {} view", self.landmark, self.view)
    }
}

/// Why a derived value was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InvalidGeometry {
    /// Cross-section extents the ellipse model cannot take.
    EllipseInput {
        /// Front-view width in pixels.
        width_px: f64,
        /// Side-view depth in pixels.
        depth_px: f64,
    },
    /// The derived value overflowed or is otherwise not a number.
    NonFinite(f64),
}

impl fmt::Display for InvalidGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EllipseInput { width_px, depth_px } => {
                write!(f, "bad cross-section {width_px} x {depth_px} px")
            }
            Self::NonFinite(v) => write!(f, "non-finite value {v}"),
        }
    }
}

/// Result of deriving one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Derived value in centimetres. Always finite.
    Available(f64),
    /// Could not be derived; never a numeric placeholder.
    Unavailable(MissingLandmark),
    /// Landmarks were present but their geometry gave no usable value.
    Invalid(InvalidGeometry),
}

impl Outcome {
    /// Wraps a derived value, rejecting anything that is not finite.
    #[must_use]
    pub const fn from_value(value_cm: f64) -> Self {
        if value_cm.is_finite() {
            Self::Available(value_cm)
        } else {
            Self::Invalid(InvalidGeometry::NonFinite(value_cm))
        }
    }

    /// The value, if available.
    #[must_use]
    pub const fn value_cm(&self) -> Option<f64> {
        match self {
            Self::Available(v) => Some(*v),
            Self::Unavailable(_) | Self::Invalid(_) => None,
        }
    }

    /// Whether a value was derived.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// One named entry of a [`MeasurementRecord`].
///
/// Serializes as `{ name, value_cm, available, missing, invalid }`, with
/// `value_cm` null whenever `available` is false. `missing` and `invalid`
/// appear only when set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(into = "EntryRepr"))]
pub struct MeasurementEntry {
    name: MeasurementName,
    outcome: Outcome,
}

impl MeasurementEntry {
    /// Builds an entry from a derivation outcome.
    #[must_use]
    pub const fn new(name: MeasurementName, outcome: Outcome) -> Self {
        Self { name, outcome }
    }

    /// Entry name.
    #[must_use]
    pub const fn name(&self) -> MeasurementName {
        self.name
    }

    /// The derivation outcome.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Value in centimetres, if available.
    #[must_use]
    pub const fn value_cm(&self) -> Option<f64> {
        self.outcome.value_cm()
    }

    /// Whether the entry carries a value.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.outcome.is_available()
    }

    /// Why the entry is unavailable, if it is.
    #[must_use]
    pub const fn missing(&self) -> Option<MissingLandmark> {
        match self.outcome {
            Outcome::Unavailable(m) => Some(m),
            Outcome::Available(_) | Outcome::Invalid(_) => None,
        }
    }

    /// Why the derived value was rejected, if it was.
    #[must_use]
    pub const fn invalid(&self) -> Option<InvalidGeometry> {
        match self.outcome {
            Outcome::Invalid(reason) => Some(reason),
            Outcome::Available(_) | Outcome::Unavailable(_) => None,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize)]
struct EntryRepr {
    name: MeasurementName,
    value_cm: Option<f64>,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<MissingLandmark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid: Option<InvalidGeometry>,
}

#[cfg(feature = "serde")]
impl From<MeasurementEntry> for EntryRepr {
    fn from(entry: MeasurementEntry) -> Self {
        Self {
            name: entry.name,
            value_cm: entry.value_cm(),
            available: entry.is_available(),
            missing: entry.missing(),
            invalid: entry.invalid(),
        }
    }
}

/// Complete, immutable result of one measurement session.
///
/// Holds exactly one entry per catalog item, in catalog order.
///
/// # Example
///
/// ```
/// use body_measure::{MeasureParams, MeasurementName, compute_all};
/// use body_types::{Landmark, LandmarkSet};
///
/// let front = LandmarkSet::from_pixels([
///     (Landmark::Nose, 100.0, 50.0),
///     (Landmark::LeftShoulder, 80.0, 200.0),
///     (Landmark::RightShoulder, 220.0, 200.0),
///     (Landmark::LeftAnkle, 100.0, 850.0),
/// ]).unwrap();
/// let side = LandmarkSet::new();
///
/// let record = compute_all(&front, &side, 170.0, &MeasureParams::default()).unwrap();
/// assert_eq!(record.len(), 14);
/// assert_eq!(record.value_cm(MeasurementName::Height), Some(170.0));
/// assert!((record.value_cm(MeasurementName::ShoulderWidth).unwrap() - 29.75).abs() < 1e-9);
/// assert!(record.value_cm(MeasurementName::Inseam).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MeasurementRecord {
    ratio: CalibrationRatio,
    entries: Vec<MeasurementEntry>,
}

impl MeasurementRecord {
    pub(crate) const fn new(ratio: CalibrationRatio, entries: Vec<MeasurementEntry>) -> Self {
        Self { ratio, entries }
    }

    /// Ratio the record was computed with.
    #[must_use]
    pub const fn ratio(&self) -> CalibrationRatio {
        self.ratio
    }

    /// All entries, in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[MeasurementEntry] {
        &self.entries
    }

    /// Iterates over the entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for a name.
    #[must_use]
    pub fn get(&self, name: MeasurementName) -> Option<&MeasurementEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// The value for a name, if that entry is available.
    #[must_use]
    pub fn value_cm(&self, name: MeasurementName) -> Option<f64> {
        self.get(name).and_then(MeasurementEntry::value_cm)
    }

    /// Number of entries carrying a value.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_available()).count()
    }

    /// Entries without a value, whether unavailable or invalid.
    pub fn unavailable(&self) -> impl Iterator<Item = &MeasurementEntry> {
        self.entries.iter().filter(|e| !e.is_available())
    }
}

impl<'a> IntoIterator for &'a MeasurementRecord {
    type Item = &'a MeasurementEntry;
    type IntoIter = std::slice::Iter<'a, MeasurementEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let label = entry.name.label();
            match entry.outcome {
                Outcome::Available(v) => writeln!(f, "{label:<27}{v:>8.1} cm")?,
                Outcome::Unavailable(m) => writeln!(f, "{label:<27}{:>8}    ({m})", "n/a")?,
                Outcome::Invalid(r) => writeln!(f, "{label:<27}{:>8}    ({r})", "invalid")?,
            }
        }
        Ok(())
    }
}
