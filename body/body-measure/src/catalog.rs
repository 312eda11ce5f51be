//! The fixed catalog of measurements and how each one is derived.
//!
//! Every entry binds a [`MeasurementName`] to the landmarks it needs and the
//! geometric model applied to them. The catalog order is the record order.

use std::fmt;

use body_types::{Landmark, View};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of a record entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MeasurementName {
    /// Standing height, as supplied by the user.
    Height,
    /// Left to right shoulder joint.
    ShoulderWidth,
    /// Base of the neck.
    NeckCircumference,
    /// Around the chest at shoulder level.
    ChestCircumference,
    /// Around the natural waist.
    WaistCircumference,
    /// Around the hips.
    HipCircumference,
    /// Right shoulder to right wrist through the elbow.
    RightSleeveLength,
    /// Left shoulder to left wrist through the elbow.
    LeftSleeveLength,
    /// Around the right upper arm.
    RightBicepCircumference,
    /// Around the left upper arm.
    LeftBicepCircumference,
    /// Around the right upper leg.
    RightThighCircumference,
    /// Around the left upper leg.
    LeftThighCircumference,
    /// Crotch to ankle, averaged over both legs.
    Inseam,
    /// Hip to ankle, averaged over both legs.
    Outseam,
}

impl MeasurementName {
    /// Human-readable label, e.g. `Shoulder Width`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Height => "Height",
            Self::ShoulderWidth => "Shoulder Width",
            Self::NeckCircumference => "Neck Circumference",
            Self::ChestCircumference => "Chest Circumference",
            Self::WaistCircumference => "Waist Circumference",
            Self::HipCircumference => "Hip Circumference",
            Self::RightSleeveLength => "Right Sleeve Length",
            Self::LeftSleeveLength => "Left Sleeve Length",
            Self::RightBicepCircumference => "Right Bicep Circumference",
            Self::LeftBicepCircumference => "Left Bicep Circumference",
            Self::RightThighCircumference => "Right Thigh Circumference",
            Self::LeftThighCircumference => "Left Thigh Circumference",
            Self::Inseam => "Inseam",
            Self::Outseam => "Outseam",
        }
    }

    /// Whether the value is a circumference rather than a length.
    #[must_use]
    pub const fn is_circumference(self) -> bool {
        matches!(
            self,
            Self::NeckCircumference
                | Self::ChestCircumference
                | Self::WaistCircumference
                | Self::HipCircumference
                | Self::RightBicepCircumference
                | Self::LeftBicepCircumference
                | Self::RightThighCircumference
                | Self::LeftThighCircumference
        )
    }
}

impl fmt::Display for MeasurementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A point a path passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// A detected landmark.
    Landmark(Landmark),
    /// Synthesized crotch point: mean hip `x`, lower hip `y`.
    Crotch,
}

impl Anchor {
    /// Landmarks this anchor is built from.
    #[must_use]
    pub fn landmarks(self) -> Vec<Landmark> {
        match self {
            Self::Landmark(lm) => vec![lm],
            Self::Crotch => vec![Landmark::LeftHip, Landmark::RightHip],
        }
    }
}

/// How a pixel extent is read off one view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Horizontal distance `|x_a - x_b|` between two lateral landmarks.
    Horizontal(Landmark, Landmark),
    /// Euclidean length of a limb segment.
    Segment(Landmark, Landmark),
    /// Horizontal extent of the body at a level.
    ///
    /// The level is the mean `y` of the `level` pair. Every present landmark
    /// strictly within `tolerance × |y(level.0) − y(reference)|` of it
    /// contributes its `x`. An empty band falls back to the horizontal
    /// distance between the level pair.
    LevelBand {
        /// Pair defining the level.
        level: (Landmark, Landmark),
        /// Landmark whose vertical distance sets the band height.
        reference: Landmark,
        /// Band half-height as a fraction of that distance.
        tolerance: f64,
    },
}

impl Extent {
    /// Landmarks that must be present for this extent.
    #[must_use]
    pub fn required_landmarks(&self) -> Vec<Landmark> {
        match *self {
            Self::Horizontal(a, b) | Self::Segment(a, b) => vec![a, b],
            Self::LevelBand {
                level: (a, b),
                reference,
                ..
            } => vec![a, b, reference],
        }
    }
}

/// A scaled pixel extent in one view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// View the extent is read from.
    pub view: View,
    /// How the extent is measured.
    pub extent: Extent,
    /// Proportion of the raw extent taken as the body-part size.
    pub scale: f64,
}

impl Span {
    const fn front(extent: Extent, scale: f64) -> Self {
        Self {
            view: View::Front,
            extent,
            scale,
        }
    }

    const fn side(extent: Extent, scale: f64) -> Self {
        Self {
            view: View::Side,
            extent,
            scale,
        }
    }
}

/// Geometric model behind a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurementKind {
    /// The calibrated height input, reported as is.
    ReportedHeight,
    /// Length of a front-view path through the anchors, in order.
    Path(&'static [Anchor]),
    /// Mean length of several front-view paths; all must be complete.
    AveragedPaths(&'static [&'static [Anchor]]),
    /// Ellipse circumference from a front-view width and a side-view depth.
    Ellipse {
        /// Full width of the cross-section.
        width: Span,
        /// Full depth of the cross-section.
        depth: Span,
    },
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementSpec {
    /// Entry name.
    pub name: MeasurementName,
    /// How the value is derived.
    pub kind: MeasurementKind,
}

impl MeasurementSpec {
    /// Views that must supply landmarks for this entry.
    #[must_use]
    pub fn required_views(&self) -> &'static [View] {
        match self.kind {
            MeasurementKind::ReportedHeight => &[],
            MeasurementKind::Path(_) | MeasurementKind::AveragedPaths(_) => &[View::Front],
            MeasurementKind::Ellipse { .. } => &[View::Front, View::Side],
        }
    }

    /// Landmarks this entry reads from `view`, in the order they are used.
    ///
    /// Duplicates are removed, first occurrence wins.
    #[must_use]
    pub fn required_landmarks(&self, view: View) -> Vec<Landmark> {
        let raw: Vec<Landmark> = match self.kind {
            MeasurementKind::ReportedHeight => Vec::new(),
            MeasurementKind::Path(anchors) if view == View::Front => anchors
                .iter()
                .flat_map(|a| a.landmarks())
                .collect(),
            MeasurementKind::AveragedPaths(paths) if view == View::Front => paths
                .iter()
                .flat_map(|p| p.iter())
                .flat_map(|a| a.landmarks())
                .collect(),
            MeasurementKind::Ellipse { width, depth } => [width, depth]
                .iter()
                .filter(|span| span.view == view)
                .flat_map(|span| span.extent.required_landmarks())
                .collect(),
            MeasurementKind::Path(_) | MeasurementKind::AveragedPaths(_) => Vec::new(),
        };

        let mut seen = Vec::with_capacity(raw.len());
        for lm in raw {
            if !seen.contains(&lm) {
                seen.push(lm);
            }
        }
        seen
    }
}

use self::Anchor::{Crotch, Landmark as At};
use body_types::Landmark::{
    LeftAnkle, LeftElbow, LeftHip, LeftKnee, LeftShoulder, LeftWrist, RightAnkle, RightElbow,
    RightHip, RightKnee, RightShoulder, RightWrist,
};

const SHOULDERS: Extent = Extent::Horizontal(LeftShoulder, RightShoulder);
const HIPS: Extent = Extent::Horizontal(LeftHip, RightHip);

/// Every record entry, in record order.
///
/// Proportional scales reflect how much of a skeletal extent the soft
/// tissue cross-section occupies: the neck is 30% of the shoulder span,
/// the chest 110% of it, the bicep 20% of the upper-arm segment and the
/// thigh 25% of the upper-leg segment.
pub const CATALOG: [MeasurementSpec; 14] = [
    MeasurementSpec {
        name: MeasurementName::Height,
        kind: MeasurementKind::ReportedHeight,
    },
    MeasurementSpec {
        name: MeasurementName::ShoulderWidth,
        kind: MeasurementKind::Path(&[At(LeftShoulder), At(RightShoulder)]),
    },
    MeasurementSpec {
        name: MeasurementName::NeckCircumference,
        kind: MeasurementKind::Ellipse {
            width: Span::front(SHOULDERS, 0.30),
            depth: Span::side(SHOULDERS, 0.30),
        },
    },
    MeasurementSpec {
        name: MeasurementName::ChestCircumference,
        kind: MeasurementKind::Ellipse {
            width: Span::front(SHOULDERS, 1.1),
            depth: Span::side(
                Extent::LevelBand {
                    level: (LeftShoulder, RightShoulder),
                    reference: LeftHip,
                    tolerance: 0.2,
                },
                1.0,
            ),
        },
    },
    MeasurementSpec {
        name: MeasurementName::WaistCircumference,
        kind: MeasurementKind::Ellipse {
            width: Span::front(HIPS, 1.0),
            depth: Span::side(
                Extent::LevelBand {
                    level: (LeftHip, RightHip),
                    reference: LeftShoulder,
                    tolerance: 0.1,
                },
                1.0,
            ),
        },
    },
    MeasurementSpec {
        name: MeasurementName::HipCircumference,
        kind: MeasurementKind::Ellipse {
            width: Span::front(HIPS, 1.0),
            depth: Span::side(
                Extent::LevelBand {
                    level: (LeftHip, RightHip),
                    reference: LeftKnee,
                    tolerance: 0.2,
                },
                1.0,
            ),
        },
    },
    MeasurementSpec {
        name: MeasurementName::RightSleeveLength,
        kind: MeasurementKind::Path(&[At(RightShoulder), At(RightElbow), At(RightWrist)]),
    },
    MeasurementSpec {
        name: MeasurementName::LeftSleeveLength,
        kind: MeasurementKind::Path(&[At(LeftShoulder), At(LeftElbow), At(LeftWrist)]),
    },
    MeasurementSpec {
        name: MeasurementName::RightBicepCircumference,
        kind: MeasurementKind::Ellipse {
            width: Span::front(Extent::Segment(RightShoulder, RightElbow), 0.20),
            depth: Span::side(Extent::Segment(RightShoulder, RightElbow), 0.20),
        },
    },
    MeasurementSpec {
        name: MeasurementName::LeftBicepCircumference,
        kind: MeasurementKind::Ellipse {
            width: Span::front(Extent::Segment(LeftShoulder, LeftElbow), 0.20),
            depth: Span::side(Extent::Segment(LeftShoulder, LeftElbow), 0.20),
        },
    },
    MeasurementSpec {
        name: MeasurementName::RightThighCircumference,
        kind: MeasurementKind::Ellipse {
            width: Span::front(Extent::Segment(RightHip, RightKnee), 0.25),
            depth: Span::side(Extent::Segment(RightHip, RightKnee), 0.25),
        },
    },
    MeasurementSpec {
        name: MeasurementName::LeftThighCircumference,
        kind: MeasurementKind::Ellipse {
            width: Span::front(Extent::Segment(LeftHip, LeftKnee), 0.25),
            depth: Span::side(Extent::Segment(LeftHip, LeftKnee), 0.25),
        },
    },
    MeasurementSpec {
        name: MeasurementName::Inseam,
        kind: MeasurementKind::AveragedPaths(&[
            &[Crotch, At(LeftAnkle)],
            &[Crotch, At(RightAnkle)],
        ]),
    },
    MeasurementSpec {
        name: MeasurementName::Outseam,
        kind: MeasurementKind::AveragedPaths(&[
            &[At(LeftHip), At(LeftAnkle)],
            &[At(RightHip), At(RightAnkle)],
        ]),
    },
];

/// Looks up the catalog entry for a name.
#[must_use]
pub fn spec_for(name: MeasurementName) -> &'static MeasurementSpec {
    // Catalog order matches the enum declaration order.
    &CATALOG[name as usize]
}
