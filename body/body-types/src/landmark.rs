//! Closed enumeration of the body landmarks a pose detector reports.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::LandmarkError;

/// Anatomical landmark identifier.
///
/// Variants follow the order of the 33-point pose model with the face-detail
/// and hand points left out. The discriminant is the index into a
/// [`LandmarkSet`](crate::LandmarkSet).
///
/// # Example
///
/// ```
/// use body_types::Landmark;
///
/// let lm: Landmark = "LEFT_SHOULDER".parse().unwrap();
/// assert_eq!(lm, Landmark::LeftShoulder);
/// assert_eq!(lm.mirrored(), Landmark::RightShoulder);
/// assert_eq!(Landmark::Nose.mirrored(), Landmark::Nose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Landmark {
    /// Tip of the nose.
    Nose,
    /// Left eye centre.
    LeftEye,
    /// Right eye centre.
    RightEye,
    /// Left ear.
    LeftEar,
    /// Right ear.
    RightEar,
    /// Left shoulder joint.
    LeftShoulder,
    /// Right shoulder joint.
    RightShoulder,
    /// Left elbow joint.
    LeftElbow,
    /// Right elbow joint.
    RightElbow,
    /// Left wrist joint.
    LeftWrist,
    /// Right wrist joint.
    RightWrist,
    /// Left hip joint.
    LeftHip,
    /// Right hip joint.
    RightHip,
    /// Left knee joint.
    LeftKnee,
    /// Right knee joint.
    RightKnee,
    /// Left ankle joint.
    LeftAnkle,
    /// Right ankle joint.
    RightAnkle,
    /// Left heel.
    LeftHeel,
    /// Right heel.
    RightHeel,
    /// Tip of the left foot.
    LeftFootIndex,
    /// Tip of the right foot.
    RightFootIndex,
}

impl Landmark {
    /// Number of landmark identifiers.
    pub const COUNT: usize = 21;

    /// Every landmark, in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Position of this landmark in [`Landmark::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name, e.g. `left_shoulder`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    /// The same landmark on the opposite side of the body.
    ///
    /// The nose lies on the midline and maps to itself.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Nose => Self::Nose,
            Self::LeftEye => Self::RightEye,
            Self::RightEye => Self::LeftEye,
            Self::LeftEar => Self::RightEar,
            Self::RightEar => Self::LeftEar,
            Self::LeftShoulder => Self::RightShoulder,
            Self::RightShoulder => Self::LeftShoulder,
            Self::LeftElbow => Self::RightElbow,
            Self::RightElbow => Self::LeftElbow,
            Self::LeftWrist => Self::RightWrist,
            Self::RightWrist => Self::LeftWrist,
            Self::LeftHip => Self::RightHip,
            Self::RightHip => Self::LeftHip,
            Self::LeftKnee => Self::RightKnee,
            Self::RightKnee => Self::LeftKnee,
            Self::LeftAnkle => Self::RightAnkle,
            Self::RightAnkle => Self::LeftAnkle,
            Self::LeftHeel => Self::RightHeel,
            Self::RightHeel => Self::LeftHeel,
            Self::LeftFootIndex => Self::RightFootIndex,
            Self::RightFootIndex => Self::LeftFootIndex,
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Landmark {
    type Err = LandmarkError;

    /// Accepts `left_shoulder` as well as the detector's `LEFT_SHOULDER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|lm| lm.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LandmarkError::unknown_landmark(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, lm) in Landmark::ALL.into_iter().enumerate() {
            assert_eq!(lm.index(), i);
        }
    }

    #[test]
    fn test_mirrored_is_involution() {
        for lm in Landmark::ALL {
            assert_eq!(lm.mirrored().mirrored(), lm);
        }
        assert_eq!(Landmark::LeftFootIndex.mirrored(), Landmark::RightFootIndex);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("nose".parse::<Landmark>().unwrap(), Landmark::Nose);
        assert_eq!(
            "RIGHT_FOOT_INDEX".parse::<Landmark>().unwrap(),
            Landmark::RightFootIndex
        );
        assert_eq!(
            " left_heel ".parse::<Landmark>().unwrap(),
            Landmark::LeftHeel
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "LEFT_PINKY".parse::<Landmark>().unwrap_err();
        assert!(matches!(err, LandmarkError::UnknownLandmark(name) if name == "LEFT_PINKY"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for lm in Landmark::ALL {
            assert_eq!(lm.to_string().parse::<Landmark>().unwrap(), lm);
        }
    }
}
