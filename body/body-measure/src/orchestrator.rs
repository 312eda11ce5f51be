//! Catalog evaluation and record assembly.

use body_types::{Landmark, LandmarkSet, Point2, View};
use tracing::{debug, info, warn};

use crate::catalog::{Anchor, CATALOG, Extent, MeasurementKind, MeasurementSpec, Span};
use crate::linear::{path_length, pixel_distance};
use crate::{
    CalibrationRatio, InvalidGeometry, MeasurementEntry, MeasurementRecord, MissingLandmark,
    Outcome, ellipse_circumference,
};

/// Both views of one session, already confidence-filtered.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Views<'a> {
    pub front: &'a LandmarkSet,
    pub side: &'a LandmarkSet,
}

impl Views<'_> {
    const fn set(&self, view: View) -> &LandmarkSet {
        match view {
            View::Front => self.front,
            View::Side => self.side,
        }
    }

    fn point(&self, view: View, landmark: Landmark) -> Result<Point2<f64>, MissingLandmark> {
        self.set(view)
            .position(landmark)
            .ok_or(MissingLandmark { view, landmark })
    }

    fn anchor(&self, view: View, anchor: Anchor) -> Result<Point2<f64>, MissingLandmark> {
        match anchor {
            Anchor::Landmark(lm) => self.point(view, lm),
            Anchor::Crotch => {
                let left = self.point(view, Landmark::LeftHip)?;
                let right = self.point(view, Landmark::RightHip)?;
                Ok(Point2::new(
                    f64::midpoint(left.x, right.x),
                    left.y.max(right.y),
                ))
            }
        }
    }

    /// Pixel extent of a span, with its proportional scale applied.
    fn span_px(&self, span: &Span) -> Result<f64, MissingLandmark> {
        let raw = match span.extent {
            Extent::Horizontal(a, b) => {
                let (pa, pb) = (self.point(span.view, a)?, self.point(span.view, b)?);
                (pa.x - pb.x).abs()
            }
            Extent::Segment(a, b) => {
                pixel_distance(self.point(span.view, a)?, self.point(span.view, b)?)
            }
            Extent::LevelBand {
                level: (a, b),
                reference,
                tolerance,
            } => {
                let pa = self.point(span.view, a)?;
                let pb = self.point(span.view, b)?;
                let pr = self.point(span.view, reference)?;
                let level_y = f64::midpoint(pa.y, pb.y);
                let band = (pa.y - pr.y).abs() * tolerance;

                let (min_x, max_x) = self
                    .set(span.view)
                    .iter_present()
                    .map(|(_, p)| p.position)
                    .filter(|p| (p.y - level_y).abs() < band)
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                        (lo.min(p.x), hi.max(p.x))
                    });

                if min_x <= max_x {
                    max_x - min_x
                } else {
                    // Empty band.
                    (pa.x - pb.x).abs()
                }
            }
        };
        Ok(raw * span.scale)
    }

    fn path(&self, anchors: &[Anchor]) -> Result<Vec<Point2<f64>>, MissingLandmark> {
        anchors
            .iter()
            .map(|&a| self.anchor(View::Front, a))
            .collect()
    }
}

/// Derives one catalog entry.
///
/// A missing landmark yields [`Outcome::Unavailable`]; geometry that gives
/// no finite value yields [`Outcome::Invalid`]. Neither affects other entries.
pub(crate) fn evaluate(
    spec: &MeasurementSpec,
    views: Views<'_>,
    ratio: CalibrationRatio,
    height_cm: f64,
) -> Outcome {
    let resolved = match spec.kind {
        MeasurementKind::ReportedHeight => Ok(Outcome::from_value(height_cm)),
        MeasurementKind::Path(anchors) => views
            .path(anchors)
            .map(|pts| Outcome::from_value(path_length(&pts, ratio))),
        MeasurementKind::AveragedPaths(paths) => {
            averaged_paths(views, paths, ratio).map(Outcome::from_value)
        }
        MeasurementKind::Ellipse { width, depth } => {
            match (views.span_px(&width), views.span_px(&depth)) {
                (Ok(w), Ok(d)) => Ok(ellipse_outcome(w, d, ratio)),
                (Err(missing), _) | (_, Err(missing)) => Err(missing),
            }
        }
    };

    resolved.unwrap_or_else(Outcome::Unavailable)
}

fn ellipse_outcome(width_px: f64, depth_px: f64, ratio: CalibrationRatio) -> Outcome {
    match ellipse_circumference(width_px, depth_px, ratio) {
        Ok(value) => Outcome::from_value(value),
        Err(_) => Outcome::Invalid(InvalidGeometry::EllipseInput { width_px, depth_px }),
    }
}

#[allow(clippy::cast_precision_loss)]
fn averaged_paths(
    views: Views<'_>,
    paths: &[&[Anchor]],
    ratio: CalibrationRatio,
) -> Result<f64, MissingLandmark> {
    let mut total = 0.0;
    for anchors in paths {
        total += path_length(&views.path(anchors)?, ratio);
    }
    Ok(total / paths.len().max(1) as f64)
}

/// Evaluates the whole catalog, in order.
pub(crate) fn assemble(
    views: Views<'_>,
    ratio: CalibrationRatio,
    height_cm: f64,
) -> MeasurementRecord {
    let mut entries = Vec::with_capacity(CATALOG.len());

    for spec in &CATALOG {
        let outcome = evaluate(spec, views, ratio, height_cm);
        match outcome {
            Outcome::Available(value) => {
                debug!(measurement = %spec.name, value_cm = value, "derived");
            }
            Outcome::Unavailable(missing) => {
                warn!(
                    measurement = %spec.name,
                    view = %missing.view,
                    landmark = %missing.landmark,
                    "measurement unavailable"
                );
            }
            Outcome::Invalid(reason) => {
                warn!(measurement = %spec.name, %reason, "measurement invalid");
            }
        }
        entries.push(MeasurementEntry::new(spec.name, outcome));
    }

    let record = MeasurementRecord::new(ratio, entries);
    info!(
        available = record.available_count(),
        total = record.len(),
        %ratio,
        "measurement record assembled"
    );
    record
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::MeasurementName;
    use crate::catalog::spec_for;
    use approx::assert_relative_eq;

    fn ratio(r: f64) -> CalibrationRatio {
        CalibrationRatio::new(r).unwrap()
    }

    fn eval(name: MeasurementName, front: &LandmarkSet, side: &LandmarkSet) -> Outcome {
        evaluate(spec_for(name), Views { front, side }, ratio(1.0), 170.0)
    }

    #[test]
    fn test_crotch_anchor() {
        let front = LandmarkSet::from_pixels([
            (Landmark::LeftHip, 120.0, 400.0),
            (Landmark::RightHip, 80.0, 404.0),
        ])
        .unwrap();
        let side = LandmarkSet::new();
        let views = Views {
            front: &front,
            side: &side,
        };
        let crotch = views.anchor(View::Front, Anchor::Crotch).unwrap();
        assert_relative_eq!(crotch.x, 100.0);
        assert_relative_eq!(crotch.y, 404.0);
    }

    #[test]
    fn test_crotch_reports_missing_hip() {
        let front = LandmarkSet::from_pixels([(Landmark::LeftHip, 120.0, 400.0)]).unwrap();
        let side = LandmarkSet::new();
        let views = Views {
            front: &front,
            side: &side,
        };
        let missing = views.anchor(View::Front, Anchor::Crotch).unwrap_err();
        assert_eq!(missing.landmark, Landmark::RightHip);
        assert_eq!(missing.view, View::Front);
    }

    #[test]
    fn test_inseam_average() {
        let front = LandmarkSet::from_pixels([
            (Landmark::LeftHip, 120.0, 400.0),
            (Landmark::RightHip, 80.0, 400.0),
            (Landmark::LeftAnkle, 100.0, 800.0),
            (Landmark::RightAnkle, 130.0, 800.0),
        ])
        .unwrap();
        let outcome = eval(MeasurementName::Inseam, &front, &LandmarkSet::new());
        let left = 400.0;
        let right = (30.0_f64.powi(2) + 400.0_f64.powi(2)).sqrt();
        assert_relative_eq!(
            outcome.value_cm().unwrap(),
            f64::midpoint(left, right),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_outseam_needs_both_legs() {
        let front = LandmarkSet::from_pixels([
            (Landmark::LeftHip, 120.0, 400.0),
            (Landmark::RightHip, 80.0, 400.0),
            (Landmark::LeftAnkle, 120.0, 800.0),
        ])
        .unwrap();
        let outcome = eval(MeasurementName::Outseam, &front, &LandmarkSet::new());
        assert_eq!(
            outcome,
            Outcome::Unavailable(MissingLandmark {
                view: View::Front,
                landmark: Landmark::RightAnkle,
            })
        );
    }

    #[test]
    fn test_level_band_includes_nearby_landmarks() {
        // Side view: shoulders overlap, elbow hangs just below and sticks out.
        let side = LandmarkSet::from_pixels([
            (Landmark::LeftShoulder, 100.0, 200.0),
            (Landmark::RightShoulder, 104.0, 200.0),
            (Landmark::LeftElbow, 140.0, 230.0),
            (Landmark::LeftHip, 100.0, 400.0),
            (Landmark::LeftKnee, 90.0, 600.0),
        ])
        .unwrap();
        let front = LandmarkSet::new();
        let views = Views {
            front: &front,
            side: &side,
        };
        let band = Span {
            view: View::Side,
            extent: Extent::LevelBand {
                level: (Landmark::LeftShoulder, Landmark::RightShoulder),
                reference: Landmark::LeftHip,
                tolerance: 0.2,
            },
            scale: 1.0,
        };
        // Band half-height is 40 px: elbow at +30 is inside, hip is not.
        assert_relative_eq!(views.span_px(&band).unwrap(), 40.0);
    }

    #[test]
    fn test_level_band_without_neighbours_uses_pair() {
        let side = LandmarkSet::from_pixels([
            (Landmark::LeftHip, 95.0, 400.0),
            (Landmark::RightHip, 125.0, 410.0),
            (Landmark::LeftKnee, 100.0, 600.0),
        ])
        .unwrap();
        let front = LandmarkSet::new();
        let views = Views {
            front: &front,
            side: &side,
        };
        let band = Span {
            view: View::Side,
            extent: Extent::LevelBand {
                level: (Landmark::LeftHip, Landmark::RightHip),
                reference: Landmark::LeftKnee,
                tolerance: 0.01,
            },
            scale: 1.0,
        };
        assert_relative_eq!(views.span_px(&band).unwrap(), 30.0);
    }

    #[test]
    fn test_level_band_ignores_pair_outside_band() {
        // Hips sit 10 px either side of the level, outside the 8 px band; only
        // the wrists fall inside it.
        let side = LandmarkSet::from_pixels([
            (Landmark::LeftHip, 100.0, 400.0),
            (Landmark::RightHip, 140.0, 420.0),
            (Landmark::LeftWrist, 120.0, 412.0),
            (Landmark::RightWrist, 126.0, 408.0),
            (Landmark::LeftKnee, 100.0, 600.0),
        ])
        .unwrap();
        let front = LandmarkSet::new();
        let views = Views {
            front: &front,
            side: &side,
        };
        let band = Span {
            view: View::Side,
            extent: Extent::LevelBand {
                level: (Landmark::LeftHip, Landmark::RightHip),
                reference: Landmark::LeftKnee,
                tolerance: 0.04,
            },
            scale: 1.0,
        };
        assert_relative_eq!(views.span_px(&band).unwrap(), 6.0);
    }

    #[test]
    fn test_overflowing_width_is_invalid_not_fatal() {
        let front = LandmarkSet::from_pixels([
            (Landmark::LeftShoulder, -1e308, 200.0),
            (Landmark::RightShoulder, 1e308, 200.0),
        ])
        .unwrap();
        let side = LandmarkSet::from_pixels([
            (Landmark::LeftShoulder, 130.0, 200.0),
            (Landmark::RightShoulder, 170.0, 204.0),
        ])
        .unwrap();

        let neck = eval(MeasurementName::NeckCircumference, &front, &side);
        match neck {
            Outcome::Invalid(InvalidGeometry::EllipseInput { width_px, depth_px }) => {
                assert!(width_px.is_infinite());
                assert_relative_eq!(depth_px, 12.0, epsilon = 1e-9);
            }
            other => panic!("expected invalid ellipse input, got {other:?}"),
        }

        let shoulders = eval(MeasurementName::ShoulderWidth, &front, &side);
        assert_eq!(
            shoulders,
            Outcome::Invalid(InvalidGeometry::NonFinite(f64::INFINITY))
        );
    }

    #[test]
    fn test_ellipse_missing_side_landmark() {
        let front = LandmarkSet::from_pixels([
            (Landmark::LeftHip, 120.0, 400.0),
            (Landmark::RightHip, 80.0, 400.0),
        ])
        .unwrap();
        let side = LandmarkSet::from_pixels([
            (Landmark::LeftHip, 100.0, 400.0),
            (Landmark::RightHip, 130.0, 400.0),
        ])
        .unwrap();
        // Hip depth needs the side-view knee for its band.
        let outcome = eval(MeasurementName::HipCircumference, &front, &side);
        assert_eq!(
            outcome,
            Outcome::Unavailable(MissingLandmark {
                view: View::Side,
                landmark: Landmark::LeftKnee,
            })
        );
    }

    #[test]
    fn test_thigh_uses_segment_scale() {
        let front = LandmarkSet::from_pixels([
            (Landmark::LeftHip, 100.0, 400.0),
            (Landmark::LeftKnee, 100.0, 600.0),
        ])
        .unwrap();
        let side = front.clone();
        // 200 px segment * 0.25 = 50 px in both views -> circle of radius 25.
        let outcome = eval(MeasurementName::LeftThighCircumference, &front, &side);
        assert_relative_eq!(
            outcome.value_cm().unwrap(),
            2.0 * std::f64::consts::PI * 25.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_height_is_reported_input() {
        let outcome = eval(MeasurementName::Height, &LandmarkSet::new(), &LandmarkSet::new());
        assert_eq!(outcome, Outcome::Available(170.0));
    }
}
