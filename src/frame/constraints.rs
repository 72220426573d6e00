//! Frame-plausibility filtering of raw segments.
//!
//! Every segment passes through one shared predicate: a minimum length
//! relative to the image diagonal and an orientation band that rejects
//! near-horizontal ground lines and near-vertical poles. With a wheel pair
//! available, [`FrameBounds`] adds the wheel-relative checks: the midpoint must
//! lie in the bike's expanded bounding box and the segment may not exceed
//! 1.5 wheelbases. Without wheels, [`filter_basic`] applies the shared
//! predicate plus a confidence gate.
use crate::analyzer::params::AnalyzerParams;
use crate::angle::fold_half_turn;
use crate::types::{Circle, ImageSize, LineSegment};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

/// Orientation band (degrees, folded into [0, 180)) a frame tube must lie in.
pub const ANGLE_BAND_DEG: (f32, f32) = (10.0, 170.0);
/// Segments longer than this many wheelbases are rejected.
const MAX_WHEELBASE_RATIO: f32 = 1.5;
/// Headroom above the wheel centres, in maximum wheel radii.
const BOUNDS_ABOVE_RADII: f32 = 1.5;
/// Headroom below the wheel centres, in maximum wheel radii.
const BOUNDS_BELOW_RADII: f32 = 0.5;
/// Minimum detector confidence on the fallback path.
const FALLBACK_MIN_CONFIDENCE: f32 = 0.3;

/// Why a segment was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Length,
    Angle,
    Position,
    Oversize,
    Confidence,
}

/// Wheel-relative region a frame segment must occupy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub max_length: f32,
}

impl FrameBounds {
    pub fn from_wheels(rear: &Circle, front: &Circle) -> Self {
        let max_radius = rear.radius.max(front.radius);
        let wheelbase = (front.x() - rear.x()).abs();
        Self {
            min_x: rear.x() - rear.radius,
            max_x: front.x() + front.radius,
            min_y: rear.y().min(front.y()) - BOUNDS_ABOVE_RADII * max_radius,
            max_y: rear.y().max(front.y()) + BOUNDS_BELOW_RADII * max_radius,
            max_length: MAX_WHEELBASE_RATIO * wheelbase,
        }
    }

    pub fn contains(&self, p: &[f32; 2]) -> bool {
        p[0] >= self.min_x && p[0] <= self.max_x && p[1] >= self.min_y && p[1] <= self.max_y
    }
}

/// Counts produced by a filtering pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDiagnostics {
    pub total: usize,
    pub kept: usize,
    pub rejected_length: usize,
    pub rejected_angle: usize,
    pub rejected_position: usize,
    pub rejected_oversize: usize,
    pub rejected_confidence: usize,
}

impl FilterDiagnostics {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Length => self.rejected_length += 1,
            Rejection::Angle => self.rejected_angle += 1,
            Rejection::Position => self.rejected_position += 1,
            Rejection::Oversize => self.rejected_oversize += 1,
            Rejection::Confidence => self.rejected_confidence += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.total - self.kept
    }
}

/// Minimum segment length in pixels for `image`.
pub fn min_length_px(image: ImageSize, params: &AnalyzerParams) -> f32 {
    params.frame_min_component_length * image.diagonal()
}

/// Shared length/orientation predicate, with the wheel-relative checks when
/// `bounds` is given.
pub fn check_segment(
    seg: &LineSegment,
    min_length: f32,
    bounds: Option<&FrameBounds>,
) -> Result<(), Rejection> {
    if seg.length < min_length {
        return Err(Rejection::Length);
    }
    let folded = fold_half_turn(seg.angle_deg);
    if folded <= ANGLE_BAND_DEG.0 || folded >= ANGLE_BAND_DEG.1 {
        return Err(Rejection::Angle);
    }
    if let Some(bounds) = bounds {
        if !bounds.contains(&seg.midpoint()) {
            return Err(Rejection::Position);
        }
        if seg.length > bounds.max_length {
            return Err(Rejection::Oversize);
        }
    }
    Ok(())
}

/// Keeps segments that can plausibly be frame tubes of the bike spanned by
/// `rear` and `front`. Input order is preserved.
pub fn filter_frame_segments(
    segments: Vec<LineSegment>,
    rear: &Circle,
    front: &Circle,
    image: ImageSize,
    params: &AnalyzerParams,
) -> (Vec<LineSegment>, FilterDiagnostics) {
    let bounds = FrameBounds::from_wheels(rear, front);
    let min_length = min_length_px(image, params);
    let mut diag = FilterDiagnostics {
        total: segments.len(),
        ..Default::default()
    };

    let mut kept = Vec::with_capacity(segments.len());
    for seg in segments {
        match check_segment(&seg, min_length, Some(&bounds)) {
            Ok(()) => kept.push(seg),
            Err(rejection) => diag.record(rejection),
        }
    }
    diag.kept = kept.len();
    debug!(
        "frame filter: kept {}/{} (length={} angle={} position={} oversize={}) min_len={:.1}px",
        diag.kept,
        diag.total,
        diag.rejected_length,
        diag.rejected_angle,
        diag.rejected_position,
        diag.rejected_oversize,
        min_length
    );
    (kept, diag)
}

/// Degraded filter used without a wheel pair: shared predicate plus a
/// confidence gate, sorted by descending confidence. Labels stay `UNKNOWN`.
pub fn filter_basic(
    segments: Vec<LineSegment>,
    image: ImageSize,
    params: &AnalyzerParams,
) -> (Vec<LineSegment>, FilterDiagnostics) {
    let min_length = min_length_px(image, params);
    let mut diag = FilterDiagnostics {
        total: segments.len(),
        ..Default::default()
    };

    let mut kept = Vec::with_capacity(segments.len());
    for seg in segments {
        let verdict = check_segment(&seg, min_length, None).and_then(|()| {
            if seg.confidence > FALLBACK_MIN_CONFIDENCE {
                Ok(())
            } else {
                Err(Rejection::Confidence)
            }
        });
        match verdict {
            Ok(()) => kept.push(seg),
            Err(rejection) => diag.record(rejection),
        }
    }
    kept.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    diag.kept = kept.len();
    debug!(
        "basic filter: kept {}/{} (length={} angle={} confidence={})",
        diag.kept, diag.total, diag.rejected_length, diag.rejected_angle, diag.rejected_confidence
    );
    (kept, diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CircleId, FrameComponent, RawCircle, RawSegment, SegmentId};

    const IMAGE: ImageSize = ImageSize {
        width: 1000,
        height: 600,
    };

    fn wheel(x: f32, y: f32, radius: f32) -> Circle {
        Circle::from_raw(
            CircleId(0),
            &RawCircle {
                x,
                y,
                radius,
                confidence: 0.9,
            },
        )
    }

    fn seg(id: u32, p0: [f32; 2], p1: [f32; 2], confidence: f32) -> LineSegment {
        LineSegment::from_raw(SegmentId(id), &RawSegment { p0, p1, confidence })
    }

    fn wheels() -> (Circle, Circle) {
        (wheel(200.0, 400.0, 150.0), wheel(700.0, 400.0, 150.0))
    }

    #[test]
    fn bounds_expand_around_wheels() {
        let (rear, front) = wheels();
        let bounds = FrameBounds::from_wheels(&rear, &front);
        assert_eq!(bounds.min_x, 50.0);
        assert_eq!(bounds.max_x, 850.0);
        assert_eq!(bounds.min_y, 175.0);
        assert_eq!(bounds.max_y, 475.0);
        assert_eq!(bounds.max_length, 750.0);
    }

    #[test]
    fn near_horizontal_ground_line_is_rejected() {
        let (rear, front) = wheels();
        let ground = seg(0, [100.0, 500.0], [800.0, 505.0], 0.9);
        assert!((ground.length - 700.0).abs() < 0.1);
        let params = AnalyzerParams::default();
        let (kept, diag) = filter_frame_segments(vec![ground], &rear, &front, IMAGE, &params);
        assert!(kept.is_empty());
        assert_eq!(diag.rejected_angle, 1);
    }

    #[test]
    fn each_rejection_reason_is_counted() {
        let (rear, front) = wheels();
        let segments = vec![
            seg(0, [350.0, 200.0], [350.0, 400.0], 0.9), // kept
            seg(1, [350.0, 300.0], [355.0, 320.0], 0.9), // too short
            seg(2, [300.0, 300.0], [600.0, 300.0], 0.9), // horizontal
            seg(3, [900.0, 100.0], [950.0, 300.0], 0.9), // outside box
            seg(4, [60.0, 180.0], [840.0, 470.0], 0.9),  // 832 px > 750
        ];
        let params = AnalyzerParams::default();
        let (kept, diag) = filter_frame_segments(segments, &rear, &front, IMAGE, &params);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, SegmentId(0));
        assert_eq!(
            diag,
            FilterDiagnostics {
                total: 5,
                kept: 1,
                rejected_length: 1,
                rejected_angle: 1,
                rejected_position: 1,
                rejected_oversize: 1,
                rejected_confidence: 0,
            }
        );
        assert_eq!(diag.rejected(), 4);
    }

    #[test]
    fn band_and_length_limits_are_exact() {
        let (rear, front) = wheels();
        let bounds = FrameBounds::from_wheels(&rear, &front);
        let min_length = min_length_px(IMAGE, &AnalyzerParams::default());
        let base = seg(0, [350.0, 200.0], [350.0, 400.0], 0.9);

        for angle in [10.0, 170.0, -10.0, -170.0, 180.0, 0.0] {
            let mut s = base.clone();
            s.angle_deg = angle;
            assert_eq!(
                check_segment(&s, min_length, None),
                Err(Rejection::Angle),
                "angle {angle}"
            );
        }
        for angle in [10.001, 169.999, -10.001, -169.999] {
            let mut s = base.clone();
            s.angle_deg = angle;
            assert_eq!(check_segment(&s, min_length, None), Ok(()), "angle {angle}");
        }

        let mut s = base.clone();
        s.length = min_length;
        assert_eq!(check_segment(&s, min_length, Some(&bounds)), Ok(()));
        s.length = min_length - 0.01;
        assert_eq!(
            check_segment(&s, min_length, Some(&bounds)),
            Err(Rejection::Length)
        );

        s.length = bounds.max_length;
        assert_eq!(check_segment(&s, min_length, Some(&bounds)), Ok(()));
        s.length = bounds.max_length + 0.01;
        assert_eq!(
            check_segment(&s, min_length, Some(&bounds)),
            Err(Rejection::Oversize)
        );
    }

    #[test]
    fn negative_angles_fold_into_band() {
        let (rear, front) = wheels();
        // Drawn upward: -45 deg folds to 135 deg.
        let up = seg(0, [300.0, 400.0], [450.0, 250.0], 0.9);
        assert!(up.angle_deg < 0.0);
        let (kept, _) = filter_frame_segments(vec![up], &rear, &front, IMAGE, &Default::default());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let (rear, front) = wheels();
        let params = AnalyzerParams::default();
        let segments = vec![
            seg(0, [350.0, 200.0], [350.0, 400.0], 0.9),
            seg(1, [420.0, 420.0], [560.0, 300.0], 0.7),
            seg(2, [300.0, 300.0], [600.0, 300.0], 0.9),
            seg(3, [900.0, 100.0], [950.0, 300.0], 0.4),
        ];
        let (once, _) = filter_frame_segments(segments, &rear, &front, IMAGE, &params);
        let (twice, diag) = filter_frame_segments(once.clone(), &rear, &front, IMAGE, &params);
        assert_eq!(once, twice);
        assert_eq!(diag.rejected(), 0);
    }

    #[test]
    fn basic_filter_gates_confidence_and_sorts() {
        let segments = vec![
            seg(0, [350.0, 200.0], [350.0, 400.0], 0.5),
            seg(1, [420.0, 420.0], [560.0, 300.0], 0.9),
            seg(2, [100.0, 100.0], [200.0, 300.0], 0.3),
            seg(3, [100.0, 500.0], [800.0, 505.0], 0.95),
        ];
        let (kept, diag) = filter_basic(segments, IMAGE, &AnalyzerParams::default());
        let ids: Vec<SegmentId> = kept.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SegmentId(1), SegmentId(0)]);
        assert!(kept.iter().all(|s| s.component == FrameComponent::Unknown));
        assert!(kept.iter().all(|s| s.geometry_score == 0.0));
        assert_eq!(diag.rejected_confidence, 1);
        assert_eq!(diag.rejected_angle, 1);
    }
}
