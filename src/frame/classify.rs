//! Topological labelling of frame segments.
//!
//! Each surviving segment is matched against an ordered rule chain; the first
//! rule that fires decides the label and later rules are never consulted.
//! Rules read the segment's midpoint, direction and endpoint distances
//! together with a [`FrameReference`] built once from the wheel pair and the
//! full segment set.
//!
//! Angles are the detector's signed degrees (image `y` down). "Near vertical"
//! and "near horizontal" fold with `|angle| mod 180`; the diagonal rules use
//! the signed angle directly.
use crate::analyzer::params::AnalyzerParams;
use crate::angle::abs_half_turn;
use crate::types::{Circle, FrameComponent, LineSegment};
use log::debug;
use serde::Serialize;

/// Tolerance around vertical/horizontal, in degrees.
const AXIS_TOLERANCE_DEG: f32 = 30.0;
/// Endpoint distance to the rear axle for a stay.
const AXLE_PROXIMITY_PX: f32 = 100.0;
/// How far above axle height a down tube midpoint may sit.
const DOWN_TUBE_MARGIN_PX: f32 = 50.0;

/// Wheel-derived reference quantities shared by all rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReference {
    pub rear_axle: [f32; 2],
    pub front_axle: [f32; 2],
    /// Midway between the axles; splits the bike into rear and front halves.
    pub center_x: f32,
    pub avg_wheel_y: f32,
    /// Average length over all segments being classified.
    pub avg_length: f32,
    pub max_head_tube_ratio: f32,
}

impl FrameReference {
    pub fn new(
        rear: &Circle,
        front: &Circle,
        segments: &[LineSegment],
        params: &AnalyzerParams,
    ) -> Self {
        let avg_length = if segments.is_empty() {
            0.0
        } else {
            segments.iter().map(|s| s.length).sum::<f32>() / segments.len() as f32
        };
        Self {
            rear_axle: rear.center,
            front_axle: front.center,
            center_x: 0.5 * (rear.x() + front.x()),
            avg_wheel_y: 0.5 * (rear.y() + front.y()),
            avg_length,
            max_head_tube_ratio: params.frame_max_head_tube_ratio,
        }
    }
}

/// Per-segment quantities the rules are written against.
#[derive(Clone, Copy, Debug)]
struct Features {
    mid: [f32; 2],
    angle: f32,
    folded: f32,
    length: f32,
    rear_axle_distance: f32,
}

impl Features {
    fn new(seg: &LineSegment, reference: &FrameReference) -> Self {
        Self {
            mid: seg.midpoint(),
            angle: seg.angle_deg,
            folded: abs_half_turn(seg.angle_deg),
            length: seg.length,
            rear_axle_distance: seg.endpoint_distance(&reference.rear_axle),
        }
    }

    fn near_vertical(&self) -> bool {
        (self.folded - 90.0).abs() <= AXIS_TOLERANCE_DEG
    }

    fn near_horizontal(&self) -> bool {
        self.folded <= AXIS_TOLERANCE_DEG || self.folded >= 180.0 - AXIS_TOLERANCE_DEG
    }

    fn angle_in(&self, ranges: &[(f32, f32)]) -> bool {
        ranges
            .iter()
            .any(|&(lo, hi)| self.angle >= lo && self.angle <= hi)
    }

    fn near_rear_axle(&self) -> bool {
        self.rear_axle_distance <= AXLE_PROXIMITY_PX
    }
}

type Rule = fn(&Features, &FrameReference) -> Option<FrameComponent>;

/// Evaluated top to bottom, first match wins.
const RULES: [(&str, Rule); 7] = [
    ("seat_tube", seat_tube),
    ("head_tube", head_tube),
    ("top_tube", top_tube),
    ("down_tube", down_tube),
    ("chain_stay", chain_stay),
    ("seat_stay", seat_stay),
    ("fork", fork),
];

fn seat_tube(f: &Features, r: &FrameReference) -> Option<FrameComponent> {
    (f.near_vertical() && f.mid[0] < r.center_x).then_some(FrameComponent::SeatTube)
}

fn head_tube(f: &Features, r: &FrameReference) -> Option<FrameComponent> {
    (f.near_vertical()
        && f.mid[0] >= r.center_x
        && f.length < r.avg_length * r.max_head_tube_ratio)
        .then_some(FrameComponent::HeadTube)
}

fn top_tube(f: &Features, r: &FrameReference) -> Option<FrameComponent> {
    (f.near_horizontal() && f.mid[1] < r.avg_wheel_y).then_some(FrameComponent::TopTube)
}

fn down_tube(f: &Features, r: &FrameReference) -> Option<FrameComponent> {
    (f.angle_in(&[(-60.0, -10.0), (120.0, 170.0)])
        && f.mid[1] > r.avg_wheel_y - DOWN_TUBE_MARGIN_PX)
        .then_some(FrameComponent::DownTube)
}

/// Side follows the vertical position against axle height.
fn chain_stay(f: &Features, r: &FrameReference) -> Option<FrameComponent> {
    if !(f.near_horizontal() && f.mid[1] >= r.avg_wheel_y && f.near_rear_axle()) {
        return None;
    }
    Some(if f.mid[1] > r.avg_wheel_y {
        FrameComponent::ChainStayLeft
    } else {
        FrameComponent::ChainStayRight
    })
}

fn seat_stay(f: &Features, r: &FrameReference) -> Option<FrameComponent> {
    if !(f.angle_in(&[(10.0, 60.0), (-170.0, -120.0)]) && f.near_rear_axle()) {
        return None;
    }
    Some(if f.mid[1] < r.avg_wheel_y {
        FrameComponent::SeatStayLeft
    } else {
        FrameComponent::SeatStayRight
    })
}

fn fork(f: &Features, r: &FrameReference) -> Option<FrameComponent> {
    ((20.0..=70.0).contains(&f.folded) && f.mid[0] > r.front_axle[0])
        .then_some(FrameComponent::Fork)
}

/// How many segments one rule labelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleHit {
    pub rule: &'static str,
    pub count: usize,
}

/// Index into `RULES` of the first rule that fires, with its label.
fn first_match(seg: &LineSegment, reference: &FrameReference) -> Option<(usize, FrameComponent)> {
    let features = Features::new(seg, reference);
    RULES
        .iter()
        .enumerate()
        .find_map(|(idx, (_, rule))| rule(&features, reference).map(|label| (idx, label)))
}

/// Label of a single segment; `UNKNOWN` when no rule fires.
pub fn classify_segment(seg: &LineSegment, reference: &FrameReference) -> FrameComponent {
    first_match(seg, reference).map_or(FrameComponent::Unknown, |(_, label)| label)
}

/// Name of the rule that labels `seg`.
pub fn matching_rule(seg: &LineSegment, reference: &FrameReference) -> Option<&'static str> {
    first_match(seg, reference).map(|(idx, _)| RULES[idx].0)
}

/// Labels every segment against the rear/front wheel pair. The hit list has
/// one entry per rule, in evaluation order.
pub fn classify_segments(
    mut segments: Vec<LineSegment>,
    rear: &Circle,
    front: &Circle,
    params: &AnalyzerParams,
) -> (Vec<LineSegment>, Vec<RuleHit>) {
    let reference = FrameReference::new(rear, front, &segments, params);
    let mut counts = [0usize; RULES.len()];
    for seg in segments.iter_mut() {
        seg.component = match first_match(seg, &reference) {
            Some((idx, label)) => {
                counts[idx] += 1;
                label
            }
            None => FrameComponent::Unknown,
        };
    }
    debug!(
        "classifier: {} segments, {} labelled (avg_len={:.1}, center_x={:.1}, axle_y={:.1})",
        segments.len(),
        counts.iter().sum::<usize>(),
        reference.avg_length,
        reference.center_x,
        reference.avg_wheel_y
    );
    let hits = RULES
        .iter()
        .zip(counts)
        .map(|((rule, _), count)| RuleHit { rule: *rule, count })
        .collect();
    (segments, hits)
}
