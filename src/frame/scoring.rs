//! Geometry scores for classified frame segments.
//!
//! A score in `[0, 1]` accumulates, per segment:
//! - a base value by label (main triangle > stays > head tube > fork),
//! - a length bonus when the segment's length is close to the average length of
//!   structurally related tubes,
//! - an angle bonus when a related tube runs nearly parallel,
//! - a connection bonus for stays touching the rear axle and forks touching the
//!   front axle, or a flat bonus for other labelled segments.
//!
//! Scores are computed against the labelled set as a whole and written back
//! afterwards, so the result does not depend on segment order.
use crate::analyzer::params::AnalyzerParams;
use crate::angle::angular_difference_deg;
use crate::types::{Circle, FrameComponent, LineSegment};
use log::debug;
use std::cmp::Ordering;

const LENGTH_MATCH_BONUS: f32 = 0.2;
const ANGLE_MATCH_BONUS: f32 = 0.15;
const AXLE_CONNECTION_BONUS: f32 = 0.1;
const FLAT_CONNECTION_BONUS: f32 = 0.05;
/// Axle reach for the connection bonus, in maximum wheel radii.
const AXLE_REACH_RADII: f32 = 1.2;

use FrameComponent::*;

fn base_score(component: FrameComponent) -> f32 {
    match component {
        c if c.is_main_triangle() => 0.3,
        c if c.is_stay() => 0.25,
        HeadTube => 0.2,
        Fork => 0.15,
        _ => 0.0,
    }
}

/// Tubes whose lengths are compared with `component`.
fn length_related(component: FrameComponent) -> &'static [FrameComponent] {
    match component {
        SeatStayLeft | SeatStayRight => &[TopTube, DownTube],
        TopTube | DownTube => &[SeatStayLeft, SeatStayRight],
        _ => &[],
    }
}

/// Tubes whose directions are compared with `component`.
fn angle_related(component: FrameComponent) -> &'static [FrameComponent] {
    match component {
        SeatStayLeft | SeatStayRight => &[DownTube],
        ChainStayLeft | ChainStayRight => &[TopTube],
        SeatTube => &[HeadTube, Fork],
        _ => &[],
    }
}

/// Reference quantities for the connection bonus.
#[derive(Clone, Copy, Debug)]
struct AxleContext {
    rear_axle: [f32; 2],
    front_axle: [f32; 2],
    reach: f32,
}

impl AxleContext {
    fn new(rear: &Circle, front: &Circle) -> Self {
        Self {
            rear_axle: rear.center,
            front_axle: front.center,
            reach: AXLE_REACH_RADII * rear.radius.max(front.radius),
        }
    }
}

fn length_bonus(seg: &LineSegment, all: &[LineSegment], tolerance: f32) -> f32 {
    let related = length_related(seg.component);
    if related.is_empty() {
        return 0.0;
    }
    let (sum, count) = all
        .iter()
        .filter(|other| related.contains(&other.component))
        .fold((0.0f32, 0usize), |(sum, count), other| {
            (sum + other.length, count + 1)
        });
    if count == 0 {
        return 0.0;
    }
    let avg = sum / count as f32;
    if avg > 0.0 && (seg.length - avg).abs() / avg <= tolerance {
        LENGTH_MATCH_BONUS
    } else {
        0.0
    }
}

fn angle_bonus(seg: &LineSegment, all: &[LineSegment], tolerance_deg: f32) -> f32 {
    let related = angle_related(seg.component);
    let matched = all.iter().any(|other| {
        related.contains(&other.component)
            && angular_difference_deg(seg.angle_deg, other.angle_deg) <= tolerance_deg
    });
    if matched {
        ANGLE_MATCH_BONUS
    } else {
        0.0
    }
}

fn connection_bonus(seg: &LineSegment, axles: &AxleContext) -> f32 {
    let component = seg.component;
    if component.is_stay() {
        if seg.endpoint_distance(&axles.rear_axle) <= axles.reach {
            AXLE_CONNECTION_BONUS
        } else {
            0.0
        }
    } else if component == Fork {
        if seg.endpoint_distance(&axles.front_axle) <= axles.reach {
            AXLE_CONNECTION_BONUS
        } else {
            0.0
        }
    } else if component.is_labeled() {
        FLAT_CONNECTION_BONUS
    } else {
        0.0
    }
}

/// Geometry score of `seg` within the labelled set `all`.
pub fn geometry_score(
    seg: &LineSegment,
    all: &[LineSegment],
    rear: &Circle,
    front: &Circle,
    params: &AnalyzerParams,
) -> f32 {
    let axles = AxleContext::new(rear, front);
    score_with(seg, all, &axles, params)
}

fn score_with(
    seg: &LineSegment,
    all: &[LineSegment],
    axles: &AxleContext,
    params: &AnalyzerParams,
) -> f32 {
    let score = base_score(seg.component)
        + length_bonus(seg, all, params.frame_component_length_threshold)
        + angle_bonus(seg, all, params.frame_component_angle_threshold_deg())
        + connection_bonus(seg, axles);
    score.clamp(0.0, 1.0)
}

/// Scores every segment and returns them sorted by `confidence +
/// geometry_score`, descending.
pub fn score_segments(
    mut segments: Vec<LineSegment>,
    rear: &Circle,
    front: &Circle,
    params: &AnalyzerParams,
) -> Vec<LineSegment> {
    let axles = AxleContext::new(rear, front);
    let scores: Vec<f32> = segments
        .iter()
        .map(|seg| score_with(seg, &segments, &axles, params))
        .collect();
    for (seg, score) in segments.iter_mut().zip(scores) {
        seg.geometry_score = score;
    }
    segments.sort_by(|a, b| {
        b.combined_score()
            .partial_cmp(&a.combined_score())
            .unwrap_or(Ordering::Equal)
    });
    debug!(
        "scoring: {} segments, best combined score {:.3}",
        segments.len(),
        segments.first().map_or(0.0, |s| s.combined_score())
    );
    segments
}
