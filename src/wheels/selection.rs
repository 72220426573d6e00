//! Selection of the rear/front wheel pair among wheel groups.
use super::concentric::WheelGroup;
use crate::diagnostics::WheelSelectionReport;
use crate::geometry::distance;
use crate::types::{Circle, ImageSize};
use log::{debug, warn};

/// Maximum vertical offset between two wheel centres, in average radii.
const MAX_VERTICAL_OFFSET_RADII: f32 = 0.5;
/// Plausible wheelbase range as fractions of the image width.
const WHEELBASE_RANGE: (f32, f32) = (0.3, 0.8);
/// Floor for the wheelbase factor so extreme spacing still ranks pairs.
const MIN_WHEELBASE_SCORE: f32 = 0.1;

/// Outcome of the wheel pair selection.
#[derive(Clone, Debug, PartialEq)]
pub enum WheelSelection {
    /// No wheel groups were available.
    None,
    /// A single wheel group; not enough for frame analysis.
    Single(WheelGroup),
    /// Rear (smaller `x`) and front wheel.
    Pair { rear: WheelGroup, front: WheelGroup },
}

impl WheelSelection {
    /// Rear and front representative circles, if a pair was selected.
    pub fn axles(&self) -> Option<(&Circle, &Circle)> {
        match self {
            WheelSelection::Pair { rear, front } => {
                Some((rear.representative(), front.representative()))
            }
            _ => None,
        }
    }

    pub fn group_count(&self) -> usize {
        match self {
            WheelSelection::None => 0,
            WheelSelection::Single(_) => 1,
            WheelSelection::Pair { .. } => 2,
        }
    }

    /// All member circles of the selected groups, rear first.
    pub fn into_circles(self) -> Vec<Circle> {
        match self {
            WheelSelection::None => Vec::new(),
            WheelSelection::Single(group) => group.into_circles(),
            WheelSelection::Pair { rear, front } => {
                let mut out = rear.into_circles();
                out.extend(front.into_circles());
                out
            }
        }
    }
}

/// Picks the two wheel groups that best represent the bicycle's wheels.
///
/// `groups` is expected in descending representative confidence, as produced
/// by [`super::pair_concentric`]; that order breaks ties and drives the
/// fallback when no scored pair is usable.
pub fn select_wheel_pair(
    mut groups: Vec<WheelGroup>,
    image: ImageSize,
) -> (WheelSelection, WheelSelectionReport) {
    let candidates = groups.len();
    if candidates <= 2 {
        let mut it = groups.into_iter();
        return match (it.next(), it.next()) {
            (None, _) => {
                warn!("wheel selection: no wheel candidates");
                (WheelSelection::None, WheelSelectionReport::None)
            }
            (Some(group), None) => (WheelSelection::Single(group), WheelSelectionReport::Single),
            (Some(a), Some(b)) => {
                let report = validate_pair(a.representative(), b.representative(), image);
                (order_pair(a, b), report)
            }
        };
    }

    let (i, j, report) = match best_scoring_pair(&groups, image) {
        Some((i, j, score)) => {
            debug!("wheel selection: groups {i} and {j} score={score:.3} of {candidates}");
            (i, j, WheelSelectionReport::ScoredPair { score, candidates })
        }
        None => {
            warn!(
                "wheel selection: no pair scored above zero among {candidates} groups, \
                 using the two most confident"
            );
            (0, 1, WheelSelectionReport::FallbackPair { candidates })
        }
    };
    // i < j, so removing j first leaves index i in place.
    let b = groups.swap_remove(j);
    let a = groups.swap_remove(i);
    (order_pair(a, b), report)
}

/// Orders two groups left to right: the smaller `x` is the rear wheel.
fn order_pair(a: WheelGroup, b: WheelGroup) -> WheelSelection {
    if a.representative().x() <= b.representative().x() {
        WheelSelection::Pair { rear: a, front: b }
    } else {
        WheelSelection::Pair { rear: b, front: a }
    }
}

/// Checks a two-group selection for plausibility. Failures are only logged.
fn validate_pair(a: &Circle, b: &Circle, image: ImageSize) -> WheelSelectionReport {
    let avg_radius = 0.5 * (a.radius + b.radius);
    let vertical_offset = (a.y() - b.y()).abs();
    let vertically_aligned = vertical_offset <= MAX_VERTICAL_OFFSET_RADII * avg_radius;

    let width = image.width as f32;
    let center_distance = distance(&a.center, &b.center);
    let plausible_wheelbase = center_distance >= WHEELBASE_RANGE.0 * width
        && center_distance <= WHEELBASE_RANGE.1 * width;

    if !vertically_aligned {
        warn!(
            "wheel selection: wheels not vertically aligned \
             (dy={vertical_offset:.1}, avg_r={avg_radius:.1})"
        );
    }
    if !plausible_wheelbase {
        warn!(
            "wheel selection: implausible wheel distance {center_distance:.1} \
             for image width {width}"
        );
    }
    WheelSelectionReport::ValidatedPair {
        vertically_aligned,
        plausible_wheelbase,
    }
}

/// Exhaustive pairwise scan; keeps the first pair reaching the highest
/// positive score.
fn best_scoring_pair(groups: &[WheelGroup], image: ImageSize) -> Option<(usize, usize, f32)> {
    let mut best: Option<(usize, usize, f32)> = None;
    let mut best_score = 0.0f32;
    for i in 0..groups.len() {
        for j in (i + 1)..groups.len() {
            let score = pair_score(
                groups[i].representative(),
                groups[j].representative(),
                image,
            );
            if score > best_score {
                best_score = score;
                best = Some((i, j, score));
            }
        }
    }
    best
}

/// Likelihood that two circles are the wheels of one bicycle.
pub fn pair_score(a: &Circle, b: &Circle, image: ImageSize) -> f32 {
    let avg_confidence = 0.5 * (a.confidence + b.confidence);
    let avg_radius = 0.5 * (a.radius + b.radius);
    let radius_consistency = 1.0 - (a.radius - b.radius).abs() / avg_radius;
    let vertical_consistency = 1.0 - (a.y() - b.y()).abs() / avg_radius;

    let half_width = 0.5 * image.width as f32;
    let center_distance = distance(&a.center, &b.center);
    let wheelbase_score = 1.0 - (center_distance - half_width).abs() / half_width;

    avg_confidence
        * radius_consistency
        * vertical_consistency
        * wheelbase_score.max(MIN_WHEELBASE_SCORE)
}
