//! Greedy concentric pairing of circle candidates into tire/rim groups.
use crate::analyzer::params::AnalyzerParams;
use crate::geometry::distance;
use crate::types::{Circle, CircleId, ImageSize, RawCircle, WheelComponent};
use log::debug;
use std::cmp::Ordering;

/// A pair is accepted only when its score exceeds this gate.
const MIN_PAIR_SCORE: f32 = 0.7;

/// One wheel hypothesis: a tire with its rim, or a lone circle.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelGroup {
    primary: Circle,
    partner: Option<Circle>,
}

impl WheelGroup {
    pub fn single(circle: Circle) -> Self {
        Self {
            primary: circle,
            partner: None,
        }
    }

    /// Builds a tire/rim group. `tire` must be the larger circle.
    pub fn pair(tire: Circle, rim: Circle) -> Self {
        debug_assert!(tire.radius >= rim.radius);
        Self {
            primary: tire,
            partner: Some(rim),
        }
    }

    /// Circle used for scoring and selection: the tire when paired, otherwise
    /// the lone member.
    pub fn representative(&self) -> &Circle {
        &self.primary
    }

    pub fn members(&self) -> impl Iterator<Item = &Circle> {
        std::iter::once(&self.primary).chain(self.partner.iter())
    }

    pub fn len(&self) -> usize {
        1 + usize::from(self.partner.is_some())
    }

    pub fn is_pair(&self) -> bool {
        self.partner.is_some()
    }

    pub fn into_circles(self) -> Vec<Circle> {
        let mut out = vec![self.primary];
        out.extend(self.partner);
        out
    }
}

/// Result of concentric pairing over one circle batch.
#[derive(Clone, Debug)]
pub struct ConcentricPairing {
    /// All circles indexed by `CircleId`, with components and partners set.
    pub circles: Vec<Circle>,
    /// Wheel groups sorted by representative confidence, descending.
    pub groups: Vec<WheelGroup>,
    pub pair_count: usize,
}

/// Groups raw circles into wheel groups of one or two members.
pub fn pair_concentric(
    raw: &[RawCircle],
    image: ImageSize,
    params: &AnalyzerParams,
) -> ConcentricPairing {
    let mut circles: Vec<Circle> = raw
        .iter()
        .enumerate()
        .map(|(i, c)| Circle::from_raw(CircleId(i as u32), c))
        .collect();

    // Stable, so equal confidences keep input order.
    let mut order: Vec<usize> = (0..circles.len()).collect();
    order.sort_by(|&a, &b| {
        circles[b]
            .confidence
            .partial_cmp(&circles[a].confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut processed = vec![false; circles.len()];
    let mut groups = Vec::with_capacity(circles.len());
    let mut pair_count = 0usize;

    for (pos, &i) in order.iter().enumerate() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let mut best: Option<(usize, f32)> = None;
        for &j in &order[pos + 1..] {
            if processed[j] {
                continue;
            }
            let Some(score) = concentric_score(&circles[i], &circles[j], image, params) else {
                continue;
            };
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((j, score));
            }
        }

        match best {
            Some((j, score)) if score > MIN_PAIR_SCORE => {
                processed[j] = true;
                let (tire, rim) = if circles[i].radius >= circles[j].radius {
                    (i, j)
                } else {
                    (j, i)
                };
                circles[tire].component = WheelComponent::Tire;
                circles[tire].partner = Some(circles[rim].id);
                circles[rim].component = WheelComponent::Rim;
                circles[rim].partner = Some(circles[tire].id);
                debug!(
                    "concentric: tire #{} (r={:.1}) + rim #{} (r={:.1}) score={:.3}",
                    tire, circles[tire].radius, rim, circles[rim].radius, score
                );
                groups.push(WheelGroup::pair(circles[tire].clone(), circles[rim].clone()));
                pair_count += 1;
            }
            _ => groups.push(WheelGroup::single(circles[i].clone())),
        }
    }

    groups.sort_by(|a, b| {
        b.representative()
            .confidence
            .partial_cmp(&a.representative().confidence)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        "concentric: circles={} groups={} pairs={}",
        circles.len(),
        groups.len(),
        pair_count
    );

    ConcentricPairing {
        circles,
        groups,
        pair_count,
    }
}

/// Scores `b` as a concentric partner of `a`; `None` when the pair violates
/// the centre or radius-difference constraints.
pub fn concentric_score(
    a: &Circle,
    b: &Circle,
    image: ImageSize,
    params: &AnalyzerParams,
) -> Option<f32> {
    let center_distance = distance(&a.center, &b.center);
    let avg_radius = 0.5 * (a.radius + b.radius);
    let max_center_distance = avg_radius * params.concentric_circle_tolerance_ratio;
    if center_distance > max_center_distance {
        return None;
    }

    let radius_diff = (a.radius - b.radius).abs();
    let min_radius_diff = params.min_concentric_radius_diff * image.height as f32;
    let max_radius_diff = avg_radius * params.max_concentric_radius_diff_ratio;
    if radius_diff < min_radius_diff || radius_diff > max_radius_diff {
        return None;
    }

    let center_term = if max_center_distance > 0.0 {
        1.0 - center_distance / max_center_distance
    } else {
        1.0
    };
    let radius_term = if max_radius_diff > 0.0 {
        1.0 - radius_diff / max_radius_diff
    } else {
        1.0
    };
    let avg_confidence = 0.5 * (a.confidence + b.confidence);
    Some(0.4 * center_term + 0.3 * radius_term + 0.3 * avg_confidence)
}
