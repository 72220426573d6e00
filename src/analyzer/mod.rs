//! Bike analyzer orchestrating the wheel and frame stages.
//!
//! Overview
//! - Pairs concentric circles into wheel groups (tire + rim or lone circle).
//! - Selects the rear/front wheel pair among the groups.
//! - With a pair: filters segments against the wheel geometry, labels them
//!   with the frame rule chain, and scores each label.
//! - With fewer than two wheels: runs the basic length/orientation/confidence
//!   filter and leaves every label `UNKNOWN`.
//!
//! Each call is independent; the analyzer only holds its thresholds.
//!
//! ```no_run
//! use bike_geometry::{AnalyzerParams, BikeAnalyzer};
//! use bike_geometry::types::PrimitiveSet;
//!
//! # fn example(set: PrimitiveSet) {
//! let analyzer = BikeAnalyzer::new(AnalyzerParams::default());
//! let result = analyzer.analyze_set(&set);
//! for seg in &result.segments {
//!     println!("{:?} score={:.2}", seg.component, seg.geometry_score);
//! }
//! # }
//! ```

pub mod params;

use crate::diagnostics::{component_counts, AnalysisTrace};
use crate::frame::{classify_segments, filter_basic, filter_frame_segments, score_segments};
use crate::types::{Circle, ImageSize, LineSegment, PrimitiveSet, RawCircle, RawSegment, SegmentId};
use crate::wheels::{pair_concentric, select_wheel_pair};
use log::{debug, warn};
use params::AnalyzerParams;
use serde::Serialize;
use std::time::Instant;

/// Interpretation of one image's primitives.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Circles of the selected wheel groups, rear wheel first.
    pub wheels: Vec<Circle>,
    /// Frame segments, best `confidence + geometry_score` first.
    pub segments: Vec<LineSegment>,
    pub trace: AnalysisTrace,
}

impl AnalysisResult {
    /// True when a rear/front pair drove the frame analysis.
    pub fn has_wheel_pair(&self) -> bool {
        !self.trace.fallback
    }
}

/// Rule-based interpreter of detected circles and segments.
#[derive(Clone, Debug, Default)]
pub struct BikeAnalyzer {
    params: AnalyzerParams,
}

impl BikeAnalyzer {
    pub fn new(params: AnalyzerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Runs all stages on one image's primitives.
    pub fn analyze(
        &self,
        circles: &[RawCircle],
        segments: &[RawSegment],
        image: ImageSize,
    ) -> AnalysisResult {
        let start = Instant::now();

        let pairing = pair_concentric(circles, image, &self.params);
        let concentric_pairs = pairing.pair_count;
        let wheel_groups = pairing.groups.len();
        let (selection, wheel_selection) = select_wheel_pair(pairing.groups, image);

        let lines: Vec<LineSegment> = segments
            .iter()
            .enumerate()
            .map(|(i, raw)| LineSegment::from_raw(SegmentId(i as u32), raw))
            .collect();

        let (lines, filter, rule_hits, fallback) = match selection.axles() {
            Some((rear, front)) => {
                let (kept, filter) = filter_frame_segments(lines, rear, front, image, &self.params);
                let (labelled, rule_hits) = classify_segments(kept, rear, front, &self.params);
                let scored = score_segments(labelled, rear, front, &self.params);
                (scored, filter, rule_hits, false)
            }
            None => {
                warn!(
                    "analyzer: {} wheel group(s) selected, falling back to basic segment filter",
                    selection.group_count()
                );
                let (kept, filter) = filter_basic(lines, image, &self.params);
                (kept, filter, Vec::new(), true)
            }
        };

        let wheels = selection.into_circles();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "analyzer: circles={} groups={} wheels={} segments={}/{} fallback={} elapsed_ms={:.3}",
            circles.len(),
            wheel_groups,
            wheels.len(),
            lines.len(),
            segments.len(),
            fallback,
            elapsed_ms
        );

        let trace = AnalysisTrace {
            input_circles: circles.len(),
            input_segments: segments.len(),
            concentric_pairs,
            wheel_groups,
            wheel_selection,
            fallback,
            filter,
            rule_hits,
            components: component_counts(&lines),
            elapsed_ms,
        };
        AnalysisResult {
            wheels,
            segments: lines,
            trace,
        }
    }

    pub fn analyze_set(&self, set: &PrimitiveSet) -> AnalysisResult {
        self.analyze(&set.circles, &set.segments, set.image_size())
    }

    /// Analyzes independent images; output order follows `sets`.
    #[cfg(feature = "parallel")]
    pub fn analyze_batch(&self, sets: &[PrimitiveSet]) -> Vec<AnalysisResult> {
        use rayon::prelude::*;
        sets.par_iter().map(|set| self.analyze_set(set)).collect()
    }

    /// Analyzes independent images; output order follows `sets`.
    #[cfg(not(feature = "parallel"))]
    pub fn analyze_batch(&self, sets: &[PrimitiveSet]) -> Vec<AnalysisResult> {
        sets.iter().map(|set| self.analyze_set(set)).collect()
    }
}
