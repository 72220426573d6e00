//! Report structures describing one analysis run.
//!
//! `AnalysisTrace` travels with every [`crate::AnalysisResult`] and records
//! what each stage saw and decided. All structures serialize to camelCase
//! JSON for the demo tool.

use crate::frame::{FilterDiagnostics, RuleHit};
use crate::types::{FrameComponent, LineSegment};
use serde::Serialize;
use std::collections::BTreeMap;

/// How the wheel pair was chosen.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WheelSelectionReport {
    /// No wheel groups.
    None,
    /// One wheel group; frame analysis falls back.
    Single,
    /// Exactly two groups, taken as-is with logged plausibility checks.
    ValidatedPair {
        vertically_aligned: bool,
        plausible_wheelbase: bool,
    },
    /// Best of a pairwise scan over more than two groups.
    ScoredPair { score: f32, candidates: usize },
    /// No pair scored above zero; the two most confident groups were used.
    FallbackPair { candidates: usize },
}

/// Label histogram entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCount {
    pub component: FrameComponent,
    pub count: usize,
}

/// Counts each label over `segments`, in label order.
pub fn component_counts(segments: &[LineSegment]) -> Vec<ComponentCount> {
    let mut counts: BTreeMap<FrameComponent, usize> = BTreeMap::new();
    for seg in segments {
        *counts.entry(seg.component).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(component, count)| ComponentCount { component, count })
        .collect()
}

/// Stage-by-stage record of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisTrace {
    pub input_circles: usize,
    pub input_segments: usize,
    pub concentric_pairs: usize,
    pub wheel_groups: usize,
    pub wheel_selection: WheelSelectionReport,
    /// True when fewer than two wheels forced the basic filter.
    pub fallback: bool,
    pub filter: FilterDiagnostics,
    /// Segments labelled per classifier rule; empty on the fallback path.
    pub rule_hits: Vec<RuleHit>,
    pub components: Vec<ComponentCount>,
    pub elapsed_ms: f64,
}
