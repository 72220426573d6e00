//! Thresholds configuring the wheel and frame stages.
//!
//! Defaults are tuned for full-resolution photographs of a bicycle seen from
//! the side. Ratios are relative to the quantity named in each field, so they
//! carry over across image sizes.

use serde::{Deserialize, Serialize};

/// Analyzer-wide thresholds. Values are trusted; out-of-range settings are a
/// caller error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    /// Maximum centre distance of a concentric pair, in average radii.
    pub concentric_circle_tolerance_ratio: f32,
    /// Minimum radius difference of a concentric pair, as a fraction of the
    /// image height.
    pub min_concentric_radius_diff: f32,
    /// Maximum radius difference of a concentric pair, in average radii.
    pub max_concentric_radius_diff_ratio: f32,
    /// Relative length tolerance when matching related frame tubes.
    pub frame_component_length_threshold: f32,
    /// Angle tolerance when matching related frame tubes (radians).
    pub frame_component_angle_threshold: f32,
    /// Minimum segment length as a fraction of the image diagonal.
    pub frame_min_component_length: f32,
    /// Maximum head tube length relative to the average frame segment.
    pub frame_max_head_tube_ratio: f32,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            concentric_circle_tolerance_ratio: 0.15,
            min_concentric_radius_diff: 0.02,
            max_concentric_radius_diff_ratio: 0.4,
            frame_component_length_threshold: 0.7,
            frame_component_angle_threshold: 0.6,
            frame_min_component_length: 0.05,
            frame_max_head_tube_ratio: 0.3,
        }
    }
}

impl AnalyzerParams {
    pub fn frame_component_angle_threshold_deg(&self) -> f32 {
        self.frame_component_angle_threshold.to_degrees()
    }
}
