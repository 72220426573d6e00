#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod types;

// Stage modules, public for tools and tests.
pub mod angle;
pub mod frame;
pub mod geometry;
pub mod wheels;

// --- High-level re-exports -------------------------------------------------

pub use crate::analyzer::params::AnalyzerParams;
pub use crate::analyzer::{AnalysisResult, BikeAnalyzer};
pub use crate::diagnostics::{AnalysisTrace, WheelSelectionReport};
pub use crate::types::{
    Circle, CircleId, FrameComponent, ImageSize, LineSegment, PrimitiveSet, RawCircle, RawSegment,
    SegmentId, WheelComponent,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::types::{FrameComponent, ImageSize, RawCircle, RawSegment, WheelComponent};
    pub use crate::{AnalysisResult, AnalyzerParams, BikeAnalyzer};
}
