//! Frame interpretation of line segments against a rear/front wheel pair.
//!
//! Overview
//! - [`constraints`] drops segments that cannot be frame tubes: too short,
//!   near-horizontal or near-vertical beyond the tube band, outside the bike's
//!   expanded bounding box, or longer than 1.5 wheelbases. The same
//!   length/orientation predicate backs the wheel-less fallback filter.
//! - [`classify`] labels each survivor with an ordered, first-match-wins rule
//!   chain relative to the axles (seat tube, head tube, top tube, down tube,
//!   chain stay, seat stay, fork).
//! - [`scoring`] rates every labelled segment in `[0, 1]` from length/angle
//!   agreement with related tubes and axle contact, then ranks by
//!   `confidence + geometry_score`.
//!
//! All stages are pure functions of their inputs; nothing is cached between
//! calls.

pub mod classify;
pub mod constraints;
pub mod scoring;

pub use classify::{classify_segment, classify_segments, matching_rule, FrameReference, RuleHit};
pub use constraints::{
    check_segment, filter_basic, filter_frame_segments, FilterDiagnostics, FrameBounds, Rejection,
};
pub use scoring::{geometry_score, score_segments};
