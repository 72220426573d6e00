//! Wheel hypotheses from raw circles.
//!
//! Two stages turn the detector's circle candidates into a rear/front wheel
//! pair:
//!
//! - [`concentric`] groups circles that share a centre into tire/rim pairs.
//!   The search is greedy: circles are visited by descending confidence and
//!   each takes its best-scoring unprocessed partner, if that score clears a
//!   fixed acceptance gate. Identity is index based (`CircleId`), so circles
//!   with identical values never alias.
//! - [`selection`] picks the two wheel groups that best look like a bicycle's
//!   wheels. Two groups are taken as-is (plausibility is only logged); more
//!   than two are scored pairwise and the best pair wins.
//!
//! The selected pair is ordered left-to-right: the smaller `x` is the rear
//! wheel.

pub mod concentric;
pub mod selection;

pub use concentric::{pair_concentric, ConcentricPairing, WheelGroup};
pub use selection::{select_wheel_pair, WheelSelection};
