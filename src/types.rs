use crate::angle::line_angle_deg;
use crate::geometry::{distance, midpoint};
use serde::{Deserialize, Serialize};

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn diagonal(&self) -> f32 {
        let w = self.width as f32;
        let h = self.height as f32;
        (w * w + h * h).sqrt()
    }
}

/// Circle hypothesis as emitted by the primitive detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawCircle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub confidence: f32,
}

/// Segment hypothesis as emitted by the primitive detector. Length and angle
/// are derived from the endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub confidence: f32,
}

/// Everything the detector produced for one image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSet {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub circles: Vec<RawCircle>,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

impl PrimitiveSet {
    pub fn image_size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}

/// Index of a circle in the batch handed to the analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircleId(pub u32);

/// Index of a segment in the batch handed to the analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

/// Role of a circle within its wheel group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WheelComponent {
    Tire,
    Rim,
    Unknown,
}

/// Wheel circle with its concentric partner, if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub id: CircleId,
    pub center: [f32; 2],
    pub radius: f32,
    pub confidence: f32,
    pub component: WheelComponent,
    /// Non-owning link to the other member of a tire/rim pair.
    pub partner: Option<CircleId>,
}

impl Circle {
    pub fn from_raw(id: CircleId, raw: &RawCircle) -> Self {
        debug_assert!(
            raw.radius > 0.0 && raw.x.is_finite() && raw.y.is_finite(),
            "malformed circle {raw:?}"
        );
        Self {
            id,
            center: [raw.x, raw.y],
            radius: raw.radius,
            confidence: raw.confidence,
            component: WheelComponent::Unknown,
            partner: None,
        }
    }

    pub fn x(&self) -> f32 {
        self.center[0]
    }

    pub fn y(&self) -> f32 {
        self.center[1]
    }
}

/// Frame tube labels assigned by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameComponent {
    SeatTube,
    TopTube,
    DownTube,
    HeadTube,
    Fork,
    SeatStayLeft,
    SeatStayRight,
    ChainStayLeft,
    ChainStayRight,
    Seatpost,
    Unknown,
}

impl FrameComponent {
    /// Seat, top and down tube.
    pub fn is_main_triangle(self) -> bool {
        matches!(
            self,
            FrameComponent::SeatTube | FrameComponent::TopTube | FrameComponent::DownTube
        )
    }

    pub fn is_seat_stay(self) -> bool {
        matches!(
            self,
            FrameComponent::SeatStayLeft | FrameComponent::SeatStayRight
        )
    }

    pub fn is_chain_stay(self) -> bool {
        matches!(
            self,
            FrameComponent::ChainStayLeft | FrameComponent::ChainStayRight
        )
    }

    pub fn is_stay(self) -> bool {
        self.is_seat_stay() || self.is_chain_stay()
    }

    pub fn is_labeled(self) -> bool {
        self != FrameComponent::Unknown
    }
}

/// Line segment carrying its frame label and geometry score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub id: SegmentId,
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub length: f32,
    /// Direction of `p0 → p1` in degrees, range (-180, 180].
    pub angle_deg: f32,
    pub confidence: f32,
    pub component: FrameComponent,
    pub geometry_score: f32,
}

impl LineSegment {
    pub fn from_raw(id: SegmentId, raw: &RawSegment) -> Self {
        debug_assert!(
            raw.p0.iter().chain(raw.p1.iter()).all(|v| v.is_finite()),
            "malformed segment {raw:?}"
        );
        Self {
            id,
            p0: raw.p0,
            p1: raw.p1,
            length: distance(&raw.p0, &raw.p1),
            angle_deg: line_angle_deg(&raw.p0, &raw.p1),
            confidence: raw.confidence,
            component: FrameComponent::Unknown,
            geometry_score: 0.0,
        }
    }

    pub fn midpoint(&self) -> [f32; 2] {
        midpoint(&self.p0, &self.p1)
    }

    /// Smallest endpoint distance to `point`.
    pub fn endpoint_distance(&self, point: &[f32; 2]) -> f32 {
        distance(&self.p0, point).min(distance(&self.p1, point))
    }

    /// Ranking key of the final output.
    pub fn combined_score(&self) -> f32 {
        self.confidence + self.geometry_score
    }
}
