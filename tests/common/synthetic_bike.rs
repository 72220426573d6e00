#![allow(dead_code)]

use bike_geometry::types::{ImageSize, RawCircle, RawSegment};

pub const IMAGE: ImageSize = ImageSize {
    width: 1000,
    height: 600,
};

pub const REAR_AXLE: [f32; 2] = [200.0, 400.0];
pub const FRONT_AXLE: [f32; 2] = [700.0, 400.0];
pub const WHEEL_RADIUS: f32 = 150.0;

pub fn circle(center: [f32; 2], radius: f32, confidence: f32) -> RawCircle {
    RawCircle {
        x: center[0],
        y: center[1],
        radius,
        confidence,
    }
}

pub fn segment(p0: [f32; 2], p1: [f32; 2], confidence: f32) -> RawSegment {
    RawSegment { p0, p1, confidence }
}

/// Rear and front wheel, front listed first.
pub fn wheels() -> Vec<RawCircle> {
    vec![
        circle(FRONT_AXLE, WHEEL_RADIUS, 0.9),
        circle(REAR_AXLE, WHEEL_RADIUS, 0.85),
    ]
}

/// Tire and rim circles for both wheels, with a little centre jitter.
pub fn wheels_with_rims() -> Vec<RawCircle> {
    vec![
        circle(REAR_AXLE, WHEEL_RADIUS, 0.9),
        circle([201.0, 400.0], 130.0, 0.8),
        circle(FRONT_AXLE, WHEEL_RADIUS, 0.88),
        circle([700.0, 401.0], 128.0, 0.75),
    ]
}

pub const SEAT_TUBE: usize = 0;
pub const TOP_TUBE: usize = 1;
pub const DOWN_TUBE: usize = 2;
pub const HEAD_TUBE: usize = 3;
pub const CHAIN_STAY: usize = 4;
pub const SEAT_STAY: usize = 5;
pub const FORK: usize = 6;

/// Side-view frame drawn around [`wheels`]; indices follow the consts above.
pub fn frame_segments() -> Vec<RawSegment> {
    vec![
        segment([380.0, 390.0], [350.0, 220.0], 0.8),
        segment([360.0, 220.0], [600.0, 160.0], 0.85),
        segment([420.0, 420.0], [560.0, 300.0], 0.9),
        segment([640.0, 180.0], [650.0, 240.0], 0.6),
        segment([210.0, 400.0], [400.0, 450.0], 0.7),
        segment([120.0, 300.0], [210.0, 400.0], 0.75),
        segment([710.0, 300.0], [780.0, 400.0], 0.65),
    ]
}

/// Long, nearly level line along the ground.
pub fn ground_line() -> RawSegment {
    segment([100.0, 500.0], [800.0, 505.0], 0.95)
}
