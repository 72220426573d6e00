mod common;

use bike_geometry::diagnostics::WheelSelectionReport;
use bike_geometry::prelude::*;
use bike_geometry::types::SegmentId;
use common::synthetic_bike::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn label_of(result: &AnalysisResult, index: usize) -> Option<FrameComponent> {
    result
        .segments
        .iter()
        .find(|s| s.id == SegmentId(index as u32))
        .map(|s| s.component)
}

#[test]
fn synthetic_bike_is_labelled() {
    init_logging();
    let analyzer = BikeAnalyzer::new(AnalyzerParams::default());
    let result = analyzer.analyze(&wheels(), &frame_segments(), IMAGE);

    assert!(result.has_wheel_pair());
    assert_eq!(result.wheels.len(), 2);
    assert_eq!(result.wheels[0].center, REAR_AXLE);
    assert_eq!(result.wheels[1].center, FRONT_AXLE);
    assert_eq!(
        result.trace.wheel_selection,
        WheelSelectionReport::ValidatedPair {
            vertically_aligned: true,
            plausible_wheelbase: true,
        }
    );

    assert_eq!(result.segments.len(), frame_segments().len());
    assert_eq!(label_of(&result, SEAT_TUBE), Some(FrameComponent::SeatTube));
    assert_eq!(label_of(&result, TOP_TUBE), Some(FrameComponent::TopTube));
    assert_eq!(label_of(&result, DOWN_TUBE), Some(FrameComponent::DownTube));
    // Longer than the head tube cap relative to the average segment.
    assert_eq!(label_of(&result, HEAD_TUBE), Some(FrameComponent::Unknown));
    assert_eq!(
        label_of(&result, CHAIN_STAY),
        Some(FrameComponent::ChainStayLeft)
    );
    assert_eq!(
        label_of(&result, SEAT_STAY),
        Some(FrameComponent::SeatStayLeft)
    );
    assert_eq!(label_of(&result, FORK), Some(FrameComponent::Fork));

    for seg in &result.segments {
        assert!((0.0..=1.0).contains(&seg.geometry_score));
        if seg.component.is_labeled() {
            assert!(seg.geometry_score > 0.0, "{:?} unscored", seg.component);
        } else {
            assert_eq!(seg.geometry_score, 0.0);
        }
    }
    for pair in result.segments.windows(2) {
        assert!(pair[0].combined_score() >= pair[1].combined_score());
    }

    let fired: usize = result.trace.rule_hits.iter().map(|h| h.count).sum();
    assert_eq!(fired, 6);
    assert!(result
        .trace
        .rule_hits
        .iter()
        .filter(|h| h.rule != "head_tube")
        .all(|h| h.count == 1));
}

#[test]
fn tire_and_rim_pairs_still_find_the_frame() {
    init_logging();
    let result = BikeAnalyzer::default().analyze(&wheels_with_rims(), &frame_segments(), IMAGE);

    assert_eq!(result.trace.concentric_pairs, 2);
    assert_eq!(result.trace.wheel_groups, 2);
    assert!(result.has_wheel_pair());
    assert_eq!(result.wheels.len(), 4);
    assert_eq!(result.wheels[0].component, WheelComponent::Tire);
    assert_eq!(result.wheels[1].component, WheelComponent::Rim);
    assert_eq!(result.wheels[0].partner, Some(result.wheels[1].id));
    assert_eq!(result.wheels[1].partner, Some(result.wheels[0].id));
    assert!(result.wheels[0].center[0] < result.wheels[2].center[0]);
    assert_eq!(label_of(&result, SEAT_TUBE), Some(FrameComponent::SeatTube));
}

#[test]
fn one_wheel_falls_back_to_basic_filter() {
    init_logging();
    let circles = vec![circle(REAR_AXLE, WHEEL_RADIUS, 0.9)];
    let mut segments = frame_segments();
    segments.push(segment([300.0, 100.0], [400.0, 200.0], 0.2));
    let result = BikeAnalyzer::default().analyze(&circles, &segments, IMAGE);

    assert!(!result.has_wheel_pair());
    assert_eq!(result.trace.wheel_selection, WheelSelectionReport::Single);
    assert_eq!(result.trace.filter.rejected_confidence, 1);
    assert_eq!(result.segments.len(), frame_segments().len());
    assert!(result
        .segments
        .iter()
        .all(|s| s.component == FrameComponent::Unknown && s.geometry_score == 0.0));
    for pair in result.segments.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn vertical_line_between_wheels_is_seat_tube() {
    init_logging();
    let segments = vec![segment([350.0, 200.0], [350.0, 400.0], 0.8)];
    let result = BikeAnalyzer::default().analyze(&wheels(), &segments, IMAGE);
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].component, FrameComponent::SeatTube);
    assert!(result.segments[0].geometry_score > 0.0);
}

#[test]
fn ground_line_is_excluded() {
    init_logging();
    let mut segments = frame_segments();
    segments.push(ground_line());
    let result = BikeAnalyzer::default().analyze(&wheels(), &segments, IMAGE);

    let ground = SegmentId(frame_segments().len() as u32);
    assert!(result.segments.iter().all(|s| s.id != ground));
    assert_eq!(result.trace.filter.rejected_angle, 1);
    assert_eq!(result.trace.filter.kept, frame_segments().len());
}

#[test]
fn no_input_yields_empty_result() {
    init_logging();
    let result = BikeAnalyzer::default().analyze(&[], &[], IMAGE);
    assert!(result.wheels.is_empty());
    assert!(result.segments.is_empty());
    assert_eq!(result.trace.wheel_selection, WheelSelectionReport::None);
}

#[test]
fn result_serializes_to_json() {
    let result = BikeAnalyzer::default().analyze(&wheels(), &frame_segments(), IMAGE);
    let json = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(json["wheels"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["trace"]["fallback"], false);
    let labels: Vec<&str> = json["segments"]
        .as_array()
        .expect("segments array")
        .iter()
        .filter_map(|s| s["component"].as_str())
        .collect();
    assert!(labels.contains(&"SEAT_TUBE"));
    assert!(labels.contains(&"FORK"));
}
