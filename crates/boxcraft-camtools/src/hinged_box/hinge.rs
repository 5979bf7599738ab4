//! Hinge knuckle strip
//!
//! The lid and back share one hinge line. Both edges are divided into the
//! same number of equal pitches; the lid owns the even pitches and the back
//! the odd ones. Each knuckle is narrower than its pitch by the clearance
//! and sits centred in it, leaving play for the lid to rotate.

use super::types::HingedInputs;
use crate::finger_pattern::{clamp_segment_count, joint_segment_count, MAX_COUNT};
use boxcraft_core::Point2D;
use tracing::debug;

/// Knuckles never get narrower than this, whatever the clearance.
pub const MIN_HINGE_TAB_WIDTH_MM: f64 = 0.5;

/// Knuckle count for a hinge edge of `length`, honouring the manual count.
pub fn hinge_finger_count(inputs: &HingedInputs, length: f64) -> u32 {
    match inputs.hinge_count_override() {
        Some(count) => clamp_segment_count(count),
        None => joint_segment_count(length, inputs.hinge_finger_width_mm, None),
    }
}

/// Walk a hinge edge from `start` along `direction`, pushing knuckles out
/// along `normal` by `depth`.
///
/// `finger_count == 0` derives the count from `finger_width`. The returned
/// points start at `start` and end at `start + direction * length`.
#[allow(clippy::too_many_arguments)]
pub fn hinge_fingers(
    start: Point2D,
    direction: Point2D,
    normal: Point2D,
    length: f64,
    depth: f64,
    finger_width: f64,
    finger_count: u32,
    clearance: f64,
    is_back: bool,
) -> Vec<Point2D> {
    let count = if finger_count == 0 {
        joint_segment_count(length, finger_width, None)
    } else {
        finger_count.min(MAX_COUNT)
    };

    let pitch = length / f64::from(count);
    let tab_width = (pitch - clearance).max(MIN_HINGE_TAB_WIDTH_MM);
    let gap_before = (pitch - tab_width) / 2.0;

    debug!(count, pitch, tab_width, is_back, "hinge strip");

    let mut points = Vec::with_capacity(count as usize * 5 + 1);
    points.push(start);

    for i in 0..count {
        let pitch_start = start.offset(direction, f64::from(i) * pitch);
        let pitch_end = start.offset(direction, f64::from(i + 1) * pitch);
        let is_tab = (i % 2 == 0) != is_back;

        if is_tab {
            let tab_start = pitch_start.offset(direction, gap_before);
            let tab_end = tab_start.offset(direction, tab_width);
            points.push(tab_start);
            points.push(tab_start.offset(normal, depth));
            points.push(tab_end.offset(normal, depth));
            points.push(tab_end);
        }
        points.push(pitch_end);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIGHT: Point2D = Point2D::new(1.0, 0.0);
    const UP: Point2D = Point2D::new(0.0, -1.0);

    fn knuckle_spans(points: &[Point2D], depth_y: f64) -> Vec<(f64, f64)> {
        // Consecutive points on the knuckle line form the top of a knuckle.
        points
            .windows(2)
            .filter(|w| (w[0].y - depth_y).abs() < 1e-9 && (w[1].y - depth_y).abs() < 1e-9)
            .map(|w| (w[0].x, w[1].x))
            .collect()
    }

    #[test]
    fn test_end_point_is_edge_length() {
        for is_back in [false, true] {
            let pts = hinge_fingers(Point2D::ORIGIN, RIGHT, UP, 150.0, 3.0, 8.0, 19, 0.4, is_back);
            let last = *pts.last().unwrap();
            assert!(last.approx_eq(Point2D::new(150.0, 0.0), 1e-9));
            assert_eq!(pts[0], Point2D::ORIGIN);
        }
    }

    #[test]
    fn test_lid_and_back_interleave() {
        let lid = hinge_fingers(Point2D::ORIGIN, RIGHT, UP, 90.0, 3.0, 10.0, 9, 0.5, false);
        let back = hinge_fingers(Point2D::ORIGIN, RIGHT, UP, 90.0, 3.0, 10.0, 9, 0.5, true);

        let lid_spans = knuckle_spans(&lid, -3.0);
        let back_spans = knuckle_spans(&back, -3.0);
        assert_eq!(lid_spans.len(), 5);
        assert_eq!(back_spans.len(), 4);

        // pitch 10, tab 9.5, centred with 0.25 either side
        assert!((lid_spans[0].0 - 0.25).abs() < 1e-9);
        assert!((lid_spans[0].1 - 9.75).abs() < 1e-9);
        assert!((back_spans[0].0 - 10.25).abs() < 1e-9);

        // no knuckle overlaps another
        for (a0, a1) in &lid_spans {
            for (b0, b1) in &back_spans {
                assert!(a1 <= b0 || b1 <= a0);
            }
        }
    }

    #[test]
    fn test_minimum_tab_width() {
        let pts = hinge_fingers(Point2D::ORIGIN, RIGHT, UP, 9.0, 3.0, 3.0, 3, 5.0, false);
        let spans = knuckle_spans(&pts, -3.0);
        assert!((spans[0].1 - spans[0].0 - MIN_HINGE_TAB_WIDTH_MM).abs() < 1e-9);
    }

    #[test]
    fn test_auto_count() {
        let pts = hinge_fingers(Point2D::ORIGIN, RIGHT, UP, 150.0, 3.0, 8.0, 0, 0.0, false);
        // 150 / 8 -> 19 pitches, 10 knuckles for the lid
        assert_eq!(knuckle_spans(&pts, -3.0).len(), 10);
    }

    #[test]
    fn test_hinge_finger_count_override() {
        let inputs = HingedInputs {
            auto_finger_count: false,
            manual_hinge_finger_count: 6,
            ..HingedInputs::default()
        };
        assert_eq!(hinge_finger_count(&inputs, 150.0), 7);
        assert_eq!(hinge_finger_count(&HingedInputs::default(), 150.0), 19);
    }
}
