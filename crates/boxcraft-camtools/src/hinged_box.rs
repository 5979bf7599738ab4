//! Hinged Box Maker
//!
//! Builds the six flat panels of a finger-jointed box whose lid pivots on a
//! knuckle hinge along the back.
//!
//! Panels are drawn in SVG coordinates (x right, y down) with the origin at
//! the top-left of the panel's outer rectangle. Outlines run clockwise: top
//! edge left to right, right edge downwards, bottom edge right to left, left
//! edge upwards. A jointed side has its baseline inset by the material
//! thickness and its tabs reach the outer rectangle; every edge walk runs
//! between inner corners, so two mating edges always have the same length.
//!
//! Walls own the tabs at their corners, including the `t×t×t` cube at each
//! bottom corner: the vertical joint's lowest tab runs on down to the floor.
//! The side panels and the bottom use the complement of the wall patterns
//! they mate with. All joint patterns are palindromic, so a mate can be
//! walked in either direction.

pub mod hinge;
pub mod legacy;
pub mod types;

pub use hinge::{hinge_finger_count, hinge_fingers, MIN_HINGE_TAB_WIDTH_MM};
pub use legacy::legacy_reference_panels;
pub use types::{
    push_unique_point, BoxPanels, BoxSvgs, CircleHole2D, HingedInputs, Panel2D, PanelKind,
    RenderMode,
};

use crate::finger_pattern::{FingerPattern, FingerPatternOptions, JointRole};
use boxcraft_core::Point2D;
use tracing::debug;

/// Diameter of the lid pivot holes in the side panels.
pub const SIDE_PIVOT_HOLE_DIAMETER_MM: f64 = 4.5;
/// Pivot hole centre distance from the top and back edges of a side panel.
pub const SIDE_PIVOT_HOLE_OFFSET_MM: f64 = 8.0;

const RIGHT: Point2D = Point2D::new(1.0, 0.0);
const LEFT: Point2D = Point2D::new(-1.0, 0.0);
const DOWN: Point2D = Point2D::new(0.0, 1.0);
const UP: Point2D = Point2D::new(0.0, -1.0);

fn walk_segments<I>(start: Point2D, direction: Point2D, normal: Point2D, segments: I, depth: f64) -> Vec<Point2D>
where
    I: IntoIterator<Item = (bool, f64)>,
{
    let mut points = vec![start];
    let mut cursor = start;
    for (is_tab, width) in segments {
        let next = cursor.offset(direction, width);
        if is_tab {
            points.push(cursor.offset(normal, depth));
            points.push(next.offset(normal, depth));
        }
        points.push(next);
        cursor = next;
    }
    points
}

/// Walk one jointed edge.
///
/// Starting at `start`, each tab emits three points (out along `normal` by
/// `depth`, across by its width, back to the baseline) and each gap one
/// point. The last point is `start + direction * sum(widths)` regardless of
/// `depth` or `start_with_male`.
pub fn finger_joints_with_segment_widths(
    start: Point2D,
    direction: Point2D,
    normal: Point2D,
    widths: &[f64],
    depth: f64,
    start_with_male: bool,
) -> Vec<Point2D> {
    let segments = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| ((i % 2 == 0) == start_with_male, w));
    walk_segments(start, direction, normal, segments, depth)
}

/// Walk one jointed edge using the kinds stored in `pattern`.
pub fn pattern_walk(
    start: Point2D,
    direction: Point2D,
    normal: Point2D,
    pattern: &FingerPattern,
    depth: f64,
) -> Vec<Point2D> {
    let segments = pattern.segments().iter().map(|s| (s.kind.is_tab(), s.width));
    walk_segments(start, direction, normal, segments, depth)
}

/// Joint patterns shared by mating panels, derived from one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPatterns {
    /// Front/back wall to bottom, along the width
    pub bottom_x: FingerPattern,
    /// Side wall to bottom, along the depth
    pub bottom_y: FingerPattern,
    /// Front/back wall to side wall, along the height
    pub vertical: FingerPattern,
    /// Knuckles on the lid/back hinge line
    pub hinge_count: u32,
}

impl JointPatterns {
    pub fn from_inputs(inputs: &HingedInputs) -> Self {
        let t = inputs.thickness_mm;
        let edge = |length: f64, role: JointRole| {
            FingerPattern::from_options(&FingerPatternOptions {
                length,
                finger_width: inputs.joint_finger_width_mm,
                invert: false,
                profile: inputs.joint_profile,
                role,
                segment_count: inputs.joint_count_override(),
            })
        };

        let hinge_length = inputs.width_mm - 2.0 * t;
        Self {
            bottom_x: edge(inputs.width_mm - 2.0 * t, JointRole::BottomEdge),
            bottom_y: edge(inputs.depth_mm - 2.0 * t, JointRole::BottomEdge),
            vertical: edge(inputs.height_mm - t, JointRole::SideVertical),
            hinge_count: hinge_finger_count(inputs, hinge_length),
        }
    }
}

#[derive(Default)]
struct Outline {
    points: Vec<Point2D>,
}

impl Outline {
    fn line_to(&mut self, p: Point2D) {
        let n = self.points.len();
        // Doubling straight back cancels the previous point.
        if n >= 2 && self.points[n - 2].approx_eq(p, 1e-9) {
            self.points.pop();
            return;
        }
        push_unique_point(&mut self.points, p);
    }

    fn extend(&mut self, points: Vec<Point2D>) {
        for p in points {
            self.line_to(p);
        }
    }

    fn finish(mut self) -> Vec<Point2D> {
        if self.points.len() > 1 {
            let first = self.points[0];
            if self.points.last().is_some_and(|last| last.approx_eq(first, 1e-9)) {
                self.points.pop();
            }
        }
        self.points
    }
}

/// `pattern` with its first or last segment lengthened by `extra`.
fn extend_end(pattern: &FingerPattern, extra: f64, at_start: bool) -> FingerPattern {
    let mut widths = pattern.widths();
    let end = if at_start {
        widths.first_mut()
    } else {
        widths.last_mut()
    };
    if let Some(width) = end {
        *width += extra;
    }
    FingerPattern::from_widths(&widths, pattern.starts_with_tab())
}

fn hinge_strip(inputs: &HingedInputs, joints: &JointPatterns, is_back: bool) -> Vec<Point2D> {
    let t = inputs.thickness_mm;
    hinge_fingers(
        Point2D::new(t, t),
        RIGHT,
        UP,
        inputs.width_mm - 2.0 * t,
        t,
        inputs.hinge_finger_width_mm,
        joints.hinge_count,
        inputs.hinge_clearance_mm,
        is_back,
    )
}

/// Front and back walls: jointed on the sides and bottom. The back carries
/// the hinge strip on its top edge. The side joints run the full height so
/// the wall fills both bottom corners.
fn wall_outline(inputs: &HingedInputs, joints: &JointPatterns, hinged: bool) -> Vec<Point2D> {
    let (w, h, t) = (inputs.width_mm, inputs.height_mm, inputs.thickness_mm);
    let down = extend_end(&joints.vertical, t, false);
    let up = extend_end(&joints.vertical, t, true);
    let mut outline = Outline::default();

    outline.line_to(Point2D::new(t, 0.0));
    if hinged {
        outline.extend(hinge_strip(inputs, joints, true));
    }
    outline.line_to(Point2D::new(w - t, 0.0));
    outline.extend(pattern_walk(Point2D::new(w - t, 0.0), DOWN, RIGHT, &down, t));
    outline.extend(pattern_walk(Point2D::new(w - t, h - t), LEFT, DOWN, &joints.bottom_x, t));
    outline.extend(pattern_walk(Point2D::new(t, h), UP, LEFT, &up, t));

    outline.finish()
}

/// Side walls: plain top, complemented vertical joints, owned bottom joint.
/// The bottom corners are left to the walls.
fn side_outline(inputs: &HingedInputs, joints: &JointPatterns) -> Vec<Point2D> {
    let (d, h, t) = (inputs.depth_mm, inputs.height_mm, inputs.thickness_mm);
    let vertical_mate = joints.vertical.complementary();
    let mut outline = Outline::default();

    outline.line_to(Point2D::new(t, 0.0));
    outline.line_to(Point2D::new(d - t, 0.0));
    outline.extend(pattern_walk(Point2D::new(d - t, 0.0), DOWN, RIGHT, &vertical_mate, t));
    outline.extend(pattern_walk(Point2D::new(d - t, h - t), LEFT, DOWN, &joints.bottom_y, t));
    outline.extend(pattern_walk(Point2D::new(t, h - t), UP, LEFT, &vertical_mate, t));

    outline.finish()
}

fn pivot_hole(inputs: &HingedInputs, back_on_left: bool) -> CircleHole2D {
    let cx = if back_on_left {
        SIDE_PIVOT_HOLE_OFFSET_MM
    } else {
        inputs.depth_mm - SIDE_PIVOT_HOLE_OFFSET_MM
    };
    CircleHole2D::new(cx, SIDE_PIVOT_HOLE_OFFSET_MM, SIDE_PIVOT_HOLE_DIAMETER_MM / 2.0)
}

fn front_panel(inputs: &HingedInputs, joints: &JointPatterns) -> Panel2D {
    Panel2D::new(wall_outline(inputs, joints, false))
}

fn back_panel(inputs: &HingedInputs, joints: &JointPatterns) -> Panel2D {
    let inset = inputs.hinge_hole_inset_mm;
    let r = inputs.hinge_hole_diameter_mm / 2.0;
    Panel2D::new(wall_outline(inputs, joints, true)).with_holes(vec![
        CircleHole2D::new(inset, inset, r),
        CircleHole2D::new(inputs.width_mm - inset, inset, r),
    ])
}

// Seen from outside, the left panel has the back on its left and the right
// panel has it on its right.
fn left_panel(inputs: &HingedInputs, joints: &JointPatterns) -> Panel2D {
    Panel2D::new(side_outline(inputs, joints)).with_holes(vec![pivot_hole(inputs, true)])
}

fn right_panel(inputs: &HingedInputs, joints: &JointPatterns) -> Panel2D {
    Panel2D::new(side_outline(inputs, joints)).with_holes(vec![pivot_hole(inputs, false)])
}

fn bottom_panel(inputs: &HingedInputs, joints: &JointPatterns) -> Panel2D {
    let (w, d, t) = (inputs.width_mm, inputs.depth_mm, inputs.thickness_mm);
    let x_mate = joints.bottom_x.complementary();
    let y_mate = joints.bottom_y.complementary();
    let mut outline = Outline::default();

    outline.extend(pattern_walk(Point2D::new(t, t), RIGHT, UP, &x_mate, t));
    outline.extend(pattern_walk(Point2D::new(w - t, t), DOWN, RIGHT, &y_mate, t));
    outline.extend(pattern_walk(Point2D::new(w - t, d - t), LEFT, DOWN, &x_mate, t));
    outline.extend(pattern_walk(Point2D::new(t, d - t), UP, LEFT, &y_mate, t));

    Panel2D::new(outline.finish())
}

fn lid_panel(inputs: &HingedInputs, joints: &JointPatterns) -> Panel2D {
    let (w, d, t) = (inputs.width_mm, inputs.depth_mm, inputs.thickness_mm);
    let mut outline = Outline::default();

    outline.line_to(Point2D::new(0.0, t));
    outline.extend(hinge_strip(inputs, joints, false));
    outline.line_to(Point2D::new(w, t));
    outline.line_to(Point2D::new(w, d));
    outline.line_to(Point2D::new(0.0, d));

    Panel2D::new(outline.finish())
}

pub fn generate_front_panel(inputs: &HingedInputs) -> Panel2D {
    front_panel(inputs, &JointPatterns::from_inputs(inputs))
}

pub fn generate_back_panel(inputs: &HingedInputs) -> Panel2D {
    back_panel(inputs, &JointPatterns::from_inputs(inputs))
}

pub fn generate_left_panel(inputs: &HingedInputs) -> Panel2D {
    left_panel(inputs, &JointPatterns::from_inputs(inputs))
}

pub fn generate_right_panel(inputs: &HingedInputs) -> Panel2D {
    right_panel(inputs, &JointPatterns::from_inputs(inputs))
}

pub fn generate_bottom_panel(inputs: &HingedInputs) -> Panel2D {
    bottom_panel(inputs, &JointPatterns::from_inputs(inputs))
}

pub fn generate_lid_panel(inputs: &HingedInputs) -> Panel2D {
    lid_panel(inputs, &JointPatterns::from_inputs(inputs))
}

/// Generate all six panels from one set of inputs.
pub fn generate_box_panels(inputs: &HingedInputs) -> BoxPanels {
    let joints = JointPatterns::from_inputs(inputs);
    debug!(
        bottom_x = joints.bottom_x.segment_count(),
        bottom_y = joints.bottom_y.segment_count(),
        vertical = joints.vertical.segment_count(),
        hinge = joints.hinge_count,
        "joint patterns"
    );

    let panels = BoxPanels {
        front: front_panel(inputs, &joints),
        back: back_panel(inputs, &joints),
        left: left_panel(inputs, &joints),
        right: right_panel(inputs, &joints),
        bottom: bottom_panel(inputs, &joints),
        lid: lid_panel(inputs, &joints),
    };

    for (kind, panel) in panels.iter() {
        debug!(panel = %kind, points = panel.outline.len(), holes = panel.holes.len(), "panel outline");
    }

    panels
}
