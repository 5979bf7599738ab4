//! Fixed reference panels
//!
//! Plain rectangles for the 156 x 156 x 150 reference box, with the holes
//! at the positions the parametric generators use for the default inputs.
//! Regression tests compare against these.

use super::types::{BoxPanels, CircleHole2D, Panel2D};
use boxcraft_core::Point2D;

const FRONT_OUTLINE: [(f64, f64); 4] = [(0.0, 0.0), (156.0, 0.0), (156.0, 150.0), (0.0, 150.0)];
const SIDE_OUTLINE: [(f64, f64); 4] = [(0.0, 0.0), (156.0, 0.0), (156.0, 150.0), (0.0, 150.0)];
const FLOOR_OUTLINE: [(f64, f64); 4] = [(0.0, 0.0), (156.0, 0.0), (156.0, 156.0), (0.0, 156.0)];

const BACK_HOLES: [(f64, f64, f64); 2] = [(6.0, 6.0, 1.5), (150.0, 6.0, 1.5)];
const LEFT_HOLES: [(f64, f64, f64); 1] = [(8.0, 8.0, 2.25)];
const RIGHT_HOLES: [(f64, f64, f64); 1] = [(148.0, 8.0, 2.25)];

fn panel(outline: &[(f64, f64)], holes: &[(f64, f64, f64)]) -> Panel2D {
    Panel2D::new(outline.iter().map(|&(x, y)| Point2D::new(x, y)).collect()).with_holes(
        holes
            .iter()
            .map(|&(cx, cy, r)| CircleHole2D::new(cx, cy, r))
            .collect(),
    )
}

pub fn legacy_reference_panels() -> BoxPanels {
    BoxPanels {
        front: panel(&FRONT_OUTLINE, &[]),
        back: panel(&FRONT_OUTLINE, &BACK_HOLES),
        left: panel(&SIDE_OUTLINE, &LEFT_HOLES),
        right: panel(&SIDE_OUTLINE, &RIGHT_HOLES),
        bottom: panel(&FLOOR_OUTLINE, &[]),
        lid: panel(&FLOOR_OUTLINE, &[]),
    }
}
