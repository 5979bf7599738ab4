//! Type definitions for the Hinged Box Maker

use crate::error::{ParameterError, ParameterResult};
use crate::finger_pattern::JointProfile;
use boxcraft_core::{BoundingBox, Point2D};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Box generator inputs. Values are assumed to be range-checked upstream;
/// the generators clamp internally but never reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HingedInputs {
    pub width_mm: f64,
    pub depth_mm: f64,
    pub height_mm: f64,
    pub thickness_mm: f64,
    /// Carried for the export layer; kerf compensation happens upstream.
    pub kerf_mm: f64,
    pub joint_finger_width_mm: f64,
    pub hinge_finger_width_mm: f64,
    /// Rotational play between interleaved hinge knuckles
    pub hinge_clearance_mm: f64,
    pub hinge_hole_diameter_mm: f64,
    /// Distance of the hinge-pin holes from the top corners of the back
    pub hinge_hole_inset_mm: f64,
    pub auto_joint_finger_count: bool,
    pub manual_joint_finger_count: u32,
    pub auto_finger_count: bool,
    pub manual_hinge_finger_count: u32,
    pub joint_profile: JointProfile,
}

impl Default for HingedInputs {
    fn default() -> Self {
        Self {
            width_mm: 156.0,
            depth_mm: 156.0,
            height_mm: 150.0,
            thickness_mm: 3.0,
            kerf_mm: 0.1,
            joint_finger_width_mm: 15.0,
            hinge_finger_width_mm: 8.0,
            hinge_clearance_mm: 0.4,
            hinge_hole_diameter_mm: 3.0,
            hinge_hole_inset_mm: 6.0,
            auto_joint_finger_count: true,
            manual_joint_finger_count: 11,
            auto_finger_count: true,
            manual_hinge_finger_count: 19,
            joint_profile: JointProfile::Calibrated,
        }
    }
}

impl HingedInputs {
    /// Manual box-joint segment count, if auto counting is off.
    pub fn joint_count_override(&self) -> Option<u32> {
        (!self.auto_joint_finger_count).then_some(self.manual_joint_finger_count)
    }

    /// Manual hinge knuckle count, if auto counting is off.
    pub fn hinge_count_override(&self) -> Option<u32> {
        (!self.auto_finger_count).then_some(self.manual_hinge_finger_count)
    }

    /// Upstream-style range check. The generators never call this.
    pub fn validate(&self) -> ParameterResult<()> {
        let positive = [
            ("width_mm", self.width_mm),
            ("depth_mm", self.depth_mm),
            ("height_mm", self.height_mm),
            ("thickness_mm", self.thickness_mm),
            ("joint_finger_width_mm", self.joint_finger_width_mm),
            ("hinge_finger_width_mm", self.hinge_finger_width_mm),
            ("hinge_hole_diameter_mm", self.hinge_hole_diameter_mm),
            ("hinge_hole_inset_mm", self.hinge_hole_inset_mm),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("must be > 0, got {}", value),
                });
            }
        }

        for (name, value) in [
            ("kerf_mm", self.kerf_mm),
            ("hinge_clearance_mm", self.hinge_clearance_mm),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("must be >= 0, got {}", value),
                });
            }
        }

        let smallest = self.width_mm.min(self.depth_mm).min(self.height_mm);
        if 2.0 * self.thickness_mm >= smallest {
            return Err(ParameterError::InvalidDimensions(format!(
                "thickness {} mm leaves no room in a {} mm panel",
                self.thickness_mm, smallest
            )));
        }

        if let JointProfile::Ratio { female_ratio } = self.joint_profile {
            if !(female_ratio.is_finite() && female_ratio > 0.0) {
                return Err(ParameterError::InvalidValue {
                    name: "joint_profile.female_ratio".to_string(),
                    reason: format!("must be > 0, got {}", female_ratio),
                });
            }
        }

        Ok(())
    }
}

/// The six panels of a hinged box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Front,
    Back,
    Left,
    Right,
    Bottom,
    Lid,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::Front,
        PanelKind::Back,
        PanelKind::Left,
        PanelKind::Right,
        PanelKind::Bottom,
        PanelKind::Lid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PanelKind::Front => "front",
            PanelKind::Back => "back",
            PanelKind::Left => "left",
            PanelKind::Right => "right",
            PanelKind::Bottom => "bottom",
            PanelKind::Lid => "lid",
        }
    }

    /// Nominal (outer) width and height of the flat panel.
    pub fn nominal_size(self, width: f64, depth: f64, height: f64) -> (f64, f64) {
        match self {
            PanelKind::Front | PanelKind::Back => (width, height),
            PanelKind::Left | PanelKind::Right => (depth, height),
            PanelKind::Bottom | PanelKind::Lid => (width, depth),
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleHole2D {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl CircleHole2D {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }

    /// Regular polygon approximation, first vertex at angle 0.
    pub fn polygon(&self, segments: usize) -> Vec<Point2D> {
        let segments = segments.max(3);
        (0..segments)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / segments as f64;
                Point2D::new(self.cx + self.r * angle.cos(), self.cy + self.r * angle.sin())
            })
            .collect()
    }
}

/// One flat panel: an implicitly closed outline plus circular holes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Panel2D {
    pub outline: Vec<Point2D>,
    pub holes: Vec<CircleHole2D>,
}

impl Panel2D {
    pub fn new(outline: Vec<Point2D>) -> Self {
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(mut self, holes: Vec<CircleHole2D>) -> Self {
        self.holes = holes;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.outline)
    }

    /// Shoelace area. Positive for clockwise outlines in y-down coordinates.
    pub fn signed_area(&self) -> f64 {
        let n = self.outline.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.outline[i];
                let b = self.outline[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice / 2.0
    }
}

/// Drop a point that repeats the previous one.
pub fn push_unique_point(path: &mut Vec<Point2D>, point: Point2D) {
    if let Some(last) = path.last() {
        if last.approx_eq(point, 1e-9) {
            return;
        }
    }
    path.push(point);
}

/// The six generated panels
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxPanels {
    pub front: Panel2D,
    pub back: Panel2D,
    pub left: Panel2D,
    pub right: Panel2D,
    pub bottom: Panel2D,
    pub lid: Panel2D,
}

impl BoxPanels {
    pub fn get(&self, kind: PanelKind) -> &Panel2D {
        match kind {
            PanelKind::Front => &self.front,
            PanelKind::Back => &self.back,
            PanelKind::Left => &self.left,
            PanelKind::Right => &self.right,
            PanelKind::Bottom => &self.bottom,
            PanelKind::Lid => &self.lid,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PanelKind, &Panel2D)> {
        PanelKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// JSON form consumed by the 3D preview.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One SVG document per panel
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxSvgs {
    pub front: String,
    pub back: String,
    pub left: String,
    pub right: String,
    pub bottom: String,
    pub lid: String,
}

impl BoxSvgs {
    pub fn get(&self, kind: PanelKind) -> &str {
        match kind {
            PanelKind::Front => &self.front,
            PanelKind::Back => &self.back,
            PanelKind::Left => &self.left,
            PanelKind::Right => &self.right,
            PanelKind::Bottom => &self.bottom,
            PanelKind::Lid => &self.lid,
        }
    }

    pub fn get_mut(&mut self, kind: PanelKind) -> &mut String {
        match kind {
            PanelKind::Front => &mut self.front,
            PanelKind::Back => &mut self.back,
            PanelKind::Left => &mut self.left,
            PanelKind::Right => &mut self.right,
            PanelKind::Bottom => &mut self.bottom,
            PanelKind::Lid => &mut self.lid,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PanelKind, &str)> {
        PanelKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// How box SVGs are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Finger patterns computed from the inputs
    #[default]
    Parametric,
    /// Reference template paths rescaled to the inputs
    TemplateScaled,
    /// Reference template outlines at their own dimensions
    FixedTemplate,
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "parametric" => Ok(Self::Parametric),
            "template" | "template_scaled" => Ok(Self::TemplateScaled),
            "fixed" | "fixed_template" | "legacy" => Ok(Self::FixedTemplate),
            _ => Err(format!("Unknown render mode: {}", s)),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parametric => write!(f, "parametric"),
            Self::TemplateScaled => write!(f, "template_scaled"),
            Self::FixedTemplate => write!(f, "fixed_template"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_are_reference_box() {
        let inputs = HingedInputs::default();
        assert_eq!(inputs.width_mm, 156.0);
        assert_eq!(inputs.depth_mm, 156.0);
        assert_eq!(inputs.height_mm, 150.0);
        assert!(inputs.validate().is_ok());
        assert_eq!(inputs.joint_count_override(), None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut inputs = HingedInputs {
            width_mm: 0.0,
            ..HingedInputs::default()
        };
        assert!(inputs.validate().is_err());

        inputs.width_mm = 100.0;
        inputs.hinge_clearance_mm = -0.1;
        assert!(inputs.validate().is_err());

        inputs.hinge_clearance_mm = 0.0;
        inputs.thickness_mm = 60.0;
        assert!(matches!(
            inputs.validate(),
            Err(ParameterError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let inputs = HingedInputs {
            auto_joint_finger_count: false,
            manual_joint_finger_count: 7,
            auto_finger_count: false,
            manual_hinge_finger_count: 5,
            ..HingedInputs::default()
        };
        assert_eq!(inputs.joint_count_override(), Some(7));
        assert_eq!(inputs.hinge_count_override(), Some(5));
    }

    #[test]
    fn test_inputs_deserialize_with_defaults() {
        let inputs: HingedInputs =
            serde_json::from_str(r#"{"width_mm": 200.0, "joint_profile": {"kind": "ratio", "female_ratio": 1.5}}"#)
                .unwrap();
        assert_eq!(inputs.width_mm, 200.0);
        assert_eq!(inputs.height_mm, 150.0);
        assert_eq!(inputs.joint_profile, JointProfile::Ratio { female_ratio: 1.5 });
    }

    #[test]
    fn test_hole_polygon() {
        let hole = CircleHole2D::new(10.0, 10.0, 2.0);
        let pts = hole.polygon(36);
        assert_eq!(pts.len(), 36);
        assert!(pts[0].approx_eq(Point2D::new(12.0, 10.0), 1e-12));
        assert!(pts[9].approx_eq(Point2D::new(10.0, 12.0), 1e-12));
        for p in &pts {
            assert!((p.distance_to(Point2D::new(10.0, 10.0)) - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_signed_area_clockwise() {
        let square = Panel2D::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]);
        assert!((square.signed_area() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_push_unique_point() {
        let mut path = Vec::new();
        push_unique_point(&mut path, Point2D::new(1.0, 1.0));
        push_unique_point(&mut path, Point2D::new(1.0, 1.0));
        push_unique_point(&mut path, Point2D::new(2.0, 1.0));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_render_mode_parse() {
        assert_eq!("template".parse::<RenderMode>().unwrap(), RenderMode::TemplateScaled);
        assert_eq!("fixed-template".parse::<RenderMode>().unwrap(), RenderMode::FixedTemplate);
        assert!("bezier".parse::<RenderMode>().is_err());
    }
}
