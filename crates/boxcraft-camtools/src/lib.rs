//! # Boxcraft CAM Tools
//!
//! Flat-pack panel generation for laser-cut boxes.
//!
//! ## Tools Included
//!
//! - **Finger Pattern Engine**: tab/gap layouts for box joints, uniform or calibrated
//! - **Hinged Box Maker**: six finger-jointed panels with a knuckle hinge between lid and back
//! - **Template Scaling**: rescales hand-tuned reference panel paths to any box size
//!
//! ## Output
//!
//! - **SVG Export**: one line-only SVG document per panel
//! - **Box Check**: regression checks over the generated documents

pub mod box_check;
pub mod error;
pub mod finger_pattern;
pub mod hinged_box;
pub mod svg_export;
pub mod template_scaling;

// Re-export commonly used items
pub use box_check::{check_hinged_box_svgs, CheckIssue, CheckReport};
pub use error::{
    CamToolError, CamToolResult, FileFormatError, FileFormatResult, ParameterError,
    ParameterResult,
};
pub use finger_pattern::{
    compute_finger_pattern, finger_joints_ratio, template_bottom_joint_pattern,
    template_side_vertical_pattern, FingerPattern, FingerPatternOptions, JointProfile, JointRole,
    Segment, SegmentKind,
};
pub use hinged_box::{
    finger_joints_with_segment_widths, generate_back_panel, generate_bottom_panel,
    generate_box_panels, generate_front_panel, generate_left_panel, generate_lid_panel,
    generate_right_panel, hinge_fingers, legacy_reference_panels, pattern_walk, BoxPanels,
    BoxSvgs, CircleHole2D, HingedInputs, JointPatterns, Panel2D, PanelKind, RenderMode,
};
pub use svg_export::{box_panels_to_svgs, generate_hinged_box_svgs, panel_to_svg, validate_orthogonal_path};
pub use template_scaling::{
    generate_template_svgs, path_bounding_box, rotate_path_180, scale_template_path,
    wrap_scaled_path, TEMPLATE_ORIGINAL, TEMPLATE_SVGS,
};
