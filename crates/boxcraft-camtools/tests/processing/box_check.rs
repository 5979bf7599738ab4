//! End-to-end checks on generated boxes

use boxcraft_camtools::box_check::check_hinged_box_svgs;
use boxcraft_camtools::hinged_box::{HingedInputs, RenderMode};
use boxcraft_camtools::svg_export::generate_hinged_box_svgs;

#[test]
fn test_reference_box_passes() {
    let inputs = HingedInputs {
        width_mm: 156.0,
        depth_mm: 156.0,
        height_mm: 150.0,
        thickness_mm: 3.0,
        joint_finger_width_mm: 15.0,
        hinge_finger_width_mm: 8.0,
        ..HingedInputs::default()
    };
    let svgs = generate_hinged_box_svgs(&inputs, RenderMode::Parametric).unwrap();
    let report = check_hinged_box_svgs(&svgs);
    assert!(report.passed, "{}", report);
    assert!(report.issues.is_empty());
}

#[test]
fn test_template_and_fixed_modes_pass() {
    for mode in [RenderMode::TemplateScaled, RenderMode::FixedTemplate] {
        let svgs = generate_hinged_box_svgs(&HingedInputs::default(), mode).unwrap();
        let report = check_hinged_box_svgs(&svgs);
        assert!(report.passed, "{}: {}", mode, report);
    }
}

#[test]
fn test_tiny_fingers_saturate_and_pass() {
    let inputs = HingedInputs {
        joint_finger_width_mm: 0.0001,
        hinge_finger_width_mm: 0.0001,
        ..HingedInputs::default()
    };
    let svgs = generate_hinged_box_svgs(&inputs, RenderMode::Parametric).unwrap();
    assert!(check_hinged_box_svgs(&svgs).passed);
}

#[test]
fn test_tampered_output_fails() {
    let mut svgs = generate_hinged_box_svgs(&HingedInputs::default(), RenderMode::Parametric).unwrap();
    svgs.right = svgs.right.replacen(" Z M", " Z M 1 1 L 2 1 L 2 2 Z M", 1);
    let report = check_hinged_box_svgs(&svgs);
    assert!(!report.passed);
    assert!(report.to_string().contains("hole"));
}
