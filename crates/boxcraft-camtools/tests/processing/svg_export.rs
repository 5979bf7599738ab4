//! Rendered documents for every mode

use boxcraft_camtools::hinged_box::{HingedInputs, PanelKind, RenderMode};
use boxcraft_camtools::svg_export::{generate_hinged_box_svgs, HOLE_SEGMENTS};
use proptest::prelude::*;

fn path_data(svg: &str) -> &str {
    let start = svg.find(" d=\"").map(|i| i + 4).unwrap_or(0);
    let end = svg[start..].find('"').map(|i| start + i).unwrap_or(svg.len());
    &svg[start..end]
}

#[test]
fn test_every_mode_renders_six_documents() {
    for mode in [
        RenderMode::Parametric,
        RenderMode::TemplateScaled,
        RenderMode::FixedTemplate,
    ] {
        let svgs = generate_hinged_box_svgs(&HingedInputs::default(), mode).unwrap();
        for (kind, svg) in svgs.iter() {
            assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><svg "#), "{} {}", mode, kind);
            assert!(svg.contains(r#"fill="none""#));
            assert!(svg.contains(r##"stroke="#000000""##));
            assert!(svg.contains(r#"stroke-width="0.1""#));
        }
    }
}

#[test]
fn test_hole_subpaths() {
    let svgs = generate_hinged_box_svgs(&HingedInputs::default(), RenderMode::Parametric).unwrap();
    let subpaths = |kind: PanelKind| path_data(svgs.get(kind)).matches('M').count();

    assert_eq!(subpaths(PanelKind::Front), 1);
    assert_eq!(subpaths(PanelKind::Back), 3);
    assert_eq!(subpaths(PanelKind::Left), 2);
    assert_eq!(subpaths(PanelKind::Right), 2);
    assert_eq!(subpaths(PanelKind::Bottom), 1);
    assert_eq!(subpaths(PanelKind::Lid), 1);

    // each hole is a closed polygon of straight segments
    let back = path_data(&svgs.back);
    let last_hole = back.rsplit('M').next().unwrap();
    assert_eq!(last_hole.matches('L').count(), HOLE_SEGMENTS - 1);
}

#[test]
fn test_coordinates_have_three_decimals() {
    let svgs = generate_hinged_box_svgs(&HingedInputs::default(), RenderMode::Parametric).unwrap();
    for token in path_data(&svgs.lid).split_whitespace() {
        if token.len() == 1 && token.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        let (_, decimals) = token.split_once('.').unwrap();
        assert_eq!(decimals.len(), 3, "{}", token);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn parametric_output_never_contains_curves(
        width in 40.0f64..400.0,
        depth in 40.0f64..400.0,
        height in 40.0f64..400.0,
        thickness in 1.0f64..8.0,
        finger in 2.0f64..40.0,
        hinge in 2.0f64..20.0,
    ) {
        let inputs = HingedInputs {
            width_mm: width,
            depth_mm: depth,
            height_mm: height,
            thickness_mm: thickness,
            joint_finger_width_mm: finger,
            hinge_finger_width_mm: hinge,
            ..HingedInputs::default()
        };
        let svgs = generate_hinged_box_svgs(&inputs, RenderMode::Parametric).unwrap();
        for (_, svg) in svgs.iter() {
            let d = path_data(svg);
            prop_assert!(!d.contains(['C', 'c', 'Q', 'q', 'A', 'a', 'S', 's']));
            prop_assert!(!svg.contains("NaN"));
        }
    }
}
