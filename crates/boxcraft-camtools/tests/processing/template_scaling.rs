//! Template scaling against the reference dimensions

use boxcraft_camtools::hinged_box::{HingedInputs, PanelKind};
use boxcraft_camtools::template_scaling::{
    generate_template_svgs, panel_template, parse_path, path_bounding_box, scale_template_path,
    TEMPLATE_ORIGINAL,
};

#[test]
fn test_reference_dimensions_match_defaults() {
    let defaults = HingedInputs::default();
    assert_eq!(TEMPLATE_ORIGINAL.width, defaults.width_mm);
    assert_eq!(TEMPLATE_ORIGINAL.depth, defaults.depth_mm);
    assert_eq!(TEMPLATE_ORIGINAL.height, defaults.height_mm);
}

#[test]
fn test_scaling_changes_bounds_per_axis() {
    let template = panel_template(PanelKind::Left);
    let before = path_bounding_box(template.path).unwrap();
    let scaled = scale_template_path(template.path, 0.5, 2.0).unwrap();
    let after = path_bounding_box(&scaled).unwrap();
    assert!((after.width() - before.width() * 0.5).abs() < 0.01);
    assert!((after.height() - before.height() * 2.0).abs() < 0.01);
    assert_eq!(parse_path(&scaled).unwrap().len(), parse_path(template.path).unwrap().len());
}

#[test]
fn test_back_is_turned_upright() {
    let svgs = generate_template_svgs(&HingedInputs::default()).unwrap();
    // Upright, the back's hinge knuckles sit along the top edge: the
    // hinge-pin hole polygons start within the top 10 mm.
    let d_start = svgs.back.find(" d=\"").unwrap() + 4;
    let d = &svgs.back[d_start..];
    let hole = d.split(" M ").nth(1).unwrap();
    let y: f64 = hole.split_whitespace().nth(1).unwrap().parse().unwrap();
    assert!(y < 10.0, "hole at y = {}", y);
}
