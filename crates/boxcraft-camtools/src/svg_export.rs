//! Laser-safe SVG emission
//!
//! Every panel becomes one standalone SVG document holding a single
//! `<path>` built from `M`, `L` and `Z` only. Holes are approximated by
//! regular polygons so the cutter never sees an arc.

use crate::error::{CamToolError, CamToolResult};
use crate::hinged_box::{
    generate_box_panels, legacy_reference_panels, BoxPanels, BoxSvgs, HingedInputs, Panel2D,
    RenderMode,
};
use crate::template_scaling::generate_template_svgs;
use boxcraft_core::{format_mm, BoundingBox, Point2D};
use regex::Regex;
use std::fmt::Write;
use tracing::{debug, error};

/// Margin around the outline, in millimetres.
pub const SVG_PADDING_MM: f64 = 2.0;
/// Polygon vertices per hole (one every 10 degrees).
pub const HOLE_SEGMENTS: usize = 36;
pub const STROKE_COLOR: &str = "#000000";
pub const STROKE_WIDTH_MM: f64 = 0.1;

/// Wrap path data in the SVG document every panel export shares.
pub fn svg_document(width: f64, height: f64, path_data: &str) -> String {
    let w = format_mm(width);
    let h = format_mm(height);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}"><path d="{path_data}" fill="none" stroke="{STROKE_COLOR}" stroke-width="{STROKE_WIDTH_MM}"/></svg>"#
    )
}

fn push_subpath(d: &mut String, points: &[Point2D], offset: Point2D) {
    for (i, p) in points.iter().enumerate() {
        let p = *p + offset;
        if !d.is_empty() {
            d.push(' ');
        }
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{} {} {}", command, format_mm(p.x), format_mm(p.y));
    }
    d.push_str(" Z");
}

/// Path data for a panel, shifted by `offset`.
pub fn panel_path_data(panel: &Panel2D, offset: Point2D) -> String {
    let mut d = String::new();
    if panel.outline.is_empty() {
        return d;
    }
    push_subpath(&mut d, &panel.outline, offset);
    for hole in &panel.holes {
        push_subpath(&mut d, &hole.polygon(HOLE_SEGMENTS), offset);
    }
    d
}

fn curve_command_regex() -> &'static Regex {
    static CURVE_COMMAND: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    CURVE_COMMAND.get_or_init(|| Regex::new(r"[CcQqAaSsTt]").expect("invalid curve regex"))
}

/// Reject path data containing any curve or arc command.
pub fn validate_orthogonal_path(d: &str) -> CamToolResult<()> {
    match curve_command_regex().find(d) {
        Some(found) => {
            let command = d[found.start()..].chars().next().unwrap_or('?');
            error!(command = %command, position = found.start(), "curve command in laser path");
            Err(CamToolError::CurveCommand {
                command,
                position: found.start(),
            })
        }
        None => Ok(()),
    }
}

/// Render one panel. An empty outline renders as an empty string.
pub fn panel_to_svg(panel: &Panel2D) -> CamToolResult<String> {
    if panel.is_empty() {
        debug!("empty panel outline, nothing to render");
        return Ok(String::new());
    }

    let bbox: BoundingBox = panel.bounding_box();
    if bbox.is_empty() {
        return Err(CamToolError::GeometryError(
            "panel outline has no finite points".to_string(),
        ));
    }

    let offset = Point2D::new(SVG_PADDING_MM - bbox.min_x, SVG_PADDING_MM - bbox.min_y);
    let d = panel_path_data(panel, offset);
    validate_orthogonal_path(&d)?;

    Ok(svg_document(
        bbox.width() + 2.0 * SVG_PADDING_MM,
        bbox.height() + 2.0 * SVG_PADDING_MM,
        &d,
    ))
}

pub fn box_panels_to_svgs(panels: &BoxPanels) -> CamToolResult<BoxSvgs> {
    let mut svgs = BoxSvgs::default();
    for (kind, panel) in panels.iter() {
        *svgs.get_mut(kind) = panel_to_svg(panel)?;
    }
    Ok(svgs)
}

/// Produce the six panel SVGs in the requested mode.
pub fn generate_hinged_box_svgs(inputs: &HingedInputs, mode: RenderMode) -> CamToolResult<BoxSvgs> {
    debug!(%mode, width = inputs.width_mm, depth = inputs.depth_mm, height = inputs.height_mm, "rendering hinged box");
    match mode {
        RenderMode::Parametric => box_panels_to_svgs(&generate_box_panels(inputs)),
        RenderMode::TemplateScaled => generate_template_svgs(inputs),
        RenderMode::FixedTemplate => box_panels_to_svgs(&legacy_reference_panels()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hinged_box::CircleHole2D;

    fn square() -> Panel2D {
        Panel2D::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ])
    }

    #[test]
    fn test_square_document() {
        let svg = panel_to_svg(&square()).unwrap();
        assert_eq!(
            svg,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="14.000mm" height="14.000mm" viewBox="0 0 14.000 14.000">"#,
                r##"<path d="M 2.000 2.000 L 12.000 2.000 L 12.000 12.000 L 2.000 12.000 Z" fill="none" stroke="#000000" stroke-width="0.1"/>"##,
                "</svg>"
            )
        );
    }

    #[test]
    fn test_empty_outline_renders_empty() {
        assert_eq!(panel_to_svg(&Panel2D::default()).unwrap(), "");
    }

    #[test]
    fn test_offset_outline_is_shifted() {
        let mut panel = square();
        for p in &mut panel.outline {
            *p = *p + Point2D::new(-5.0, 7.0);
        }
        let svg = panel_to_svg(&panel).unwrap();
        assert!(svg.contains(r#"d="M 2.000 2.000 L"#));
    }

    #[test]
    fn test_holes_are_line_polygons() {
        let panel = square().with_holes(vec![CircleHole2D::new(5.0, 5.0, 1.0)]);
        let d = panel_path_data(&panel, Point2D::ORIGIN);
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('Z').count(), 2);
        // 3 outline L + 35 hole L
        assert_eq!(d.matches('L').count(), 3 + HOLE_SEGMENTS - 1);
        assert!(d.contains("M 6.000 5.000"));
        assert!(validate_orthogonal_path(&d).is_ok());
    }

    #[test]
    fn test_validate_rejects_curves() {
        assert!(validate_orthogonal_path("M 0 0 L 1 1 Z").is_ok());
        let err = validate_orthogonal_path("M 0 0 c 1 1 2 2 3 3").unwrap_err();
        assert!(matches!(err, CamToolError::CurveCommand { command: 'c', position: 6 }));
        assert!(validate_orthogonal_path("M 0 0 A 5 5 0 0 1 10 0").is_err());
        assert!(validate_orthogonal_path("M0 0Q1 1 2 2").is_err());
    }

    #[test]
    fn test_parametric_box_renders_six_documents() {
        let svgs = generate_hinged_box_svgs(&HingedInputs::default(), RenderMode::Parametric).unwrap();
        for (kind, svg) in svgs.iter() {
            assert!(svg.starts_with("<?xml"), "{}", kind);
            assert!(svg.ends_with("</svg>"), "{}", kind);
            assert!(!svg.contains("NaN"), "{}", kind);
        }
        // 156 + 2 * 2 padding
        assert!(svgs.front.contains(r#"width="160.000mm" height="154.000mm""#));
        assert!(svgs.lid.contains(r#"viewBox="0 0 160.000 160.000""#));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let inputs = HingedInputs {
            width_mm: 97.5,
            ..HingedInputs::default()
        };
        let a = generate_hinged_box_svgs(&inputs, RenderMode::Parametric).unwrap();
        let b = generate_hinged_box_svgs(&inputs, RenderMode::Parametric).unwrap();
        assert_eq!(a, b);
    }
}
