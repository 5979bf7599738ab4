//! Template-scaled rendering
//!
//! Rescales the hand-tuned reference panel paths to arbitrary box
//! dimensions instead of generating joints from the inputs. Joint
//! proportions follow the reference exactly but tabs stretch with the box.

pub mod path;
pub mod templates;

pub use path::{
    commands_bounding_box, format_path_number, parse_path, path_bounding_box, tokenize,
    write_path, AxisTransform, PathCommand, PathToken, TokenKind,
};
pub use templates::{panel_template, PanelTemplate, TemplateDimensions, TEMPLATE_ORIGINAL, TEMPLATE_SVGS};

use crate::error::{CamToolError, CamToolResult, FileFormatResult};
use crate::hinged_box::{BoxSvgs, HingedInputs};
use crate::svg_export::{svg_document, validate_orthogonal_path, SVG_PADDING_MM};
use boxcraft_core::{BoundingBox, Point2D};
use tracing::debug;

/// Scale every coordinate of `d` per axis. Relative and absolute commands
/// keep their letters; `H` sees only `scale_x`, `V` only `scale_y`.
pub fn scale_template_path(d: &str, scale_x: f64, scale_y: f64) -> FileFormatResult<String> {
    let commands = parse_path(d)?;
    Ok(write_path(&AxisTransform::scale(scale_x, scale_y).apply(&commands)))
}

/// Turn `d` half way round about the centre of `bbox`.
pub fn rotate_path_180(d: &str, bbox: &BoundingBox) -> FileFormatResult<String> {
    let commands = parse_path(d)?;
    Ok(write_path(&AxisTransform::rotate_180(bbox.center()).apply(&commands)))
}

/// Wrap path data in a panel document, moved so its bounds start at
/// `padding`, optionally turned half way round first.
pub fn wrap_scaled_path(d: &str, padding: f64, rotate_180: bool) -> CamToolResult<String> {
    let commands = parse_path(d)?;
    let bbox = commands_bounding_box(&commands);
    if bbox.is_empty() {
        return Err(CamToolError::GeometryError(format!(
            "path has no finite extent: {}",
            d
        )));
    }

    // A half-turn about the centre leaves the bounds where they were.
    let mut transform = AxisTransform::IDENTITY;
    if rotate_180 {
        transform = AxisTransform::rotate_180(bbox.center());
    }
    transform = transform.then(AxisTransform::translate(padding - bbox.min_x, padding - bbox.min_y));

    let wrapped = write_path(&transform.apply(&commands));
    validate_orthogonal_path(&wrapped)?;

    Ok(svg_document(
        bbox.width() + 2.0 * padding,
        bbox.height() + 2.0 * padding,
        &wrapped,
    ))
}

/// Per-axis scale that takes a reference panel to the requested size.
fn template_scale(template: &PanelTemplate, inputs: &HingedInputs) -> Point2D {
    let (from_w, from_h) = template.kind.nominal_size(
        TEMPLATE_ORIGINAL.width,
        TEMPLATE_ORIGINAL.depth,
        TEMPLATE_ORIGINAL.height,
    );
    let (to_w, to_h) = template
        .kind
        .nominal_size(inputs.width_mm, inputs.depth_mm, inputs.height_mm);
    Point2D::new(to_w / from_w, to_h / from_h)
}

/// Render all six panels by rescaling the reference templates.
pub fn generate_template_svgs(inputs: &HingedInputs) -> CamToolResult<BoxSvgs> {
    let mut svgs = BoxSvgs::default();
    for template in &TEMPLATE_SVGS {
        let scale = template_scale(template, inputs);
        debug!(panel = %template.kind, scale_x = scale.x, scale_y = scale.y, "scaling template");

        let scaled = scale_template_path(template.path, scale.x, scale.y)?;
        *svgs.get_mut(template.kind) = wrap_scaled_path(&scaled, SVG_PADDING_MM, template.rotate_180)?;
    }
    Ok(svgs)
}
