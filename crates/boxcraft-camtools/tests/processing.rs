#[path = "processing/box_check.rs"]
mod box_check;
#[path = "processing/hinged_box.rs"]
mod hinged_box;
#[path = "processing/svg_export.rs"]
mod svg_export;
#[path = "processing/template_scaling.rs"]
mod template_scaling;
