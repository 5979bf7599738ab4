//! # Boxcraft
//!
//! A parametric generator for laser-cut hinged boxes. Six finger-jointed
//! panels with a knuckle hinge between lid and back, written as one
//! line-only SVG per panel.
//!
//! ## Architecture
//!
//! Boxcraft is organized as a workspace with multiple crates:
//!
//! 1. **boxcraft-core** - Geometry primitives, length units, shared errors
//! 2. **boxcraft-camtools** - Finger patterns, panel generation, SVG export, template scaling, checks
//! 3. **boxcraft-settings** - Job configuration files (JSON/TOML)
//! 4. **boxcraft** - Command line binary that integrates all crates

use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub use boxcraft_camtools::{
    check_hinged_box_svgs, generate_box_panels, generate_hinged_box_svgs, BoxPanels, BoxSvgs,
    CheckReport, HingedInputs, JointProfile, PanelKind, RenderMode,
};
pub use boxcraft_core::{BoundingBox, Point2D};
pub use boxcraft_settings::{BoxJobConfig, DimensionOverrides, LengthValue, RenderSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Logs go to stderr so SVG or JSON written to stdout stays clean.
/// `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: tracing::Level, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Result of running a box job
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub svgs: BoxSvgs,
    /// `None` when checking is switched off
    pub report: Option<CheckReport>,
}

/// Generate the six SVGs for `config`, checking them if asked to.
pub fn run_job(config: &BoxJobConfig) -> anyhow::Result<JobOutput> {
    config.validate().context("invalid box job")?;
    let inputs = config.resolved_inputs()?;

    info!(
        width = inputs.width_mm,
        depth = inputs.depth_mm,
        height = inputs.height_mm,
        thickness = inputs.thickness_mm,
        mode = %config.render.mode,
        "generating hinged box"
    );

    let svgs = generate_hinged_box_svgs(&inputs, config.render.mode)
        .with_context(|| format!("failed to render {} box", config.render.mode))?;
    let report = config.render.check.then(|| check_hinged_box_svgs(&svgs));

    Ok(JobOutput { svgs, report })
}

/// Write each panel to its configured path. Returns the paths written.
pub fn write_job_output(config: &BoxJobConfig, svgs: &BoxSvgs) -> anyhow::Result<Vec<PathBuf>> {
    let dir = &config.render.output_directory;
    fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(PanelKind::ALL.len());
    for (kind, svg) in svgs.iter() {
        let path = config.output_path(kind);
        fs::write(&path, svg).with_context(|| format!("cannot write {}", path.display()))?;
        info!(panel = %kind, path = %path.display(), "wrote panel");
        written.push(path);
    }
    Ok(written)
}
