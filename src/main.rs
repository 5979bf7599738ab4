use anyhow::{bail, Context, Result};
use boxcraft::{
    init_logging, run_job, write_job_output, BoxJobConfig, LengthValue, RenderMode, BUILD_DATE,
    VERSION,
};
use clap::Parser;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Generate laser-cut hinged box panels as SVG.
#[derive(Parser, Debug)]
#[command(version = LONG_VERSION, about, long_about = None)]
struct Cli {
    /// Job file (.toml or .json). Defaults to the user config, if any.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Outer size as WIDTHxDEPTHxHEIGHT, each with an optional unit (e.g. 6inx6inx150)
    #[arg(short, long)]
    size: Option<String>,

    /// Material thickness, with an optional unit
    #[arg(short, long)]
    thickness: Option<String>,

    /// parametric, template_scaled or fixed_template
    #[arg(short, long)]
    mode: Option<RenderMode>,

    /// Output directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// File name prefix for each panel
    #[arg(long)]
    prefix: Option<String>,

    /// Skip the SVG regression checks
    #[arg(long, default_value_t = false)]
    no_check: bool,

    /// Print the panel geometry as JSON instead of writing SVGs
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    log_json: bool,

    /// Increase verbosity
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn parse_size(size: &str) -> Result<[LengthValue; 3]> {
    let parts: Vec<&str> = size.split(['x', 'X']).collect();
    let [w, d, h] = parts.as_slice() else {
        bail!("size must look like WIDTHxDEPTHxHEIGHT, got {:?}", size);
    };
    Ok([w, d, h].map(|part| LengthValue::Text(part.trim().to_string())))
}

fn build_config(cli: &Cli) -> Result<BoxJobConfig> {
    let mut config = match &cli.config {
        Some(path) => BoxJobConfig::load_from_file(path)
            .with_context(|| format!("cannot load {}", path.display()))?,
        None => BoxJobConfig::load_or_default()?,
    };

    if let Some(size) = &cli.size {
        let [width, depth, height] = parse_size(size)?;
        config.dimensions.width = Some(width);
        config.dimensions.depth = Some(depth);
        config.dimensions.height = Some(height);
    }
    if let Some(thickness) = &cli.thickness {
        config.dimensions.thickness = Some(LengthValue::Text(thickness.clone()));
    }
    if let Some(mode) = cli.mode {
        config.render.mode = mode;
    }
    if let Some(out) = &cli.out {
        config.render.output_directory = out.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.render.output_prefix = prefix.clone();
    }
    if cli.no_check {
        config.render.check = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    init_logging(level, cli.log_json)?;
    tracing::debug!(version = VERSION, build_date = BUILD_DATE, "boxcraft starting");

    let config = build_config(&cli)?;

    if cli.json {
        let panels = boxcraft::generate_box_panels(&config.resolved_inputs()?);
        println!("{}", serde_json::to_string_pretty(&panels)?);
        return Ok(());
    }

    let output = run_job(&config)?;
    let written = write_job_output(&config, &output.svgs)?;
    for path in &written {
        println!("{}", path.display());
    }

    if let Some(report) = output.report {
        println!("{}", report);
        if !report.passed {
            bail!("generated SVGs failed {} check(s)", report.issues.len());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_size() {
        let [w, d, h] = parse_size("200x6in X 10cm").unwrap();
        assert_eq!(w, LengthValue::Text("200".to_string()));
        assert_eq!(d, LengthValue::Text("6in".to_string()));
        assert_eq!(h, LengthValue::Text("10cm".to_string()));
        assert!(parse_size("200x100").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "boxcraft",
            "--config",
            "missing.json",
        ]);
        assert!(build_config(&cli).is_err());

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("job.toml");
        BoxJobConfig::default().save_to_file(&path).unwrap();

        let cli = Cli::parse_from([
            "boxcraft",
            "--config",
            path.to_str().unwrap(),
            "--size",
            "200x120x80",
            "--mode",
            "template",
            "--no-check",
        ]);
        let config = build_config(&cli).unwrap();
        let inputs = config.resolved_inputs().unwrap();
        assert_eq!((inputs.width_mm, inputs.depth_mm, inputs.height_mm), (200.0, 120.0, 80.0));
        assert_eq!(config.render.mode, RenderMode::TemplateScaled);
        assert!(!config.render.check);
    }

    #[test]
    fn test_version_carries_build_date() {
        let version = Cli::command().render_version();
        assert!(version.contains(VERSION));
        assert!(version.contains(BUILD_DATE));
    }
}
