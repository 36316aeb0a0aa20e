//! Grid inspection and contouring tool.
//!
//! Reads an ESRI ASCII grid, reports its statistics, samples it at the
//! requested coordinates and prints a per-level summary of the traced
//! contours. Nothing is written to disk.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use carto_contour::{ContourSet, ContourTracer};
use carto_raster::{read_ascii_grid_file, FloatGrid, InterpolationMethod};

use config::ToolConfig;

/// Tolerance handed to path length measurement. Contours are straight
/// polylines, so it only has to be valid.
const LENGTH_TOLERANCE: f64 = 0.01;

#[derive(Parser, Debug)]
#[command(name = "carto-tool")]
#[command(about = "Sample and contour ESRI ASCII grids")]
struct Args {
    /// ESRI ASCII grid file
    grid: String,

    /// Contour interval
    #[arg(short, long)]
    interval: Option<f64>,

    /// First contour level
    #[arg(long, allow_hyphen_values = true)]
    first: Option<f64>,

    /// Last contour level
    #[arg(long, allow_hyphen_values = true)]
    last: Option<f64>,

    /// Values are compass angles that wrap at 360
    #[arg(long)]
    cyclic: bool,

    /// Sample position as X,Y (repeatable)
    #[arg(short, long = "sample", value_parser = parse_position, allow_hyphen_values = true)]
    samples: Vec<(f64, f64)>,

    /// Interpolation method: nearest, bilinear or bicubic
    #[arg(long)]
    interpolation: Option<String>,

    /// YAML configuration file
    #[arg(short, long, env = "CARTO_CONFIG")]
    config: Option<String>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn parse_position(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate '{}'", x))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate '{}'", y))?;
    Ok((x, y))
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Command-line values override the file or environment configuration.
fn load_config(args: &Args) -> Result<ToolConfig> {
    let mut config = match &args.config {
        Some(path) => ToolConfig::from_yaml(path)?,
        None => ToolConfig::from_env(),
    };

    if let Some(interval) = args.interval {
        config.contour.interval = interval;
    }
    if args.first.is_some() {
        config.contour.first_level = args.first;
    }
    if args.last.is_some() {
        config.contour.last_level = args.last;
    }
    if args.cyclic {
        config.contour.cyclic = true;
    }
    if let Some(name) = &args.interpolation {
        let method = InterpolationMethod::from_str(name);
        if !matches!(
            name.to_lowercase().as_str(),
            "nearest" | "bilinear" | "bicubic" | "cubic"
        ) {
            warn!(requested = %name, using = %method, "Unknown interpolation method");
        }
        config.sampling.interpolation = method;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn print_statistics(grid: &FloatGrid) {
    let stats = grid.statistics();
    println!(
        "grid {}x{} cell {} west {} north {}",
        grid.cols(),
        grid.rows(),
        grid.cell_size(),
        grid.west(),
        grid.north()
    );
    println!(
        "min {} max {} mean {} void {}",
        stats.min, stats.max, stats.mean, stats.void_count
    );
}

fn print_samples(grid: &FloatGrid, samples: &[(f64, f64)], method: InterpolationMethod) {
    for &(x, y) in samples {
        let value = grid.sample(x, y, method);
        if value.is_nan() {
            println!("sample {} {} void", x, y);
        } else {
            println!("sample {} {} {}", x, y, value);
        }
    }
}

fn print_contours(set: &ContourSet) -> Result<()> {
    for group in set {
        let mut length = 0.0;
        for path in &group.paths {
            length += path.length(LENGTH_TOLERANCE)?;
        }
        println!(
            "level {} strands {} closed {} length {:.3}",
            group.level,
            group.paths.len(),
            group.closed_count(),
            length
        );
    }
    println!("total {} strands over {} levels", set.path_count(), set.len());
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    let config = load_config(&args)?;
    info!(
        grid = %args.grid,
        interpolation = %config.sampling.interpolation,
        interval = config.contour.interval,
        cyclic = config.contour.cyclic,
        "Starting carto-tool"
    );

    let mut grid: FloatGrid = read_ascii_grid_file(&args.grid)
        .with_context(|| format!("Failed to read grid {}", args.grid))?;

    if let Some(cell_size) = config.sampling.resample_cell_size {
        grid = grid
            .resample(cell_size, config.sampling.interpolation)
            .context("Failed to resample grid")?;
        info!(rows = grid.rows(), cols = grid.cols(), cell_size, "Resampled grid");
    }

    if grid.void_count() == grid.len() {
        warn!(grid = %args.grid, "Grid holds no valid values");
    }

    print_statistics(&grid);
    print_samples(&grid, &args.samples, config.sampling.interpolation);

    let tracer = ContourTracer::new(config.contour)?;
    let set = tracer.trace(&grid)?;
    print_contours(&set)
}
