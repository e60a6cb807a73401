//! Heat diffusion command-line interface.
//!
//! ```sh
//! heatmap run 1000 --workers 4            # writes heatmap.pnm
//! heatmap run 500 --snapshot-every 100    # also heatmap_000100.pnm, ...
//! heatmap reference 1000
//! heatmap verify 200 --workers 5 --grid-size 200
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::info;

use heatmap_rust::implementations::rayon::reference_solve_parallel;
use heatmap_rust::{Grid, RunConfig, load_config, pnm, run_distributed, run_distributed_with};

#[derive(Parser)]
#[command(name = "heatmap")]
#[command(about = "Steady-state heat diffusion over a square plate, split across worker threads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the distributed solver.
    Run {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Also write an image every k iterations.
        #[arg(long)]
        snapshot_every: Option<usize>,
    },
    /// Run the single-process reference solver.
    Reference {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run both solvers and compare the results.
    Verify {
        #[command(flatten)]
        params: ParamArgs,
        /// Largest accepted per-cell difference.
        #[arg(long, default_value_t = 1e-10)]
        tolerance: f64,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// Number of iterations (overrides the config file).
    iterations: Option<usize>,
    /// TOML run configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Worker count, at least 2 and a divisor of the grid size.
    #[arg(short, long)]
    workers: Option<usize>,
    /// Grid width and height.
    #[arg(long)]
    grid_size: Option<usize>,
}

#[derive(Args)]
struct OutputArgs {
    /// PNM image of the final temperatures.
    #[arg(short, long, default_value = "heatmap.pnm")]
    output: PathBuf,
    /// Also dump raw little-endian f64 temperatures here.
    #[arg(long)]
    raw: Option<PathBuf>,
}

fn build_config(params: &ParamArgs) -> Result<RunConfig> {
    let mut config = match &params.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(iterations) = params.iterations {
        config.iterations = iterations;
    }
    if let Some(workers) = params.workers {
        config.workers = workers;
    }
    if let Some(grid_size) = params.grid_size {
        config.grid_size = grid_size;
    }
    Ok(config)
}

fn write_outputs(output: &OutputArgs, grid: &Grid) -> Result<()> {
    pnm::write_heatmap(&output.output, grid)
        .with_context(|| format!("failed to write {}", output.output.display()))?;
    println!("Wrote {}", output.output.display());

    if let Some(raw) = &output.raw {
        grid.save_to_file(raw)
            .with_context(|| format!("failed to write {}", raw.display()))?;
        println!("Wrote {}", raw.display());
    }
    Ok(())
}

fn snapshot_path(output: &Path, iteration: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "heatmap".into());
    output.with_file_name(format!("{stem}_{iteration:06}.pnm"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            params,
            output,
            snapshot_every,
        } => {
            let mut config = build_config(&params)?;
            if snapshot_every.is_some() {
                config.snapshot_every = snapshot_every;
            }

            let final_iteration = config.iterations;
            let mut snapshot_error: Option<(PathBuf, std::io::Error)> = None;
            let start = Instant::now();
            let grid = run_distributed_with(&config, |iteration, grid| {
                if iteration == final_iteration || snapshot_error.is_some() {
                    return;
                }
                let path = snapshot_path(&output.output, iteration);
                info!("snapshot {} -> {}", iteration, path.display());
                if let Err(e) = pnm::write_heatmap(&path, grid) {
                    snapshot_error = Some((path, e));
                }
            })?;
            if let Some((path, e)) = snapshot_error {
                return Err(e).with_context(|| format!("failed to write {}", path.display()));
            }

            println!(
                "{} iterations on {} workers in {:?}",
                config.iterations,
                config.workers,
                start.elapsed()
            );
            write_outputs(&output, &grid)
        }
        Commands::Reference { params, output } => {
            let config = build_config(&params)?;
            let start = Instant::now();
            let grid = reference_solve_parallel(&config)?;
            println!(
                "{} iterations (reference) in {:?}",
                config.iterations,
                start.elapsed()
            );
            write_outputs(&output, &grid)
        }
        Commands::Verify { params, tolerance } => {
            let config = build_config(&params)?;
            let distributed = run_distributed(&config)?;
            let reference = reference_solve_parallel(&config)?;

            let diff = distributed
                .max_abs_diff(&reference)
                .context("distributed and reference grids differ in size")?;
            println!(
                "max |distributed - reference| = {:e} ({} workers, {} iterations)",
                diff, config.workers, config.iterations
            );
            if diff > tolerance {
                bail!("difference {:e} exceeds tolerance {:e}", diff, tolerance);
            }
            println!("Results match.");
            Ok(())
        }
    }
}
