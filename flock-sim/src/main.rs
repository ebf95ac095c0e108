use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flock_core::{Simulation, UniformGrid};
use flock_sim::{shutdown, JsonRenderer, Renderer, Runner, SummaryRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RendererKind {
    /// Log flock sizes and centers
    Summary,
    /// Emit one JSON object per frame
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Boid flock simulator", long_about = None)]
struct Args {
    /// TOML or JSON configuration document describing the window and flocks
    #[arg(default_value = "config.toml")]
    config: PathBuf,

    /// Stop after this many steps (0 runs until interrupted)
    #[arg(short = 'n', long, default_value_t = 0)]
    steps: u64,

    /// Spawn seed, overriding the one in the config
    #[arg(long)]
    seed: Option<u64>,

    /// How frames are rendered
    #[arg(short, long, value_enum, default_value_t = RendererKind::Summary)]
    renderer: RendererKind,

    /// Render only every Nth frame
    #[arg(short = 'e', long, default_value_t = 60)]
    every: u64,

    /// File for JSON frames (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Look up neighbors through a uniform grid instead of a full scan
    #[arg(short, long)]
    grid: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn run<R: Renderer>(simulation: Simulation, renderer: R, steps: u64) -> Result<()> {
    let mut runner = Runner::new(simulation, renderer);
    shutdown::stop_on_ctrl_c(runner.stop_handle())?;

    let limit = (steps > 0).then_some(steps);
    let taken = runner.run(limit).context("Simulation error")?;
    log::info!("Simulation finished after {} steps", taken);

    runner.finish()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Flock simulator starting...");

    let mut settings = flock_shared::load_from_path(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }

    let mut simulation = Simulation::start(settings).context("Failed to start simulation")?;
    if args.grid {
        log::info!("Using uniform grid neighbor lookup");
        simulation = simulation.with_neighbor_query(UniformGrid::new());
    }

    match args.renderer {
        RendererKind::Summary => run(simulation, SummaryRenderer::new(args.every), args.steps),
        RendererKind::Json => {
            let writer: Box<dyn Write> = match &args.output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path)
                        .with_context(|| format!("Failed to create {}", path.display()))?,
                )),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            run(simulation, JsonRenderer::new(writer, args.every), args.steps)
        }
    }
}
