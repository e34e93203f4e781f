//! # AWJ CLI
//!
//! Command-line front end for the abrasive water-jet calculation engine.
//! Every command prints a human-readable report, or the raw JSON with `--json`.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use awj_core::settings::EngineSettings;
use awj_core::CalcResult;

mod commands;

#[derive(Parser)]
#[command(name = "awj")]
#[command(version, about = "AWJ - abrasive water-jet cutting parameter calculator")]
struct Cli {
    /// Settings file with unit prices and optimization defaults (TOML).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of a formatted report.
    #[arg(long, global = true)]
    json: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute cutting parameters for one set of inputs.
    Calculate(commands::CalculateArgs),

    /// Compute a base parameter set and its variations from a JSON file.
    Batch {
        /// Path to batch request (JSON).
        path: PathBuf,
    },

    /// Search pressure and abrasive flow for the fastest or cheapest cut.
    Optimize {
        /// Workpiece material (steel, aluminum, titanium, ...).
        #[arg(short, long, default_value = "steel")]
        material: String,

        /// Workpiece thickness (mm).
        #[arg(short, long)]
        thickness: f64,

        /// What to optimize (max_speed, min_cost).
        #[arg(long, default_value = "max_speed")]
        target: String,

        /// Minimum acceptable speed for min_cost (mm/min).
        #[arg(long)]
        min_speed: Option<f64>,
    },

    /// List built-in materials and their properties.
    Materials,

    /// List abrasive mesh sizes.
    MeshSizes,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> CalcResult<EngineSettings> {
    match path {
        Some(path) => EngineSettings::load(path),
        None => {
            tracing::debug!("no settings file given, using built-in prices");
            Ok(EngineSettings::default())
        }
    }
}

fn run(cli: Cli) -> CalcResult<()> {
    let settings = load_settings(cli.config.as_ref())?;

    match cli.command {
        Commands::Calculate(args) => commands::calculate(&args, &settings, cli.json),
        Commands::Batch { path } => commands::batch(&path, &settings, cli.json),
        Commands::Optimize {
            material,
            thickness,
            target,
            min_speed,
        } => commands::optimize(&material, thickness, &target, min_speed, &settings, cli.json),
        Commands::Materials => commands::materials(cli.json),
        Commands::MeshSizes => commands::mesh_sizes(cli.json),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        process::exit(1);
    }
}
