mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "basin", about = "Marker-controlled watershed segmentation")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flood an image or slice volume from markers
    Segment(commands::segment::SegmentArgs),
    /// Generate a marker image from a binary image or intensity minima
    Markers(commands::markers::MarkersArgs),
    /// Print per-region statistics of a label image
    Regions(commands::regions::RegionsArgs),
    /// Print or save the default segmentation config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Segment(args) => commands::segment::run(args),
        Commands::Markers(args) => commands::markers::run(args),
        Commands::Regions(args) => commands::regions::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
