//! Tactus CLI - auditory stimulus generation for timing experiments.

mod commands;
mod config;
mod wav;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tactus")]
#[command(author, version, about = "Auditory stimulus generator for timing-deviation experiments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single tone-sequence trial to a WAV file
    Render(commands::render::RenderArgs),

    /// Render the full ISI x deviation stimulus set
    Batch(commands::batch::BatchArgs),

    /// Sample a repetition-constrained soundtrack as JSON
    Soundtrack(commands::soundtrack::SoundtrackArgs),

    /// Sweep the tone envelope and derive the amplitude ceiling
    Calibrate(commands::calibrate::CalibrateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Soundtrack(args) => commands::soundtrack::run(args),
        Commands::Calibrate(args) => commands::calibrate::run(args),
    }
}
