use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "sim")]
#[command(about = "Headless harness for the ROV joystick controller", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a scripted scenario against the vehicle plant
    Run {
        /// Scenario file (TOML)
        #[arg(long, default_value = "sim.toml")]
        config: PathBuf,
        /// Write per-tick telemetry to this file
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Convert a heightmap CSV into a box-terrain body file
    Terrain {
        /// Heightmap (.csv)
        #[arg(long)]
        input: PathBuf,
        /// Body file; `.body` is appended when missing
        #[arg(long)]
        output: PathBuf,
        /// Terrain scale in [0.1, 10.0]
        #[arg(long, default_value_t = terrain::DEFAULT_SCALE)]
        scale: f64,
    },
    /// Summarize a telemetry recording
    Replay {
        #[arg(long)]
        input: PathBuf,
    },
}
