use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sim::{load_config, run_scenario, summarize_recording, Args, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match args.command {
        Command::Run { config, record } => {
            let cfg = load_config(&config)?;
            info!(?cfg, "Scenario config loaded");

            let summary = match record {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating recording {}", path.display()))?;
                    let mut out = BufWriter::new(file);
                    let summary = run_scenario(&cfg, Some(&mut out))?;
                    out.flush().context("flushing recording")?;
                    summary
                }
                None => run_scenario(&cfg, None)?,
            };
            println!("{summary:#?}");
        }
        Command::Terrain { input, output, scale } => {
            let written = terrain::export(&input, &output, scale)?;
            println!("{}", written.display());
        }
        Command::Replay { input } => {
            let file = File::open(&input)
                .with_context(|| format!("opening recording {}", input.display()))?;
            let summary = summarize_recording(BufReader::new(file))?;
            println!("{summary:#?}");
        }
    }
    Ok(())
}
