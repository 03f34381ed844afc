use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::Path;

use crate::experiment::ExperimentConfig;
use crate::io::TsvReportWriter;

mod cli;
mod experiment;
mod io;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.verbosity.filter())).init();

    info!("Running reparameterization experiment");
    let out_path = Path::new(&args.out);
    if out_path.exists() {
        bail!("Output directory already exists: {}", out_path.display());
    }
    std::fs::create_dir(out_path)
        .with_context(|| format!("Could not create output directory: {}", out_path.display()))?;
    info!("Created output directory");

    let config = ExperimentConfig::from(&args);
    let report = experiment::run(&config)?;

    io::write_summary(&out_path.join("summary.tsv"), &report)?;
    let mut writer = TsvReportWriter::new(&out_path.join("models.tsv"))?;
    writer.write_models_iter(&report.models)?;
    if args.json {
        io::write_json(&out_path.join("report.json"), &report)?;
    }

    info!("Finished writing reports to {}", out_path.display());
    Ok(())
}
