use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use greendeck_core::output::write_artifact;
use greendeck_refs::statistics;

#[derive(Args)]
pub struct DataArgs {
    /// Directory for the generated artifacts
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn run(args: &DataArgs) -> Result<()> {
    let created = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let json = statistics::statistics_json(&created)
        .context("Failed to serialize the statistics snapshot")?;
    let path = write_artifact(&args.out_dir, "verified_statistics.json", &json)?;
    println!("SUCCESS: statistics snapshot -> {}", path.display());

    let stamped = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let tex = statistics::data_macros(&stamped);
    let path = write_artifact(&args.out_dir, "data_macros.tex", &tex)?;
    println!("SUCCESS: data macros -> {}", path.display());

    let report = statistics::corrections_report(&stamped);
    let path = write_artifact(&args.out_dir, "data_corrections_report.txt", &report)?;
    println!("SUCCESS: corrections report -> {}", path.display());
    Ok(())
}
