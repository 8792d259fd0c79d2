use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use greendeck_core::output::write_artifact;
use greendeck_refs::fetch;
use greendeck_refs::OpenAlexClient;

#[derive(Args)]
pub struct FetchCitationsArgs {
    /// Directory for the generated artifacts
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Contact email sent to OpenAlex (polite pool)
    #[arg(long, default_value = "instructor@example.edu")]
    pub mailto: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

pub fn run(args: &FetchCitationsArgs) -> Result<()> {
    let client = OpenAlexClient::new(&args.mailto, Duration::from_secs(args.timeout_secs))
        .context("Failed to build the OpenAlex client")?;

    let citations = fetch::fetch_all(&client);
    if citations.is_empty() {
        anyhow::bail!("None of the {} citation lookups succeeded", fetch::PAPERS.len());
    }

    let generated = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let json = fetch::citations_json(&citations, &generated)
        .context("Failed to serialize citations")?;
    let path = write_artifact(&args.out_dir, "academic_citations.json", &json)?;
    println!(
        "SUCCESS: {} of {} citations -> {}",
        citations.len(),
        fetch::PAPERS.len(),
        path.display()
    );

    let stamped = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let tex = fetch::references_slide(&citations, &stamped);
    let path = write_artifact(&args.out_dir, "references_slide.tex", &tex)?;
    println!("SUCCESS: references slide -> {}", path.display());

    if citations.len() < fetch::PAPERS.len() {
        eprintln!(
            "WARNING: {} lookup(s) failed; see the log for details",
            fetch::PAPERS.len() - citations.len()
        );
    }
    Ok(())
}
