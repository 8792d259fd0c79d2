use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Args;
use greendeck_core::output::write_artifact;
use greendeck_refs::curated;

#[derive(Args)]
pub struct ReferencesArgs {
    /// Directory for the generated slide
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn run(args: &ReferencesArgs) -> Result<()> {
    let groups = curated::reference_groups();
    for group in &groups {
        println!("{:<35} {} references", group.heading, group.citations.len());
    }

    let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let tex = curated::references_slide(&generated);
    let path = write_artifact(&args.out_dir, "references_slide.tex", &tex)?;

    let total: usize = groups.iter().map(|g| g.citations.len()).sum();
    println!("SUCCESS: {total} references -> {}", path.display());
    Ok(())
}
