use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use greendeck_charts::{ChartDef, CATALOG};
use greendeck_core::output::write_artifact;
use tracing::info;

#[derive(Args)]
pub struct ChartArgs {
    /// Chart slug to render (see --list)
    pub slug: Option<String>,

    /// List the chart catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Render every chart in the catalog
    #[arg(long, conflicts_with = "list")]
    pub all: bool,

    /// Directory for the rendered SVG files
    #[arg(long, default_value = "charts")]
    pub out_dir: PathBuf,
}

pub fn run(args: &ChartArgs) -> Result<()> {
    if args.list {
        for def in CATALOG {
            println!("{:<26} {}", def.slug, def.title);
        }
        return Ok(());
    }

    if args.all {
        let mut failed = 0;
        for def in CATALOG {
            match render_one(def, &args.out_dir) {
                Ok(path) => println!("[OK] {} -> {}", def.slug, path.display()),
                Err(e) => {
                    failed += 1;
                    eprintln!("ERROR: {}: {e:#}", def.slug);
                }
            }
        }
        if failed > 0 {
            anyhow::bail!("{failed} of {} charts failed", CATALOG.len());
        }
        println!("Rendered {} charts to {}", CATALOG.len(), args.out_dir.display());
        return Ok(());
    }

    let slug = args
        .slug
        .as_deref()
        .context("Pass a chart slug, or use --list / --all")?;
    let def = greendeck_charts::find(slug)
        .with_context(|| format!("Unknown chart '{slug}'. Use --list to see the catalog."))?;
    let path = render_one(def, &args.out_dir)?;
    println!("[OK] {} -> {}", def.slug, path.display());
    Ok(())
}

fn render_one(def: &ChartDef, out_dir: &Path) -> Result<PathBuf> {
    info!(slug = def.slug, "rendering chart");
    let figure = (def.build)();
    let svg = figure
        .render()
        .with_context(|| format!("Failed to render '{}'", def.slug))?;
    let path = write_artifact(out_dir, def.file_name, &svg)
        .with_context(|| format!("Failed to write '{}'", def.file_name))?;
    Ok(path)
}
