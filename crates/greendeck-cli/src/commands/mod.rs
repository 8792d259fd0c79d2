pub mod chart;
pub mod data;
pub mod fetch_citations;
pub mod references;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Render one chart, every chart, or list the catalog
    Chart(chart::ChartArgs),
    /// Fetch paper metadata from OpenAlex and write citation artifacts
    FetchCitations(fetch_citations::FetchCitationsArgs),
    /// Write the hand-verified references slide
    References(references::ReferencesArgs),
    /// Write the verified statistics snapshot, data macros, and corrections report
    Data(data::DataArgs),
}
