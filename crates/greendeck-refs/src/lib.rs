//! Reference tooling for the lecture deck: the OpenAlex citation fetcher,
//! the hand-verified reference set, the verified-statistics snapshot, and
//! the LaTeX renderers they share.

pub mod curated;
pub mod fetch;
pub mod latex;
pub mod openalex;
pub mod statistics;

pub use openalex::{FetchError, OpenAlexClient, Work};
