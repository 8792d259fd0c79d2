//! Core building blocks for the greendeck lecture tooling: the shared style
//! palette, chart figure model and SVG renderer, numeric summary helpers,
//! and the citation/statistic data model.

pub mod error;
pub mod figure;
pub mod model;
pub mod numeric;
pub mod output;
pub mod style;

pub use error::CoreError;
pub use figure::{Annotation, Figure, Layout, Legend, Panel, Series};
pub use model::{Citation, Confidence, Statistic};
pub use style::Palette;
