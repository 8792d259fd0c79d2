pub mod citation;
pub mod statistic;

pub use citation::Citation;
pub use statistic::{Confidence, Statistic};
