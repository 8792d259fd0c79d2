use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("figure has no panels")]
    EmptyFigure,

    #[error("panel '{panel}': parallel sequences differ in length ({left} vs {right})")]
    LengthMismatch {
        panel: String,
        left: usize,
        right: usize,
    },

    #[error("panel '{panel}': series has no data points")]
    EmptySeries { panel: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
