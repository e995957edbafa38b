use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("shape mismatch: expected {expected} {what}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("series '{0}' has no data to average")]
    EmptySeries(String),

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("unknown output variable '{0}'")]
    UnknownVariable(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("display failed: {0}")]
    Display(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;
