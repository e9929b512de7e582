use std::path::PathBuf;

use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("measurement set is empty")]
    EmptyInput,

    #[error("invalid chart config: {0}")]
    Config(String),

    #[error("render backend error: {0}")]
    Backend(String),
}
