//! Error type shared by loading, rendering and writing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("table {0} has no rows")]
    EmptyTable(PathBuf),

    #[error("band series lengths differ: mean={mean} upper={upper} lower={lower}")]
    BandLength {
        mean: usize,
        upper: usize,
        lower: usize,
    },

    #[error("figure has no bands to draw")]
    EmptyFigure,

    #[error("render error: {0}")]
    Render(String),

    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

impl PlotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
