//! Observation tables written by the simulation sweep.
//!
//! Each file is tab-separated with a header row. Only the `mean`, `upper` and
//! `lower` columns are read; the row index is the iteration number.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::case::Case;
use crate::error::{PlotError, Result};
use crate::value::StudyValue;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Observation {
    pub mean: f64,
    pub upper: f64,
    pub lower: f64,
}

#[derive(Debug, Clone)]
pub struct ObservationTable {
    path: PathBuf,
    rows: Vec<Observation>,
}

/// `sa_<case>__parameter_<p>__discount_<b>__dropProb_<rate>.tsv`
pub fn table_file_name(
    case: Case,
    parameter: StudyValue,
    discount: StudyValue,
    drop_rate: StudyValue,
) -> String {
    format!("sa_{case}__parameter_{parameter}__discount_{discount}__dropProb_{drop_rate}.tsv")
}

impl ObservationTable {
    /// Read `path`, keeping only the first `iter_limit` rows when given. A
    /// limit of zero means no limit.
    pub fn load(path: &Path, iter_limit: Option<usize>) -> Result<Self> {
        let file = File::open(path).map_err(|e| PlotError::io(path, e))?;
        let table = Self::from_reader(file, path, iter_limit)?;
        debug!(path = %path.display(), rows = table.len(), "loaded table");
        Ok(table)
    }

    /// Parse a table from any reader; `path` is only used in errors.
    pub fn from_reader<R: Read>(
        reader: R,
        path: impl Into<PathBuf>,
        iter_limit: Option<usize>,
    ) -> Result<Self> {
        let path = path.into();
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let limit = match iter_limit {
            Some(n) if n > 0 => n,
            _ => usize::MAX,
        };
        let mut rows = Vec::new();
        for record in rdr.deserialize::<Observation>().take(limit) {
            let row = record.map_err(|source| PlotError::Table {
                path: path.clone(),
                source,
            })?;
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(PlotError::EmptyTable(path));
        }
        Ok(Self { path, rows })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn mean(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.mean).collect()
    }

    pub fn upper(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.upper).collect()
    }

    pub fn lower(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.lower).collect()
    }
}
