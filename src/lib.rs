//! Mean/confidence-band figures for the threshold sensitivity study.
//!
//! Each figure overlays one band per swept parameter, read from the
//! `sa_<case>__parameter_..._dropProb_<rate>.tsv` tables the simulation writes.

pub mod band;
pub mod case;
pub mod cli;
pub mod config;
pub mod error;
pub mod figure;
pub mod output;
pub mod study;
pub mod table;
pub mod value;

pub use case::Case;
pub use error::{PlotError, Result};
pub use value::StudyValue;
