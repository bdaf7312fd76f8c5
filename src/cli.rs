use std::path::PathBuf;

use clap::Parser;

use crate::case::Case;
use crate::config::StudyConfig;
use crate::output::OutputFormat;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to study config TOML (written with defaults if missing)
    #[arg(long, default_value = "bandplot.toml")]
    pub config: PathBuf,

    /// Directory holding the sa_*.tsv tables (overrides config)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Directory figures are written to (overrides config)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only run jobs of this case
    #[arg(long, value_enum)]
    pub case: Option<Case>,

    /// Keep only the first N iterations of every table (overrides config)
    #[arg(long)]
    pub iter_limit: Option<usize>,
}

impl Args {
    /// Fold command-line overrides into a loaded config.
    pub fn apply(&self, cfg: &mut StudyConfig) {
        if let Some(dir) = &self.input_dir {
            cfg.paths.input_dir = dir.clone();
        }
        if let Some(dir) = &self.out_dir {
            cfg.paths.out_dir = dir.clone();
        }
        if let Some(format) = self.format {
            cfg.render.format = format;
        }
        if let Some(case) = self.case {
            cfg.jobs.retain(|job| job.case == case);
        }
        if let Some(limit) = self.iter_limit {
            for job in &mut cfg.jobs {
                job.iter_limit = Some(limit);
            }
        }
    }
}
