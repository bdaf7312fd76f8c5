//! Running plot jobs: one figure per discount, one band per parameter.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::band::Band;
use crate::config::{PlotJob, StudyConfig};
use crate::error::{PlotError, Result};
use crate::figure::FigureLayout;
use crate::output::{OutputFormat, output_file_name, write_figure};
use crate::table::{ObservationTable, table_file_name};
use crate::value::StudyValue;

/// Where tables come from and how figures are written.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub out_dir: PathBuf,
    pub layout: FigureLayout,
    pub format: OutputFormat,
}

impl Settings {
    pub fn from_config(cfg: &StudyConfig) -> Self {
        Self {
            input_dir: cfg.paths.input_dir.clone(),
            out_dir: cfg.paths.out_dir.clone(),
            layout: cfg.render.layout(),
            format: cfg.render.format,
        }
    }

    pub fn table_path(&self, job: &PlotJob, parameter: StudyValue, discount: StudyValue) -> PathBuf {
        self.input_dir
            .join(table_file_name(job.case, parameter, discount, job.drop_rate))
    }

    pub fn figure_path(&self, job: &PlotJob, discount: StudyValue) -> PathBuf {
        self.out_dir
            .join(output_file_name(job.case, job.drop_rate, discount, self.format))
    }
}

/// Load one band per parameter of `job` at `discount`, in parameter order.
pub fn load_bands(settings: &Settings, job: &PlotJob, discount: StudyValue) -> Result<Vec<Band>> {
    job.parameters
        .iter()
        .map(|&parameter| {
            let path = settings.table_path(job, parameter, discount);
            let table = ObservationTable::load(&path, job.iter_limit)?;
            Band::from_table(parameter, &table)
        })
        .collect()
}

/// Draw and save one figure per discount of `job`. Returns the written paths.
pub fn plot_time_series(settings: &Settings, job: &PlotJob) -> Result<Vec<PathBuf>> {
    ensure_dir(&settings.out_dir)?;
    let mut written = Vec::with_capacity(job.discounts.len());
    for &discount in &job.discounts {
        let bands = load_bands(settings, job, discount)?;
        let out_path = settings.figure_path(job, discount);
        write_figure(&out_path, settings.format, &settings.layout, job.case, &bands)?;
        written.push(out_path);
    }
    Ok(written)
}

/// Run every job in order; the first failure aborts the rest.
pub fn run_study(cfg: &StudyConfig) -> Result<Vec<PathBuf>> {
    let settings = Settings::from_config(cfg);
    let mut written = Vec::new();
    for job in &cfg.jobs {
        info!(
            case = %job.case,
            drop_rate = %job.drop_rate,
            curves = job.parameters.len(),
            figures = job.discounts.len(),
            "plotting"
        );
        written.extend(plot_time_series(&settings, job)?);
    }
    Ok(written)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| PlotError::io(dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::Case;

    fn settings() -> Settings {
        Settings {
            input_dir: PathBuf::from("output"),
            out_dir: PathBuf::from("figs"),
            layout: FigureLayout::default(),
            format: OutputFormat::Pdf,
        }
    }

    fn costly_job() -> PlotJob {
        PlotJob::new(
            Case::Costly,
            0.3,
            vec![StudyValue::Float(100.0), StudyValue::Int(700)],
            vec![StudyValue::Float(0.9)],
        )
    }

    #[test]
    fn paths_follow_study_naming() {
        let s = settings();
        let job = costly_job();
        assert_eq!(
            s.table_path(&job, StudyValue::Float(100.0), StudyValue::Float(0.9)),
            PathBuf::from("output/sa_costly__parameter_100.0__discount_0.9__dropProb_0.3.tsv")
        );
        assert_eq!(
            s.figure_path(&job, StudyValue::Float(0.9)),
            PathBuf::from("figs/costly_p_d_0.3_beta_0.9.pdf")
        );
    }

    #[test]
    fn missing_table_aborts_job() {
        let mut s = settings();
        s.input_dir = std::env::temp_dir().join("bandplot_study_test_no_such_dir");
        s.out_dir = std::env::temp_dir();
        let err = plot_time_series(&s, &costly_job()).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
    }
}
