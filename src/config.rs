use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::case::Case;
use crate::error::{PlotError, Result};
use crate::figure::FigureLayout;
use crate::output::OutputFormat;
use crate::value::StudyValue;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "PathsConfig::default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "PathsConfig::default_out_dir")]
    pub out_dir: PathBuf,
}

impl PathsConfig {
    fn default_input_dir() -> PathBuf {
        PathBuf::from("output")
    }
    fn default_out_dir() -> PathBuf {
        PathBuf::from(".")
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: Self::default_input_dir(),
            out_dir: Self::default_out_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_width")]
    pub width: u32,
    #[serde(default = "RenderConfig::default_height")]
    pub height: u32,
    /// Plot-area width over height.
    #[serde(default = "RenderConfig::default_aspect")]
    pub aspect: f64,
    #[serde(default = "RenderConfig::default_dpi")]
    pub dpi: f64,
    #[serde(default)]
    pub format: OutputFormat,
}

impl RenderConfig {
    fn default_width() -> u32 {
        640
    }
    fn default_height() -> u32 {
        480
    }
    fn default_aspect() -> f64 {
        1.75
    }
    fn default_dpi() -> f64 {
        100.0
    }

    pub fn layout(&self) -> FigureLayout {
        FigureLayout {
            width: self.width,
            height: self.height,
            aspect: self.aspect,
            dpi: self.dpi,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            aspect: Self::default_aspect(),
            dpi: Self::default_dpi(),
            format: OutputFormat::default(),
        }
    }
}

/// One `plot_time_series` invocation: a figure per discount, a curve per
/// parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotJob {
    pub case: Case,
    pub drop_rate: StudyValue,
    pub parameters: Vec<StudyValue>,
    pub discounts: Vec<StudyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iter_limit: Option<usize>,
}

impl PlotJob {
    pub fn new(
        case: Case,
        drop_rate: impl Into<StudyValue>,
        parameters: Vec<StudyValue>,
        discounts: Vec<StudyValue>,
    ) -> Self {
        Self {
            case,
            drop_rate: drop_rate.into(),
            parameters,
            discounts,
            iter_limit: None,
        }
    }
}

/// The sensitivity study as shipped: costly at both discounts, then
/// constrained at both discounts, all with drop rate 0.3.
pub fn default_jobs() -> Vec<PlotJob> {
    let costly = || {
        vec![
            StudyValue::Float(100.0),
            StudyValue::Float(500.0),
            StudyValue::Int(700),
        ]
    };
    let constrained = || {
        vec![
            StudyValue::Float(0.1),
            StudyValue::Float(0.3),
            StudyValue::Float(0.5),
        ]
    };
    vec![
        PlotJob::new(Case::Costly, 0.3, costly(), vec![StudyValue::Float(0.9)]),
        PlotJob::new(Case::Costly, 0.3, costly(), vec![StudyValue::Float(1.0)]),
        PlotJob::new(Case::Constrained, 0.3, constrained(), vec![StudyValue::Float(0.9)]),
        PlotJob::new(Case::Constrained, 0.3, constrained(), vec![StudyValue::Float(1.0)]),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default = "default_jobs")]
    pub jobs: Vec<PlotJob>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            render: RenderConfig::default(),
            jobs: default_jobs(),
        }
    }
}

impl StudyConfig {
    /// Comment out every key so the written file documents the defaults
    /// without pinning them. `[[array]]` headers are commented too, since an
    /// uncommented header with no keys would not parse.
    fn commented(text: &str) -> String {
        let mut out = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                out.push('\n');
            } else if trimmed.starts_with('[')
                && !trimmed.starts_with("[[")
                && trimmed.ends_with(']')
            {
                out.push_str(line);
                out.push('\n');
            } else {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Load `path`, or write a commented defaults file there when it does
    /// not exist. An existing file that cannot be read or parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
            return toml::from_str(&contents).map_err(|source| PlotError::Config {
                path: path.to_path_buf(),
                source,
            });
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path, Self::commented(&text)) {
                    warn!(
                        "Failed to write default config to {}: {err}",
                        path.display()
                    );
                } else {
                    info!("Wrote default config to {}", path.display());
                }
            }
            Err(err) => {
                warn!("Failed to serialize default config: {err}; continuing with defaults");
            }
        }
        Ok(default_cfg)
    }
}
