use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Experiment type of a study. Fixes the file prefix, the y scale and the
/// curve label of every figure it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Constrained,
    Costly,
}

impl Case {
    pub fn name(self) -> &'static str {
        match self {
            Self::Constrained => "constrained",
            Self::Costly => "costly",
        }
    }

    pub fn y_max(self) -> f64 {
        match self {
            Self::Constrained => 3.5,
            Self::Costly => 13.0,
        }
    }

    /// Symbol of the swept parameter: alpha for constrained, lambda for costly.
    pub fn label_prefix(self) -> &'static str {
        match self {
            Self::Constrained => "\u{3b1} = ",
            Self::Costly => "\u{3bb} = ",
        }
    }

    /// Vertical gap between the upper curve tail and its label.
    pub fn label_margin(self) -> f64 {
        match self {
            Self::Constrained => 0.1,
            Self::Costly => 0.15,
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
