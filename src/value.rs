use std::fmt;

use serde::{Deserialize, Serialize};

/// A study parameter exactly as the study author wrote it.
///
/// File names and curve labels embed the written form, so `700` and `700.0`
/// name different files. Integral floats keep a trailing `.0`; everything else
/// prints its shortest round-trip form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudyValue {
    Int(i64),
    Float(f64),
}

impl StudyValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl From<i64> for StudyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for StudyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl fmt::Display for StudyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&float_repr(v)),
        }
    }
}

/// Shortest round-trip text for `v` in the form the sweep scripts use for
/// file names: scientific below 1e-4 and from 1e16 up, with a signed
/// two-digit exponent; otherwise positional, integral values keeping `.0`.
fn float_repr(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let sci = format!("{v:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if v != 0.0 && !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exp.abs());
    }
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
