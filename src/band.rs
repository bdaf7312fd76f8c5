//! Mean curve with a shaded confidence band.

use std::error::Error;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::case::Case;
use crate::error::{PlotError, Result};
use crate::table::ObservationTable;
use crate::value::StudyValue;

pub const BOUND_COLOR: RGBColor = BLUE;
pub const MEAN_COLOR: RGBColor = BLACK;
pub const FILL_COLOR: RGBColor = RGBColor(211, 211, 211);

/// Number of trailing upper-bound samples averaged to place the label.
const LABEL_TAIL: usize = 10;

#[derive(Debug, Clone)]
pub struct Band {
    parameter: StudyValue,
    mean: Vec<f64>,
    upper: Vec<f64>,
    lower: Vec<f64>,
}

impl Band {
    pub fn new(
        parameter: StudyValue,
        mean: Vec<f64>,
        upper: Vec<f64>,
        lower: Vec<f64>,
    ) -> Result<Self> {
        if mean.len() != upper.len() || mean.len() != lower.len() {
            return Err(PlotError::BandLength {
                mean: mean.len(),
                upper: upper.len(),
                lower: lower.len(),
            });
        }
        Ok(Self {
            parameter,
            mean,
            upper,
            lower,
        })
    }

    pub fn from_table(parameter: StudyValue, table: &ObservationTable) -> Result<Self> {
        Self::new(parameter, table.mean(), table.upper(), table.lower())
    }

    pub fn parameter(&self) -> StudyValue {
        self.parameter
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn label(&self, case: Case) -> String {
        format!("{}{}", case.label_prefix(), self.parameter)
    }

    /// Three quarters along the x axis, just above the tail of the upper bound.
    pub fn label_anchor(&self, case: Case) -> (f64, f64) {
        let n = self.len();
        let x = (3 * n / 4) as f64;
        let tail = &self.upper[n.saturating_sub(LABEL_TAIL)..];
        let tail_mean = if tail.is_empty() {
            0.0
        } else {
            tail.iter().sum::<f64>() / tail.len() as f64
        };
        (x, tail_mean + case.label_margin())
    }

    /// Closed outline running forward along the upper bound and back along
    /// the lower one.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let mut poly: Vec<(f64, f64)> = Vec::with_capacity(self.len() * 2);
        poly.extend(self.upper.iter().enumerate().map(|(i, &y)| (i as f64, y)));
        poly.extend(
            self.lower
                .iter()
                .enumerate()
                .rev()
                .map(|(i, &y)| (i as f64, y)),
        );
        poly
    }

    /// Shade between the bounds. Every band's fill goes down before any
    /// band's lines so overlapping fills never cover a curve.
    pub fn draw_fill<DB: DrawingBackend>(
        &self,
        chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    ) -> std::result::Result<(), Box<dyn Error>>
    where
        DB::ErrorType: 'static,
    {
        chart.draw_series(std::iter::once(Polygon::new(
            self.outline(),
            FILL_COLOR.filled(),
        )))?;
        Ok(())
    }

    /// Bound and mean lines plus the parameter label.
    pub fn draw_lines<DB: DrawingBackend>(
        &self,
        chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        case: Case,
        font_px: u32,
    ) -> std::result::Result<(), Box<dyn Error>>
    where
        DB::ErrorType: 'static,
    {
        for bound in [&self.upper, &self.lower] {
            chart.draw_series(LineSeries::new(
                series_points(bound),
                BOUND_COLOR.stroke_width(1),
            ))?;
        }
        chart.draw_series(LineSeries::new(
            series_points(&self.mean),
            MEAN_COLOR.stroke_width(1),
        ))?;

        chart.draw_series(std::iter::once(Text::new(
            self.label(case),
            self.label_anchor(case),
            label_style(font_px),
        )))?;
        Ok(())
    }
}

/// Label text sits on its anchor: left edge at x, baseline at y.
pub fn label_style(font_px: u32) -> TextStyle<'static> {
    ("sans-serif", font_px)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Bottom))
}

fn series_points(values: &[f64]) -> impl Iterator<Item = (f64, f64)> + '_ {
    values.iter().enumerate().map(|(i, &y)| (i as f64, y))
}
