//! Figure geometry and drawing of one study figure.

use std::error::Error;
use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::band::Band;
use crate::case::Case;

pub const X_DESC: &str = "Iterations";
pub const Y_DESC: &str = "Threshold";

const LABEL_PT: f64 = 8.0;
const AXIS_DESC_PT: f64 = 9.0;
const TICK_PT: f64 = 7.5;

/// Canvas size and the aspect ratio the plot area is fitted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    pub aspect: f64,
    pub dpi: f64,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            aspect: 1.75,
            dpi: 100.0,
        }
    }
}

/// Pixel distances from each canvas edge to the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl FigureLayout {
    /// Centered plot area whose width/height equals `aspect`, occupying at
    /// most 80% of the shorter canvas side.
    pub fn plot_fractions(&self) -> (f64, f64) {
        let w = self.width as f64;
        let h = self.height as f64;
        let min = w.min(h);
        let mut xl = 0.4 * min / w;
        let mut yl = 0.4 * min / h;
        if self.aspect < 1.0 {
            xl *= self.aspect;
        } else {
            yl /= self.aspect;
        }
        (xl, yl)
    }

    pub fn margins(&self) -> Margins {
        let (xl, yl) = self.plot_fractions();
        let side = ((0.5 - xl) * self.width as f64).round() as u32;
        let cap = ((0.5 - yl) * self.height as f64).round() as u32;
        Margins {
            left: side,
            right: side,
            top: cap,
            bottom: cap,
        }
    }

    pub fn font_px(&self, pt: f64) -> u32 {
        (pt * self.dpi / 72.0).round().max(1.0) as u32
    }
}

pub fn x_range(bands: &[Band]) -> Range<f64> {
    let n = bands.iter().map(Band::len).max().unwrap_or(0);
    0.0..n as f64
}

pub fn y_range(case: Case) -> Range<f64> {
    0.0..case.y_max()
}

/// Draw every band of one figure onto `root` and present it.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &FigureLayout,
    case: Case,
    bands: &[Band],
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let margins = layout.margins();
    let y_label_area = margins.left.min(56);
    let x_label_area = margins.bottom.min(42);

    let mut chart = ChartBuilder::on(root)
        .margin_left(margins.left - y_label_area)
        .margin_right(margins.right)
        .margin_top(margins.top)
        .margin_bottom(margins.bottom - x_label_area)
        .x_label_area_size(x_label_area)
        .y_label_area_size(y_label_area)
        .build_cartesian_2d(x_range(bands), y_range(case))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .axis_desc_style(("sans-serif", layout.font_px(AXIS_DESC_PT)))
        .label_style(("sans-serif", layout.font_px(TICK_PT)))
        .draw()?;

    let label_px = layout.font_px(LABEL_PT);
    for band in bands {
        band.draw_fill(&mut chart)?;
    }
    for band in bands {
        band.draw_lines(&mut chart, case, label_px)?;
    }
    root.present()?;
    Ok(())
}
