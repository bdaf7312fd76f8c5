//! Writing finished figures to disk.
//!
//! PDF output goes through plotters' SVG backend and is then converted with
//! svg2pdf; SVG is that intermediate document; PNG is drawn directly with the
//! bitmap backend.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use svg2pdf::usvg;
use tracing::info;

use crate::band::Band;
use crate::case::Case;
use crate::error::{PlotError, Result};
use crate::figure::{FigureLayout, draw_figure};
use crate::value::StudyValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// `<case>_p_d_<rate>_beta_<discount>.<ext>`
pub fn output_file_name(
    case: Case,
    drop_rate: StudyValue,
    discount: StudyValue,
    format: OutputFormat,
) -> String {
    format!(
        "{case}_p_d_{drop_rate}_beta_{discount}.{}",
        format.extension()
    )
}

pub fn render_svg(layout: &FigureLayout, case: Case, bands: &[Band]) -> Result<String> {
    if bands.is_empty() {
        return Err(PlotError::EmptyFigure);
    }
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (layout.width, layout.height))
            .into_drawing_area();
        draw_figure(&root, layout, case, bands).map_err(|e| PlotError::Render(e.to_string()))?;
    }
    Ok(svg)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| PlotError::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| PlotError::Pdf(format!("{e:?}")))
}

/// Render `bands` and write them to `path`, replacing any existing file.
pub fn write_figure(
    path: &Path,
    format: OutputFormat,
    layout: &FigureLayout,
    case: Case,
    bands: &[Band],
) -> Result<()> {
    match format {
        OutputFormat::Svg => {
            let svg = render_svg(layout, case, bands)?;
            fs::write(path, svg).map_err(|e| PlotError::io(path, e))?;
        }
        OutputFormat::Pdf => {
            let svg = render_svg(layout, case, bands)?;
            let pdf = svg_to_pdf(&svg)?;
            fs::write(path, pdf).map_err(|e| PlotError::io(path, e))?;
        }
        OutputFormat::Png => {
            if bands.is_empty() {
                return Err(PlotError::EmptyFigure);
            }
            let root = BitMapBackend::new(path, (layout.width, layout.height)).into_drawing_area();
            draw_figure(&root, layout, case, bands)
                .map_err(|e| PlotError::Render(e.to_string()))?;
        }
    }
    info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fonts_available() -> bool {
        ("sans-serif", 10).into_font().box_size("0").is_ok()
    }

    fn band(parameter: StudyValue, n: usize, level: f64) -> Band {
        Band::new(
            parameter,
            vec![level; n],
            vec![level + 0.5; n],
            vec![level - 0.5; n],
        )
        .unwrap()
    }

    #[test]
    fn output_name_is_deterministic() {
        let name = output_file_name(
            Case::Costly,
            StudyValue::Float(0.3),
            StudyValue::Float(0.9),
            OutputFormat::Pdf,
        );
        assert_eq!(name, "costly_p_d_0.3_beta_0.9.pdf");

        let name = output_file_name(
            Case::Constrained,
            StudyValue::Float(0.3),
            StudyValue::Float(1.0),
            OutputFormat::Svg,
        );
        assert_eq!(name, "constrained_p_d_0.3_beta_1.0.svg");
    }

    #[test]
    fn svg_contains_axis_descriptions_and_labels() {
        if !fonts_available() {
            eprintln!("skipping: no system font for axis labels");
            return;
        }
        let bands = vec![
            band(StudyValue::Float(0.1), 50, 1.0),
            band(StudyValue::Float(0.3), 50, 2.0),
        ];
        let svg = render_svg(&FigureLayout::default(), Case::Constrained, &bands).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Iterations"));
        assert!(svg.contains("Threshold"));
        assert!(svg.contains("α = 0.1"));
        assert!(svg.contains("α = 0.3"));
        assert!(svg.contains("<polygon"));
    }

    #[test]
    fn rendering_is_repeatable() {
        if !fonts_available() {
            eprintln!("skipping: no system font for axis labels");
            return;
        }
        let bands = vec![band(StudyValue::Int(700), 80, 6.0)];
        let layout = FigureLayout::default();
        let a = render_svg(&layout, Case::Costly, &bands).unwrap();
        let b = render_svg(&layout, Case::Costly, &bands).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_fill_is_drawn_below_every_line() {
        if !fonts_available() {
            eprintln!("skipping: no system font for axis labels");
            return;
        }
        let bands = vec![
            band(StudyValue::Float(0.1), 40, 1.0),
            band(StudyValue::Float(0.3), 40, 1.3),
        ];
        let svg = render_svg(&FigureLayout::default(), Case::Constrained, &bands).unwrap();
        assert_eq!(svg.matches("<polygon").count(), 2);
        let last_fill = svg.rfind("<polygon").unwrap();
        let lines_after = svg[last_fill..].matches("<polyline").count();
        assert_eq!(lines_after, 6, "both bands' lines must follow both fills");
    }

    #[test]
    fn label_is_drawn_above_its_anchor() {
        if !fonts_available() {
            eprintln!("skipping: no system font for axis labels");
            return;
        }
        let bands = vec![band(StudyValue::Float(0.1), 40, 1.0)];
        let svg = render_svg(&FigureLayout::default(), Case::Constrained, &bands).unwrap();
        let label_at = svg.find("α = 0.1").unwrap();
        let tag_start = svg[..label_at].rfind("<text").unwrap();
        let tag = &svg[tag_start..label_at];
        assert!(!tag.contains("dy=\"0.76em\""), "label hangs below anchor: {tag}");
        assert!(tag.contains("text-anchor=\"start\""), "got {tag}");
    }

    #[test]
    fn empty_figure_is_an_error() {
        let err = render_svg(&FigureLayout::default(), Case::Costly, &[]).unwrap_err();
        assert!(matches!(err, PlotError::EmptyFigure));
    }

    #[test]
    fn pdf_conversion_produces_pdf_document() {
        if !fonts_available() {
            eprintln!("skipping: no system font for axis labels");
            return;
        }
        let bands = vec![band(StudyValue::Float(100.0), 30, 4.0)];
        let svg = render_svg(&FigureLayout::default(), Case::Costly, &bands).unwrap();
        let pdf = svg_to_pdf(&svg).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
