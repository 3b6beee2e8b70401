//! Chart rendering seam
//!
//! The aggregation pipeline produces an [`InteractionChart`] — one ascending
//! numeric day axis plus aligned, labeled series — and hands it to a
//! [`ChartRenderer`]. Rendering is injected so the pipeline stays testable
//! without a display; the bundled implementation draws a braille line chart
//! in the terminal via `textplots`.

use textplots::{Chart, Plot, Shape};

use crate::error::AnalysisError;

/// One named series of smoothed daily rates
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSeries {
    /// Legend label (e.g. "Opens")
    pub label: String,
    /// Smoothed rates, aligned with the chart's axis
    pub values: Vec<f64>,
}

/// The renderer's input contract: a shared ascending axis and up to four
/// aligned series
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionChart {
    /// Distinct days as fractional days since the Unix epoch, ascending
    pub axis: Vec<f64>,
    pub series: Vec<LabeledSeries>,
}

/// Injected rendering collaborator
pub trait ChartRenderer {
    /// Render the chart. A single blocking call; returns nothing further.
    fn render(&mut self, chart: &InteractionChart) -> Result<(), AnalysisError>;
}

/// Terminal renderer drawing a braille line chart on stdout
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    width: u32,
    height: u32,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            width: 180,
            height: 60,
        }
    }
}

impl TerminalRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ChartRenderer for TerminalRenderer {
    fn render(&mut self, chart: &InteractionChart) -> Result<(), AnalysisError> {
        if chart.axis.is_empty() {
            return Err(AnalysisError::Render("empty time axis".to_string()));
        }
        for series in &chart.series {
            if series.values.len() != chart.axis.len() {
                return Err(AnalysisError::Render(format!(
                    "series {:?} has {} points, axis has {}",
                    series.label,
                    series.values.len(),
                    chart.axis.len()
                )));
            }
        }

        let mut x_min = chart.axis[0] as f32;
        let mut x_max = chart.axis[chart.axis.len() - 1] as f32;
        if x_min == x_max {
            // textplots needs a non-degenerate x range
            x_min -= 0.5;
            x_max += 0.5;
        }

        let points: Vec<Vec<(f32, f32)>> = chart
            .series
            .iter()
            .map(|s| {
                chart
                    .axis
                    .iter()
                    .zip(&s.values)
                    .map(|(&x, &y)| (x as f32, y as f32))
                    .collect()
            })
            .collect();
        let shapes: Vec<Shape> = points.iter().map(|p| Shape::Lines(p.as_slice())).collect();

        for series in &chart.series {
            println!("- {}", series.label);
        }

        let mut drawing = Chart::new(self.width, self.height, x_min, x_max);
        let mut view = &mut drawing;
        for shape in &shapes {
            view = view.lineplot(shape);
        }
        view.display();

        Ok(())
    }
}
