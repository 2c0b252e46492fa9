//! Chart Renderer Module
//! Renders ranked entries as horizontal bar chart images.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. Horizontal bars in input order (already ascending), one color per
//!    value through the rainbow colormap
//! 3. Numeric label at the end of each bar
//! 4. Optional vertical dashed mean line with a legend entry
//! 5. Vertical colorbar at the right edge, labeled with the axis label

use plotters::prelude::*;
use statrs::statistics::Statistics;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::charts::colormap::ValueColormap;
use crate::stats::RankedEntry;

const CHART_SIZE: (u32, u32) = (1600, 900);
const COLORBAR_WIDTH: u32 = 150;
const COLORBAR_STEPS: usize = 256;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No data to chart")]
    EmptyChart,
    #[error("Failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

/// Parameters of a single chart.
pub struct ChartSpec<'a> {
    /// File stem under the output directory; the `.png` extension is added.
    pub file_stem: &'a str,
    pub title: String,
    pub x_label: &'a str,
    pub show_mean: bool,
}

/// Renders horizontal bar charts to fixed files in the output directory,
/// overwriting any prior output, then shows them with the system viewer.
pub struct BarChartRenderer {
    out_dir: PathBuf,
    display: bool,
}

impl BarChartRenderer {
    /// Create a renderer writing into `out_dir` (created if missing).
    pub fn new(out_dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir)?;
        Ok(Self {
            out_dir,
            display: true,
        })
    }

    /// Toggle opening rendered files with the system image viewer.
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Render the entries to `<out_dir>/<file_stem>.png`.
    pub fn render(
        &self,
        spec: &ChartSpec,
        entries: &[RankedEntry],
    ) -> Result<PathBuf, RenderError> {
        if entries.is_empty() {
            return Err(RenderError::EmptyChart);
        }

        let path = self.out_dir.join(format!("{}.png", spec.file_stem));
        Self::draw(&path, spec, entries).map_err(|e| RenderError::Drawing(e.to_string()))?;
        log::info!("saved {}", path.display());

        if self.display {
            // Best-effort stand-in for an interactive window
            if let Err(e) = open::that(&path) {
                log::warn!("could not open {}: {}", path.display(), e);
            }
        }

        Ok(path)
    }

    fn draw(
        path: &Path,
        spec: &ChartSpec,
        entries: &[RankedEntry],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let values: Vec<f64> = entries.iter().map(|e| e.value).collect();
        let vmin = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let vmax = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = Statistics::mean(&values);
        let cmap = ValueColormap::new(vmin, vmax);

        // Visible range of the original design; a degenerate span is
        // widened so the backend accepts the axis.
        let mut x_min = vmin * 0.98;
        let mut x_max = vmax * 1.02;
        if !(x_max > x_min) {
            x_min = vmin - 1.0;
            x_max = vmax + 1.0;
        }

        let n = entries.len();
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let (chart_area, cbar_area) = root.split_horizontally(CHART_SIZE.0 - COLORBAR_WIDTH);

        let mut chart = ChartBuilder::on(&chart_area)
            .caption(&spec.title, ("sans-serif", 30))
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(240)
            .build_cartesian_2d(x_min..x_max, (0..n).into_segmented())?;

        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        chart
            .configure_mesh()
            .disable_y_mesh()
            .light_line_style(RGBColor(220, 220, 220))
            .x_desc(spec.x_label)
            .y_labels(n.max(1))
            .y_label_formatter(&|seg| match seg {
                SegmentValue::CenterOf(i) if *i < labels.len() => labels[*i].to_string(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
            let mut bar = Rectangle::new(
                [
                    (x_min, SegmentValue::Exact(i)),
                    (entry.value, SegmentValue::Exact(i + 1)),
                ],
                cmap.color_for(entry.value).filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))?;

        // Numeric label just past each bar end
        let label_offset = (vmax - vmin) * 0.01;
        chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
            Text::new(
                format!("{:.1}", entry.value),
                (entry.value + label_offset, SegmentValue::CenterOf(i)),
                ("sans-serif", 14),
            )
        }))?;

        if spec.show_mean {
            chart
                .draw_series(DashedLineSeries::new(
                    [
                        (mean, SegmentValue::Exact(0)),
                        (mean, SegmentValue::Exact(n)),
                    ],
                    10,
                    6,
                    BLACK.stroke_width(2),
                ))?
                .label(format!("Mean: {:.1}", mean))
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2))
                });

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::LowerRight)
                .draw()?;
        }

        Self::draw_colorbar(&cbar_area, spec.x_label, vmin, vmax, x_min, x_max)?;

        root.present()?;
        Ok(())
    }

    /// Vertical gradient strip with value ticks on its right.
    fn draw_colorbar(
        area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        label: &str,
        vmin: f64,
        vmax: f64,
        fallback_min: f64,
        fallback_max: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (cb_min, cb_max) = if vmax > vmin {
            (vmin, vmax)
        } else {
            (fallback_min, fallback_max)
        };

        let mut cbar = ChartBuilder::on(area)
            .margin(12)
            .margin_top(60)
            .margin_bottom(60)
            .set_label_area_size(LabelAreaPosition::Right, 70)
            .build_cartesian_2d(0.0..1.0, cb_min..cb_max)?;

        cbar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_desc(label)
            .axis_desc_style(("sans-serif", 16))
            .y_labels(5)
            .draw()?;

        cbar.draw_series((0..COLORBAR_STEPS).map(|i| {
            let t0 = i as f64 / COLORBAR_STEPS as f64;
            let t1 = (i + 1) as f64 / COLORBAR_STEPS as f64;
            let y0 = cb_min + (cb_max - cb_min) * t0;
            let y1 = cb_min + (cb_max - cb_min) * t1;
            Rectangle::new([(0.0, y0), (1.0, y1)], ValueColormap::color_at(t0).filled())
        }))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(values: &[(&str, f64)]) -> Vec<RankedEntry> {
        values
            .iter()
            .map(|(label, value)| RankedEntry {
                label: label.to_string(),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn empty_series_is_rejected() {
        let dir = std::env::temp_dir().join("regionviz_render_empty");
        let renderer = BarChartRenderer::new(&dir).unwrap().with_display(false);
        let spec = ChartSpec {
            file_stem: "empty",
            title: "Nothing".to_string(),
            x_label: "Value",
            show_mean: true,
        };

        let err = renderer.render(&spec, &[]).unwrap_err();
        assert!(matches!(err, RenderError::EmptyChart));
        assert!(!dir.join("empty.png").exists());
    }

    #[test]
    fn renders_png_to_fixed_file() {
        let dir = std::env::temp_dir().join("regionviz_render_smoke");
        let renderer = BarChartRenderer::new(&dir).unwrap().with_display(false);
        let spec = ChartSpec {
            file_stem: "region_chart",
            title: "Value distribution by districts: A".to_string(),
            x_label: "Value",
            show_mean: true,
        };

        let path = renderer
            .render(&spec, &entries(&[("X", 10.0), ("Y", 20.0), ("Z", 30.0)]))
            .unwrap();
        assert_eq!(path, dir.join("region_chart.png"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn all_equal_values_still_render() {
        let dir = std::env::temp_dir().join("regionviz_render_flat");
        let renderer = BarChartRenderer::new(&dir).unwrap().with_display(false);
        let spec = ChartSpec {
            file_stem: "flat",
            title: "Flat".to_string(),
            x_label: "Value",
            show_mean: false,
        };

        let path = renderer
            .render(&spec, &entries(&[("X", 5.0), ("Y", 5.0)]))
            .unwrap();
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
