use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::plotting::styles::{line_color, ChartStyle, ChartTheme};
use crate::types::ChartFrame;

pub type PlotError = Box<dyn Error + Send + Sync>;

// Helper function to wrap errors
fn wrap_err<E>(e: E) -> PlotError
where
    E: Into<Box<dyn Error + Send + Sync>>,
{
    e.into()
}

/// Draw a frame onto any drawing area.
///
/// One line per dataset, drawn in frame order over a common `0..labels`
/// x axis; the y range is padded min/max over every sample. An empty frame
/// fills the background and stops, matching the demo's behavior of showing
/// a blank chart rather than an empty axis box.
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &ChartFrame,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError>
where
    DB::ErrorType: 'static,
{
    root.fill(&theme.background_color).map_err(wrap_err)?;
    if frame.is_empty() {
        return Ok(());
    }

    let x_max = frame.labels.len().saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = value_range(frame);

    let x_fmt = |x: &f64| format!("{}", *x as usize);
    let y_fmt = |y: &f64| format!("{y:.0}");

    let mut chart = ChartBuilder::on(root)
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color);
    if style.label_area_size == 0 {
        // No label area means no text, which keeps font loading out of the
        // picture entirely.
        mesh.x_labels(0).y_labels(0);
    } else {
        mesh.x_labels(frame.labels.len().clamp(2, 12))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style(
                ("sans-serif", style.font_size)
                    .into_font()
                    .color(&theme.text_color),
            );
    }
    mesh.draw()?;

    // Zero line, drawn a little stronger than the grid when in range.
    if y_min <= 0.0 && y_max >= 0.0 {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 0.0), (x_max, 0.0)],
            ShapeStyle::from(&theme.axis_color.mix(0.4)).stroke_width(2),
        )))?;
    }

    let line_width = style.line_width;
    for series in &frame.datasets {
        let color = line_color(series.color);
        let points: Vec<(f64, f64)> = series
            .samples
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y))
            .collect();

        if style.glow_width > 0 {
            chart.draw_series(LineSeries::new(
                points.clone(),
                color.mix(0.3).stroke_width(style.glow_width),
            ))?;
        }

        chart
            .draw_series(LineSeries::new(points, color.stroke_width(line_width)))?
            .label(&series.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(line_width))
            });
    }

    if style.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(theme.background_color.mix(0.8))
            .border_style(theme.grid_color)
            .label_font(
                ("sans-serif", style.font_size)
                    .into_font()
                    .color(&theme.text_color),
            )
            .draw()?;
    }

    Ok(())
}

/// Render a frame into a tightly packed RGB888 buffer of `size` pixels.
pub fn render_rgb(
    frame: &ChartFrame,
    size: (u32, u32),
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<Vec<u8>, PlotError> {
    let (width, height) = size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        draw_chart(&root, frame, theme, style)?;
        root.present().map_err(wrap_err)?;
    }
    Ok(buffer)
}

/// Render a frame straight to a PNG file.
pub fn render_png(
    frame: &ChartFrame,
    path: impl AsRef<Path>,
    size: (u32, u32),
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    draw_chart(&root, frame, theme, style)?;
    root.present().map_err(wrap_err)?;
    Ok(())
}

/// Padded min/max over every sample in the frame.
pub(crate) fn value_range(frame: &ChartFrame) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in &frame.datasets {
        for &sample in &series.samples {
            min = min.min(sample);
            max = max.max(sample);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    let pad = if span == 0.0 { 1.0 } else { span * 0.05 };
    (min - pad, max + pad)
}
