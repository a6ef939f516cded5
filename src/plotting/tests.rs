use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::chart::{render_png, render_rgb, value_range};
use super::styles::{ChartStyle, ChartTheme};
use crate::types::{ChartFrame, Rgb, Series};

fn frame() -> ChartFrame {
    ChartFrame {
        labels: (0..4).collect(),
        datasets: vec![
            Series::new("#0", vec![0.0, 10.0, -10.0, 5.0], Rgb::palette(0)),
            Series::new("avg", vec![5.0, 5.0, 5.0, 5.0], Rgb::palette(1)),
        ],
    }
}

#[test]
fn test_render_rgb_fills_buffer() {
    let buffer = render_rgb(
        &frame(),
        (120, 80),
        &ChartTheme::default(),
        &ChartStyle::bare(),
    )
    .unwrap();

    assert_eq!(buffer.len(), 120 * 80 * 3);
    assert!(buffer.iter().any(|&b| b != 0));
}

#[test]
fn test_empty_frame_renders_flat_background() {
    let buffer = render_rgb(
        &ChartFrame::default(),
        (64, 64),
        &ChartTheme::default(),
        &ChartStyle::bare(),
    )
    .unwrap();

    assert_eq!(buffer.len(), 64 * 64 * 3);
    assert!(buffer.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_single_point_frame_renders() {
    let single = ChartFrame {
        labels: vec![0],
        datasets: vec![Series::new("p", vec![3.0], Rgb::palette(0))],
    };

    let result = render_rgb(&single, (64, 64), &ChartTheme::default(), &ChartStyle::bare());
    assert!(result.is_ok());
}

#[test]
fn test_render_png_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chart.png");

    render_png(
        &frame(),
        &path,
        (200, 150),
        &ChartTheme::default(),
        &ChartStyle::bare(),
    )
    .unwrap();

    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn test_value_range_pads_extremes() {
    let (min, max) = value_range(&frame());
    assert!(min < -10.0 && min > -12.0);
    assert!(max > 10.0 && max < 12.0);
}

#[test]
fn test_value_range_of_flat_or_empty_data_still_spans() {
    let flat = ChartFrame {
        labels: vec![0, 1],
        datasets: vec![Series::new("c", vec![5.0, 5.0], Rgb::palette(0))],
    };
    assert_eq!(value_range(&flat), (4.0, 6.0));
    assert_eq!(value_range(&ChartFrame::default()), (0.0, 1.0));
}
