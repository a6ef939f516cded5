use plotters::style::{RGBAColor, RGBColor};

use crate::types::Rgb;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(0, 0, 0, 0.94),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    /// Width of the soft underglow drawn beneath each line; 0 disables it.
    pub glow_width: u32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    pub legend: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            glow_width: 4,
            font_size: 15,
            margin: 10,
            label_area_size: 50,
            legend: true,
        }
    }
}

impl ChartStyle {
    /// A style that draws no text at all: no axis labels, no legend.
    ///
    /// Rendering text needs system fonts; this keeps chart output usable on
    /// headless machines without any.
    pub fn bare() -> Self {
        Self {
            glow_width: 0,
            label_area_size: 0,
            legend: false,
            ..Default::default()
        }
    }
}

/// Series display color as a plotters color.
pub fn line_color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}
