pub mod chart;
pub mod styles;

#[cfg(test)]
mod tests;

pub use chart::{draw_chart, render_png, render_rgb, PlotError};
pub use styles::{line_color, ChartStyle, ChartTheme};
