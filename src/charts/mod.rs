//! Charts module - Chart rendering

mod colormap;
mod renderer;

pub use colormap::ValueColormap;
pub use renderer::{BarChartRenderer, ChartSpec, RenderError};
