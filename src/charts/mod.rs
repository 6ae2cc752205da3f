//! Charts module - Interactive and static chart rendering

pub mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
