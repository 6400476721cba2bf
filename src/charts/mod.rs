//! Charts module - Static chart rendering

mod renderer;
mod style;

pub use renderer::StaticChartRenderer;
