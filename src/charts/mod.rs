//! Charts module - PNG rendering of the report views

mod bar;
mod choropleth;
mod colormap;
mod line;
mod renderer;

pub use renderer::StaticChartRenderer;
