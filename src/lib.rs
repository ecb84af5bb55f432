//! Interactive Nightingale rose charts.
//!
//! Each item is a wedge whose angular width and radial length are set
//! independently. The crate lays the chart out, builds an SVG for it, and
//! turns pointer and keyboard input into item updates.

pub mod config;
pub mod errors;
pub mod interact;
pub mod log;
pub mod model;
pub mod render;
pub mod types;

pub use config::{ChartConfig, ImportReport, export, import};
pub use errors::{ConfigError, EditError, RenderError};
pub use interact::{Controller, InteractionSurface, PointerEvent, Viewport};
pub use model::{Chart, ChartSettings, DataItem, ItemId, ItemPatch, ItemSink};
pub use render::{RenderOptions, Scene, layout, render};

/// Render a chart to SVG, without handles.
pub fn render_svg(chart: &Chart) -> Result<String, miette::Report> {
    render_svg_with(chart.items(), &chart.settings, &RenderOptions::default())
}

/// Render items and settings to SVG with explicit options.
pub fn render_svg_with(
    items: &[DataItem],
    settings: &ChartSettings,
    options: &RenderOptions,
) -> Result<String, miette::Report> {
    let scene = render(items, settings, options);
    if let Some(advisory) = &scene.advisory {
        log::warn!(%advisory, "rendering anyway");
    }
    Ok(render::svg::to_svg(&scene)?)
}
