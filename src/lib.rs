#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, ExclusionPolicy, LayoutConfig, RenderConfig, load_config};
pub use ir::{DataError, Entity, Filters, RelationField, RelationKind, parse_entities};
pub use layout::{LayoutParams, TimelineLayout, compute_canvas_size, compute_timeline_layout};
pub use render::render_svg;
pub use theme::Theme;

/// Everything a host needs besides the data and viewport.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Parses JSON entity data and runs one layout pass.
pub fn layout_with_options(
    data: &str,
    params: &LayoutParams,
    filters: Option<&Filters>,
    options: &RenderOptions,
) -> Result<TimelineLayout, DataError> {
    let entities = parse_entities(data)?;
    Ok(compute_timeline_layout(
        &entities,
        params,
        filters,
        &options.theme,
        &options.layout,
    ))
}

/// Parses JSON entity data, lays it out and renders SVG.
pub fn render_with_options(
    data: &str,
    params: &LayoutParams,
    filters: Option<&Filters>,
    options: &RenderOptions,
) -> Result<String, DataError> {
    let layout = layout_with_options(data, params, filters, options)?;
    Ok(render_svg(&layout, &options.theme, &options.layout))
}
