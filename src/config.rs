use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whether filtered-out entities still occupy lanes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionPolicy {
    /// Flag only; excluded entities are packed and positioned like the rest.
    #[default]
    Hide,
    /// Drop excluded entities before packing.
    Remove,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub mobile_node_width: f64,
    /// Minimum vertical pixel gap between two entities sharing a lane.
    pub node_gap: f64,
    /// Horizontal gap between category slots.
    pub grid_gap: f64,
    pub year_step: f64,
    pub link_triangle_size: f64,
    pub year_height: f64,
    pub mobile_year_height: f64,
    pub exclusion_policy: ExclusionPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 10.0,
            mobile_node_width: 6.0,
            node_gap: 4.0,
            grid_gap: 20.0,
            year_step: 50.0,
            link_triangle_size: 8.0,
            year_height: 60.0,
            mobile_year_height: 40.0,
            exclusion_policy: ExclusionPolicy::Hide,
        }
    }
}

impl LayoutConfig {
    pub fn node_width_for(&self, is_mobile: bool) -> f64 {
        if is_mobile {
            self.mobile_node_width
        } else {
            self.node_width
        }
    }

    pub fn year_height_for(&self, is_mobile: bool) -> f64 {
        if is_mobile {
            self.mobile_year_height
        } else {
            self.year_height
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::modern();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    text_color: Option<String>,
    axis_color: Option<String>,
    node_color: Option<String>,
    cross_link_color: Option<String>,
    direct_link_opacity: Option<f32>,
    excluded_opacity: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    node_width: Option<f64>,
    mobile_node_width: Option<f64>,
    node_gap: Option<f64>,
    grid_gap: Option<f64>,
    year_step: Option<f64>,
    link_triangle_size: Option<f64>,
    year_height: Option<f64>,
    mobile_year_height: Option<f64>,
    exclusion_policy: Option<ExclusionPolicy>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => anyhow::bail!("unknown theme `{other}`"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.axis_color {
            config.theme.axis_color = v;
        }
        if let Some(v) = vars.node_color {
            config.theme.node_color = v;
        }
        if let Some(v) = vars.cross_link_color {
            config.theme.cross_link_color = v;
        }
        if let Some(v) = vars.direct_link_opacity {
            config.theme.direct_link_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = vars.excluded_opacity {
            config.theme.excluded_opacity = v.clamp(0.0, 1.0);
        }
    }
    config.render.background = config.theme.background.clone();

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.node_width {
            target.node_width = v;
        }
        if let Some(v) = layout.mobile_node_width {
            target.mobile_node_width = v;
        }
        if let Some(v) = layout.node_gap {
            target.node_gap = v;
        }
        if let Some(v) = layout.grid_gap {
            target.grid_gap = v;
        }
        if let Some(v) = layout.year_step {
            if v <= 0.0 {
                anyhow::bail!("layout.yearStep must be positive, got {v}");
            }
            target.year_step = v;
        }
        if let Some(v) = layout.link_triangle_size {
            target.link_triangle_size = v;
        }
        if let Some(v) = layout.year_height {
            target.year_height = v;
        }
        if let Some(v) = layout.mobile_year_height {
            target.mobile_year_height = v;
        }
        if let Some(v) = layout.exclusion_policy {
            target.exclusion_policy = v;
        }
    }

    Ok(config)
}
