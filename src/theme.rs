use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub axis_color: String,
    pub node_color: String,
    pub cross_link_color: String,
    pub direct_link_opacity: f32,
    pub excluded_opacity: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            text_color: "#333333".to_string(),
            axis_color: "#DDDDDD".to_string(),
            node_color: "#9370DB".to_string(),
            cross_link_color: "#333333".to_string(),
            direct_link_opacity: 0.35,
            excluded_opacity: 0.15,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            axis_color: "#E3E8F0".to_string(),
            node_color: "#7A8AA6".to_string(),
            cross_link_color: "#7A8AA6".to_string(),
            direct_link_opacity: 0.4,
            excluded_opacity: 0.12,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
