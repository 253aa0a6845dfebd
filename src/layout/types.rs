use serde::Serialize;

use crate::ir::{RelationField, RelationKind};

/// Layout output for one input entity, tagged with the entity id.
///
/// Rectangle corners in canvas pixels:
///
/// ```text
/// (x0, y0) ---- (x1, y0)
///     |             |
/// (x0, y1) ---- (x1, y1)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    pub category: String,
    pub year_start: f64,
    /// Finish year after clamping to the present.
    pub year_finish: f64,
    pub color: String,
    pub filter_out: bool,
    pub column: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub x_mid: f64,
    pub y_mid: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relation: RelationField,
    pub kind: RelationKind,
    /// Index into [`TimelineLayout::nodes`]; `None` when the id is unknown.
    pub source_node: Option<usize>,
    pub target_node: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triangle: Option<String>,
}

impl TimelineLink {
    pub fn is_routed(&self) -> bool {
        self.d.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Year {
    pub value: f64,
    pub idx: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLayout {
    pub key: String,
    pub slot: usize,
    pub lanes: usize,
    pub x0: f64,
    pub x1: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<TimelineLink>,
    pub categories: Vec<CategoryLayout>,
    pub years: Vec<Year>,
    pub min_year: f64,
    pub max_year: f64,
    pub width: f64,
    pub height: f64,
}

impl TimelineLayout {
    pub fn empty(params: &LayoutParams) -> Self {
        Self {
            min_year: params.min_year,
            max_year: params.max_year,
            width: params.width,
            height: params.height,
            ..Default::default()
        }
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn link(&self, source: &str, target: &str) -> Option<&TimelineLink> {
        self.links
            .iter()
            .find(|link| link.source == source && link.target == target)
    }
}

/// Viewport and time bounds for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub min_year: f64,
    pub max_year: f64,
    pub width: f64,
    pub height: f64,
    pub is_mobile: bool,
    pub show_cross_links: bool,
}
