use crate::layout::{CategoryLayout, TimelineLayout};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub min_year: f64,
    pub max_year: f64,
    pub categories: Vec<CategoryLayout>,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub category: String,
    pub column: usize,
    /// `[x0, y0, x1, y1]`
    pub rect: [f64; 4],
    pub mid: [f64; 2],
    pub color: String,
    pub filter_out: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDump {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relation: String,
    pub resolved: bool,
    pub routed: bool,
    pub d: Option<String>,
    pub stroke_width: Option<f64>,
    pub triangle: Option<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &TimelineLayout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                category: node.category.clone(),
                column: node.column,
                rect: [node.x0, node.y0, node.x1, node.y1],
                mid: [node.x_mid, node.y_mid],
                color: node.color.clone(),
                filter_out: node.filter_out,
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| LinkDump {
                source: link.source.clone(),
                target: link.target.clone(),
                relation: format!("{:?}", link.relation),
                resolved: link.source_node.is_some() && link.target_node.is_some(),
                routed: link.is_routed(),
                d: link.d.clone(),
                stroke_width: link.stroke_width,
                triangle: link.triangle.clone(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            min_year: layout.min_year,
            max_year: layout.max_year,
            categories: layout.categories.clone(),
            nodes,
            links,
        }
    }
}

pub fn write_layout_dump(output: Option<&Path>, layout: &TimelineLayout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &dump)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Entity, RelationField};
    use crate::layout::{LayoutParams, compute_timeline_layout};
    use crate::theme::Theme;

    #[test]
    fn dump_marks_unresolved_links() {
        let mut a = Entity::new("a", "x", 1000.0, 1040.0);
        a.relate(RelationField::Successors, "missing");
        let params = LayoutParams {
            min_year: 1000.0,
            max_year: 1100.0,
            width: 200.0,
            height: 200.0,
            is_mobile: true,
            show_cross_links: false,
        };
        let layout = compute_timeline_layout(
            &[a],
            &params,
            None,
            &Theme::modern(),
            &LayoutConfig::default(),
        );
        let dump = LayoutDump::from_layout(&layout);
        assert_eq!(dump.nodes.len(), 1);
        assert_eq!(dump.nodes[0].rect[2] - dump.nodes[0].rect[0], 6.0);
        assert!(!dump.links[0].resolved);
        assert!(!dump.links[0].routed);
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["links"][0]["type"], "Successors");
        assert!(json["links"][0]["d"].is_null());
    }
}
