use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::ir::RelationKind;
use crate::layout::{TimeScale, TimelineLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &TimelineLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    let scale = TimeScale::new(layout.min_year, layout.max_year, config.year_step, height);
    for year in &layout.years {
        let y = scale.apply(year.value);
        svg.push_str(&format!(
            "<line x1=\"0\" y1=\"{y:.2}\" x2=\"{width:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            theme.axis_color
        ));
        svg.push_str(&format!(
            "<text x=\"2\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            y - 2.0,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.text_color,
            year.value
        ));
    }

    for link in &layout.links {
        let Some(d) = link.d.as_deref() else {
            continue;
        };
        let endpoints = [link.source_node, link.target_node];
        let dimmed = endpoints
            .iter()
            .flatten()
            .filter_map(|idx| layout.nodes.get(*idx))
            .any(|node| node.filter_out);
        match link.kind {
            RelationKind::Direct => {
                let color = link
                    .source_node
                    .and_then(|idx| layout.nodes.get(idx))
                    .map(|node| node.color.as_str())
                    .unwrap_or(theme.node_color.as_str());
                let opacity = if dimmed {
                    theme.excluded_opacity
                } else {
                    theme.direct_link_opacity
                };
                svg.push_str(&format!(
                    "<path d=\"{d}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{}\" stroke-opacity=\"{opacity}\"/>",
                    link.stroke_width.unwrap_or(1.0)
                ));
            }
            RelationKind::Cross => {
                let opacity = if dimmed { theme.excluded_opacity } else { 1.0 };
                svg.push_str(&format!(
                    "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" stroke-opacity=\"{opacity}\"/>",
                    theme.cross_link_color
                ));
                if let Some(points) = link.triangle.as_deref() {
                    svg.push_str(&format!(
                        "<polygon points=\"{points}\" fill=\"{}\" stroke=\"none\" fill-opacity=\"{opacity}\"/>",
                        theme.cross_link_color
                    ));
                }
            }
        }
    }

    for node in &layout.nodes {
        let opacity = if node.filter_out {
            theme.excluded_opacity
        } else {
            1.0
        };
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{}\" fill-opacity=\"{opacity}\"><title>{}</title></rect>",
            node.x0,
            node.y0,
            node.width,
            node.height,
            node.width / 2.0,
            node.color,
            escape_xml(&node.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
