use crate::ir::RelationKind;

use super::{PositionedNode, TimelineLink};

/// Formats a coordinate the way SVG consumers expect: shortest round-trip
/// digits, no negative zero.
pub(crate) fn fmt_coord(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Left,
    Right,
}

/// Ribbon from the target's bottom edge up to the source's top edge.
///
/// Both ends use the horizontal midpoint so a stroke of constant width
/// reads as a ribbon of constant thickness.
pub(crate) fn direct_link_path(source: &PositionedNode, target: &PositionedNode) -> String {
    let control_y = fmt_coord((target.y1 + source.y0) / 2.0);
    let tx = fmt_coord(target.x_mid);
    let sx = fmt_coord(source.x_mid);
    format!(
        "M {tx} {} C {tx} {control_y}, {sx} {control_y}, {sx} {}",
        fmt_coord(target.y1),
        fmt_coord(source.y0)
    )
}

/// Quadratic curve between midpoints. The control point shares the target's
/// y so the curve approaches the target horizontally.
pub(crate) fn cross_link_path(source: &PositionedNode, target: &PositionedNode) -> (String, f64) {
    let control_x = (source.x_mid + target.x_mid) / 2.0;
    let d = format!(
        "M {} {} Q {} {}, {} {}",
        fmt_coord(source.x_mid),
        fmt_coord(source.y_mid),
        fmt_coord(control_x),
        fmt_coord(target.y_mid),
        fmt_coord(target.x_mid),
        fmt_coord(target.y_mid)
    );
    (d, control_x)
}

pub fn arrow_direction(control_x: f64, target_x: f64) -> ArrowDirection {
    if control_x > target_x {
        ArrowDirection::Left
    } else {
        ArrowDirection::Right
    }
}

/// Arrowhead polygon with its tip at `(x, y)`, as three `x,y` pairs.
pub fn arrow_triangle(x: f64, y: f64, size: f64, direction: ArrowDirection) -> String {
    let long_side = (60.0f64).to_radians().cos() * size;
    let short_side = (30.0f64).to_radians().sin() * size;
    let (tip_x, base_x) = match direction {
        ArrowDirection::Left => (x - long_side, x + short_side),
        ArrowDirection::Right => (x + long_side, x - short_side),
    };
    format!(
        "{},{} {},{} {},{}",
        fmt_coord(tip_x),
        fmt_coord(y),
        fmt_coord(base_x),
        fmt_coord(y + long_side),
        fmt_coord(base_x),
        fmt_coord(y - long_side)
    )
}

/// Fills `d`, `stroke_width` and `triangle`. Links with an unresolved end,
/// and cross links when `show_cross_links` is off, are left without geometry.
pub(crate) fn route_links(
    nodes: &[PositionedNode],
    links: &mut [TimelineLink],
    show_cross_links: bool,
    triangle_size: f64,
) {
    for link in links.iter_mut() {
        link.d = None;
        link.stroke_width = None;
        link.triangle = None;

        let (Some(source), Some(target)) = (
            link.source_node.and_then(|idx| nodes.get(idx)),
            link.target_node.and_then(|idx| nodes.get(idx)),
        ) else {
            continue;
        };

        match link.kind {
            RelationKind::Direct => {
                link.d = Some(direct_link_path(source, target));
                link.stroke_width = Some(source.width);
            }
            RelationKind::Cross if show_cross_links => {
                let (d, control_x) = cross_link_path(source, target);
                let direction = arrow_direction(control_x, target.x_mid);
                link.d = Some(d);
                link.triangle = Some(arrow_triangle(
                    target.x_mid,
                    target.y_mid,
                    triangle_size,
                    direction,
                ));
            }
            RelationKind::Cross => {}
        }
    }
}
