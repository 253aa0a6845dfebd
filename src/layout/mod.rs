mod canvas;
mod columns;
mod filter;
mod links;
mod placement;
mod routing;
mod scale;
pub(crate) mod types;
pub use canvas::*;
pub use routing::{ArrowDirection, arrow_direction, arrow_triangle};
pub use scale::{MAX_YEAR_TICKS, TimeScale, compute_years};
pub use types::*;

use crate::config::{ExclusionPolicy, LayoutConfig};
use crate::ir::{Entity, Filters};
use crate::theme::Theme;

use columns::pack_columns;
use filter::{group_by_category, normalize_entities};
use links::build_links;
use placement::SlotGeometry;
use routing::route_links;
use scale::VerticalSpan;

/// Runs one full layout pass: normalize, group, scale, pack, place, link, route.
///
/// Pure apart from logging; the same input always yields the same output.
/// An empty entity list is logged and yields an empty layout.
pub fn compute_timeline_layout(
    entities: &[Entity],
    params: &LayoutParams,
    filters: Option<&Filters>,
    theme: &Theme,
    config: &LayoutConfig,
) -> TimelineLayout {
    if entities.is_empty() {
        tracing::error!("no data to lay out");
        return TimelineLayout::empty(params);
    }
    let _span = tracing::debug_span!("timeline_layout", entities = entities.len()).entered();

    let mut normalized = normalize_entities(entities, params.max_year, filters, &theme.node_color);
    let mut removed: Vec<&Entity> = Vec::new();
    if config.exclusion_policy == ExclusionPolicy::Remove {
        let (kept, dropped): (Vec<_>, Vec<_>) =
            normalized.into_iter().partition(|item| !item.filter_out);
        removed = dropped.into_iter().map(|item| item.entity).collect();
        normalized = kept;
    }
    let groups = group_by_category(normalized);
    let category_count = groups.len();
    let scale = TimeScale::new(params.min_year, params.max_year, config.year_step, params.height);
    let node_width = config.node_width_for(params.is_mobile);

    let mut nodes = Vec::with_capacity(entities.len());
    let mut sources: Vec<&Entity> = Vec::with_capacity(entities.len());
    let mut categories = Vec::with_capacity(category_count);

    for (slot, (key, mut group)) in groups.into_iter().enumerate() {
        group.sort_by(|a, b| a.entity.year_start.total_cmp(&b.entity.year_start));
        let spans: Vec<VerticalSpan> = group
            .iter()
            .map(|item| VerticalSpan::new(&scale, item.entity.year_start, item.year_finish))
            .collect();
        let packed = pack_columns(&spans, config.node_gap);
        let geometry = SlotGeometry::new(
            params.width,
            category_count,
            slot,
            packed.lane_count,
            config.grid_gap,
        );
        tracing::debug!(
            category = key,
            slot,
            entities = group.len(),
            lanes = packed.lane_count,
            "packed category"
        );

        for ((item, span), &lane) in group.into_iter().zip(&spans).zip(&packed.lanes) {
            let x = geometry.place(lane, node_width);
            nodes.push(PositionedNode {
                id: item.entity.id.clone(),
                label: item.entity.title.clone().unwrap_or_else(|| item.entity.id.clone()),
                category: key.to_string(),
                year_start: item.entity.year_start,
                year_finish: item.year_finish,
                color: item.color,
                filter_out: item.filter_out,
                column: lane,
                x0: x.x0,
                x1: x.x1,
                y0: span.y0,
                y1: span.y1,
                x_mid: x.x_mid,
                y_mid: span.y_mid,
                width: node_width,
                height: span.height,
            });
            sources.push(item.entity);
        }

        let (x0, x1) = geometry.bounds();
        categories.push(CategoryLayout {
            key: key.to_string(),
            slot,
            lanes: packed.lane_count,
            x0,
            x1,
        });
    }

    let mut links = build_links(&sources, &removed);
    route_links(
        &nodes,
        &mut links,
        params.show_cross_links,
        config.link_triangle_size,
    );

    TimelineLayout {
        nodes,
        links,
        categories,
        years: compute_years(params.min_year, params.max_year, config.year_step),
        min_year: params.min_year,
        max_year: params.max_year,
        width: params.width,
        height: params.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{RelationField, RelationKind};

    fn params() -> LayoutParams {
        LayoutParams {
            min_year: 1000.0,
            max_year: 1100.0,
            width: 600.0,
            height: 500.0,
            is_mobile: false,
            show_cross_links: true,
        }
    }

    fn layout(
        entities: &[Entity],
        params: &LayoutParams,
        filters: Option<&Filters>,
    ) -> TimelineLayout {
        compute_timeline_layout(
            entities,
            params,
            filters,
            &Theme::modern(),
            &LayoutConfig::default(),
        )
    }

    #[test]
    fn overlapping_entities_split_into_two_lanes() {
        let entities = vec![
            Entity::new("A", "x", 1000.0, 1050.0),
            Entity::new("B", "x", 1040.0, 1100.0),
        ];
        let result = layout(&entities, &params(), None);
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].lanes, 2);
        let a = result.node("A").unwrap();
        let b = result.node("B").unwrap();
        assert_ne!(a.column, b.column);
        assert!(a.x_mid < b.x_mid);
    }

    #[test]
    fn direct_relation_yields_routed_ribbon() {
        let mut a = Entity::new("A", "x", 1000.0, 1020.0);
        a.relate(RelationField::Successors, "B");
        let entities = vec![a, Entity::new("B", "x", 1030.0, 1060.0)];
        let result = layout(&entities, &params(), None);
        assert_eq!(result.links.len(), 1);
        let link = &result.links[0];
        assert_eq!((link.source.as_str(), link.target.as_str()), ("A", "B"));
        assert_eq!(link.kind, RelationKind::Direct);
        assert!(link.d.as_deref().is_some_and(|d| d.starts_with('M')));
        assert_eq!(link.stroke_width, Some(LayoutConfig::default().node_width));
    }

    #[test]
    fn cross_links_stay_unrouted_when_hidden() {
        let mut a = Entity::new("A", "x", 1000.0, 1020.0);
        a.relate(RelationField::Influenced, "B");
        let mut b = Entity::new("B", "y", 1030.0, 1060.0);
        b.relate(RelationField::Influenced, "A");
        let entities = vec![a, b];
        let hidden = LayoutParams {
            show_cross_links: false,
            ..params()
        };
        let result = layout(&entities, &hidden, None);
        assert_eq!(result.links.len(), 2);
        assert!(
            result
                .links
                .iter()
                .all(|link| link.d.is_none() && link.triangle.is_none())
        );

        let shown = layout(&entities, &params(), None);
        assert!(shown.links.iter().all(|link| link.triangle.is_some()));
    }

    #[test]
    fn clamped_finish_maps_to_present_year() {
        let entities = vec![Entity::new("A", "x", 1050.0, 1300.0)];
        let result = layout(&entities, &params(), None);
        let node = result.node("A").unwrap();
        let scale = TimeScale::new(1000.0, 1100.0, LayoutConfig::default().year_step, 500.0);
        assert_eq!(node.year_finish, 1100.0);
        assert_eq!(node.y0, scale.apply(1100.0));
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let result = layout(&[], &params(), None);
        assert!(result.nodes.is_empty());
        assert!(result.links.is_empty());
    }

    #[test]
    fn categories_take_slots_in_sorted_order() {
        let entities = vec![
            Entity::new("z1", "zen", 1000.0, 1010.0),
            Entity::new("a1", "advaita", 1000.0, 1010.0),
        ];
        let result = layout(&entities, &params(), None);
        let keys: Vec<&str> = result.categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["advaita", "zen"]);
        assert!(result.node("a1").unwrap().x_mid < result.node("z1").unwrap().x_mid);
    }

    #[test]
    fn remove_policy_frees_lanes_of_excluded_entities() {
        let entities = vec![
            Entity::new("A", "x", 1000.0, 1050.0).with_facet("regions", "south"),
            Entity::new("B", "x", 1040.0, 1100.0),
        ];
        let mut filters = Filters::default();
        filters.exclude("regions", "south");

        let hidden = layout(&entities, &params(), Some(&filters));
        assert_eq!(hidden.categories[0].lanes, 2);
        assert!(hidden.node("A").unwrap().filter_out);

        let config = LayoutConfig {
            exclusion_policy: ExclusionPolicy::Remove,
            ..LayoutConfig::default()
        };
        let removed = compute_timeline_layout(
            &entities,
            &params(),
            Some(&filters),
            &Theme::modern(),
            &config,
        );
        assert_eq!(removed.nodes.len(), 1);
        assert_eq!(removed.categories[0].lanes, 1);
    }

    #[test]
    fn remove_policy_keeps_edges_declared_by_removed_entities() {
        let a = Entity::new("A", "x", 1000.0, 1020.0);
        let mut b = Entity::new("B", "x", 1030.0, 1060.0).with_facet("regions", "south");
        b.relate(RelationField::Predecessors, "A");
        let entities = vec![a, b];
        let mut filters = Filters::default();
        filters.exclude("regions", "south");
        let config = LayoutConfig {
            exclusion_policy: ExclusionPolicy::Remove,
            ..LayoutConfig::default()
        };

        let result = compute_timeline_layout(
            &entities,
            &params(),
            Some(&filters),
            &Theme::modern(),
            &config,
        );
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.links.len(), 1);
        let link = result.link("A", "B").unwrap();
        assert_eq!(link.source_node, Some(0));
        assert_eq!(link.target_node, None);
        assert!(!link.is_routed());
    }

    #[test]
    fn repeated_passes_are_identical() {
        let mut a = Entity::new("A", "x", 1000.0, 1050.0);
        a.relate(RelationField::Influenced, "C");
        let mut b = Entity::new("B", "x", 1040.0, 1100.0);
        b.relate(RelationField::Predecessors, "A");
        let entities = vec![a, b, Entity::new("C", "y", 1010.0, 1090.0)];
        assert_eq!(layout(&entities, &params(), None), layout(&entities, &params(), None));
    }
}
