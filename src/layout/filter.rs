use std::collections::BTreeMap;

use crate::ir::{Entity, Filters};

#[derive(Debug, Clone)]
pub(crate) struct NormalizedEntity<'a> {
    pub entity: &'a Entity,
    pub year_finish: f64,
    pub color: String,
    pub filter_out: bool,
}

/// The year range is tested against the raw, unclamped finish year.
pub(crate) fn is_filtered_out(entity: &Entity, filters: &Filters) -> bool {
    if let Some((from_year, to_year)) = filters.year_range {
        if entity.year_start < from_year || entity.year_finish > to_year {
            return true;
        }
    }
    filters.excluded.iter().any(|(facet, excluded)| {
        entity
            .facets
            .get(facet)
            .is_some_and(|values| values.iter().any(|value| excluded.contains(&value.title)))
    })
}

pub(crate) fn resolve_color(entity: &Entity, default_color: &str) -> String {
    entity
        .tradition
        .secondary_color
        .as_deref()
        .or(entity.tradition.primary_color.as_deref())
        .unwrap_or(default_color)
        .to_string()
}

pub(crate) fn normalize_entities<'a>(
    entities: &'a [Entity],
    max_year: f64,
    filters: Option<&Filters>,
    default_color: &str,
) -> Vec<NormalizedEntity<'a>> {
    entities
        .iter()
        .map(|entity| NormalizedEntity {
            entity,
            year_finish: entity.year_finish.min(max_year),
            color: resolve_color(entity, default_color),
            filter_out: filters.is_some_and(|filters| is_filtered_out(entity, filters)),
        })
        .collect()
}

/// Keys come back in lexicographic order, which fixes slot assignment.
pub(crate) fn group_by_category<'a>(
    normalized: Vec<NormalizedEntity<'a>>,
) -> BTreeMap<&'a str, Vec<NormalizedEntity<'a>>> {
    let mut groups: BTreeMap<&'a str, Vec<NormalizedEntity<'a>>> = BTreeMap::new();
    for item in normalized {
        let entity: &'a Entity = item.entity;
        groups.entry(entity.category()).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_range_excludes_partially_outside_entities() {
        let mut filters = Filters::default();
        filters.year_range = Some((1000.0, 1100.0));
        assert!(!is_filtered_out(&Entity::new("a", "x", 1000.0, 1100.0), &filters));
        assert!(is_filtered_out(&Entity::new("b", "x", 990.0, 1050.0), &filters));
        assert!(is_filtered_out(&Entity::new("c", "x", 1050.0, 1101.0), &filters));
    }

    #[test]
    fn facet_exclusion_matches_any_value() {
        let mut filters = Filters::default();
        filters.exclude("regions", "south");
        let kept = Entity::new("a", "x", 1.0, 2.0).with_facet("regions", "north");
        let dropped = Entity::new("b", "x", 1.0, 2.0)
            .with_facet("regions", "north")
            .with_facet("regions", "south");
        let unrelated = Entity::new("c", "x", 1.0, 2.0).with_facet("schools", "south");
        assert!(!is_filtered_out(&kept, &filters));
        assert!(is_filtered_out(&dropped, &filters));
        assert!(!is_filtered_out(&unrelated, &filters));
    }

    #[test]
    fn clamps_finish_and_keeps_every_entity() {
        let entities = vec![
            Entity::new("a", "x", 1900.0, 2100.0),
            Entity::new("b", "x", 1900.0, 1950.0),
        ];
        let mut filters = Filters::default();
        filters.year_range = Some((1950.0, 2000.0));
        let normalized = normalize_entities(&entities, 2024.0, Some(&filters), "#999");
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].year_finish, 2024.0);
        assert_eq!(normalized[1].year_finish, 1950.0);
        assert!(normalized.iter().all(|n| n.filter_out));
        assert_eq!(entities[0].year_finish, 2100.0);
    }

    #[test]
    fn color_falls_back_through_tradition() {
        let mut entity = Entity::new("a", "x", 1.0, 2.0);
        assert_eq!(resolve_color(&entity, "#999"), "#999");
        entity.tradition.primary_color = Some("#111".to_string());
        assert_eq!(resolve_color(&entity, "#999"), "#111");
        entity.tradition.secondary_color = Some("#222".to_string());
        assert_eq!(resolve_color(&entity, "#999"), "#222");
    }

    #[test]
    fn groups_in_sorted_key_order() {
        let entities = vec![
            Entity::new("a", "zen", 1.0, 2.0),
            Entity::new("b", "advaita", 1.0, 2.0),
            Entity::new("c", "zen", 3.0, 4.0),
        ];
        let groups = group_by_category(normalize_entities(&entities, 10.0, None, "#999"));
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["advaita", "zen"]);
        assert_eq!(groups["zen"].len(), 2);
    }
}
