use std::collections::{HashMap, HashSet};

use crate::ir::{Entity, RelationField};

use super::TimelineLink;

/// Builds the deduplicated link set from the relation lists of `nodes` and
/// `removed`.
///
/// `nodes[i]` must correspond to output node `i`. Entities in `removed` have
/// no output node: their relation lists still yield links, with their own end
/// left `None`. Neighbors resolve only against `nodes`.
pub(crate) fn build_links(nodes: &[&Entity], removed: &[&Entity]) -> Vec<TimelineLink> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(idx, entity)| (entity.id.as_str(), idx))
        .collect();
    let removed_ids: HashSet<&str> = removed.iter().map(|entity| entity.id.as_str()).collect();

    let mut links = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut unresolved = 0usize;

    let owners = nodes
        .iter()
        .enumerate()
        .map(|(idx, entity)| (*entity, Some(idx)))
        .chain(removed.iter().map(|entity| (*entity, None)));

    for (entity, owner_idx) in owners {
        for field in RelationField::ALL {
            for related in entity.relations(field) {
                let neighbor = related.id();
                let neighbor_idx = index.get(neighbor).copied();
                let (source, target, source_node, target_node) = if field.is_source_bearing() {
                    (entity.id.as_str(), neighbor, owner_idx, neighbor_idx)
                } else {
                    (neighbor, entity.id.as_str(), neighbor_idx, owner_idx)
                };
                if !seen.insert((source, target)) {
                    continue;
                }
                if source_node.is_none() || target_node.is_none() {
                    unresolved += 1;
                }
                if neighbor_idx.is_none() && !removed_ids.contains(neighbor) {
                    tracing::warn!(
                        entity = %entity.id,
                        neighbor,
                        field = ?field,
                        "relation points at unknown entity"
                    );
                }
                links.push(TimelineLink {
                    source: source.to_string(),
                    target: target.to_string(),
                    relation: field,
                    kind: field.kind(),
                    source_node,
                    target_node,
                    d: None,
                    stroke_width: None,
                    triangle: None,
                });
            }
        }
    }

    tracing::debug!(links = links.len(), unresolved, "built timeline links");
    links
}
