use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::ir::Entity;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub categories: BTreeSet<String>,
    /// Header color per category: the first primary (else secondary) color seen.
    pub colors: BTreeMap<String, String>,
    pub entity_count: usize,
    pub earliest_start: Option<f64>,
    pub latest_finish: Option<f64>,
}

pub fn compute_stats(entities: &[Entity]) -> DatasetStats {
    let mut stats = DatasetStats {
        entity_count: entities.len(),
        ..Default::default()
    };
    for entity in entities {
        stats.categories.insert(entity.category().to_string());
        let tradition = &entity.tradition;
        if let Some(color) = tradition
            .primary_color
            .as_ref()
            .or(tradition.secondary_color.as_ref())
        {
            stats
                .colors
                .entry(entity.category().to_string())
                .or_insert_with(|| color.clone());
        }
        stats.earliest_start = Some(
            stats
                .earliest_start
                .map_or(entity.year_start, |v| v.min(entity.year_start)),
        );
        stats.latest_finish = Some(
            stats
                .latest_finish
                .map_or(entity.year_finish, |v| v.max(entity.year_finish)),
        );
    }
    stats
}

/// One view per category, in slot order.
pub fn category_views(stats: &DatasetStats) -> Vec<String> {
    stats.categories.iter().cloned().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSize {
    pub min_year: f64,
    pub max_year: f64,
    pub canvas_height: f64,
}

/// Time bounds and canvas height for the full, unfiltered dataset.
///
/// `min_year` is floored to `year_step`; `max_year` is the present year when
/// known, else the latest finish. Returns `None` for an empty dataset.
pub fn compute_canvas_size(
    entities: &[Entity],
    year_height: f64,
    present_year: Option<f64>,
    year_step: f64,
) -> Option<CanvasSize> {
    let stats = compute_stats(entities);
    let earliest = stats.earliest_start?;
    let latest = stats.latest_finish?;
    let step = if year_step > 0.0 { year_step } else { 1.0 };
    let min_year = (earliest / step).floor() * step;
    let max_year = present_year.unwrap_or(latest).max(min_year);
    let steps = ((max_year - min_year) / step).ceil() + 1.0;
    Some(CanvasSize {
        min_year,
        max_year,
        canvas_height: steps * year_height,
    })
}
