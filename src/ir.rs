use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

/// Same-category derivation vs. cross-category influence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Direct,
    Cross,
}

/// The four relation lists an entity may carry.
///
/// Source-bearing fields list neighbors the entity points at; target-bearing
/// fields list neighbors that point at the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationField {
    Successors,
    Predecessors,
    Influenced,
    InfluencedBy,
}

impl RelationField {
    /// Link pass order: direct fields before cross fields, source before target.
    pub const ALL: [RelationField; 4] = [
        RelationField::Successors,
        RelationField::Predecessors,
        RelationField::Influenced,
        RelationField::InfluencedBy,
    ];

    pub fn kind(self) -> RelationKind {
        match self {
            RelationField::Successors | RelationField::Predecessors => RelationKind::Direct,
            RelationField::Influenced | RelationField::InfluencedBy => RelationKind::Cross,
        }
    }

    pub fn is_source_bearing(self) -> bool {
        matches!(self, RelationField::Successors | RelationField::Influenced)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RelatedRef {
    Id(String),
    Object { id: String },
}

impl RelatedRef {
    pub fn id(&self) -> &str {
        match self {
            RelatedRef::Id(id) => id,
            RelatedRef::Object { id } => id,
        }
    }
}

impl From<&str> for RelatedRef {
    fn from(id: &str) -> Self {
        RelatedRef::Id(id.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tradition {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FacetValue {
    pub title: String,
}

/// One timeline item as read from the data source. Never mutated by layout.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub tradition: Tradition,
    pub year_start: f64,
    pub year_finish: f64,
    #[serde(default)]
    pub successors: Vec<RelatedRef>,
    #[serde(default)]
    pub predecessors: Vec<RelatedRef>,
    #[serde(default)]
    pub influenced: Vec<RelatedRef>,
    #[serde(default)]
    pub influenced_by: Vec<RelatedRef>,
    #[serde(default)]
    pub facets: BTreeMap<String, Vec<FacetValue>>,
}

impl Entity {
    pub fn new(id: &str, category: &str, year_start: f64, year_finish: f64) -> Self {
        Self {
            id: id.to_string(),
            title: None,
            tradition: Tradition {
                key: category.to_string(),
                ..Default::default()
            },
            year_start,
            year_finish,
            successors: Vec::new(),
            predecessors: Vec::new(),
            influenced: Vec::new(),
            influenced_by: Vec::new(),
            facets: BTreeMap::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.tradition.key
    }

    pub fn relations(&self, field: RelationField) -> &[RelatedRef] {
        match field {
            RelationField::Successors => &self.successors,
            RelationField::Predecessors => &self.predecessors,
            RelationField::Influenced => &self.influenced,
            RelationField::InfluencedBy => &self.influenced_by,
        }
    }

    pub fn relations_mut(&mut self, field: RelationField) -> &mut Vec<RelatedRef> {
        match field {
            RelationField::Successors => &mut self.successors,
            RelationField::Predecessors => &mut self.predecessors,
            RelationField::Influenced => &mut self.influenced,
            RelationField::InfluencedBy => &mut self.influenced_by,
        }
    }

    pub fn relate(&mut self, field: RelationField, id: &str) {
        self.relations_mut(field).push(RelatedRef::from(id));
    }

    pub fn with_facet(mut self, facet: &str, title: &str) -> Self {
        self.facets
            .entry(facet.to_string())
            .or_default()
            .push(FacetValue {
                title: title.to_string(),
            });
        self
    }
}

/// Year-range predicate plus per-facet exclusion sets.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub year_range: Option<(f64, f64)>,
    pub excluded: BTreeMap<String, BTreeSet<String>>,
}

impl Filters {
    pub fn exclude(&mut self, facet: &str, title: &str) {
        self.excluded
            .entry(facet.to_string())
            .or_default()
            .insert(title.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.year_range.is_none() && self.excluded.values().all(BTreeSet::is_empty)
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid JSON5 data: {0}")]
    Json5(#[from] json5::Error),
    #[error("data must be a list of entities or an object with a `nodes` list")]
    Shape,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DataDocument {
    List(Vec<Entity>),
    Wrapped { nodes: Vec<Entity> },
}

impl From<DataDocument> for Vec<Entity> {
    fn from(doc: DataDocument) -> Self {
        match doc {
            DataDocument::List(nodes) | DataDocument::Wrapped { nodes } => nodes,
        }
    }
}

pub fn parse_entities(input: &str) -> Result<Vec<Entity>, DataError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    if !value.is_array() && value.get("nodes").is_none() {
        return Err(DataError::Shape);
    }
    let doc: DataDocument = serde_json::from_value(value)?;
    Ok(doc.into())
}

pub fn parse_entities_json5(input: &str) -> Result<Vec<Entity>, DataError> {
    let doc: DataDocument = json5::from_str(input)?;
    Ok(doc.into())
}

pub fn load_entities(path: &Path) -> Result<Vec<Entity>, DataError> {
    let contents = std::fs::read_to_string(path)?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    if is_json5 {
        parse_entities_json5(&contents)
    } else {
        parse_entities(&contents)
    }
}
