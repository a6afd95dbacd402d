use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use super::entity::{apply_non_empty, EntityPatch, PolygonId};

/// Fewest points a saved polygon may be edited down to
pub const MIN_POLYGON_POINTS: usize = 3;

/// A saved polygon annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Unique identifier
    pub id: PolygonId,

    /// Display name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Stroke and fill colour
    pub color: String,

    /// Outline vertices as an open ring (the first point is not repeated)
    pub points: Vec<Coordinate>,
}

impl Polygon {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Apply a patch, ignoring missing or empty fields. Returns true if anything changed.
    pub fn apply(&mut self, patch: &EntityPatch) -> bool {
        let name = apply_non_empty(&mut self.name, patch.name.as_deref());
        let color = apply_non_empty(&mut self.color, patch.color.as_deref());
        let description = apply_non_empty(&mut self.description, patch.description.as_deref());
        name || color || description
    }
}

/// Attributes for a polygon that has not been assigned an id yet.
///
/// Unset fields are filled in by the store from the allocated id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewPolygon {
    pub points: Vec<Coordinate>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl NewPolygon {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points, ..Default::default() }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
