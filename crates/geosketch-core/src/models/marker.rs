use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use super::entity::{apply_non_empty, EntityPatch, MarkerId};

/// A saved point marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub name: String,
    pub color: String,
    pub position: Coordinate,
}

impl Marker {
    /// Apply a patch, ignoring missing or empty fields. Markers carry no description.
    pub fn apply(&mut self, patch: &EntityPatch) -> bool {
        let name = apply_non_empty(&mut self.name, patch.name.as_deref());
        let color = apply_non_empty(&mut self.color, patch.color.as_deref());
        name || color
    }
}

/// Attributes for a marker that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewMarker {
    pub position: Coordinate,
    pub name: Option<String>,
    pub color: Option<String>,
}

impl NewMarker {
    pub fn new(position: Coordinate) -> Self {
        Self { position, name: None, color: None }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
