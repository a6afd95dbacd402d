use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a saved polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PolygonId(pub u64);

/// Unique identifier for a saved marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity kind classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Polygon,
    Marker,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Polygon => write!(f, "Polygon"),
            EntityKind::Marker => write!(f, "Marker"),
        }
    }
}

/// Reference to a stored entity of either kind.
///
/// The two id spaces are independent, so `Polygon(PolygonId(1))` and
/// `Marker(MarkerId(1))` name different entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Polygon(PolygonId),
    Marker(MarkerId),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Polygon(_) => EntityKind::Polygon,
            EntityRef::Marker(_) => EntityKind::Marker,
        }
    }

    /// Raw numeric id, meaningful only together with `kind()`
    pub fn raw_id(&self) -> u64 {
        match self {
            EntityRef::Polygon(id) => id.0,
            EntityRef::Marker(id) => id.0,
        }
    }
}

impl From<PolygonId> for EntityRef {
    fn from(id: PolygonId) -> Self {
        EntityRef::Polygon(id)
    }
}

impl From<MarkerId> for EntityRef {
    fn from(id: MarkerId) -> Self {
        EntityRef::Marker(id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.raw_id())
    }
}

/// Partial update of an entity's descriptive fields.
///
/// Fields left as `None`, or set to an empty string, keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl EntityPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True if applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.color, &self.description]
            .iter()
            .all(|field| field.as_deref().map_or(true, str::is_empty))
    }
}

/// Replace `target` with `value` unless the value is missing or empty
pub(crate) fn apply_non_empty(target: &mut String, value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.is_empty() => {
            *target = v.to_string();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_display() {
        assert_eq!(EntityRef::Polygon(PolygonId(3)).to_string(), "Polygon 3");
        assert_eq!(EntityRef::from(MarkerId(2)).to_string(), "Marker 2");
    }

    #[test]
    fn test_id_spaces_are_distinct() {
        let p = EntityRef::from(PolygonId(1));
        let m = EntityRef::from(MarkerId(1));
        assert_ne!(p, m);
        assert_eq!(p.raw_id(), m.raw_id());
    }

    #[test]
    fn test_patch_emptiness() {
        assert!(EntityPatch::new().is_empty());
        assert!(EntityPatch::new().name("").color("").is_empty());
        assert!(!EntityPatch::new().description("notes").is_empty());
    }

    #[test]
    fn test_apply_non_empty() {
        let mut name = "Polygon 1".to_string();
        assert!(!apply_non_empty(&mut name, Some("")));
        assert!(!apply_non_empty(&mut name, None));
        assert_eq!(name, "Polygon 1");
        assert!(apply_non_empty(&mut name, Some("Field")));
        assert_eq!(name, "Field");
    }
}
