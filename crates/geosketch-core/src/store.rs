//! Annotation store: the single owner of saved polygons and markers.
//!
//! Ids are allocated from two independent monotonically increasing counters
//! starting at 1. Deleting an entity never rewinds or recycles its counter.

use std::collections::BTreeMap;

use crate::error::{GeosketchError, Result};
use crate::models::{
    palette_color, EntityKind, EntityPatch, EntityRef, Marker, MarkerId, NewMarker, NewPolygon,
    Polygon, PolygonId,
};

#[derive(Debug, Clone)]
pub struct AnnotationStore {
    polygons: BTreeMap<PolygonId, Polygon>,
    markers: BTreeMap<MarkerId, Marker>,
    next_polygon_id: u64,
    next_marker_id: u64,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self {
            polygons: BTreeMap::new(),
            markers: BTreeMap::new(),
            next_polygon_id: 1,
            next_marker_id: 1,
        }
    }
}

impl AnnotationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next created polygon will receive
    pub fn next_polygon_id(&self) -> PolygonId {
        PolygonId(self.next_polygon_id)
    }

    /// Id the next created marker will receive
    pub fn next_marker_id(&self) -> MarkerId {
        MarkerId(self.next_marker_id)
    }

    /// Create a polygon, filling the default name and palette colour from its id.
    ///
    /// Empty name or colour values count as unset.
    pub fn create_polygon(&mut self, new: NewPolygon) -> &Polygon {
        let id = PolygonId(self.next_polygon_id);
        self.next_polygon_id += 1;

        let polygon = Polygon {
            id,
            name: non_empty(new.name).unwrap_or_else(|| format!("Polygon {}", id)),
            description: new.description.unwrap_or_default(),
            color: non_empty(new.color).unwrap_or_else(|| palette_color(id.0).to_string()),
            points: new.points,
        };

        tracing::debug!(polygon_id = %id, points = polygon.points.len(), "Created polygon");
        self.polygons.entry(id).or_insert(polygon)
    }

    /// Create a marker, filling the default name and palette colour from its id
    pub fn create_marker(&mut self, new: NewMarker) -> &Marker {
        let id = MarkerId(self.next_marker_id);
        self.next_marker_id += 1;

        let marker = Marker {
            id,
            name: non_empty(new.name).unwrap_or_else(|| format!("Marker {}", id)),
            color: non_empty(new.color).unwrap_or_else(|| palette_color(id.0).to_string()),
            position: new.position,
        };

        tracing::debug!(marker_id = %id, position = %marker.position, "Created marker");
        self.markers.entry(id).or_insert(marker)
    }

    pub fn polygon(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(&id)
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    /// Look up a polygon, reporting `NotFound` for stale ids
    pub fn get_polygon(&self, id: PolygonId) -> Result<&Polygon> {
        self.polygon(id).ok_or(GeosketchError::NotFound { kind: EntityKind::Polygon, id: id.0 })
    }

    /// Look up a marker, reporting `NotFound` for stale ids
    pub fn get_marker(&self, id: MarkerId) -> Result<&Marker> {
        self.marker(id).ok_or(GeosketchError::NotFound { kind: EntityKind::Marker, id: id.0 })
    }

    pub(crate) fn polygon_mut(&mut self, id: PolygonId) -> Result<&mut Polygon> {
        self.polygons
            .get_mut(&id)
            .ok_or(GeosketchError::NotFound { kind: EntityKind::Polygon, id: id.0 })
    }

    pub(crate) fn marker_mut(&mut self, id: MarkerId) -> Result<&mut Marker> {
        self.markers
            .get_mut(&id)
            .ok_or(GeosketchError::NotFound { kind: EntityKind::Marker, id: id.0 })
    }

    pub fn contains(&self, target: EntityRef) -> bool {
        match target {
            EntityRef::Polygon(id) => self.polygons.contains_key(&id),
            EntityRef::Marker(id) => self.markers.contains_key(&id),
        }
    }

    /// Saved polygons in creation order
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.values()
    }

    /// Saved markers in creation order
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.markers.is_empty()
    }

    pub fn delete_polygon(&mut self, id: PolygonId) -> Result<Polygon> {
        match self.polygons.remove(&id) {
            Some(polygon) => {
                tracing::debug!(polygon_id = %id, "Deleted polygon");
                Ok(polygon)
            }
            None => {
                tracing::warn!(polygon_id = %id, "Polygon not found");
                Err(GeosketchError::NotFound { kind: EntityKind::Polygon, id: id.0 })
            }
        }
    }

    pub fn delete_marker(&mut self, id: MarkerId) -> Result<Marker> {
        match self.markers.remove(&id) {
            Some(marker) => {
                tracing::debug!(marker_id = %id, "Deleted marker");
                Ok(marker)
            }
            None => {
                tracing::warn!(marker_id = %id, "Marker not found");
                Err(GeosketchError::NotFound { kind: EntityKind::Marker, id: id.0 })
            }
        }
    }

    /// Apply the provided, non-empty patch fields. Returns true if anything changed.
    pub fn update(&mut self, target: EntityRef, patch: &EntityPatch) -> Result<bool> {
        let changed = match target {
            EntityRef::Polygon(id) => self.polygon_mut(id)?.apply(patch),
            EntityRef::Marker(id) => self.marker_mut(id)?.apply(patch),
        };
        if changed {
            tracing::debug!(entity = %target, "Updated entity");
        }
        Ok(changed)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn square() -> Vec<Coordinate> {
        [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
            .iter()
            .map(|&(lat, lng)| Coordinate::new(lat, lng).unwrap())
            .collect()
    }

    #[test]
    fn test_defaults_follow_id() {
        let mut store = AnnotationStore::new();
        let first = store.create_polygon(NewPolygon::new(square())).clone();
        let second = store.create_polygon(NewPolygon::new(square())).clone();

        assert_eq!(first.id, PolygonId(1));
        assert_eq!(first.name, "Polygon 1");
        assert_eq!(first.color, "#FF5733");
        assert_eq!(second.id, PolygonId(2));
        assert_eq!(second.color, "#33FF57");
        assert_eq!(second.description, "");
    }

    #[test]
    fn test_explicit_attributes_win() {
        let mut store = AnnotationStore::new();
        let polygon = store.create_polygon(
            NewPolygon::new(square()).name("Orchard").color("#000000").description("apples"),
        );
        assert_eq!(polygon.name, "Orchard");
        assert_eq!(polygon.color, "#000000");
        assert_eq!(polygon.description, "apples");
    }

    #[test]
    fn test_empty_attributes_fall_back() {
        let mut store = AnnotationStore::new();
        let marker = store.create_marker(
            NewMarker::new(Coordinate::new(1.0, 2.0).unwrap()).name("").color(""),
        );
        assert_eq!(marker.name, "Marker 1");
        assert_eq!(marker.color, "#FF5733");
    }

    #[test]
    fn test_ids_never_reused() {
        let mut store = AnnotationStore::new();
        let id = store.create_polygon(NewPolygon::new(square())).id;
        store.delete_polygon(id).unwrap();
        let next = store.create_polygon(NewPolygon::new(square()));
        assert_eq!(next.id, PolygonId(2));
        // colour is frozen to the id, not to the number of live polygons
        assert_eq!(next.color, "#33FF57");
    }

    #[test]
    fn test_id_spaces_independent() {
        let mut store = AnnotationStore::new();
        store.create_polygon(NewPolygon::new(square()));
        store.create_polygon(NewPolygon::new(square()));
        let marker = store.create_marker(NewMarker::new(Coordinate::new(0.0, 0.0).unwrap()));
        assert_eq!(marker.id, MarkerId(1));
        assert_eq!(store.next_polygon_id(), PolygonId(3));
        assert_eq!(store.next_marker_id(), MarkerId(2));
    }

    #[test]
    fn test_delete_missing_reports_not_found() {
        let mut store = AnnotationStore::new();
        store.create_polygon(NewPolygon::new(square()));
        let err = store.delete_polygon(PolygonId(9)).unwrap_err();
        assert!(matches!(err, GeosketchError::NotFound { kind: EntityKind::Polygon, id: 9 }));
        assert_eq!(store.polygon_count(), 1);
        assert!(store.delete_marker(MarkerId(1)).is_err());
    }

    #[test]
    fn test_update_ignores_empty_fields() {
        let mut store = AnnotationStore::new();
        let id = store.create_polygon(NewPolygon::new(square())).id;

        let changed = store
            .update(EntityRef::Polygon(id), &EntityPatch::new().name("").color("#123456"))
            .unwrap();
        assert!(changed);

        let polygon = store.polygon(id).unwrap();
        assert_eq!(polygon.name, "Polygon 1");
        assert_eq!(polygon.color, "#123456");

        let unchanged = store.update(EntityRef::Polygon(id), &EntityPatch::new()).unwrap();
        assert!(!unchanged);
    }

    #[test]
    fn test_update_missing_entity() {
        let mut store = AnnotationStore::new();
        let result = store.update(EntityRef::Marker(MarkerId(4)), &EntityPatch::new().name("x"));
        assert!(matches!(
            result,
            Err(GeosketchError::NotFound { kind: EntityKind::Marker, id: 4 })
        ));
    }

    #[test]
    fn test_iteration_in_creation_order() {
        let mut store = AnnotationStore::new();
        for _ in 0..3 {
            store.create_polygon(NewPolygon::new(square()));
        }
        store.delete_polygon(PolygonId(2)).unwrap();
        let ids: Vec<_> = store.polygons().map(|p| p.id).collect();
        assert_eq!(ids, vec![PolygonId(1), PolygonId(3)]);
    }
}
