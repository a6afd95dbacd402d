//! Draft builder for the single in-progress polygon outline.

use crate::error::{GeosketchError, Result};
use crate::models::{Coordinate, NewPolygon, Polygon};
use crate::store::AnnotationStore;

/// Points needed before a preview outline is shown
pub const PREVIEW_MIN_POINTS: usize = 2;

/// The unsaved polygon being drawn point by point.
///
/// An empty draft is the "no draft" state. Once the draft has reached
/// `PREVIEW_MIN_POINTS` an outline counts as drawn, and it stays drawn until
/// the next commit even if points are later removed.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    points: Vec<Coordinate>,
    outline_drawn: bool,
    revision: u64,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Incremented by every mutation; a cached preview is stale once this changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True once an outline has been drawn since the last commit
    pub fn has_outline(&self) -> bool {
        self.outline_drawn
    }

    /// Open preview outline, present only while the draft has at least two points
    pub fn preview(&self) -> Option<&[Coordinate]> {
        (self.points.len() >= PREVIEW_MIN_POINTS).then_some(self.points.as_slice())
    }

    pub fn add_point(&mut self, point: Coordinate) {
        self.points.push(point);
        self.touch();
    }

    /// Insert a point before `index`; `index == len` appends
    pub fn insert_at(&mut self, index: usize, point: Coordinate) -> Result<()> {
        if index > self.points.len() {
            return Err(GeosketchError::IndexOutOfRange { index, len: self.points.len() });
        }
        self.points.insert(index, point);
        self.touch();
        Ok(())
    }

    /// Drop the most recent point. A no-op on an empty draft.
    pub fn undo(&mut self) -> Option<Coordinate> {
        let removed = self.points.pop();
        self.touch();
        removed
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Coordinate> {
        if index >= self.points.len() {
            tracing::warn!(index, len = self.points.len(), "Invalid point index");
            return Err(GeosketchError::IndexOutOfRange { index, len: self.points.len() });
        }
        tracing::debug!(index, "Removing draft point");
        let removed = self.points.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Discard all points and the drawn-outline flag
    pub fn clear(&mut self) {
        self.points.clear();
        self.outline_drawn = false;
        self.revision += 1;
    }

    /// Hand the points to the store as a new polygon and reset the draft.
    ///
    /// Fails with `NoActiveDraft` if no outline was drawn since the last commit
    /// or no points remain.
    pub fn commit<'s>(&mut self, store: &'s mut AnnotationStore) -> Result<&'s Polygon> {
        if !self.outline_drawn || self.points.is_empty() {
            tracing::warn!("No polygon to save");
            return Err(GeosketchError::NoActiveDraft);
        }

        let points = std::mem::take(&mut self.points);
        tracing::debug!(points = points.len(), "Saving polygon");
        self.clear();
        Ok(store.create_polygon(NewPolygon::new(points)))
    }

    fn touch(&mut self) {
        if self.points.len() >= PREVIEW_MIN_POINTS {
            self.outline_drawn = true;
        }
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{palette_color, PolygonId};

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_commit_three_points() {
        let mut store = AnnotationStore::new();
        let mut draft = Draft::new();
        draft.add_point(c(10.0, 20.0));
        draft.add_point(c(10.0, 21.0));
        draft.add_point(c(11.0, 21.0));

        let polygon = draft.commit(&mut store).unwrap();
        assert_eq!(polygon.id, PolygonId(1));
        assert_eq!(polygon.points.len(), 3);
        assert_eq!(polygon.color, palette_color(1));
        assert_eq!(polygon.name, "Polygon 1");
        assert!(draft.is_empty());
        assert!(!draft.has_outline());
    }

    #[test]
    fn test_commit_without_outline_fails() {
        let mut store = AnnotationStore::new();
        let mut draft = Draft::new();
        assert!(matches!(draft.commit(&mut store), Err(GeosketchError::NoActiveDraft)));

        draft.add_point(c(1.0, 1.0));
        assert!(matches!(draft.commit(&mut store), Err(GeosketchError::NoActiveDraft)));
        assert_eq!(draft.len(), 1);
        assert_eq!(store.polygon_count(), 0);
    }

    #[test]
    fn test_outline_survives_undo_until_commit() {
        let mut store = AnnotationStore::new();
        let mut draft = Draft::new();
        draft.add_point(c(1.0, 1.0));
        draft.add_point(c(1.0, 2.0));
        assert!(draft.preview().is_some());

        draft.undo();
        assert!(draft.preview().is_none());
        assert!(draft.has_outline());

        let polygon = draft.commit(&mut store).unwrap();
        assert_eq!(polygon.points.len(), 1);
    }

    #[test]
    fn test_commit_fails_when_all_points_undone() {
        let mut store = AnnotationStore::new();
        let mut draft = Draft::new();
        draft.add_point(c(1.0, 1.0));
        draft.add_point(c(1.0, 2.0));
        draft.undo();
        draft.undo();
        assert!(draft.commit(&mut store).is_err());
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut draft = Draft::new();
        assert_eq!(draft.undo(), None);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_remove_at_bounds() {
        let mut draft = Draft::new();
        draft.add_point(c(1.0, 1.0));
        draft.add_point(c(2.0, 2.0));

        assert!(matches!(
            draft.remove_at(2),
            Err(GeosketchError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(draft.remove_at(0).unwrap(), c(1.0, 1.0));
        assert_eq!(draft.points(), &[c(2.0, 2.0)]);
    }

    #[test]
    fn test_every_mutation_bumps_revision() {
        let mut draft = Draft::new();
        let r0 = draft.revision();
        draft.add_point(c(1.0, 1.0));
        let r1 = draft.revision();
        draft.undo();
        let r2 = draft.revision();
        assert!(r0 < r1 && r1 < r2);
    }
}
