//! Edit session state machine.
//!
//! At most one entity, polygon or marker, is under interactive edit at a time.
//! Vertex and position changes are written straight into the store as they
//! happen; cancelling a session only drops the pending form fields and never
//! rolls geometry back.

use crate::error::{GeosketchError, Result};
use crate::models::{
    Coordinate, EntityPatch, EntityRef, MarkerId, PolygonId, MIN_POLYGON_POINTS,
};
use crate::store::AnnotationStore;

/// Which entity, if any, is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    EditingPolygon(PolygonId),
    EditingMarker(MarkerId),
}

impl SessionState {
    pub fn target(&self) -> Option<EntityRef> {
        match self {
            SessionState::Idle => None,
            SessionState::EditingPolygon(id) => Some(EntityRef::Polygon(*id)),
            SessionState::EditingMarker(id) => Some(EntityRef::Marker(*id)),
        }
    }
}

impl From<EntityRef> for SessionState {
    fn from(target: EntityRef) -> Self {
        match target {
            EntityRef::Polygon(id) => SessionState::EditingPolygon(id),
            EntityRef::Marker(id) => SessionState::EditingMarker(id),
        }
    }
}

/// Pending name/colour/description edits, prefilled from the entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub name: String,
    pub color: String,
    pub description: String,
}

impl EditForm {
    fn to_patch(&self) -> EntityPatch {
        EntityPatch {
            name: Some(self.name.clone()),
            color: Some(self.color.clone()),
            description: Some(self.description.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: SessionState,
    form: EditForm,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn target(&self) -> Option<EntityRef> {
        self.state.target()
    }

    pub fn is_active(&self) -> bool {
        self.state != SessionState::Idle
    }

    pub fn is_editing(&self, target: EntityRef) -> bool {
        self.target() == Some(target)
    }

    /// Pending field edits for the active target
    pub fn form(&self) -> Option<&EditForm> {
        self.is_active().then_some(&self.form)
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        if self.is_active() {
            Some(&mut self.form)
        } else {
            None
        }
    }

    /// Colour the working shape is drawn in: the pending colour if set
    pub fn working_color<'a>(&'a self, saved: &'a str) -> &'a str {
        if self.is_active() && !self.form.color.is_empty() {
            &self.form.color
        } else {
            saved
        }
    }

    /// Begin editing `target`.
    ///
    /// Re-requesting the current target is a no-op. Any other active session is
    /// cancelled first, even if `target` then turns out not to exist.
    pub fn start(&mut self, store: &AnnotationStore, target: EntityRef) -> Result<()> {
        if self.is_editing(target) {
            return Ok(());
        }
        if self.is_active() {
            self.cancel();
        }

        self.form = match target {
            EntityRef::Polygon(id) => {
                let polygon = store.get_polygon(id)?;
                EditForm {
                    name: polygon.name.clone(),
                    color: polygon.color.clone(),
                    description: polygon.description.clone(),
                }
            }
            EntityRef::Marker(id) => {
                let marker = store.get_marker(id)?;
                EditForm {
                    name: marker.name.clone(),
                    color: marker.color.clone(),
                    description: String::new(),
                }
            }
        };

        tracing::debug!(entity = %target, "Starting edit mode");
        self.state = target.into();
        Ok(())
    }

    /// Append a vertex to the polygon under edit
    pub fn add_vertex(&mut self, store: &mut AnnotationStore, point: Coordinate) -> Result<usize> {
        let id = self.polygon_target()?;
        let polygon = store.polygon_mut(id)?;
        polygon.points.push(point);
        tracing::debug!(polygon_id = %id, points = polygon.points.len(), "Added vertex");
        Ok(polygon.points.len())
    }

    /// Remove a vertex, refusing to go below the minimum polygon size
    pub fn remove_vertex(
        &mut self,
        store: &mut AnnotationStore,
        index: usize,
    ) -> Result<Coordinate> {
        let id = self.polygon_target()?;
        let polygon = store.polygon_mut(id)?;
        let len = polygon.points.len();

        if index >= len {
            return Err(GeosketchError::IndexOutOfRange { index, len });
        }
        if len <= MIN_POLYGON_POINTS {
            tracing::warn!(polygon_id = %id, points = len, "A polygon must have at least 3 points");
            return Err(GeosketchError::MinimumVerticesViolation {
                id: id.0,
                minimum: MIN_POLYGON_POINTS,
            });
        }

        Ok(polygon.points.remove(index))
    }

    /// Move an existing vertex
    pub fn drag_vertex(
        &mut self,
        store: &mut AnnotationStore,
        index: usize,
        point: Coordinate,
    ) -> Result<()> {
        let id = self.polygon_target()?;
        let polygon = store.polygon_mut(id)?;
        let len = polygon.points.len();
        let slot = polygon
            .points
            .get_mut(index)
            .ok_or(GeosketchError::IndexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Move the marker under edit
    pub fn drag_marker(&mut self, store: &mut AnnotationStore, position: Coordinate) -> Result<()> {
        let SessionState::EditingMarker(id) = self.state else {
            return Err(GeosketchError::NoActiveEdit);
        };
        store.marker_mut(id)?.position = position;
        Ok(())
    }

    /// Commit pending field edits and return to idle.
    ///
    /// Returns the target that was saved, or `None` when nothing was being edited.
    pub fn save(&mut self, store: &mut AnnotationStore) -> Result<Option<EntityRef>> {
        let Some(target) = self.target() else {
            return Ok(None);
        };

        tracing::debug!(entity = %target, "Saving edits");
        let patch = self.form.to_patch();
        self.reset();
        store.update(target, &patch)?;
        Ok(Some(target))
    }

    /// Leave the session without applying pending field edits.
    ///
    /// Geometry already changed during the session stays changed.
    pub fn cancel(&mut self) -> Option<EntityRef> {
        let target = self.target()?;
        tracing::debug!(entity = %target, "Canceling edit mode");
        self.reset();
        Some(target)
    }

    fn polygon_target(&self) -> Result<PolygonId> {
        match self.state {
            SessionState::EditingPolygon(id) => Ok(id),
            _ => Err(GeosketchError::NoActiveEdit),
        }
    }

    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.form = EditForm::default();
    }
}
