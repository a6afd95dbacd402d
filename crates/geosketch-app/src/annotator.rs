//! The annotation controller.
//!
//! Every front-end event enters through one `Annotator` method and runs to
//! completion before the next, so no locking is needed around the state.

use std::io::Read;

use geosketch_core::config::{LayeredConfig, Settings};
use geosketch_core::error::{GeosketchError, Result};
use geosketch_core::models::{
    Basemap, Coordinate, EntityKind, EntityPatch, EntityRef, MarkerId, NewMarker, PolygonId,
};
use geosketch_core::ports::{ExportFile, ExportSink};
use geosketch_core::session::{EditForm, SessionState};
use geosketch_geo::interchange::{self, ImportReport};
use geosketch_geo::spatial::{self, Bounds};

use crate::commands::{Command, Outcome};
use crate::export::{file_name_for, geojson_file, ALL_ANNOTATIONS_STEM, GEOJSON_EXTENSION};
use crate::keys::{KeyBindings, KeyPress};
use crate::state::AppState;
use crate::view::{render, ViewModel};

#[derive(Debug, Clone, Default)]
pub struct Annotator {
    state: AppState,
    keys: KeyBindings,
}

impl Annotator {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
            keys: KeyBindings::default(),
        }
    }

    pub fn from_config(config: &LayeredConfig) -> Self {
        Self::new(config.settings())
    }

    pub fn with_key_bindings(mut self, keys: KeyBindings) -> Self {
        self.keys = keys;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Project the current state for the rendering layer
    pub fn view(&self) -> ViewModel {
        render(&self.state)
    }

    // Map clicks

    /// Route a map click to the edit session, the draft, or marker placement
    pub fn click(&mut self, point: Coordinate) -> Result<Outcome> {
        tracing::debug!(point = %point, "Map click");
        let state = &mut self.state;

        match state.session.state() {
            SessionState::EditingPolygon(_) if state.modes.is_drawing() => {
                let count = state.session.add_vertex(&mut state.store, point)?;
                Ok(Outcome::VertexAdded { count })
            }
            SessionState::EditingPolygon(_) | SessionState::EditingMarker(_) => {
                Ok(Outcome::Ignored)
            }
            SessionState::Idle if state.modes.is_drawing() => {
                state.draft.add_point(point);
                Ok(Outcome::DraftPointAdded { count: state.draft.len() })
            }
            SessionState::Idle if state.modes.is_marker() => {
                let marker = state.store.create_marker(NewMarker::new(point));
                Ok(Outcome::MarkerAdded(marker.id))
            }
            SessionState::Idle => Ok(Outcome::Ignored),
        }
    }

    // Modes

    pub fn set_drawing_mode(&mut self, on: bool) -> Outcome {
        self.state.modes.set_drawing(on);
        tracing::debug!(drawing = on, "Drawing mode");
        self.modes_outcome()
    }

    pub fn toggle_drawing_mode(&mut self) -> Outcome {
        let on = !self.state.modes.is_drawing();
        self.set_drawing_mode(on)
    }

    pub fn set_marker_mode(&mut self, on: bool) -> Outcome {
        self.state.modes.set_marker(on);
        tracing::debug!(marker = on, "Marker mode");
        self.modes_outcome()
    }

    pub fn toggle_marker_mode(&mut self) -> Outcome {
        let on = !self.state.modes.is_marker();
        self.set_marker_mode(on)
    }

    fn modes_outcome(&self) -> Outcome {
        Outcome::ModesChanged {
            drawing: self.state.modes.is_drawing(),
            marker: self.state.modes.is_marker(),
        }
    }

    pub fn toggle_basemap(&mut self) -> Basemap {
        self.state.basemap = self.state.basemap.toggled();
        tracing::debug!(basemap = self.state.basemap.label(), "Map view");
        self.state.basemap
    }

    // Draft

    /// Save the draft as a new polygon
    pub fn save_draft(&mut self) -> Result<PolygonId> {
        let state = &mut self.state;
        Ok(state.draft.commit(&mut state.store)?.id)
    }

    pub fn undo_draft_point(&mut self) -> Option<Coordinate> {
        self.state.draft.undo()
    }

    pub fn remove_draft_point(&mut self, index: usize) -> Result<Coordinate> {
        self.state.draft.remove_at(index)
    }

    pub fn clear_draft(&mut self) {
        self.state.draft.clear();
    }

    // Markers

    pub fn add_marker(&mut self, new: NewMarker) -> MarkerId {
        self.state.store.create_marker(new).id
    }

    // Edit session

    pub fn start_edit(&mut self, target: EntityRef) -> Result<()> {
        let state = &mut self.state;
        state.session.start(&state.store, target)
    }

    /// Pending form fields of the active session
    pub fn edit_form(&self) -> Option<&EditForm> {
        self.state.session.form()
    }

    /// Overwrite pending form fields with the provided values, empty strings included
    pub fn set_edit_fields(&mut self, fields: EntityPatch) -> Result<()> {
        let form = self.state.session.form_mut().ok_or(GeosketchError::NoActiveEdit)?;
        if let Some(name) = fields.name {
            form.name = name;
        }
        if let Some(color) = fields.color {
            form.color = color;
        }
        if let Some(description) = fields.description {
            form.description = description;
        }
        Ok(())
    }

    pub fn remove_vertex(&mut self, index: usize) -> Result<Coordinate> {
        let state = &mut self.state;
        state.session.remove_vertex(&mut state.store, index)
    }

    pub fn drag_vertex(&mut self, index: usize, to: Coordinate) -> Result<()> {
        let state = &mut self.state;
        state.session.drag_vertex(&mut state.store, index, to)
    }

    pub fn drag_marker(&mut self, to: Coordinate) -> Result<()> {
        let state = &mut self.state;
        state.session.drag_marker(&mut state.store, to)
    }

    pub fn save_edits(&mut self) -> Result<Option<EntityRef>> {
        let state = &mut self.state;
        state.session.save(&mut state.store)
    }

    pub fn cancel_edits(&mut self) -> Option<EntityRef> {
        self.state.session.cancel()
    }

    // Store

    /// Delete an entity, cancelling its edit session first
    pub fn delete(&mut self, target: EntityRef) -> Result<()> {
        let state = &mut self.state;
        if state.session.is_editing(target) {
            state.session.cancel();
        }

        match target {
            EntityRef::Polygon(id) => state.store.delete_polygon(id).map(|_| ())?,
            EntityRef::Marker(id) => state.store.delete_marker(id).map(|_| ())?,
        }

        if state.hovered == Some(target) {
            state.hovered = None;
        }
        Ok(())
    }

    /// Highlight an entity; unknown targets clear the highlight
    pub fn set_hover(&mut self, target: Option<EntityRef>) {
        let store = &self.state.store;
        self.state.hovered = target.filter(|target| store.contains(*target));
    }

    /// Bounds to fit the map to, or `None` while the entity is being edited
    pub fn focus(&self, target: EntityRef) -> Result<Option<Bounds>> {
        if self.state.session.is_editing(target) {
            return Ok(None);
        }

        let store = &self.state.store;
        let bounds = match target {
            EntityRef::Polygon(id) => spatial::bounds(&store.get_polygon(id)?.points),
            EntityRef::Marker(id) => spatial::bounds(&[store.get_marker(id)?.position]),
        };
        Ok(bounds)
    }

    // Interchange

    /// Export one entity as a single-feature GeoJSON file
    pub fn export_one(&self, target: EntityRef) -> Result<ExportFile> {
        let store = &self.state.store;
        let (name, collection) = match target {
            EntityRef::Polygon(id) => {
                (&store.get_polygon(id)?.name, interchange::export_polygon(store, id)?)
            }
            EntityRef::Marker(id) => {
                (&store.get_marker(id)?.name, interchange::export_marker(store, id)?)
            }
        };

        let file = geojson_file(file_name_for(name), interchange::to_pretty_json(&collection)?);
        tracing::info!(entity = %target, file = %file.file_name, "Exported entity");
        Ok(file)
    }

    /// Export every entity; fails with `NothingToExport` on an empty store
    pub fn export_all(&self) -> Result<ExportFile> {
        let collection = interchange::export_all(&self.state.store)?;
        let file = geojson_file(
            format!("{}.{}", ALL_ANNOTATIONS_STEM, GEOJSON_EXTENSION),
            interchange::to_pretty_json(&collection)?,
        );
        tracing::info!(features = collection.features.len(), "Exported all annotations");
        Ok(file)
    }

    /// Export and hand the file to `sink`
    pub fn export_into(&self, target: Option<EntityRef>, sink: &mut dyn ExportSink) -> Result<()> {
        let file = match target {
            Some(target) => self.export_one(target)?,
            None => self.export_all()?,
        };
        sink.deliver(file)
    }

    pub fn import_str(&mut self, text: &str) -> Result<ImportReport> {
        interchange::import_str(&mut self.state.store, text)
    }

    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<ImportReport> {
        interchange::import_bytes(&mut self.state.store, bytes)
    }

    pub fn import_reader<R: Read>(&mut self, reader: R) -> Result<ImportReport> {
        interchange::import_reader(&mut self.state.store, reader)
    }

    // Dispatch

    /// Translate a key press and run the bound command, if any
    pub fn handle_key(&mut self, press: &KeyPress) -> Result<Outcome> {
        match self.keys.resolve(press, self.state.session.is_active()) {
            Some(command) => self.dispatch(command),
            None => Ok(Outcome::Ignored),
        }
    }

    /// Run one UI command.
    ///
    /// Saving with nothing drawn is reported as `Outcome::Ignored`, not an error.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Click(point) => self.click(point),
            Command::StartDrawing => Ok(self.set_drawing_mode(true)),
            Command::StopDrawing => Ok(self.set_drawing_mode(false)),
            Command::ToggleDrawing => Ok(self.toggle_drawing_mode()),
            Command::StartMarkerMode => Ok(self.set_marker_mode(true)),
            Command::StopMarkerMode => Ok(self.set_marker_mode(false)),
            Command::ToggleMarkerMode => Ok(self.toggle_marker_mode()),
            Command::ToggleBasemap => Ok(Outcome::BasemapChanged(self.toggle_basemap())),
            Command::Save => match self.save_draft() {
                Ok(id) => Ok(Outcome::PolygonSaved(id)),
                Err(e) if e.is_silent() => Ok(Outcome::Ignored),
                Err(e) => Err(e),
            },
            Command::Undo => Ok(self
                .undo_draft_point()
                .map_or(Outcome::Ignored, Outcome::DraftPointRemoved)),
            Command::RemoveDraftPoint(index) => {
                self.remove_draft_point(index).map(Outcome::DraftPointRemoved)
            }
            Command::ClearDraft => {
                self.clear_draft();
                Ok(Outcome::DraftCleared)
            }
            Command::StartEdit(target) => {
                self.start_edit(target)?;
                Ok(Outcome::EditStarted(target))
            }
            Command::RemoveVertex(index) => self.remove_vertex(index).map(Outcome::VertexRemoved),
            Command::DragVertex { index, to } => {
                self.drag_vertex(index, to)?;
                Ok(Outcome::Moved)
            }
            Command::DragMarker(to) => {
                self.drag_marker(to)?;
                Ok(Outcome::Moved)
            }
            Command::SaveEdits => {
                Ok(self.save_edits()?.map_or(Outcome::Ignored, Outcome::EditSaved))
            }
            Command::CancelEdits => {
                Ok(self.cancel_edits().map_or(Outcome::Ignored, Outcome::EditCancelled))
            }
            Command::Delete(target) => {
                self.delete(target)?;
                Ok(Outcome::Deleted(target))
            }
            Command::Hover(target) => {
                self.set_hover(target);
                Ok(Outcome::HoverChanged)
            }
            Command::ExportOne(target) => self.export_one(target).map(Outcome::Exported),
            Command::ExportAll => self.export_all().map(Outcome::Exported),
            Command::Import(bytes) => self.import_bytes(&bytes).map(Outcome::Imported),
        }
    }

    /// Count of entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Polygon => self.state.store.polygon_count(),
            EntityKind::Marker => self.state.store.marker_count(),
        }
    }
}
