//! Pure projection of the application state for rendering layers.

use geosketch_core::config::Settings;
use geosketch_core::models::{Coordinate, EntityRef, Marker, MarkerId, Polygon, PolygonId};
use geosketch_core::session::EditSession;
use serde::Serialize;

use crate::state::AppState;

pub const NO_DRAFT_POINTS: &str = "No points added yet";
pub const NO_POLYGONS: &str = "No polygons saved yet";
pub const NO_MARKERS: &str = "No markers saved yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cursor {
    Pointer,
    Grab,
}

/// Stroke and fill parameters for one outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasemapView {
    pub label: &'static str,
    pub tile_url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraView {
    pub center: Coordinate,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModesView {
    pub drawing: bool,
    pub marker: bool,
    pub drawing_label: String,
    pub basemap_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftPointRow {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineView {
    pub points: Vec<Coordinate>,
    pub style: RenderStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftView {
    pub rows: Vec<DraftPointRow>,
    /// Set when the list is empty
    pub empty_message: Option<&'static str>,
    /// Open preview line, present from two points on
    pub outline: Option<OutlineView>,
}

/// A draggable vertex of the polygon under edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexHandle {
    pub index: usize,
    pub position: Coordinate,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonView {
    pub id: PolygonId,
    pub name: String,
    pub summary: String,
    pub color: String,
    pub points: Vec<Coordinate>,
    pub style: RenderStyle,
    pub editing: bool,
    pub hovered: bool,
    pub handles: Vec<VertexHandle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: MarkerId,
    pub name: String,
    pub color: String,
    pub position: Coordinate,
    pub editing: bool,
    pub draggable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditFormView {
    pub target: EntityRef,
    pub name: String,
    pub color: String,
    pub description: String,
}

/// Everything a front-end needs to redraw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub basemap: BasemapView,
    pub camera: CameraView,
    pub cursor: Cursor,
    pub modes: ModesView,
    pub draft: DraftView,
    pub polygons: Vec<PolygonView>,
    pub markers: Vec<MarkerView>,
    pub polygons_empty_message: Option<&'static str>,
    pub markers_empty_message: Option<&'static str>,
    pub show_export_all: bool,
    pub edit_form: Option<EditFormView>,
}

pub fn render(state: &AppState) -> ViewModel {
    let settings = &state.settings;
    let store = &state.store;

    let polygons: Vec<_> = store.polygons().map(|polygon| polygon_view(state, polygon)).collect();
    let markers: Vec<_> =
        store.markers().map(|marker| marker_view(&state.session, marker)).collect();

    let edit_form = match (state.session.target(), state.session.form()) {
        (Some(target), Some(form)) => Some(EditFormView {
            target,
            name: form.name.clone(),
            color: form.color.clone(),
            description: form.description.clone(),
        }),
        _ => None,
    };

    let drawing = state.modes.is_drawing();
    let marker = state.modes.is_marker();

    ViewModel {
        basemap: BasemapView {
            label: state.basemap.label(),
            tile_url: state.basemap.tile_url(),
            attribution: state.basemap.attribution(),
            max_zoom: settings.max_zoom,
        },
        camera: CameraView {
            center: settings.map_center,
            zoom: settings.map_zoom,
        },
        cursor: if drawing || marker {
            Cursor::Pointer
        } else {
            Cursor::Grab
        },
        modes: ModesView {
            drawing,
            marker,
            drawing_label: format!("Drawing Mode: {}", if drawing { "ON" } else { "OFF" }),
            basemap_label: format!("View: {}", state.basemap.label()),
        },
        draft: draft_view(state),
        polygons_empty_message: polygons.is_empty().then_some(NO_POLYGONS),
        markers_empty_message: markers.is_empty().then_some(NO_MARKERS),
        show_export_all: !store.is_empty(),
        polygons,
        markers,
        edit_form,
    }
}

fn draft_view(state: &AppState) -> DraftView {
    let settings = &state.settings;
    let rows: Vec<_> = state
        .draft
        .points()
        .iter()
        .enumerate()
        .map(|(index, point)| DraftPointRow {
            index,
            label: format!("Point {}: {}", index + 1, point),
        })
        .collect();

    let outline = state.draft.preview().map(|points| OutlineView {
        points: points.to_vec(),
        style: RenderStyle {
            color: settings.draft_color.clone(),
            weight: settings.weight,
            opacity: settings.opacity,
            fill_opacity: 0.0,
        },
    });

    DraftView {
        empty_message: rows.is_empty().then_some(NO_DRAFT_POINTS),
        rows,
        outline,
    }
}

fn polygon_view(state: &AppState, polygon: &Polygon) -> PolygonView {
    let target = EntityRef::Polygon(polygon.id);
    let editing = state.session.is_editing(target);
    let hovered = state.hovered == Some(target);
    let color = if editing {
        state.session.working_color(&polygon.color)
    } else {
        &polygon.color
    };

    let handles = if editing {
        polygon
            .points
            .iter()
            .enumerate()
            .map(|(index, position)| VertexHandle {
                index,
                position: *position,
                color: color.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    PolygonView {
        id: polygon.id,
        name: polygon.name.clone(),
        summary: format!("{} points", polygon.point_count()),
        color: polygon.color.clone(),
        points: polygon.points.clone(),
        style: polygon_style(&state.settings, color, editing, hovered),
        editing,
        hovered,
        handles,
    }
}

fn polygon_style(settings: &Settings, color: &str, editing: bool, hovered: bool) -> RenderStyle {
    let (weight, opacity) = if editing {
        (settings.weight, settings.editing_opacity)
    } else if hovered {
        (settings.hover_weight, settings.hover_opacity)
    } else {
        (settings.weight, settings.opacity)
    };

    RenderStyle {
        color: color.to_string(),
        weight,
        opacity,
        fill_opacity: settings.fill_opacity,
    }
}

fn marker_view(session: &EditSession, marker: &Marker) -> MarkerView {
    let editing = session.is_editing(EntityRef::Marker(marker.id));
    MarkerView {
        id: marker.id,
        name: marker.name.clone(),
        color: if editing {
            session.working_color(&marker.color).to_string()
        } else {
            marker.color.clone()
        },
        position: marker.position,
        editing,
        draggable: editing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosketch_core::models::{NewMarker, NewPolygon};

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn state_with_polygon() -> AppState {
        let mut state = AppState::default();
        state.store.create_polygon(NewPolygon::new(vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]));
        state
    }

    #[test]
    fn test_empty_state() {
        let view = render(&AppState::default());

        assert_eq!(view.cursor, Cursor::Pointer);
        assert_eq!(view.modes.drawing_label, "Drawing Mode: ON");
        assert_eq!(view.modes.basemap_label, "View: Simple");
        assert_eq!(view.draft.empty_message, Some(NO_DRAFT_POINTS));
        assert_eq!(view.polygons_empty_message, Some(NO_POLYGONS));
        assert_eq!(view.markers_empty_message, Some(NO_MARKERS));
        assert!(!view.show_export_all);
        assert!(view.edit_form.is_none());
        assert_eq!(view.basemap.max_zoom, 19);
        assert_eq!(view.camera.zoom, 17);
    }

    #[test]
    fn test_cursor_follows_modes() {
        let mut state = AppState::default();
        state.modes.set_drawing(false);
        assert_eq!(render(&state).cursor, Cursor::Grab);

        state.modes.set_marker(true);
        assert_eq!(render(&state).cursor, Cursor::Pointer);
        assert_eq!(render(&state).modes.drawing_label, "Drawing Mode: OFF");
    }

    #[test]
    fn test_draft_rows_and_preview() {
        let mut state = AppState::default();
        state.draft.add_point(c(57.661273, -2.746539));
        let view = render(&state);
        assert_eq!(view.draft.rows[0].label, "Point 1: [57.661273, -2.746539]");
        assert!(view.draft.outline.is_none());

        state.draft.add_point(c(57.662, -2.745));
        let outline = render(&state).draft.outline.unwrap();
        assert_eq!(outline.points.len(), 2);
        assert_eq!(outline.style.color, "red");
    }

    #[test]
    fn test_saved_polygon_styles() {
        let mut state = state_with_polygon();
        let target = EntityRef::Polygon(PolygonId(1));

        let view = render(&state);
        let polygon = &view.polygons[0];
        assert_eq!(polygon.summary, "3 points");
        assert_eq!(polygon.style.color, "#FF5733");
        assert_eq!((polygon.style.weight, polygon.style.opacity), (3.0, 0.5));
        assert!(polygon.handles.is_empty());
        assert!(view.show_export_all);
        assert_eq!(view.polygons_empty_message, None);

        state.hovered = Some(target);
        let hovered = &render(&state).polygons[0];
        assert_eq!((hovered.style.weight, hovered.style.opacity), (4.0, 0.8));
    }

    #[test]
    fn test_editing_polygon_uses_pending_color() {
        let mut state = state_with_polygon();
        let target = EntityRef::Polygon(PolygonId(1));
        state.session.start(&state.store, target).unwrap();
        state.hovered = Some(target);
        state.session.form_mut().unwrap().color = "#123456".to_string();

        let view = render(&state);
        let polygon = &view.polygons[0];
        assert!(polygon.editing);
        assert_eq!(polygon.style.color, "#123456");
        assert_eq!(polygon.style.opacity, 0.8);
        assert_eq!(polygon.style.weight, 3.0);
        assert_eq!(polygon.handles.len(), 3);
        assert!(polygon.handles.iter().all(|h| h.color == "#123456"));
        // the saved colour is untouched until the edit is saved
        assert_eq!(polygon.color, "#FF5733");

        let form = view.edit_form.unwrap();
        assert_eq!(form.target, target);
        assert_eq!(form.name, "Polygon 1");
    }

    #[test]
    fn test_marker_draggable_only_while_editing() {
        let mut state = AppState::default();
        let id = state.store.create_marker(NewMarker::new(c(1.0, 1.0))).id;
        assert!(!render(&state).markers[0].draggable);

        state.session.start(&state.store, EntityRef::Marker(id)).unwrap();
        let view = render(&state);
        assert!(view.markers[0].draggable);
        assert_eq!(view.markers_empty_message, None);
    }

    #[test]
    fn test_view_serializes() {
        let value = serde_json::to_value(render(&state_with_polygon())).unwrap();
        assert_eq!(value["polygons"][0]["summary"], "3 points");
        assert_eq!(value["cursor"], "Pointer");
    }
}
