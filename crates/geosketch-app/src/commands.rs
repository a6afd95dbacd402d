use geosketch_core::models::{Basemap, Coordinate, EntityRef, MarkerId, PolygonId};
use geosketch_core::ports::ExportFile;
use geosketch_geo::interchange::ImportReport;

/// Inbound UI command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(Coordinate),
    StartDrawing,
    StopDrawing,
    ToggleDrawing,
    StartMarkerMode,
    StopMarkerMode,
    ToggleMarkerMode,
    ToggleBasemap,
    Save,
    Undo,
    RemoveDraftPoint(usize),
    ClearDraft,
    StartEdit(EntityRef),
    RemoveVertex(usize),
    DragVertex { index: usize, to: Coordinate },
    DragMarker(Coordinate),
    SaveEdits,
    CancelEdits,
    Delete(EntityRef),
    Hover(Option<EntityRef>),
    ExportOne(EntityRef),
    ExportAll,
    Import(Vec<u8>),
}

/// What a command did, for the front-end to react to
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing changed (pan click, silent no-op)
    Ignored,
    DraftPointAdded { count: usize },
    DraftPointRemoved(Coordinate),
    DraftCleared,
    VertexAdded { count: usize },
    VertexRemoved(Coordinate),
    Moved,
    MarkerAdded(MarkerId),
    PolygonSaved(PolygonId),
    EditStarted(EntityRef),
    EditSaved(EntityRef),
    EditCancelled(EntityRef),
    Deleted(EntityRef),
    HoverChanged,
    ModesChanged { drawing: bool, marker: bool },
    BasemapChanged(Basemap),
    Exported(ExportFile),
    Imported(ImportReport),
}
