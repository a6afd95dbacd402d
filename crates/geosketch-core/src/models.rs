pub mod basemap;
pub mod coordinate;
pub mod entity;
pub mod marker;
pub mod palette;
pub mod polygon;

pub use basemap::Basemap;
pub use coordinate::Coordinate;
pub use entity::{EntityKind, EntityPatch, EntityRef, MarkerId, PolygonId};
pub use marker::{Marker, NewMarker};
pub use palette::{palette_color, PALETTE};
pub use polygon::{NewPolygon, Polygon, MIN_POLYGON_POINTS};
