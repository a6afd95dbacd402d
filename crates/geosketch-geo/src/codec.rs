//! GeoJSON codec for annotations
//!
//! Internally points are `(lat, lng)`; GeoJSON positions are `[lng, lat]`.
//! Polygon rings are stored open and only closed on encode.

use geojson::{Feature, Geometry, JsonObject, JsonValue, PolygonType, Value};

use geosketch_core::error::{GeosketchError, Result};
use geosketch_core::models::{
    palette_color, Marker, MarkerId, NewMarker, NewPolygon, Polygon, PolygonId,
};

use crate::validation::{check_min_vertices, position_to_coordinate};

/// Encode a polygon as a `Polygon` feature with a closed outer ring
pub fn encode_polygon(polygon: &Polygon) -> Feature {
    let mut ring: Vec<Vec<f64>> = polygon.points.iter().map(|p| p.to_position().to_vec()).collect();
    if let Some(first) = polygon.points.first() {
        ring.push(first.to_position().to_vec());
    }

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), JsonValue::from(polygon.id.0));
    properties.insert("name".to_string(), JsonValue::from(polygon.name.clone()));
    properties.insert("color".to_string(), JsonValue::from(polygon.color.clone()));
    properties.insert("description".to_string(), JsonValue::from(polygon.description.clone()));

    feature(Value::Polygon(vec![ring]), properties)
}

/// Encode a marker as a `Point` feature
pub fn encode_marker(marker: &Marker) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), JsonValue::from(marker.id.0));
    properties.insert("name".to_string(), JsonValue::from(marker.name.clone()));
    properties.insert("color".to_string(), JsonValue::from(marker.color.clone()));

    feature(Value::Point(marker.position.to_position().to_vec()), properties)
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Decode a `Polygon` geometry into polygon attributes.
///
/// `next_id` is the id the store will allocate and seeds the default name and colour.
pub fn decode_polygon(
    geometry: &Geometry,
    properties: Option<&JsonObject>,
    next_id: PolygonId,
) -> Result<NewPolygon> {
    match &geometry.value {
        Value::Polygon(rings) => decode_polygon_rings(rings, properties, next_id),
        other => Err(GeosketchError::UnsupportedGeometry {
            geometry_type: geometry_type_name(other).to_string(),
        }),
    }
}

/// Decode the outer ring of one polygon's coordinate array.
///
/// The trailing closing position is always dropped; interior rings are ignored.
pub fn decode_polygon_rings(
    rings: &PolygonType,
    properties: Option<&JsonObject>,
    next_id: PolygonId,
) -> Result<NewPolygon> {
    let outer = rings.first().map(Vec::as_slice).unwrap_or_default();
    let open = &outer[..outer.len().saturating_sub(1)];
    check_min_vertices(open.len())?;

    let points = open
        .iter()
        .map(|position| position_to_coordinate(position))
        .collect::<Result<Vec<_>>>()?;

    let name = first_non_empty(properties, &["name", "title"])
        .unwrap_or_else(|| format!("Imported Polygon {}", next_id));
    let color = first_non_empty(properties, &["color", "stroke"])
        .unwrap_or_else(|| palette_color(next_id.0).to_string());
    let description = first_non_empty(properties, &["description", "desc"]).unwrap_or_default();

    Ok(NewPolygon::new(points).name(name).color(color).description(description))
}

/// Decode a `Point` geometry into marker attributes
pub fn decode_marker(
    geometry: &Geometry,
    properties: Option<&JsonObject>,
    next_id: MarkerId,
) -> Result<NewMarker> {
    match &geometry.value {
        Value::Point(position) => decode_marker_position(position, properties, next_id),
        other => Err(GeosketchError::UnsupportedGeometry {
            geometry_type: geometry_type_name(other).to_string(),
        }),
    }
}

pub fn decode_marker_position(
    position: &[f64],
    properties: Option<&JsonObject>,
    next_id: MarkerId,
) -> Result<NewMarker> {
    let position = position_to_coordinate(position)?;
    let name = first_non_empty(properties, &["name"])
        .unwrap_or_else(|| format!("Imported Marker {}", next_id));
    let color = first_non_empty(properties, &["color"])
        .unwrap_or_else(|| palette_color(next_id.0).to_string());

    Ok(NewMarker::new(position).name(name).color(color))
}

/// First property among `keys` holding a non-empty string
fn first_non_empty(properties: Option<&JsonObject>, keys: &[&str]) -> Option<String> {
    let properties = properties?;
    keys.iter()
        .filter_map(|key| properties.get(*key).and_then(JsonValue::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// GeoJSON type name of a geometry value
pub fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}
