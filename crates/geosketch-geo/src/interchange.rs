//! Import and export pipeline
//!
//! Import is best effort: each feature is classified by geometry type and
//! either turned into new entities or counted as skipped. Only a document that
//! cannot be parsed at all aborts the import.

use std::io::Read;

use geojson::{Feature, FeatureCollection, Geometry, JsonValue, Value};
use serde::{Deserialize, Serialize};

use geosketch_core::error::{GeosketchError, Result};
use geosketch_core::models::{MarkerId, PolygonId};
use geosketch_core::store::AnnotationStore;

use crate::codec::{
    decode_marker_position, decode_polygon_rings, encode_marker, encode_polygon,
    geometry_type_name,
};

/// Problem with a single feature that caused it to be skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportIssue {
    /// Where the problem was found, e.g. `features[2]` or `features[0].polygons[1]`
    pub location: String,
    pub reason: String,
}

/// Aggregated outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub created: usize,
    pub skipped: usize,
    pub polygons: Vec<PolygonId>,
    pub markers: Vec<MarkerId>,
    pub issues: Vec<ImportIssue>,
}

impl ImportReport {
    fn created_polygon(&mut self, id: PolygonId) {
        self.created += 1;
        self.polygons.push(id);
    }

    fn created_marker(&mut self, id: MarkerId) {
        self.created += 1;
        self.markers.push(id);
    }

    fn skip(&mut self, location: String, reason: String) {
        tracing::warn!(location = %location, reason = %reason, "Skipped feature");
        self.skipped += 1;
        self.issues.push(ImportIssue { location, reason });
    }

    /// One-line summary for the user
    pub fn summary(&self) -> String {
        format!(
            "Imported {} polygon(s) and {} marker(s), skipped {}",
            self.polygons.len(),
            self.markers.len(),
            self.skipped
        )
    }
}

/// One feature slot of a parsed document, converted or not
pub type FeatureEntry = std::result::Result<Feature, geojson::Error>;

/// Parse a GeoJSON document into its feature entries.
///
/// Only the document shape is checked here; each feature is converted on its
/// own so a malformed one does not hide the rest. A lone Feature becomes a
/// one-element list and a bare Geometry is wrapped in a property-less Feature.
pub fn parse_features(text: &str) -> Result<Vec<FeatureEntry>> {
    let document: JsonValue = serde_json::from_str(text)
        .map_err(|e| GeosketchError::ParseFailure { reason: format!("Invalid JSON: {}", e) })?;

    let JsonValue::Object(mut object) = document else {
        return Err(parse_failure("Top level is not a JSON object"));
    };

    let kind = object.get("type").and_then(JsonValue::as_str).unwrap_or_default().to_string();
    match kind.as_str() {
        "FeatureCollection" => match object.remove("features") {
            Some(JsonValue::Array(items)) => {
                Ok(items.into_iter().map(Feature::try_from).collect())
            }
            _ => Err(parse_failure("FeatureCollection has no features array")),
        },
        "Feature" => Ok(vec![Feature::try_from(object)]),
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon"
        | "MultiPolygon" | "GeometryCollection" => {
            let entry = Geometry::try_from(object).map(|geometry| Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            });
            Ok(vec![entry])
        }
        "" => Err(parse_failure("Document has no GeoJSON type")),
        other => Err(parse_failure(&format!("Unsupported GeoJSON type `{}`", other))),
    }
}

fn parse_failure(reason: &str) -> GeosketchError {
    GeosketchError::ParseFailure { reason: reason.to_string() }
}

/// Import GeoJSON text into the store
pub fn import_str(store: &mut AnnotationStore, text: &str) -> Result<ImportReport> {
    let entries = parse_features(text)?;
    let mut report = ImportReport::default();

    for (index, entry) in entries.into_iter().enumerate() {
        let location = format!("features[{}]", index);
        match entry {
            Ok(feature) => import_feature(store, &feature, location, &mut report),
            Err(e) => report.skip(location, e.to_string()),
        }
    }

    tracing::info!(created = report.created, skipped = report.skipped, "Import finished");
    Ok(report)
}

/// Import raw bytes, which must be UTF-8 encoded GeoJSON
pub fn import_bytes(store: &mut AnnotationStore, bytes: &[u8]) -> Result<ImportReport> {
    let text = std::str::from_utf8(bytes).map_err(|e| GeosketchError::ParseFailure {
        reason: format!("File is not valid UTF-8: {}", e),
    })?;
    import_str(store, text)
}

/// Import from any byte source
pub fn import_reader<R: Read>(store: &mut AnnotationStore, mut reader: R) -> Result<ImportReport> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    import_bytes(store, &bytes)
}

/// Classify and insert already-parsed features
pub fn import_features(store: &mut AnnotationStore, features: &[Feature]) -> ImportReport {
    let mut report = ImportReport::default();
    for (index, feature) in features.iter().enumerate() {
        import_feature(store, feature, format!("features[{}]", index), &mut report);
    }

    tracing::info!(created = report.created, skipped = report.skipped, "Import finished");
    report
}

fn import_feature(
    store: &mut AnnotationStore,
    feature: &Feature,
    location: String,
    report: &mut ImportReport,
) {
    let properties = feature.properties.as_ref();

    let Some(geometry) = feature.geometry.as_ref() else {
        report.skip(location, "Feature has no geometry".to_string());
        return;
    };

    match &geometry.value {
        Value::Polygon(rings) => {
            match decode_polygon_rings(rings, properties, store.next_polygon_id()) {
                Ok(new) => {
                    let id = store.create_polygon(new).id;
                    report.created_polygon(id);
                }
                Err(e) => report.skip(location, e.to_string()),
            }
        }
        Value::MultiPolygon(polygons) => {
            for (part, rings) in polygons.iter().enumerate() {
                match decode_polygon_rings(rings, properties, store.next_polygon_id()) {
                    Ok(new) => {
                        let id = store.create_polygon(new).id;
                        report.created_polygon(id);
                    }
                    Err(e) => {
                        report.skip(format!("{}.polygons[{}]", location, part), e.to_string())
                    }
                }
            }
        }
        Value::Point(position) => {
            match decode_marker_position(position, properties, store.next_marker_id()) {
                Ok(new) => {
                    let id = store.create_marker(new).id;
                    report.created_marker(id);
                }
                Err(e) => report.skip(location, e.to_string()),
            }
        }
        other => {
            let err = GeosketchError::UnsupportedGeometry {
                geometry_type: geometry_type_name(other).to_string(),
            };
            report.skip(location, err.to_string());
        }
    }
}

/// Wrap features in a collection
pub fn feature_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection { bbox: None, features, foreign_members: None }
}

/// Export one polygon as a single-feature collection
pub fn export_polygon(store: &AnnotationStore, id: PolygonId) -> Result<FeatureCollection> {
    let polygon = store.get_polygon(id)?;
    Ok(feature_collection(vec![encode_polygon(polygon)]))
}

/// Export one marker as a single-feature collection
pub fn export_marker(store: &AnnotationStore, id: MarkerId) -> Result<FeatureCollection> {
    let marker = store.get_marker(id)?;
    Ok(feature_collection(vec![encode_marker(marker)]))
}

/// Export every saved entity, polygons first, each kind in creation order
pub fn export_all(store: &AnnotationStore) -> Result<FeatureCollection> {
    if store.is_empty() {
        return Err(GeosketchError::NothingToExport);
    }

    let features = store
        .polygons()
        .map(encode_polygon)
        .chain(store.markers().map(encode_marker))
        .collect();
    Ok(feature_collection(features))
}

/// Serialize a collection as indented JSON text
pub fn to_pretty_json(collection: &FeatureCollection) -> Result<String> {
    serde_json::to_string_pretty(collection).map_err(|e| {
        GeosketchError::Serialization(format!("Failed to serialize GeoJSON: {}", e))
    })
}
