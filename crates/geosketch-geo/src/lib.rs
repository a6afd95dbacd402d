//! GeoSketch Geo - GeoJSON interchange and spatial helpers
//!
//! This crate converts annotations to and from GeoJSON features, runs the
//! best-effort import pipeline, and computes bounds for map focusing.

pub mod codec;
pub mod interchange;
pub mod spatial;
pub mod validation;
