//! Error types for GeoSketch

use thiserror::Error;

use crate::models::EntityKind;

#[derive(Debug, Error)]
pub enum GeosketchError {
    // Entity errors
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: u64 },

    #[error("Polygon {id} must keep at least {minimum} points")]
    MinimumVerticesViolation { id: u64, minimum: usize },

    #[error("Polygon needs at least {minimum} points, found {found}")]
    InsufficientVertices { found: usize, minimum: usize },

    #[error("Point index {index} is out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    // Draft and session errors
    #[error("No polygon to save")]
    NoActiveDraft,

    #[error("No matching entity is being edited")]
    NoActiveEdit,

    // Geometry errors
    #[error("Coordinate out of range: lat {lat}, lng {lng}")]
    CoordinateOutOfRange { lat: f64, lng: f64 },

    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("Unsupported geometry type: {geometry_type}")]
    UnsupportedGeometry { geometry_type: String },

    // Interchange errors
    #[error("Failed to parse GeoJSON: {reason}")]
    ParseFailure { reason: String },

    #[error("No annotations to export")]
    NothingToExport,

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeosketchError {
    /// Errors the UI should surface as a blocking message
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            GeosketchError::MinimumVerticesViolation { .. }
                | GeosketchError::NothingToExport
                | GeosketchError::ParseFailure { .. }
        )
    }

    /// Errors the UI should swallow without telling the user
    pub fn is_silent(&self) -> bool {
        matches!(self, GeosketchError::NoActiveDraft)
    }
}

pub type Result<T> = std::result::Result<T, GeosketchError>;
