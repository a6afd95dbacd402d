//! Port trait definitions
//!
//! The core never touches files or the browser directly; front-ends plug in
//! an adapter for delivering exported documents to the user.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A named text document handed to the user, e.g. a `.geojson` download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    pub file_name: String,
    pub media_type: String,
    pub contents: String,
}

/// Port for emitting exported documents to the user
pub trait ExportSink {
    /// Deliver a file to the user
    fn deliver(&mut self, file: ExportFile) -> Result<()>;
}
