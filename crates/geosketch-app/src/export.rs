//! Export file naming and `ExportSink` adapters.

use std::fs;
use std::path::{Path, PathBuf};

use geosketch_core::error::Result;
use geosketch_core::ports::{ExportFile, ExportSink};

pub const GEOJSON_EXTENSION: &str = "geojson";
pub const GEOJSON_MEDIA_TYPE: &str = "application/json";
pub const ALL_ANNOTATIONS_STEM: &str = "all_annotations";

/// File name for an exported entity: whitespace runs become `_`
pub fn file_name_for(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(ch);
            in_space = false;
        }
    }
    format!("{}.{}", stem, GEOJSON_EXTENSION)
}

pub fn geojson_file(file_name: String, contents: String) -> ExportFile {
    ExportFile {
        file_name,
        media_type: GEOJSON_MEDIA_TYPE.to_string(),
        contents,
    }
}

/// Collects delivered files in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<ExportFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, file: ExportFile) -> Result<()> {
        self.files.push(file);
        Ok(())
    }
}

/// Writes delivered files into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, file: ExportFile) -> Result<()> {
        let path = self.dir.join(&file.file_name);
        fs::write(&path, file.contents.as_bytes())?;
        tracing::info!(path = %path.display(), "Wrote export");
        Ok(())
    }
}
