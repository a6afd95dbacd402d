use serde::{Deserialize, Serialize};

/// Background tile layer shown under the annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Basemap {
    #[default]
    Simple,
    Satellite,
}

impl Basemap {
    /// Tile URL template in `{z}/{x}/{y}` form
    pub fn tile_url(&self) -> &'static str {
        match self {
            Basemap::Simple => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            Basemap::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Basemap::Simple => {
                "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
            }
            Basemap::Satellite => "&copy; <a href=\"https://www.arcgis.com/\">ArcGIS</a>",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Basemap::Simple => "Simple",
            Basemap::Satellite => "Satellite",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Basemap::Simple => Basemap::Satellite,
            Basemap::Satellite => Basemap::Simple,
        }
    }
}
