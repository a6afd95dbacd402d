use crate::error::{GeosketchError, Result};
use crate::models::{Basemap, Coordinate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Supplied by the embedding front-end
    Override,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Override => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Resolved settings consumed by the annotator
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub drawing_mode: bool,
    pub basemap: Basemap,
    pub map_center: Coordinate,
    pub map_zoom: u8,
    pub max_zoom: u8,
    pub draft_color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub editing_opacity: f64,
    pub hover_weight: f64,
    pub hover_opacity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        LayeredConfig::with_defaults().settings()
    }
}

/// Layered configuration for GeoSketch
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub drawing_mode: ConfigValue<bool>,
    pub basemap: ConfigValue<Basemap>,
    pub map_center: ConfigValue<Coordinate>,
    pub map_zoom: ConfigValue<u8>,
    pub max_zoom: ConfigValue<u8>,
    pub draft_color: ConfigValue<String>,
    pub weight: ConfigValue<f64>,
    pub opacity: ConfigValue<f64>,
    pub fill_opacity: ConfigValue<f64>,
    pub editing_opacity: ConfigValue<f64>,
    pub hover_weight: ConfigValue<f64>,
    pub hover_opacity: ConfigValue<f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        use ConfigSource::Default as D;
        Self {
            drawing_mode: ConfigValue::new(true, D),
            basemap: ConfigValue::new(Basemap::Simple, D),
            map_center: ConfigValue::new(default_center(), D),
            map_zoom: ConfigValue::new(17, D),
            max_zoom: ConfigValue::new(19, D),
            draft_color: ConfigValue::new("red".to_string(), D),
            weight: ConfigValue::new(3.0, D),
            opacity: ConfigValue::new(0.5, D),
            fill_opacity: ConfigValue::new(0.2, D),
            editing_opacity: ConfigValue::new(0.8, D),
            hover_weight: ConfigValue::new(4.0, D),
            hover_opacity: ConfigValue::new(0.8, D),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeosketchError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        self.load_from_str(&content)
    }

    /// Load configuration from TOML text
    pub fn load_from_str(mut self, content: &str) -> Result<Self> {
        let file_config: FileConfig =
            toml::from_str(content).map_err(|e| GeosketchError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        self.apply(file_config.into_overrides()?, ConfigSource::File);
        self.validate()?;
        Ok(self)
    }

    /// Update configuration from front-end overrides
    pub fn update_from_overrides(&mut self, overrides: ConfigOverrides) -> Result<()> {
        self.apply(overrides, ConfigSource::Override);
        self.validate()
    }

    fn apply(&mut self, overrides: ConfigOverrides, source: ConfigSource) {
        if let Some(v) = overrides.drawing_mode {
            self.drawing_mode.update(v, source);
        }
        if let Some(v) = overrides.basemap {
            self.basemap.update(v, source);
        }
        if let Some(v) = overrides.map_center {
            self.map_center.update(v, source);
        }
        if let Some(v) = overrides.map_zoom {
            self.map_zoom.update(v, source);
        }
        if let Some(v) = overrides.max_zoom {
            self.max_zoom.update(v, source);
        }
        if let Some(v) = overrides.draft_color {
            self.draft_color.update(v, source);
        }
        if let Some(v) = overrides.weight {
            self.weight.update(v, source);
        }
        if let Some(v) = overrides.opacity {
            self.opacity.update(v, source);
        }
        if let Some(v) = overrides.fill_opacity {
            self.fill_opacity.update(v, source);
        }
        if let Some(v) = overrides.editing_opacity {
            self.editing_opacity.update(v, source);
        }
        if let Some(v) = overrides.hover_weight {
            self.hover_weight.update(v, source);
        }
        if let Some(v) = overrides.hover_opacity {
            self.hover_opacity.update(v, source);
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        let opacities = [
            ("opacity", self.opacity.value),
            ("fill_opacity", self.fill_opacity.value),
            ("editing_opacity", self.editing_opacity.value),
            ("hover_opacity", self.hover_opacity.value),
        ];
        for (key, value) in opacities {
            if !(0.0..=1.0).contains(&value) {
                return Err(GeosketchError::ConfigInvalid {
                    key: key.to_string(),
                    reason: format!("Opacity must be between 0 and 1, got {}", value),
                });
            }
        }

        let weights = [("weight", self.weight.value), ("hover_weight", self.hover_weight.value)];
        for (key, value) in weights {
            if value.is_nan() || value <= 0.0 {
                return Err(GeosketchError::ConfigInvalid {
                    key: key.to_string(),
                    reason: format!("Stroke weight must be positive, got {}", value),
                });
            }
        }

        if self.map_zoom.value > self.max_zoom.value {
            return Err(GeosketchError::ConfigInvalid {
                key: "map_zoom".to_string(),
                reason: format!(
                    "Zoom {} exceeds max_zoom {}",
                    self.map_zoom.value, self.max_zoom.value
                ),
            });
        }

        if self.draft_color.value.is_empty() {
            return Err(GeosketchError::ConfigInvalid {
                key: "draft_color".to_string(),
                reason: "Draft colour must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve to plain settings
    pub fn settings(&self) -> Settings {
        Settings {
            drawing_mode: self.drawing_mode.value,
            basemap: self.basemap.value,
            map_center: self.map_center.value,
            map_zoom: self.map_zoom.value,
            max_zoom: self.max_zoom.value,
            draft_color: self.draft_color.value.clone(),
            weight: self.weight.value,
            opacity: self.opacity.value,
            fill_opacity: self.fill_opacity.value,
            editing_opacity: self.editing_opacity.value,
            hover_weight: self.hover_weight.value,
            hover_opacity: self.hover_opacity.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "drawing_mode".to_string(),
            (self.drawing_mode.value.to_string(), self.drawing_mode.source),
        );
        map.insert(
            "basemap".to_string(),
            (self.basemap.value.label().to_string(), self.basemap.source),
        );
        map.insert(
            "map_center".to_string(),
            (self.map_center.value.to_string(), self.map_center.source),
        );
        map.insert("map_zoom".to_string(), (self.map_zoom.value.to_string(), self.map_zoom.source));
        map.insert("max_zoom".to_string(), (self.max_zoom.value.to_string(), self.max_zoom.source));
        map.insert(
            "draft_color".to_string(),
            (self.draft_color.value.clone(), self.draft_color.source),
        );
        map.insert("weight".to_string(), (self.weight.value.to_string(), self.weight.source));
        map.insert("opacity".to_string(), (self.opacity.value.to_string(), self.opacity.source));
        map.insert(
            "fill_opacity".to_string(),
            (self.fill_opacity.value.to_string(), self.fill_opacity.source),
        );
        map.insert(
            "editing_opacity".to_string(),
            (self.editing_opacity.value.to_string(), self.editing_opacity.source),
        );
        map.insert(
            "hover_weight".to_string(),
            (self.hover_weight.value.to_string(), self.hover_weight.source),
        );
        map.insert(
            "hover_opacity".to_string(),
            (self.hover_opacity.value.to_string(), self.hover_opacity.source),
        );

        map
    }
}

fn default_center() -> Coordinate {
    Coordinate::unchecked(57.661273, -2.746539)
}

/// Configuration loaded from TOML file
#[derive(Debug, Default, Deserialize, Serialize)]
struct FileConfig {
    drawing_mode: Option<bool>,
    basemap: Option<String>,
    map_center: Option<[f64; 2]>,
    map_zoom: Option<u8>,
    max_zoom: Option<u8>,
    draft_color: Option<String>,
    weight: Option<f64>,
    opacity: Option<f64>,
    fill_opacity: Option<f64>,
    editing_opacity: Option<f64>,
    hover_weight: Option<f64>,
    hover_opacity: Option<f64>,
}

impl FileConfig {
    fn into_overrides(self) -> Result<ConfigOverrides> {
        let basemap = self.basemap.as_deref().map(parse_basemap).transpose()?;
        let map_center = self
            .map_center
            .map(|[lat, lng]| Coordinate::new(lat, lng))
            .transpose()
            .map_err(|e| GeosketchError::ConfigInvalid {
                key: "map_center".to_string(),
                reason: e.to_string(),
            })?;

        Ok(ConfigOverrides {
            drawing_mode: self.drawing_mode,
            basemap,
            map_center,
            map_zoom: self.map_zoom,
            max_zoom: self.max_zoom,
            draft_color: self.draft_color,
            weight: self.weight,
            opacity: self.opacity,
            fill_opacity: self.fill_opacity,
            editing_opacity: self.editing_opacity,
            hover_weight: self.hover_weight,
            hover_opacity: self.hover_opacity,
        })
    }
}

/// Front-end configuration overrides
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub drawing_mode: Option<bool>,
    pub basemap: Option<Basemap>,
    pub map_center: Option<Coordinate>,
    pub map_zoom: Option<u8>,
    pub max_zoom: Option<u8>,
    pub draft_color: Option<String>,
    pub weight: Option<f64>,
    pub opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub editing_opacity: Option<f64>,
    pub hover_weight: Option<f64>,
    pub hover_opacity: Option<f64>,
}

/// Parse basemap from string
pub fn parse_basemap(s: &str) -> Result<Basemap> {
    match s.to_lowercase().as_str() {
        "simple" | "osm" => Ok(Basemap::Simple),
        "satellite" | "imagery" => Ok(Basemap::Satellite),
        _ => Err(GeosketchError::ConfigInvalid {
            key: "basemap".to_string(),
            reason: format!("Invalid basemap: {}. Use simple or satellite", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert!(config.drawing_mode.value);
        assert_eq!(config.drawing_mode.source, ConfigSource::Default);
        assert_eq!(config.basemap.value, Basemap::Simple);
        assert_eq!(config.map_zoom.value, 17);
        assert_eq!(config.draft_color.value, "red");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(1.0, ConfigSource::Default);

        value.update(2.0, ConfigSource::File);
        assert_eq!(value.value, 2.0);

        value.update(3.0, ConfigSource::Override);
        assert_eq!(value.value, 3.0);
        assert_eq!(value.source, ConfigSource::Override);

        // Lower precedence should not override
        value.update(4.0, ConfigSource::File);
        assert_eq!(value.value, 3.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
drawing_mode = false
basemap = "satellite"
map_center = [51.5, -0.12]
draft_color = "orange"
opacity = 0.6
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert!(!config.drawing_mode.value);
        assert_eq!(config.drawing_mode.source, ConfigSource::File);
        assert_eq!(config.basemap.value, Basemap::Satellite);
        assert_eq!(config.map_center.value.lat(), 51.5);
        assert_eq!(config.draft_color.value, "orange");
        assert_eq!(config.opacity.value, 0.6);
        assert_eq!(config.fill_opacity.source, ConfigSource::Default);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = LayeredConfig::with_defaults().load_from_str("opacity = 1.5").unwrap_err();
        assert!(matches!(err, GeosketchError::ConfigInvalid { ref key, .. } if key == "opacity"));

        let err =
            LayeredConfig::with_defaults().load_from_str("map_center = [95.0, 0.0]").unwrap_err();
        assert!(matches!(
            err,
            GeosketchError::ConfigInvalid { ref key, .. } if key == "map_center"
        ));

        let err = LayeredConfig::with_defaults().load_from_str("map_zoom = 20").unwrap_err();
        assert!(matches!(err, GeosketchError::ConfigInvalid { ref key, .. } if key == "map_zoom"));

        assert!(LayeredConfig::with_defaults().load_from_str("basemap = \"terrain\"").is_err());
        assert!(LayeredConfig::with_defaults().load_from_str("not toml [").is_err());
    }

    #[test]
    fn test_overrides_beat_file() {
        let mut config = LayeredConfig::with_defaults().load_from_str("weight = 5.0").unwrap();
        config
            .update_from_overrides(ConfigOverrides { weight: Some(2.0), ..Default::default() })
            .unwrap();
        assert_eq!(config.weight.value, 2.0);
        assert_eq!(config.weight.source, ConfigSource::Override);
    }

    #[test]
    fn test_parse_basemap() {
        assert_eq!(parse_basemap("Simple").unwrap(), Basemap::Simple);
        assert_eq!(parse_basemap("SATELLITE").unwrap(), Basemap::Satellite);
        assert!(parse_basemap("terrain").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        let (center, source) = &map["map_center"];
        assert_eq!(center, "[57.661273, -2.746539]");
        assert_eq!(*source, ConfigSource::Default);
        assert_eq!(map["basemap"].0, "Simple");
        assert_eq!(map.len(), 12);
    }
}
