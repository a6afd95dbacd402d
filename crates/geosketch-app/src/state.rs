use geosketch_core::config::Settings;
use geosketch_core::draft::Draft;
use geosketch_core::models::{Basemap, EntityRef};
use geosketch_core::session::EditSession;
use geosketch_core::store::AnnotationStore;

/// Drawing and marker placement flags.
///
/// Enabling one mode disables the other; both may be off (pan only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFlags {
    drawing: bool,
    marker: bool,
}

impl ModeFlags {
    pub fn new(drawing: bool) -> Self {
        Self { drawing, marker: false }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_marker(&self) -> bool {
        self.marker
    }

    pub fn set_drawing(&mut self, on: bool) {
        self.drawing = on;
        if on {
            self.marker = false;
        }
    }

    pub fn set_marker(&mut self, on: bool) {
        self.marker = on;
        if on {
            self.drawing = false;
        }
    }
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self::new(true)
    }
}

/// All mutable state of one annotation surface
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub store: AnnotationStore,
    pub draft: Draft,
    pub session: EditSession,
    pub modes: ModeFlags,
    pub basemap: Basemap,
    pub hovered: Option<EntityRef>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            modes: ModeFlags::new(settings.drawing_mode),
            basemap: settings.basemap,
            settings,
            store: AnnotationStore::new(),
            draft: Draft::new(),
            session: EditSession::new(),
            hovered: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_are_exclusive() {
        let mut modes = ModeFlags::default();
        assert!(modes.is_drawing());
        assert!(!modes.is_marker());

        modes.set_marker(true);
        assert!(modes.is_marker());
        assert!(!modes.is_drawing());

        modes.set_drawing(true);
        assert!(modes.is_drawing());
        assert!(!modes.is_marker());

        modes.set_drawing(false);
        assert!(!modes.is_drawing() && !modes.is_marker());
    }

    #[test]
    fn test_state_follows_settings() {
        let settings = Settings {
            drawing_mode: false,
            basemap: Basemap::Satellite,
            ..Settings::default()
        };
        let state = AppState::new(settings);
        assert!(!state.modes.is_drawing());
        assert_eq!(state.basemap, Basemap::Satellite);
        assert!(state.store.is_empty());
    }
}
