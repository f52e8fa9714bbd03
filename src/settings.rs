//! User settings stored as settings.json in the app data directory

use crate::constants::{HOVER_STICKINESS, SELECTION_THRESHOLD_RATIO};
use crate::theme::ThemeName;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Appearance
    pub theme: ThemeName,

    // Grab deck
    pub hidden_cards: Vec<String>,
    pub selection_threshold_ratio: f32,
    pub hover_stickiness: f32,

    // Permissions
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            theme: ThemeName::Light,
            hidden_cards: Vec::new(),
            selection_threshold_ratio: SELECTION_THRESHOLD_RATIO,
            hover_stickiness: HOVER_STICKINESS,
            notifications_enabled: false,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Self::default();
        }
        match Self::read(&path) {
            Ok(settings) => {
                debug!(path = %path.display(), "Settings loaded");
                settings.sanitized()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join(SETTINGS_FILE);
        if let Err(e) = self.write(&path) {
            warn!(error = %e, "Failed to save settings");
        }
    }

    fn read(path: &Path) -> Result<Self, SettingsError> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&s)?)
    }

    fn write(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Replace tunables that would break hover resolution
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.selection_threshold_ratio.is_finite() && self.selection_threshold_ratio > 0.0) {
            warn!(value = self.selection_threshold_ratio, "Invalid selection threshold ratio, using default");
            self.selection_threshold_ratio = defaults.selection_threshold_ratio;
        }
        if !(self.hover_stickiness.is_finite() && self.hover_stickiness >= 1.0) {
            warn!(value = self.hover_stickiness, "Invalid hover stickiness, using default");
            self.hover_stickiness = defaults.hover_stickiness;
        }
        self
    }

    pub fn is_card_hidden(&self, id: &str) -> bool {
        self.hidden_cards.iter().any(|hidden| hidden == id)
    }

    pub fn set_card_hidden(&mut self, id: &str, hidden: bool) {
        self.hidden_cards.retain(|h| h != id);
        if hidden {
            self.hidden_cards.push(id.to_string());
        }
    }
}
