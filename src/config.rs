use serde::{Deserialize, Serialize};
use std::fs;

pub const SETTINGS_PATH: &str = "keyworld.json";

/// User-facing settings. Progress (stars, unlocks, selected skin) is
/// deliberately never written here; only configuration survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub control_scheme: String,
    pub show_fps: bool,
    pub debug_overlay: bool,
    pub editor_grid: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: "both".to_string(),
            show_fps: false,
            debug_overlay: false,
            editor_grid: 20.0,
        }
    }
}

pub fn load_settings(path: &str) -> Settings {
    match fs::read_to_string(path) {
        Ok(text) => parse_settings(&text),
        Err(e) => {
            eprintln!("Could not read settings file {path}: {e}. Using defaults.");
            Settings::default()
        }
    }
}

fn parse_settings(text: &str) -> Settings {
    serde_json::from_str(text).unwrap_or_else(|e| {
        eprintln!("Failed to parse settings: {e}. Using defaults.");
        Settings::default()
    })
}

pub fn save_settings(path: &str, settings: &Settings) -> Result<(), String> {
    let text = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, text).map_err(|e| format!("Failed to write settings file {path}: {e}"))?;
    Ok(())
}
