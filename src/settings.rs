//! Game settings and preferences
//!
//! Persisted as JSON next to the game (or wherever `BREAKOUT_SETTINGS`
//! points). The control mode is the one value scenes change at runtime; it
//! is shared through [`SharedSettings`] and written only by the title
//! screen's Controls toggle.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "BREAKOUT_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// How the paddle is steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Paddle follows the pointer's x position
    #[default]
    Pointer,
    /// Paddle moves while the arrow keys are held
    Keyboard,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Pointer => "Mouse",
            ControlMode::Keyboard => "Keyboard",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub control_mode: ControlMode,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Where leaderboard entries are stored
    pub leaderboard_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_mode: ControlMode::Pointer,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            leaderboard_path: PathBuf::from("scores.json"),
        }
    }
}

/// Settings shared between the driver and the scenes (single-threaded)
pub type SharedSettings = Rc<RefCell<Settings>>;

impl Settings {
    pub fn into_shared(self) -> SharedSettings {
        Rc::new(RefCell::new(self))
    }

    /// Settings file location, honouring the environment override
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    pub fn try_load(path: &std::path::Path) -> Result<Self, PersistError> {
        let mut settings: Settings = persistence::load_json(path)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load() -> Self {
        let path = Self::path();
        match Self::try_load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) if err.is_not_found() => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Using default settings: {}", err);
                Self::default()
            }
        }
    }

    /// Save settings, logging failures
    pub fn save(&self) {
        let path = Self::path();
        match persistence::save_json(&path, self) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(err) => log::error!("Failed to save settings: {}", err),
        }
    }
}
