//! Game settings and preferences
//!
//! Persisted as JSON in LocalStorage on the web. Native runs use defaults
//! or a JSON file handed to the headless runner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::platform::TickPacing;
use crate::sim::{InvaderLayout, WorldConfig};

/// Which render surface draws the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RendererBackend {
    /// `CanvasRenderingContext2D` fillRect per body
    #[default]
    Canvas2d,
    /// WebGPU (WebGL fallback) quad batch
    WebGpu,
}

impl RendererBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RendererBackend::Canvas2d => "Canvas 2D",
            RendererBackend::WebGpu => "WebGPU",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Page binding ===
    /// Id of the canvas element to draw on
    pub canvas_id: String,
    /// Shoot sound, relative to the page
    pub sound_url: String,

    // === Rendering ===
    pub renderer: RendererBackend,

    // === Simulation ===
    pub pacing: TickPacing,
    pub invader_layout: InvaderLayout,
    /// Remove bullets that leave the field. Off keeps every bullet forever.
    pub cull_offscreen_bullets: bool,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_id: "screen".to_string(),
            sound_url: "shoot.mp3".to_string(),

            renderer: RendererBackend::Canvas2d,

            pacing: TickPacing::PerFrame,
            invader_layout: InvaderLayout::Cycling,
            cull_offscreen_bullets: true,
            seed: None,

            master_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_invaders_settings";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Playback volume handed to the audio manager, after mute
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Simulation knobs for a field of `game_size`
    pub fn world_config(&self, game_size: Vec2) -> WorldConfig {
        WorldConfig {
            game_size,
            invader_layout: self.invader_layout,
            cull_offscreen_bullets: self.cull_offscreen_bullets,
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file, falling back to defaults on error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
