//! Canvas Invaders - a tiny Space Invaders style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, per-tick update)
//! - `game`: Frame driver gluing the clock to the simulation
//! - `renderer`: Canvas 2D and WebGPU render surfaces
//! - `platform`: Browser plumbing (frame pacing, keyboard)
//! - `audio`: Shoot sound loading and playback (wasm only)
//! - `settings`: Player-tweakable configuration

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{RenderError, SettingsError, StartupError};
pub use game::GameLoop;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Playing field used when no canvas dictates one (headless runs)
    pub const DEFAULT_FIELD: Vec2 = Vec2::new(310.0, 310.0);

    /// Player defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(15.0, 15.0);
    /// Horizontal pixels per tick
    pub const PLAYER_SPEED: f32 = 2.0;
    /// Straight up at 6 px/tick
    pub const PLAYER_BULLET_VELOCITY: Vec2 = Vec2::new(0.0, -6.0);

    /// Invader defaults
    pub const INVADER_SIZE: Vec2 = Vec2::new(15.0, 15.0);
    pub const INVADER_SPEED: f32 = 0.3;
    /// Patrol displacement range from spawn, in pixels
    pub const INVADER_PATROL_RANGE: f32 = 40.0;
    /// A uniform draw above this fires (0.5% per tick)
    pub const INVADER_FIRE_THRESHOLD: f64 = 0.995;
    pub const INVADER_BULLET_SPEED: f32 = 2.0;

    /// Formation layout
    pub const INVADER_COUNT: usize = 24;
    pub const INVADER_COLUMNS: usize = 8;
    pub const INVADER_ROWS: usize = 3;
    pub const FORMATION_ORIGIN: f32 = 30.0;
    pub const FORMATION_SPACING: f32 = 30.0;

    /// Bullet defaults
    pub const BULLET_SIZE: Vec2 = Vec2::new(3.0, 3.0);
    /// Bullets this far outside the field are culled
    pub const CULL_MARGIN: f32 = 32.0;

    /// Fixed-timestep pacing
    pub const DEFAULT_TICK_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the fixed clock will honour, in seconds
    pub const MAX_FRAME_DT: f32 = 0.1;
}
