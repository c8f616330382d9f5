//! Frame driver
//!
//! Owns the world and the frame clock. The platform glue calls `frame` once
//! per animation frame and reacts to the returned events (sound, logging).

use glam::Vec2;

use crate::platform::{FrameClock, TickPacing};
use crate::settings::Settings;
use crate::sim::{GameEvent, KeyState, World, tick};

pub struct GameLoop {
    world: World,
    clock: FrameClock,
}

impl GameLoop {
    pub fn new(world: World, pacing: TickPacing) -> Self {
        Self {
            world,
            clock: FrameClock::new(pacing),
        }
    }

    /// A fresh game on a field of `game_size`
    pub fn from_settings(settings: &Settings, game_size: Vec2, seed: u64) -> Self {
        let world = World::new(settings.world_config(game_size), seed);
        Self::new(world, settings.pacing)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Run every tick owed at `now_ms`, reading `keys` for each one
    pub fn frame(&mut self, now_ms: f64, keys: &KeyState) -> Vec<GameEvent> {
        let ticks = self.clock.advance(now_ms);
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(tick(&mut self.world, keys));
        }
        events
    }
}
