//! World state and body types
//!
//! Every simulated object is a `Body`: a box with a center, a size and
//! a variant-specific payload.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::formation::{InvaderLayout, create_invaders};
use crate::consts::*;

/// Stable identity of a body within one world
pub type BodyId = u32;

/// The player's cannon
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Player;

/// A member of the invader formation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invader {
    /// Running horizontal displacement from spawn
    pub patrol_x: f32,
    /// Signed horizontal speed, flips at the patrol bounds
    pub speed_x: f32,
}

impl Default for Invader {
    fn default() -> Self {
        Self {
            patrol_x: 0.0,
            speed_x: INVADER_SPEED,
        }
    }
}

impl Invader {
    /// Advance the triangle-wave patrol, returning the x displacement applied
    pub fn patrol(&mut self) -> f32 {
        if self.patrol_x < 0.0 || self.patrol_x > INVADER_PATROL_RANGE {
            self.speed_x = -self.speed_x;
        }
        self.patrol_x += self.speed_x;
        self.speed_x
    }
}

/// A projectile, fired by the player or an invader
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub velocity: Vec2,
}

/// Variant payload of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyKind {
    Player(Player),
    Invader(Invader),
    Bullet(Bullet),
}

/// Payload-free tag, for events and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyTag {
    Player,
    Invader,
    Bullet,
}

/// A simulated box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub center: Vec2,
    /// Full extents (width, height)
    pub size: Vec2,
    pub kind: BodyKind,
}

impl Body {
    pub fn player(id: BodyId, center: Vec2) -> Self {
        Self {
            id,
            center,
            size: PLAYER_SIZE,
            kind: BodyKind::Player(Player),
        }
    }

    pub fn invader(id: BodyId, center: Vec2) -> Self {
        Self {
            id,
            center,
            size: INVADER_SIZE,
            kind: BodyKind::Invader(Invader::default()),
        }
    }

    pub fn bullet(id: BodyId, center: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            center,
            size: BULLET_SIZE,
            kind: BodyKind::Bullet(Bullet { velocity }),
        }
    }

    pub fn tag(&self) -> BodyTag {
        match self.kind {
            BodyKind::Player(_) => BodyTag::Player,
            BodyKind::Invader(_) => BodyTag::Invader,
            BodyKind::Bullet(_) => BodyTag::Bullet,
        }
    }

    pub fn is_invader(&self) -> bool {
        matches!(self.kind, BodyKind::Invader(_))
    }

    /// Top-left corner of the bounding box
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player spawned a bullet (the glue plays the shoot sound)
    PlayerFired { bullet: BodyId },
    /// An invader dropped a bullet
    InvaderFired { invader: BodyId, bullet: BodyId },
    /// Body removed by the collision filter
    Destroyed { id: BodyId, tag: BodyTag },
    /// Bullet removed for leaving the field
    Culled { id: BodyId },
}

/// Knobs fixed for the lifetime of a world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Playing-field bounds
    pub game_size: Vec2,
    pub invader_layout: InvaderLayout,
    /// Remove bullets once they leave the field
    pub cull_offscreen_bullets: bool,
}

impl WorldConfig {
    pub fn new(game_size: Vec2) -> Self {
        Self {
            game_size,
            invader_layout: InvaderLayout::default(),
            cull_offscreen_bullets: true,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD)
    }
}

/// The whole simulation: an ordered list of bodies plus bookkeeping
#[derive(Debug, Clone)]
pub struct World {
    pub config: WorldConfig,
    /// Live bodies in insertion order
    pub bodies: Vec<Body>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: BodyId,
}

impl World {
    /// A world with nothing in it
    pub fn empty(config: WorldConfig, seed: u64) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// A fresh game: the invader formation followed by the player
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        let mut world = Self::empty(config, seed);

        for center in create_invaders(config.invader_layout) {
            world.add_invader(center);
        }

        let size = config.game_size;
        world.add_player(Vec2::new(size.x / 2.0, size.y - PLAYER_SIZE.x));

        log::info!(
            "World created: {} bodies, field {}x{}, seed {}",
            world.bodies.len(),
            size.x,
            size.y,
            seed
        );
        world
    }

    pub fn game_size(&self) -> Vec2 {
        self.config.game_size
    }

    /// Allocate a new body ID
    pub fn next_body_id(&mut self) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_player(&mut self, center: Vec2) -> BodyId {
        let id = self.next_body_id();
        self.bodies.push(Body::player(id, center));
        id
    }

    pub fn add_invader(&mut self, center: Vec2) -> BodyId {
        let id = self.next_body_id();
        self.bodies.push(Body::invader(id, center));
        id
    }

    pub fn add_bullet(&mut self, center: Vec2, velocity: Vec2) -> BodyId {
        let id = self.next_body_id();
        self.bodies.push(Body::bullet(id, center, velocity));
        id
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.body(id).is_some()
    }

    pub fn count(&self, tag: BodyTag) -> usize {
        self.bodies.iter().filter(|b| b.tag() == tag).count()
    }

    pub fn player(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.tag() == BodyTag::Player)
    }
}
