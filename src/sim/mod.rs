//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of bodies)
//! - Input passed in explicitly, never read from globals
//! - No rendering or platform dependencies

pub mod collision;
pub mod formation;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, colliding};
pub use formation::{InvaderLayout, create_invaders};
pub use input::{Key, KeyState};
pub use state::{Body, BodyId, BodyKind, BodyTag, Bullet, GameEvent, Invader, Player, World, WorldConfig};
pub use tick::{Neighbours, Spawn, TickContext, invaders_below, tick};
