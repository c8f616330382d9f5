//! Per-tick world update
//!
//! One tick is: drop everything that touches something, then let every
//! survivor move and shoot, then cull stray bullets.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{aabb_overlap, collides_with_any};
use super::input::{Key, KeyState};
use super::state::{Body, BodyId, BodyKind, BodyTag, GameEvent, World};
use crate::consts::*;

/// Shared, read-mostly inputs for a body update
pub struct TickContext<'a> {
    pub keys: &'a KeyState,
    pub rng: &'a mut Pcg32,
}

/// Every other live body, split around the one being updated
#[derive(Debug, Clone, Copy)]
pub struct Neighbours<'a> {
    before: &'a [Body],
    after: &'a [Body],
}

impl<'a> Neighbours<'a> {
    pub fn new(before: &'a [Body], after: &'a [Body]) -> Self {
        Self { before, after }
    }

    pub fn iter(self) -> impl Iterator<Item = &'a Body> {
        self.before.iter().chain(self.after)
    }
}

/// Who pulled the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shooter {
    Player,
    Invader(BodyId),
}

/// A bullet a body asks the world to add
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub center: Vec2,
    pub velocity: Vec2,
    pub shooter: Shooter,
}

impl Body {
    /// Advance this body by one tick. May request one bullet spawn.
    pub fn update(
        &mut self,
        ctx: &mut TickContext<'_>,
        neighbours: &Neighbours<'_>,
    ) -> Option<Spawn> {
        match &mut self.kind {
            BodyKind::Player(_) => {
                if ctx.keys.is_down(Key::Left) {
                    self.center.x -= PLAYER_SPEED;
                } else if ctx.keys.is_down(Key::Right) {
                    self.center.x += PLAYER_SPEED;
                }

                ctx.keys.is_down(Key::Fire).then(|| Spawn {
                    center: Vec2::new(self.center.x, self.center.y - self.size.x / 2.0),
                    velocity: PLAYER_BULLET_VELOCITY,
                    shooter: Shooter::Player,
                })
            }
            BodyKind::Invader(invader) => {
                self.center.x += invader.patrol();

                let roll: f64 = ctx.rng.random();
                if roll > INVADER_FIRE_THRESHOLD && !invaders_below(self, neighbours.iter()) {
                    let drift = ctx.rng.random::<f32>() - 0.5;
                    Some(Spawn {
                        center: Vec2::new(self.center.x, self.center.y + self.size.x / 2.0),
                        velocity: Vec2::new(drift, INVADER_BULLET_SPEED),
                        shooter: Shooter::Invader(self.id),
                    })
                } else {
                    None
                }
            }
            BodyKind::Bullet(bullet) => {
                self.center += bullet.velocity;
                None
            }
        }
    }
}

/// Whether another invader sits below `invader`, within one body width
/// horizontally. Only the lowest invader of a column may fire.
pub fn invaders_below<'a>(invader: &Body, mut others: impl Iterator<Item = &'a Body>) -> bool {
    others.any(|b| {
        b.is_invader()
            && b.center.y > invader.center.y
            && (b.center.x - invader.center.x).abs() < invader.size.x
    })
}

/// Advance the world by one tick, returning what happened
pub fn tick(world: &mut World, keys: &KeyState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    remove_colliding(world, &mut events);
    update_bodies(world, keys, &mut events);
    if world.config.cull_offscreen_bullets {
        cull_offscreen_bullets(world, &mut events);
    }

    world.time_ticks += 1;
    events
}

/// Destructive filter: every body touching any other body is removed,
/// judged on positions from the end of the previous tick.
fn remove_colliding(world: &mut World, events: &mut Vec<GameEvent>) {
    let bodies = &world.bodies;
    let keep: Vec<bool> = bodies
        .iter()
        .map(|body| !collides_with_any(body, bodies.iter()))
        .collect();

    for (body, _) in bodies.iter().zip(&keep).filter(|(_, keep)| !**keep) {
        log::debug!("Body {} ({:?}) destroyed at {}", body.id, body.tag(), body.center);
        if body.tag() == BodyTag::Player {
            log::info!("Player destroyed on tick {}", world.time_ticks);
        }
        events.push(GameEvent::Destroyed {
            id: body.id,
            tag: body.tag(),
        });
    }

    let mut keep = keep.into_iter();
    world.bodies.retain(|_| keep.next().unwrap_or(true));
}

/// Update bodies in list order. Spawned bullets are appended and reached by
/// the same pass, so a fresh bullet clears its shooter before the next
/// collision filter.
fn update_bodies(world: &mut World, keys: &KeyState, events: &mut Vec<GameEvent>) {
    let mut index = 0;
    while index < world.bodies.len() {
        let spawn = {
            let (before, rest) = world.bodies.split_at_mut(index);
            let Some((body, after)) = rest.split_first_mut() else {
                break;
            };
            let mut ctx = TickContext {
                keys,
                rng: &mut world.rng,
            };
            body.update(&mut ctx, &Neighbours::new(before, after))
        };

        if let Some(spawn) = spawn {
            let bullet = world.add_bullet(spawn.center, spawn.velocity);
            events.push(match spawn.shooter {
                Shooter::Player => GameEvent::PlayerFired { bullet },
                Shooter::Invader(invader) => GameEvent::InvaderFired { invader, bullet },
            });
        }

        index += 1;
    }
}

/// Drop bullets whose box lies entirely outside the field plus a margin
fn cull_offscreen_bullets(world: &mut World, events: &mut Vec<GameEvent>) {
    let field = world.game_size();
    let bounds_center = field / 2.0;
    let bounds_size = field + Vec2::splat(CULL_MARGIN * 2.0);

    world.bodies.retain(|body| {
        let inside = body.tag() != BodyTag::Bullet
            || aabb_overlap(body.center, body.size, bounds_center, bounds_size);
        if !inside {
            events.push(GameEvent::Culled { id: body.id });
        }
        inside
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Invader, WorldConfig};
    use proptest::prelude::*;

    fn empty_world() -> World {
        World::empty(WorldConfig::new(Vec2::new(300.0, 300.0)), 42)
    }

    fn destroyed(events: &[GameEvent]) -> Vec<BodyId> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Destroyed { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_player_and_touching_bullet_both_removed() {
        let mut world = empty_world();
        let player = world.add_player(Vec2::new(50.0, 50.0));
        let bullet = world.add_bullet(Vec2::new(50.0, 50.0), Vec2::new(0.0, -6.0));

        let events = tick(&mut world, &KeyState::new());

        assert!(world.bodies.is_empty());
        assert_eq!(destroyed(&events), vec![player, bullet]);
    }

    #[test]
    fn test_cluster_removed_in_one_pass() {
        let mut world = empty_world();
        // a touches b, b touches c, a and c are apart
        let a = world.add_invader(Vec2::new(100.0, 100.0));
        let b = world.add_invader(Vec2::new(110.0, 100.0));
        let c = world.add_player(Vec2::new(120.0, 100.0));
        let lone = world.add_invader(Vec2::new(200.0, 30.0));

        let events = tick(&mut world, &KeyState::new());

        assert_eq!(destroyed(&events), vec![a, b, c]);
        assert!(world.contains(lone));
        assert!(world.player().is_none());
    }

    #[test]
    fn test_filter_runs_before_movement() {
        let mut world = empty_world();
        // 8 px gap between box edges, closed by the first update
        let a = world.add_bullet(Vec2::new(100.0, 100.0), Vec2::new(10.0, 0.0));
        let b = world.add_bullet(Vec2::new(111.0, 100.0), Vec2::ZERO);

        let events = tick(&mut world, &KeyState::new());
        assert!(destroyed(&events).is_empty());
        assert!(world.contains(a) && world.contains(b));

        let events = tick(&mut world, &KeyState::new());
        assert_eq!(destroyed(&events), vec![a, b]);
    }

    #[test]
    fn test_player_movement_left_wins() {
        let mut world = empty_world();
        let id = world.add_player(Vec2::new(100.0, 280.0));

        tick(&mut world, &KeyState::with_held(&[Key::Left, Key::Right]));
        assert_eq!(world.body(id).unwrap().center.x, 98.0);

        tick(&mut world, &KeyState::with_held(&[Key::Right]));
        tick(&mut world, &KeyState::with_held(&[Key::Right]));
        assert_eq!(world.body(id).unwrap().center.x, 102.0);
    }

    #[test]
    fn test_player_can_leave_the_field() {
        let mut world = empty_world();
        let id = world.add_player(Vec2::new(1.0, 280.0));

        tick(&mut world, &KeyState::with_held(&[Key::Left]));
        assert_eq!(world.body(id).unwrap().center.x, -1.0);
    }

    #[test]
    fn test_player_fire_spawns_bullet_and_survives() {
        let mut world = empty_world();
        let player = world.add_player(Vec2::new(100.0, 280.0));
        let fire = KeyState::with_held(&[Key::Fire]);

        let events = tick(&mut world, &fire);
        let bullet = match events.as_slice() {
            [GameEvent::PlayerFired { bullet }] => *bullet,
            other => panic!("unexpected events {other:?}"),
        };
        // Spawned at y - 7.5 and moved once in the same pass
        assert_eq!(world.body(bullet).unwrap().center, Vec2::new(100.0, 266.5));

        // Holding fire keeps spawning without hitting the player
        for _ in 0..5 {
            let events = tick(&mut world, &fire);
            assert!(destroyed(&events).is_empty());
        }
        assert!(world.contains(player));
        assert_eq!(world.count(BodyTag::Bullet), 6);
    }

    #[test]
    fn test_bullet_moves_linearly() {
        let mut world = empty_world();
        let id = world.add_bullet(Vec2::new(150.0, 290.0), Vec2::new(0.0, -6.0));

        for _ in 0..10 {
            tick(&mut world, &KeyState::new());
        }
        assert_eq!(world.body(id).unwrap().center, Vec2::new(150.0, 230.0));
    }

    #[test]
    fn test_offscreen_bullets_culled() {
        let mut world = empty_world();
        let id = world.add_bullet(Vec2::new(150.0, 5.0), Vec2::new(0.0, -10.0));

        let mut culled = false;
        for _ in 0..10 {
            let events = tick(&mut world, &KeyState::new());
            culled |= events.contains(&GameEvent::Culled { id });
        }
        assert!(culled);
        assert!(!world.contains(id));
    }

    #[test]
    fn test_offscreen_bullets_kept_when_culling_disabled() {
        let mut config = WorldConfig::new(Vec2::new(300.0, 300.0));
        config.cull_offscreen_bullets = false;
        let mut world = World::empty(config, 42);
        let id = world.add_bullet(Vec2::new(150.0, 5.0), Vec2::new(0.0, -10.0));

        for _ in 0..100 {
            tick(&mut world, &KeyState::new());
        }
        assert_eq!(world.body(id).unwrap().center.y, -995.0);
    }

    #[test]
    fn test_invader_patrol_is_periodic_and_bounded() {
        let mut invader = Invader::default();
        let mut flips = 0;
        let mut returned = false;
        let mut last_speed = invader.speed_x;

        for step in 0..2000 {
            invader.patrol();
            if invader.speed_x != last_speed {
                flips += 1;
                last_speed = invader.speed_x;
            }
            assert!(invader.patrol_x <= INVADER_PATROL_RANGE + INVADER_SPEED + 1e-3);
            assert!(invader.patrol_x >= -INVADER_SPEED - 1e-3);
            if step > 10 && flips % 2 == 0 && flips > 0 && invader.patrol_x.abs() < INVADER_SPEED {
                returned = true;
            }
        }
        assert!(returned);
        assert!(flips >= 2);
    }

    #[test]
    fn test_invader_moves_with_patrol() {
        let mut world = empty_world();
        let id = world.add_invader(Vec2::new(30.0, 30.0));

        for _ in 0..10 {
            tick(&mut world, &KeyState::new());
        }
        let body = world.body(id).unwrap();
        assert!((body.center.x - 33.0).abs() < 1e-4);
        assert_eq!(body.center.y, 30.0);
    }

    #[test]
    fn test_invaders_below() {
        let top = Body::invader(1, Vec2::new(30.0, 30.0));
        let below = Body::invader(2, Vec2::new(40.0, 60.0));
        let beside = Body::invader(3, Vec2::new(60.0, 60.0));
        let above = Body::invader(4, Vec2::new(30.0, 0.0));
        let bullet = Body::bullet(5, Vec2::new(30.0, 60.0), Vec2::ZERO);

        assert!(invaders_below(&top, [below.clone()].iter()));
        assert!(!invaders_below(&top, [beside, above, bullet].iter()));
        // Left of the shooter counts just like right
        let left = Body::invader(6, Vec2::new(20.0, 60.0));
        assert!(invaders_below(&top, [left].iter()));
    }

    #[test]
    fn test_invaders_below_excludes_exactly_one_width_apart() {
        let top = Body::invader(1, Vec2::new(30.0, 30.0));
        // |dx| == size.x on either side is a neighbouring column
        let right = Body::invader(2, Vec2::new(45.0, 60.0));
        let left = Body::invader(3, Vec2::new(15.0, 60.0));
        assert!(!invaders_below(&top, [right, left].iter()));

        let just_inside = Body::invader(4, Vec2::new(44.9, 60.0));
        assert!(invaders_below(&top, [just_inside].iter()));
    }

    #[test]
    fn test_covered_invader_never_fires() {
        let mut world = empty_world();
        let top = world.add_invader(Vec2::new(100.0, 30.0));
        world.add_invader(Vec2::new(100.0, 60.0));

        for _ in 0..3000 {
            let events = tick(&mut world, &KeyState::new());
            for event in events {
                if let GameEvent::InvaderFired { invader, .. } = event {
                    assert_ne!(invader, top);
                }
            }
        }
    }

    #[test]
    fn test_lone_invader_eventually_fires_downward() {
        let mut world = empty_world();
        let id = world.add_invader(Vec2::new(100.0, 30.0));

        let mut shot = None;
        for _ in 0..5000 {
            let events = tick(&mut world, &KeyState::new());
            if let Some(GameEvent::InvaderFired { invader, bullet }) = events
                .iter()
                .find(|e| matches!(e, GameEvent::InvaderFired { .. }))
            {
                assert_eq!(*invader, id);
                shot = Some(*bullet);
                break;
            }
        }

        let bullet = world.body(shot.expect("invader never fired")).unwrap();
        let BodyKind::Bullet(b) = bullet.kind else {
            panic!("spawn was not a bullet");
        };
        assert_eq!(b.velocity.y, INVADER_BULLET_SPEED);
        assert!(b.velocity.x >= -0.5 && b.velocity.x < 0.5);
        assert!(world.contains(id));
    }

    #[test]
    fn test_determinism() {
        let config = WorldConfig::default();
        let mut world1 = World::new(config, 99999);
        let mut world2 = World::new(config, 99999);

        let inputs = [
            KeyState::with_held(&[Key::Left]),
            KeyState::with_held(&[Key::Fire]),
            KeyState::with_held(&[Key::Right, Key::Fire]),
            KeyState::new(),
        ];

        for i in 0..400 {
            let keys = &inputs[i % inputs.len()];
            assert_eq!(tick(&mut world1, keys), tick(&mut world2, keys));
        }

        assert_eq!(world1.time_ticks, 400);
        assert_eq!(world1.bodies, world2.bodies);
    }

    proptest! {
        #[test]
        fn prop_bullet_position_is_linear(
            x in -100i32..100, y in -100i32..100,
            vx in -8i32..8, vy in -8i32..8,
            n in 0u32..200,
        ) {
            let mut config = WorldConfig::default();
            config.cull_offscreen_bullets = false;
            let mut world = World::empty(config, 1);
            let start = Vec2::new(x as f32, y as f32);
            let velocity = Vec2::new(vx as f32, vy as f32);
            let id = world.add_bullet(start, velocity);

            for _ in 0..n {
                tick(&mut world, &KeyState::new());
            }
            prop_assert_eq!(world.body(id).unwrap().center, start + velocity * n as f32);
        }
    }
}
