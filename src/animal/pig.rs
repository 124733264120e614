use super::{approach, step_toward, AgentCtx};
use crate::ecs::components::{Body, Home};

pub const TURN_RATE: f32 = 4.0;
pub const VOICE_MIN: f32 = 5.0;
pub const VOICE_SPREAD: f32 = 3.0;

const WALK_SPEED: f32 = 1.0;
const ARRIVE_DIST: f32 = 0.4;
/// Forward creep while rooting in the dirt.
const ROOT_SPEED: f32 = 0.2;
const SNOUT_RATE: f32 = 3.0;
const ROOT_DIP: f32 = 0.6;
const WALLOW_RATE: f32 = 4.0;
/// Snort shake multiplier applied every tick.
const SNORT_DECAY: f32 = 0.9;
/// Per-tick chance of a snort while idle.
const SNORT_CHANCE: f32 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PigState {
    Wander,
    Root,
    Wallow,
    Idle,
}

impl PigState {
    pub fn label(self) -> &'static str {
        match self {
            PigState::Wander => "wander",
            PigState::Root => "root",
            PigState::Wallow => "wallow",
            PigState::Idle => "idle",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pig {
    pub state: PigState,
    pub snout_dip: f32,
    pub wallow_phase: f32,
    pub snort_shake: f32,
}

impl Pig {
    pub fn new(body: &mut Body, home: &Home, rng: &mut fastrand::Rng) -> Self {
        body.timer = 2.0;
        body.target = home.sample_target(rng);
        Self {
            state: PigState::Wander,
            snout_dip: 0.0,
            wallow_phase: 0.0,
            snort_shake: 0.0,
        }
    }
}

/// Choice made when a walk ends. `Wander` means pick a fresh target.
pub fn after_walk(roll: f32) -> PigState {
    if roll < 0.35 {
        PigState::Root
    } else if roll < 0.55 {
        PigState::Wallow
    } else if roll < 0.75 {
        PigState::Idle
    } else {
        PigState::Wander
    }
}

fn start_walk(pig: &mut Pig, body: &mut Body, home: &Home, ctx: &mut AgentCtx, lo: f32, span: f32) {
    pig.state = PigState::Wander;
    body.target = home.sample_target(ctx.rng);
    body.timer = ctx.range(lo, span);
}

pub fn update(pig: &mut Pig, body: &mut Body, home: &Home, ctx: &mut AgentCtx) {
    let dt = ctx.dt;
    pig.snort_shake *= SNORT_DECAY;

    match pig.state {
        PigState::Wander => {
            let dist = body.distance_to_target();
            if dist > ARRIVE_DIST {
                step_toward(body, WALK_SPEED, dt);
            }
            approach(&mut pig.snout_dip, 0.0, SNOUT_RATE, dt);
            if dist < ARRIVE_DIST || body.timer <= 0.0 {
                match after_walk(ctx.roll()) {
                    PigState::Root => {
                        pig.state = PigState::Root;
                        body.timer = ctx.range(2.0, 3.0);
                    }
                    PigState::Wallow => {
                        pig.state = PigState::Wallow;
                        body.timer = ctx.range(3.0, 3.0);
                        pig.wallow_phase = 0.0;
                    }
                    PigState::Idle => {
                        pig.state = PigState::Idle;
                        body.timer = ctx.range(1.5, 2.0);
                    }
                    PigState::Wander => start_walk(pig, body, home, ctx, 3.0, 3.0),
                }
            }
        }
        PigState::Root => {
            approach(&mut pig.snout_dip, ROOT_DIP, SNOUT_RATE, dt);
            let forward = glam::Vec2::new(body.facing.sin(), body.facing.cos());
            body.pos += forward * ROOT_SPEED * dt;
            // Strayed past the pen edge: turn back toward home.
            let back = home.center - body.pos;
            if back.length() > home.radius {
                body.facing = back.x.atan2(back.y);
            }
            if body.timer <= 0.0 {
                pig.state = PigState::Idle;
                body.timer = ctx.range(1.0, 1.5);
                pig.snort_shake = 1.0;
            }
        }
        PigState::Wallow => {
            pig.wallow_phase += dt * WALLOW_RATE;
            approach(&mut pig.snout_dip, 0.0, SNOUT_RATE, dt);
            if body.timer <= 0.0 {
                start_walk(pig, body, home, ctx, 2.0, 3.0);
            }
        }
        PigState::Idle => {
            approach(&mut pig.snout_dip, 0.0, SNOUT_RATE, dt);
            if ctx.roll() < SNORT_CHANCE {
                pig.snort_shake = 0.5;
            }
            if body.timer <= 0.0 {
                start_walk(pig, body, home, ctx, 3.0, 3.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn walk_end_bands() {
        assert_eq!(after_walk(0.2), PigState::Root);
        assert_eq!(after_walk(0.35), PigState::Wallow);
        assert_eq!(after_walk(0.55), PigState::Idle);
        assert_eq!(after_walk(0.75), PigState::Wander);
    }

    #[test]
    fn rooting_turns_back_at_pen_edge() {
        let mut rng = fastrand::Rng::with_seed(4);
        let home = Home::new(0.0, 0.0, 1.0);
        let mut body = Body::at(Vec2::new(0.0, 0.99));
        let mut pig = Pig::new(&mut body, &home, &mut rng);
        pig.state = PigState::Root;
        body.facing = 0.0; // +z, straight out of the pen
        body.timer = 100.0;

        for _ in 0..400 {
            let mut ctx = AgentCtx { dt: 0.05, elapsed: 0.0, player: Vec2::ZERO, rng: &mut rng };
            update(&mut pig, &mut body, &home, &mut ctx);
            assert!(body.pos.length() <= 1.0 + ROOT_SPEED * 0.05 + 1e-4);
        }
        assert!(pig.snout_dip > 0.5);
    }

    #[test]
    fn rooting_ends_with_snort() {
        let mut rng = fastrand::Rng::with_seed(5);
        let home = Home::new(0.0, 0.0, 4.0);
        let mut body = Body::at(Vec2::ZERO);
        let mut pig = Pig::new(&mut body, &home, &mut rng);
        pig.state = PigState::Root;
        body.timer = 0.0;
        let mut ctx = AgentCtx { dt: 0.05, elapsed: 0.0, player: Vec2::ZERO, rng: &mut rng };
        update(&mut pig, &mut body, &home, &mut ctx);
        assert_eq!(pig.state, PigState::Idle);
        assert_eq!(pig.snort_shake, 1.0);
    }
}
