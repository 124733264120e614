use super::{approach, step_toward, AgentCtx};
use crate::ecs::components::{Body, Home};

pub const TURN_RATE: f32 = 4.0;
pub const VOICE_MIN: f32 = 6.0;
pub const VOICE_SPREAD: f32 = 3.0;

const WALK_SPEED: f32 = 1.2;
const ARRIVE_DIST: f32 = 0.5;
const HEAD_RATE: f32 = 3.0;
const GRAZE_DIP: f32 = 0.5;
const CHEW_RATE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CowState {
    Wander,
    Graze,
    Idle,
}

impl CowState {
    pub fn label(self) -> &'static str {
        match self {
            CowState::Wander => "wander",
            CowState::Graze => "graze",
            CowState::Idle => "idle",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Cow {
    pub state: CowState,
    /// Head lowered toward the grass (radians).
    pub head_dip: f32,
    pub chew_phase: f32,
}

impl Cow {
    pub fn new(body: &mut Body, home: &Home, rng: &mut fastrand::Rng) -> Self {
        body.timer = 0.0;
        body.target = home.sample_target(rng);
        Self {
            state: CowState::Wander,
            head_dip: 0.0,
            chew_phase: 0.0,
        }
    }
}

/// Choice made when a walk ends. `Wander` means pick a fresh target and keep walking.
pub fn after_walk(roll: f32) -> CowState {
    if roll < 0.5 {
        CowState::Graze
    } else if roll < 0.8 {
        CowState::Idle
    } else {
        CowState::Wander
    }
}

fn start_walk(body: &mut Body, home: &Home, ctx: &mut AgentCtx, lo: f32, span: f32) {
    body.target = home.sample_target(ctx.rng);
    body.timer = ctx.range(lo, span);
}

pub fn update(cow: &mut Cow, body: &mut Body, home: &Home, ctx: &mut AgentCtx) {
    let dt = ctx.dt;
    match cow.state {
        CowState::Wander => {
            if body.distance_to_target() < ARRIVE_DIST || body.timer <= 0.0 {
                cow.state = after_walk(ctx.roll());
                match cow.state {
                    CowState::Graze => body.timer = ctx.range(3.0, 4.0),
                    CowState::Idle => body.timer = ctx.range(2.0, 3.0),
                    CowState::Wander => start_walk(body, home, ctx, 4.0, 3.0),
                }
            } else {
                step_toward(body, WALK_SPEED, dt);
            }
            approach(&mut cow.head_dip, 0.0, HEAD_RATE, dt);
        }
        CowState::Graze => {
            approach(&mut cow.head_dip, GRAZE_DIP, HEAD_RATE, dt);
            cow.chew_phase += dt * CHEW_RATE;
            if body.timer <= 0.0 {
                cow.state = CowState::Wander;
                start_walk(body, home, ctx, 3.0, 3.0);
            }
        }
        CowState::Idle => {
            approach(&mut cow.head_dip, 0.0, HEAD_RATE, dt);
            if body.timer <= 0.0 {
                cow.state = CowState::Wander;
                start_walk(body, home, ctx, 3.0, 4.0);
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
        assert_eq!(after_walk(0.0), CowState::Graze);
        assert_eq!(after_walk(0.49), CowState::Graze);
        assert_eq!(after_walk(0.5), CowState::Idle);
        assert_eq!(after_walk(0.79), CowState::Idle);
        assert_eq!(after_walk(0.8), CowState::Wander);
    }

    #[test]
    fn grazing_lowers_head_and_chews() {
        let mut rng = fastrand::Rng::with_seed(11);
        let home = Home::new(0.0, 0.0, 5.0);
        let mut body = Body::at(home.center);
        let mut cow = Cow::new(&mut body, &home, &mut rng);
        cow.state = CowState::Graze;
        body.timer = 10.0;

        let start = body.pos;
        for _ in 0..60 {
            let mut ctx = AgentCtx { dt: 0.05, elapsed: 0.0, player: Vec2::ZERO, rng: &mut rng };
            body.timer -= ctx.dt;
            update(&mut cow, &mut body, &home, &mut ctx);
        }
        assert_eq!(cow.state, CowState::Graze);
        assert_eq!(body.pos, start);
        assert!(cow.head_dip > 0.45 && cow.head_dip < GRAZE_DIP);
        assert!((cow.chew_phase - 15.0).abs() < 1e-3);
    }

    #[test]
    fn idle_returns_to_wander_with_new_target() {
        let mut rng = fastrand::Rng::with_seed(12);
        let home = Home::new(4.0, 4.0, 5.0);
        let mut body = Body::at(home.center);
        let mut cow = Cow::new(&mut body, &home, &mut rng);
        cow.state = CowState::Idle;
        body.timer = 0.0;

        let mut ctx = AgentCtx { dt: 0.05, elapsed: 0.0, player: Vec2::ZERO, rng: &mut rng };
        update(&mut cow, &mut body, &home, &mut ctx);
        assert_eq!(cow.state, CowState::Wander);
        assert!(body.timer >= 3.0 && body.timer < 7.0);
        assert!(body.target.distance(home.center) <= 5.0 + 1e-4);
    }
}
