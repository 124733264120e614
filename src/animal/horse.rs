use super::{approach, step_toward, AgentCtx};
use crate::ecs::components::{Body, Home};

pub const TURN_RATE: f32 = 4.0;

const ARRIVE_DIST: f32 = 0.5;
const TROT_SPEED: f32 = 2.0;
const GALLOP_SPEED: f32 = 4.5;
/// How fast the gait speed ramps toward its target.
const GAIT_RATE: f32 = 2.0;
const SETTLE_RATE: f32 = 3.0;
const LEG_RATE: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorseState {
    Idle,
    Graze,
    Trot,
    Gallop,
}

impl HorseState {
    pub fn label(self) -> &'static str {
        match self {
            HorseState::Idle => "idle",
            HorseState::Graze => "graze",
            HorseState::Trot => "trot",
            HorseState::Gallop => "gallop",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Horse {
    pub state: HorseState,
    pub head_dip: f32,
    /// Current gait speed (units/second), eased between states.
    pub speed: f32,
    pub leg_phase: f32,
}

impl Horse {
    pub fn new(body: &mut Body, rng: &mut fastrand::Rng) -> Self {
        body.timer = 1.0 + rng.f32() * 2.0;
        Self {
            state: HorseState::Idle,
            head_dip: 0.0,
            speed: 0.0,
            leg_phase: 0.0,
        }
    }
}

pub fn after_idle(roll: f32) -> HorseState {
    if roll < 0.3 {
        HorseState::Graze
    } else if roll < 0.7 {
        HorseState::Trot
    } else {
        HorseState::Gallop
    }
}

/// Shared trot/gallop step. Returns true once the run is over.
fn run(horse: &mut Horse, body: &mut Body, ctx: &AgentCtx, gait_speed: f32, head: f32, bob: f32) -> bool {
    let dt = ctx.dt;
    approach(&mut horse.head_dip, head, SETTLE_RATE, dt);
    approach(&mut horse.speed, gait_speed, GAIT_RATE, dt);
    let dist = body.distance_to_target();
    if dist > ARRIVE_DIST {
        step_toward(body, horse.speed, dt);
        body.lift = (ctx.elapsed * bob).sin().abs() * (gait_speed * 0.03).min(0.12);
    }
    dist < ARRIVE_DIST || body.timer <= 0.0
}

pub fn update(horse: &mut Horse, body: &mut Body, home: &Home, ctx: &mut AgentCtx) {
    let dt = ctx.dt;
    match horse.state {
        HorseState::Idle => {
            approach(&mut horse.speed, 0.0, SETTLE_RATE, dt);
            approach(&mut horse.head_dip, 0.0, SETTLE_RATE, dt);
            if body.timer <= 0.0 {
                horse.state = after_idle(ctx.roll());
                match horse.state {
                    HorseState::Graze => body.timer = ctx.range(3.0, 4.0),
                    HorseState::Trot => {
                        body.target = home.sample_target(ctx.rng);
                        body.timer = ctx.range(3.0, 3.0);
                    }
                    HorseState::Gallop => {
                        body.target = home.sample_target(ctx.rng);
                        body.timer = ctx.range(1.5, 2.0);
                    }
                    HorseState::Idle => {}
                }
            }
        }
        HorseState::Graze => {
            approach(&mut horse.speed, 0.0, SETTLE_RATE, dt);
            approach(&mut horse.head_dip, 0.6, SETTLE_RATE, dt);
            if body.timer <= 0.0 {
                horse.state = HorseState::Idle;
                body.timer = ctx.range(1.0, 2.0);
            }
        }
        HorseState::Trot => {
            if run(horse, body, ctx, TROT_SPEED, 0.05, 6.0) {
                body.lift = 0.0;
                horse.state = HorseState::Idle;
                body.timer = ctx.range(1.5, 2.0);
            }
        }
        HorseState::Gallop => {
            if run(horse, body, ctx, GALLOP_SPEED, -0.1, 10.0) {
                body.lift = 0.0;
                horse.state = HorseState::Idle;
                body.timer = ctx.range(2.0, 3.0);
            }
        }
    }
    horse.leg_phase += horse.speed * dt * LEG_RATE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn idle_bands() {
        assert_eq!(after_idle(0.0), HorseState::Graze);
        assert_eq!(after_idle(0.3), HorseState::Trot);
        assert_eq!(after_idle(0.69), HorseState::Trot);
        assert_eq!(after_idle(0.7), HorseState::Gallop);
    }

    #[test]
    fn gallop_ramps_speed_and_stops_at_target() {
        let mut rng = fastrand::Rng::with_seed(6);
        let home = Home::new(0.0, 0.0, 10.0);
        let mut body = Body::at(Vec2::ZERO);
        let mut horse = Horse::new(&mut body, &mut rng);
        horse.state = HorseState::Gallop;
        body.target = Vec2::new(0.0, 6.0);
        body.timer = 30.0;

        let mut peak = 0.0f32;
        for _ in 0..200 {
            let mut ctx = AgentCtx { dt: 0.05, elapsed: 0.0, player: Vec2::ZERO, rng: &mut rng };
            update(&mut horse, &mut body, &home, &mut ctx);
            peak = peak.max(horse.speed);
            if horse.state != HorseState::Gallop {
                break;
            }
        }
        assert_eq!(horse.state, HorseState::Idle);
        assert!(peak > 2.0 && peak < GALLOP_SPEED);
        assert!(body.pos.distance(body.target) < ARRIVE_DIST);
        assert!(horse.leg_phase > 0.0);
        // Facing +z.
        assert!(body.facing.abs() < 1e-5);
    }
}
