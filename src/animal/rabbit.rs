use super::{step_toward, AgentCtx};
use crate::ecs::components::{Body, Home};

pub const TURN_RATE: f32 = 8.0;

const ARRIVE_DIST: f32 = 0.5;
const HOP_RATE: f32 = 9.0;
const DASH_HOP_RATE: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RabbitState {
    Idle,
    Sniff,
    Sit,
    Hop,
    Dash,
}

impl RabbitState {
    pub fn label(self) -> &'static str {
        match self {
            RabbitState::Idle => "idle",
            RabbitState::Sniff => "sniff",
            RabbitState::Sit => "sit",
            RabbitState::Hop => "hop",
            RabbitState::Dash => "dash",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rabbit {
    pub state: RabbitState,
    pub hop_phase: f32,
    pub speed: f32,
}

impl Rabbit {
    pub fn new(body: &mut Body, rng: &mut fastrand::Rng) -> Self {
        body.timer = 1.0 + rng.f32() * 2.0;
        body.facing = rng.f32() * std::f32::consts::TAU;
        body.heading = body.facing;
        Self {
            state: RabbitState::Idle,
            hop_phase: 0.0,
            speed: 0.0,
        }
    }
}

pub fn after_idle(roll: f32) -> RabbitState {
    if roll < 0.3 {
        RabbitState::Sniff
    } else if roll < 0.55 {
        RabbitState::Sit
    } else if roll < 0.8 {
        RabbitState::Hop
    } else {
        RabbitState::Dash
    }
}

/// Bounding travel shared by hop and dash. Returns true once the run is over.
fn bound(rabbit: &mut Rabbit, body: &mut Body, dt: f32, phase_rate: f32, height: f32) -> bool {
    if body.distance_to_target() > ARRIVE_DIST && body.timer > 0.0 {
        rabbit.hop_phase += dt * phase_rate;
        step_toward(body, rabbit.speed, dt);
        body.lift = (rabbit.hop_phase.sin() * height).max(0.0);
        false
    } else {
        body.lift = 0.0;
        true
    }
}

pub fn update(rabbit: &mut Rabbit, body: &mut Body, home: &Home, ctx: &mut AgentCtx) {
    let dt = ctx.dt;
    match rabbit.state {
        RabbitState::Idle => {
            body.lift = 0.0;
            if body.timer <= 0.0 {
                rabbit.state = after_idle(ctx.roll());
                match rabbit.state {
                    RabbitState::Sniff => body.timer = ctx.range(1.0, 1.5),
                    RabbitState::Sit => body.timer = ctx.range(2.0, 3.0),
                    RabbitState::Hop => {
                        body.target = home.sample_target(ctx.rng);
                        body.timer = ctx.range(2.0, 2.0);
                        rabbit.hop_phase = 0.0;
                        rabbit.speed = ctx.range(2.5, 1.5);
                    }
                    RabbitState::Dash => {
                        body.target = home.sample_target(ctx.rng);
                        body.timer = ctx.range(1.5, 2.0);
                        rabbit.speed = ctx.range(5.0, 3.0);
                    }
                    RabbitState::Idle => {}
                }
            }
        }
        RabbitState::Sniff | RabbitState::Sit => {
            if body.timer <= 0.0 {
                rabbit.state = RabbitState::Idle;
                body.timer = ctx.range(0.5, 1.0);
            }
        }
        RabbitState::Hop => {
            if bound(rabbit, body, dt, HOP_RATE, 0.35) {
                rabbit.state = RabbitState::Idle;
                body.timer = ctx.range(1.0, 2.0);
            }
        }
        RabbitState::Dash => {
            if bound(rabbit, body, dt, DASH_HOP_RATE, 0.25) {
                rabbit.state = RabbitState::Idle;
                body.timer = ctx.range(0.8, 1.5);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn idle_bands() {
        assert_eq!(after_idle(0.1), RabbitState::Sniff);
        assert_eq!(after_idle(0.3), RabbitState::Sit);
        assert_eq!(after_idle(0.55), RabbitState::Hop);
        assert_eq!(after_idle(0.8), RabbitState::Dash);
    }

    #[test]
    fn hop_lifts_off_the_ground_and_lands() {
        let mut rng = fastrand::Rng::with_seed(21);
        let home = Home::new(0.0, 0.0, 5.0);
        let mut body = Body::at(Vec2::ZERO);
        let mut rabbit = Rabbit::new(&mut body, &mut rng);
        rabbit.state = RabbitState::Hop;
        rabbit.speed = 3.0;
        body.target = Vec2::new(-3.0, 0.0);
        body.timer = 5.0;

        let mut airborne = false;
        for _ in 0..100 {
            let mut ctx = AgentCtx { dt: 0.05, elapsed: 0.0, player: Vec2::ZERO, rng: &mut rng };
            update(&mut rabbit, &mut body, &home, &mut ctx);
            airborne |= body.lift > 0.1;
            if rabbit.state != RabbitState::Hop {
                break;
            }
        }
        assert!(airborne);
        assert_eq!(rabbit.state, RabbitState::Idle);
        assert_eq!(body.lift, 0.0);
        assert!(body.pos.x < -2.4);
    }
}
