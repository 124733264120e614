use super::{approach, step_toward, AgentCtx};
use crate::ecs::components::{Body, Home};

pub const TURN_RATE: f32 = 3.0;

const WALK_SPEED: f32 = 0.8;
const ARRIVE_DIST: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheepState {
    Graze,
    Look,
    Wander,
    Huddle,
}

impl SheepState {
    pub fn label(self) -> &'static str {
        match self {
            SheepState::Graze => "graze",
            SheepState::Look => "look",
            SheepState::Wander => "wander",
            SheepState::Huddle => "huddle",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sheep {
    pub state: SheepState,
    /// Head pitch, positive toward the grass.
    pub head_angle: f32,
    /// Head yaw while looking around.
    pub head_look: f32,
}

impl Sheep {
    pub fn new(body: &mut Body, rng: &mut fastrand::Rng) -> Self {
        body.timer = 2.0 + rng.f32() * 3.0;
        Self {
            state: SheepState::Graze,
            head_angle: 0.0,
            head_look: 0.0,
        }
    }
}

pub fn after_graze(roll: f32) -> SheepState {
    if roll < 0.3 {
        SheepState::Look
    } else if roll < 0.65 {
        SheepState::Wander
    } else {
        SheepState::Huddle
    }
}

pub fn after_look(roll: f32) -> SheepState {
    if roll < 0.5 {
        SheepState::Graze
    } else {
        SheepState::Wander
    }
}

pub fn update(sheep: &mut Sheep, body: &mut Body, home: &Home, ctx: &mut AgentCtx) {
    let dt = ctx.dt;
    let t = ctx.elapsed;

    match sheep.state {
        SheepState::Graze => {
            approach(&mut sheep.head_angle, 0.55, 3.0, dt);
            sheep.head_look = (t * 1.5).sin() * 0.1;
            if body.timer <= 0.0 {
                sheep.state = after_graze(ctx.roll());
                match sheep.state {
                    SheepState::Look => body.timer = ctx.range(1.5, 2.0),
                    SheepState::Wander => {
                        body.target = home.sample_target(ctx.rng);
                        body.timer = ctx.range(3.0, 3.0);
                    }
                    SheepState::Huddle => body.timer = ctx.range(2.0, 3.0),
                    SheepState::Graze => {}
                }
            }
        }
        SheepState::Look => {
            approach(&mut sheep.head_angle, -0.15, 4.0, dt);
            sheep.head_look = (t * 2.0).sin() * 0.5;
            if body.timer <= 0.0 {
                sheep.state = after_look(ctx.roll());
                if sheep.state == SheepState::Graze {
                    body.timer = ctx.range(3.0, 4.0);
                } else {
                    body.target = home.sample_target(ctx.rng);
                    body.timer = ctx.range(2.0, 3.0);
                }
            }
        }
        SheepState::Wander => {
            approach(&mut sheep.head_angle, 0.1, 3.0, dt);
            sheep.head_look *= 0.95;
            let dist = body.distance_to_target();
            if dist > ARRIVE_DIST {
                step_toward(body, WALK_SPEED, dt);
            }
            if dist < ARRIVE_DIST || body.timer <= 0.0 {
                sheep.state = SheepState::Graze;
                body.timer = ctx.range(2.0, 4.0);
            }
        }
        SheepState::Huddle => {
            approach(&mut sheep.head_angle, 0.0, 2.0, dt);
            sheep.head_look = (t * 0.8).sin() * 0.05;
            if body.timer <= 0.0 {
                sheep.state = SheepState::Graze;
                body.timer = ctx.range(3.0, 3.0);
            }
        }
    }
}
