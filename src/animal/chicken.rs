use super::{step_toward, AgentCtx};
use crate::ecs::components::{Body, Home};

pub const TURN_RATE: f32 = 6.0;

const WANDER_SPEED: f32 = 1.5;
const ARRIVE_DIST: f32 = 0.3;
const PECK_RATE: f32 = 12.0;
/// Wing flap multiplier applied every tick.
const WING_DECAY: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChickenState {
    Idle,
    Peck,
    Scratch,
    Dash,
    Wander,
}

impl ChickenState {
    pub fn label(self) -> &'static str {
        match self {
            ChickenState::Idle => "idle",
            ChickenState::Peck => "peck",
            ChickenState::Scratch => "scratch",
            ChickenState::Dash => "dash",
            ChickenState::Wander => "wander",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Chicken {
    pub state: ChickenState,
    pub peck_phase: f32,
    /// 1.0 right after a dash starts, decays toward 0.
    pub wing_flap: f32,
    pub dash_speed: f32,
    pub head_tilt: f32,
}

impl Chicken {
    pub fn new(body: &mut Body, rng: &mut fastrand::Rng) -> Self {
        body.timer = 1.0;
        body.facing = rng.f32() * std::f32::consts::TAU;
        body.heading = body.facing;
        Self {
            state: ChickenState::Idle,
            peck_phase: 0.0,
            wing_flap: 0.0,
            dash_speed: 0.0,
            head_tilt: 0.0,
        }
    }
}

pub fn after_idle(roll: f32) -> ChickenState {
    if roll < 0.35 {
        ChickenState::Peck
    } else if roll < 0.6 {
        ChickenState::Scratch
    } else if roll < 0.8 {
        ChickenState::Dash
    } else {
        ChickenState::Wander
    }
}

fn settle(chicken: &mut Chicken, body: &mut Body, ctx: &mut AgentCtx, lo: f32, span: f32) {
    chicken.state = ChickenState::Idle;
    body.timer = ctx.range(lo, span);
    body.lift = 0.0;
}

pub fn update(chicken: &mut Chicken, body: &mut Body, home: &Home, ctx: &mut AgentCtx) {
    let dt = ctx.dt;
    let t = ctx.elapsed;
    chicken.wing_flap *= WING_DECAY;

    match chicken.state {
        ChickenState::Idle => {
            chicken.head_tilt = (t * 2.5).sin() * 0.3;
            if body.timer <= 0.0 {
                chicken.state = after_idle(ctx.roll());
                match chicken.state {
                    ChickenState::Peck => {
                        body.timer = ctx.range(1.5, 2.0);
                        chicken.peck_phase = 0.0;
                    }
                    ChickenState::Scratch => body.timer = ctx.range(1.0, 1.5),
                    ChickenState::Dash => {
                        body.timer = ctx.range(0.5, 0.8);
                        body.target = home.sample_target(ctx.rng);
                        chicken.wing_flap = 1.0;
                        chicken.dash_speed = ctx.range(3.0, 2.0);
                    }
                    ChickenState::Wander => {
                        body.target = home.sample_target(ctx.rng);
                        body.timer = ctx.range(2.0, 2.0);
                    }
                    ChickenState::Idle => {}
                }
            }
        }
        ChickenState::Peck => {
            chicken.peck_phase += dt * PECK_RATE;
            chicken.head_tilt = 0.0;
            if body.timer <= 0.0 {
                settle(chicken, body, ctx, 0.5, 1.0);
            }
        }
        ChickenState::Scratch => {
            body.lift = (t * 10.0).sin().abs() * 0.03;
            if body.timer <= 0.0 {
                settle(chicken, body, ctx, 0.5, 1.5);
            }
        }
        ChickenState::Dash => {
            if body.distance_to_target() < ARRIVE_DIST || body.timer <= 0.0 {
                chicken.wing_flap = 0.0;
                settle(chicken, body, ctx, 1.0, 1.0);
            } else {
                step_toward(body, chicken.dash_speed, dt);
                body.lift = (t * 14.0).sin().abs() * 0.1;
            }
        }
        ChickenState::Wander => {
            if body.distance_to_target() < ARRIVE_DIST || body.timer <= 0.0 {
                settle(chicken, body, ctx, 0.5, 1.5);
            } else {
                step_toward(body, WANDER_SPEED, dt);
                body.lift = (t * 10.0).sin().abs() * 0.05;
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
        assert_eq!(after_idle(0.1), ChickenState::Peck);
        assert_eq!(after_idle(0.35), ChickenState::Scratch);
        assert_eq!(after_idle(0.6), ChickenState::Dash);
        assert_eq!(after_idle(0.79), ChickenState::Dash);
        assert_eq!(after_idle(0.8), ChickenState::Wander);
        assert_eq!(after_idle(0.999), ChickenState::Wander);
    }

    #[test]
    fn dash_arrives_and_settles() {
        let mut rng = fastrand::Rng::with_seed(9);
        let home = Home::new(0.0, 0.0, 20.0);
        let mut body = Body::at(Vec2::ZERO);
        let mut chicken = Chicken::new(&mut body, &mut rng);
        chicken.state = ChickenState::Dash;
        chicken.dash_speed = 4.0;
        body.target = Vec2::new(10.0, 0.0);
        body.timer = 5.0;

        let dt = 0.05;
        let mut arrived_at = None;
        for frame in 1..=100 {
            let mut ctx = AgentCtx { dt, elapsed: frame as f32 * dt, player: Vec2::ZERO, rng: &mut rng };
            body.timer -= dt;
            update(&mut chicken, &mut body, &home, &mut ctx);
            if chicken.state != ChickenState::Dash {
                arrived_at = Some(frame as f32 * dt);
                break;
            }
        }

        let t = arrived_at.expect("chicken never left dash");
        assert!((2.3..=2.6).contains(&t), "left dash after {t}s");
        assert!(body.pos.distance(Vec2::new(10.0, 0.0)) < ARRIVE_DIST);
        assert_eq!(chicken.state, ChickenState::Idle);
        assert_eq!(body.lift, 0.0);
        assert_eq!(chicken.wing_flap, 0.0);
    }

    #[test]
    fn dash_times_out_short_of_target() {
        let mut rng = fastrand::Rng::with_seed(10);
        let home = Home::new(0.0, 0.0, 20.0);
        let mut body = Body::at(Vec2::ZERO);
        let mut chicken = Chicken::new(&mut body, &mut rng);
        chicken.state = ChickenState::Dash;
        chicken.dash_speed = 4.0;
        body.target = Vec2::new(10.0, 0.0);
        body.timer = 0.5;

        for _ in 0..11 {
            let mut ctx = AgentCtx { dt: 0.05, elapsed: 0.0, player: Vec2::ZERO, rng: &mut rng };
            body.timer -= 0.05;
            update(&mut chicken, &mut body, &home, &mut ctx);
        }
        assert_eq!(chicken.state, ChickenState::Idle);
        assert!(body.pos.x < 2.5);
    }

    #[test]
    fn pecking_advances_phase_in_place() {
        let mut rng = fastrand::Rng::with_seed(2);
        let home = Home::new(0.0, 0.0, 3.0);
        let mut body = Body::at(Vec2::ZERO);
        let mut chicken = Chicken::new(&mut body, &mut rng);
        chicken.state = ChickenState::Peck;
        body.timer = 3.0;
        for _ in 0..10 {
            let mut ctx = AgentCtx { dt: 0.05, elapsed: 0.0, player: Vec2::ZERO, rng: &mut rng };
            update(&mut chicken, &mut body, &home, &mut ctx);
        }
        assert!((chicken.peck_phase - 6.0).abs() < 1e-4);
        assert_eq!(body.pos, Vec2::ZERO);
    }
}
