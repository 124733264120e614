pub mod chicken;
pub mod cow;
pub mod horse;
pub mod pig;
pub mod rabbit;
pub mod sheep;

use glam::Vec2;

use crate::ecs::components::{Body, Brain, Home, Species, Voice};
use crate::events::FarmEvent;

/// The player must be closer than this for an animal to call out.
const VOICE_RANGE: f32 = 5.0;
/// Cooldown when the player is out of range, so a call fires soon after they approach.
const VOICE_RETRY: f32 = 1.0;

/// Everything an agent reads from outside itself during one update.
pub struct AgentCtx<'a> {
    /// Clamped frame time (seconds).
    pub dt: f32,
    /// Session clock, used only for cosmetic oscillation.
    pub elapsed: f32,
    /// Player ground position (x, z).
    pub player: Vec2,
    pub rng: &'a mut fastrand::Rng,
}

impl AgentCtx<'_> {
    /// Random duration in `[lo, lo + span)`.
    pub fn range(&mut self, lo: f32, span: f32) -> f32 {
        lo + self.rng.f32() * span
    }

    pub fn roll(&mut self) -> f32 {
        self.rng.f32()
    }
}

/// Exponential smoothing: `value += (target - value) * rate * dt`.
pub fn approach(value: &mut f32, target: f32, rate: f32, dt: f32) {
    *value += (target - *value) * rate * dt;
}

/// Move straight toward the body's target at `speed`, never past it.
pub fn step_toward(body: &mut Body, speed: f32, dt: f32) {
    let delta = body.target - body.pos;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return;
    }
    body.pos += delta / dist * (speed * dt).min(dist);
    body.facing = delta.x.atan2(delta.y);
}

/// Smooth the rendered heading toward `facing`, taking the short way round.
fn turn(body: &mut Body, rate: f32, dt: f32) {
    let diff = (body.facing - body.heading + std::f32::consts::PI)
        .rem_euclid(std::f32::consts::TAU)
        - std::f32::consts::PI;
    body.heading += diff * (rate * dt).min(1.0);
}

/// Count down the voice cooldown; returns true when a call fires.
fn tick_voice(voice: &mut Voice, pos: Vec2, ctx: &mut AgentCtx) -> bool {
    voice.cooldown -= ctx.dt;
    if voice.cooldown > 0.0 {
        return false;
    }
    if pos.distance(ctx.player) < VOICE_RANGE {
        voice.cooldown = ctx.range(voice.min, voice.spread);
        true
    } else {
        voice.cooldown = VOICE_RETRY;
        false
    }
}

/// Advance one animal by one frame: state machine, steering, heading, voice.
pub fn update_agent(
    home: &Home,
    body: &mut Body,
    brain: &mut Brain,
    voice: Option<&mut Voice>,
    ctx: &mut AgentCtx,
    events: &mut Vec<FarmEvent>,
) {
    let dt = crate::ecs::systems::clamp_dt(ctx.dt);
    ctx.dt = dt;
    body.timer -= dt;

    let turn_rate = match brain {
        Brain::Cow(b) => {
            cow::update(b, body, home, ctx);
            cow::TURN_RATE
        }
        Brain::Chicken(b) => {
            chicken::update(b, body, home, ctx);
            chicken::TURN_RATE
        }
        Brain::Pig(b) => {
            pig::update(b, body, home, ctx);
            pig::TURN_RATE
        }
        Brain::Sheep(b) => {
            sheep::update(b, body, home, ctx);
            sheep::TURN_RATE
        }
        Brain::Horse(b) => {
            horse::update(b, body, home, ctx);
            horse::TURN_RATE
        }
        Brain::Rabbit(b) => {
            rabbit::update(b, body, home, ctx);
            rabbit::TURN_RATE
        }
    };
    turn(body, turn_rate, dt);

    if let Some(voice) = voice {
        if tick_voice(voice, body.pos, ctx) {
            let species = brain.species();
            log::debug!("{} calls out at ({:.1}, {:.1})", species.label(), body.pos.x, body.pos.y);
            events.push(FarmEvent::Vocalized {
                species,
                position: body.pos,
            });
        }
    }
}

/// The farm's resident animals: (species, home x, home z, roam radius).
const ROSTER: [(Species, f32, f32, f32); 6] = [
    (Species::Cow, 15.0, 15.0, 5.0),
    (Species::Chicken, -10.0, 20.0, 3.0),
    (Species::Pig, 25.0, 5.0, 4.0),
    (Species::Sheep, -20.0, -5.0, 4.0),
    (Species::Horse, 5.0, -20.0, 6.0),
    (Species::Rabbit, -28.0, 12.0, 3.0),
];

/// Spawn one animal of `species` at its home point.
pub fn spawn_animal(
    world: &mut hecs::World,
    species: Species,
    home: Home,
    rng: &mut fastrand::Rng,
) -> hecs::Entity {
    let mut body = Body::at(home.center);
    let brain = match species {
        Species::Cow => Brain::Cow(cow::Cow::new(&mut body, &home, rng)),
        Species::Chicken => Brain::Chicken(chicken::Chicken::new(&mut body, rng)),
        Species::Pig => Brain::Pig(pig::Pig::new(&mut body, &home, rng)),
        Species::Sheep => Brain::Sheep(sheep::Sheep::new(&mut body, rng)),
        Species::Horse => Brain::Horse(horse::Horse::new(&mut body, rng)),
        Species::Rabbit => Brain::Rabbit(rabbit::Rabbit::new(&mut body, rng)),
    };
    match species {
        Species::Cow => world.spawn((home, body, brain, Voice::new(cow::VOICE_MIN, cow::VOICE_SPREAD))),
        Species::Pig => world.spawn((home, body, brain, Voice::new(pig::VOICE_MIN, pig::VOICE_SPREAD))),
        _ => world.spawn((home, body, brain)),
    }
}

/// Spawn the whole roster.
pub fn spawn_animals(world: &mut hecs::World, rng: &mut fastrand::Rng) {
    for (species, x, z, radius) in ROSTER {
        spawn_animal(world, species, Home::new(x, z, radius), rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(rng: &mut fastrand::Rng, player: Vec2) -> AgentCtx<'_> {
        AgentCtx {
            dt: 0.05,
            elapsed: 0.0,
            player,
            rng,
        }
    }

    #[test]
    fn roam_targets_stay_in_disc() {
        let mut rng = fastrand::Rng::with_seed(7);
        let home = Home::new(3.0, -4.0, 2.5);
        for _ in 0..1000 {
            assert!(home.sample_target(&mut rng).distance(home.center) <= 2.5 + 1e-4);
        }
    }

    #[test]
    fn step_never_overshoots() {
        let mut body = Body::at(Vec2::ZERO);
        body.target = Vec2::new(0.1, 0.0);
        step_toward(&mut body, 10.0, 0.05);
        assert_eq!(body.pos, Vec2::new(0.1, 0.0));
        assert!((body.facing - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn heading_turns_short_way() {
        let mut body = Body::at(Vec2::ZERO);
        body.heading = 3.0;
        body.facing = -3.0;
        turn(&mut body, 4.0, 0.05);
        // Crossing +pi instead of sweeping back through zero.
        assert!(body.heading > 3.0);
    }

    #[test]
    fn every_species_roams_inside_its_radius() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut world = hecs::World::new();
        spawn_animals(&mut world, &mut rng);
        let mut events = Vec::new();
        let far = Vec2::new(1000.0, 1000.0);

        for _ in 0..20_000 {
            for (_, (home, body, brain, voice)) in
                world.query_mut::<(&Home, &mut Body, &mut Brain, Option<&mut Voice>)>()
            {
                let mut c = ctx(&mut rng, far);
                update_agent(home, body, brain, voice, &mut c, &mut events);
                // Fastest gait is the rabbit dash at 8 u/s.
                let slack = 8.0 * 0.05 + 1e-3;
                assert!(
                    body.pos.distance(home.center) <= home.radius + slack,
                    "{} left home: {:?}",
                    brain.species().label(),
                    body.pos
                );
            }
        }
        assert!(events.is_empty());
    }

    #[test]
    fn voice_fires_once_then_cools_down() {
        let mut rng = fastrand::Rng::with_seed(1);
        let home = Home::new(0.0, 0.0, 5.0);
        let mut world = hecs::World::new();
        let e = spawn_animal(&mut world, Species::Cow, home, &mut rng);
        let mut events = Vec::new();

        let mut q = world
            .query_one::<(&Home, &mut Body, &mut Brain, &mut Voice)>(e)
            .unwrap();
        let (home, body, brain, voice) = q.get().unwrap();
        voice.cooldown = 0.0;
        let player = body.pos + Vec2::new(2.0, 0.0);

        let mut c = ctx(&mut rng, player);
        update_agent(home, body, brain, Some(&mut *voice), &mut c, &mut events);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], FarmEvent::Vocalized { species: Species::Cow, .. }));
        assert!(voice.cooldown >= 5.0 && voice.cooldown < 9.0);

        let player = body.pos + Vec2::new(2.0, 0.0);
        let mut c = ctx(&mut rng, player);
        update_agent(home, body, brain, Some(&mut *voice), &mut c, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn voice_retries_quickly_when_player_far() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut voice = Voice::new(5.0, 3.0);
        voice.cooldown = 0.01;
        let mut c = ctx(&mut rng, Vec2::new(50.0, 0.0));
        assert!(!tick_voice(&mut voice, Vec2::ZERO, &mut c));
        assert_eq!(voice.cooldown, VOICE_RETRY);
    }

    #[test]
    fn invalid_dt_freezes_agent() {
        let mut rng = fastrand::Rng::with_seed(5);
        let home = Home::new(0.0, 0.0, 4.0);
        let mut body = Body::at(home.center);
        let mut brain = Brain::Horse(horse::Horse::new(&mut body, &mut rng));
        let before = body;
        let mut events = Vec::new();
        let mut c = AgentCtx {
            dt: f32::NAN,
            elapsed: 0.0,
            player: Vec2::ZERO,
            rng: &mut rng,
        };
        update_agent(&home, &mut body, &mut brain, None, &mut c, &mut events);
        assert_eq!(body.pos, before.pos);
        assert_eq!(body.timer, before.timer);
    }
}
