use glam::Vec2;

use crate::animal::{self, AgentCtx};
use crate::ecs::components::{Body, Brain, Home, Voice};
use crate::ecs::world_state::WorldState;
use crate::events::FarmEvent;

/// Advance every animal's state machine by one frame.
pub fn update(
    world: &mut hecs::World,
    state: &WorldState,
    dt: f32,
    elapsed: f32,
    rng: &mut fastrand::Rng,
    events: &mut Vec<FarmEvent>,
) {
    let player = Vec2::new(state.player_position.x, state.player_position.z);
    for (_, (home, body, brain, voice)) in
        world.query_mut::<(&Home, &mut Body, &mut Brain, Option<&mut Voice>)>()
    {
        let mut ctx = AgentCtx {
            dt,
            elapsed,
            player,
            rng: &mut *rng,
        };
        animal::update_agent(home, body, brain, voice, &mut ctx, events);
    }
}
