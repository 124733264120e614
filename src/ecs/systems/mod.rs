pub mod behavior;
pub mod camera;
pub mod player;

use crate::collision::CollisionField;
use crate::ecs::world_state::WorldState;
use crate::events::FarmEvent;
use crate::input::FrameInput;

/// Longest frame step the simulation will integrate (seconds).
pub const MAX_FRAME_DT: f32 = 0.05;

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`. NaN and negative deltas become 0.
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(MAX_FRAME_DT)
    }
}

/// Run the per-frame simulation systems that touch the world state.
pub fn tick(
    world: &mut hecs::World,
    state: &mut WorldState,
    field: &CollisionField,
    input: &FrameInput,
    dt: f32,
    elapsed: f32,
    rng: &mut fastrand::Rng,
    events: &mut Vec<FarmEvent>,
) {
    // 1. Camera orbit from pointer/touch deltas
    camera::apply_orbit(state, input.orbit);

    // 2. Player controller (reads camera angles)
    player::update(state, &input.keys, field, dt);

    // 3. Animal state machines (read player position)
    behavior::update(world, state, dt, elapsed, rng, events);
}
