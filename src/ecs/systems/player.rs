use glam::Vec3;

use crate::collision::CollisionField;
use crate::ecs::world_state::WorldState;
use crate::input::MoveKeys;

/// Ground speed in units/second.
pub const SPEED: f32 = 12.0;
pub const GRAVITY: f32 = -25.0;
pub const JUMP_FORCE: f32 = 10.0;
/// Playable area is `[-BOUNDS, BOUNDS]` on both ground axes.
pub const BOUNDS: f32 = 46.0;
/// Player footprint for collision queries.
pub const RADIUS: f32 = 0.4;

const WALK_CYCLE_RATE: f32 = 10.0;
const IDLE_CYCLE_RATE: f32 = 2.0;

/// Camera-relative ground basis for orbit yaw `theta`: (forward, right).
///
/// `right = forward x Y`, so it points to screen-right of a camera looking
/// along `forward`. At yaw 0 forward is -z and right is +x.
pub fn basis(theta: f32) -> (Vec3, Vec3) {
    let forward = Vec3::new(-theta.sin(), 0.0, -theta.cos());
    let right = forward.cross(Vec3::Y);
    (forward, right)
}

/// Integrate one frame of player movement, jump and gravity.
pub fn update(state: &mut WorldState, keys: &MoveKeys, field: &CollisionField, dt: f32) {
    let (forward, right) = basis(state.camera_theta);
    let mut dir = Vec3::ZERO;
    if keys.forward {
        dir += forward;
    }
    if keys.back {
        dir -= forward;
    }
    if keys.left {
        dir -= right;
    }
    if keys.right {
        dir += right;
    }

    // Opposite keys cancel to zero: no step, facing kept.
    let dir = dir.normalize_or_zero();
    state.is_moving = dir != Vec3::ZERO;
    let pos = &mut state.player_position;
    if state.is_moving {
        pos.x += dir.x * SPEED * dt;
        pos.z += dir.z * SPEED * dt;
        state.player_rotation_y = dir.x.atan2(dir.z);
    }

    if keys.jump && state.on_ground {
        state.velocity_y = JUMP_FORCE;
        state.on_ground = false;
    }
    state.velocity_y += GRAVITY * dt;
    pos.y += state.velocity_y * dt;
    if pos.y <= 0.0 {
        pos.y = 0.0;
        state.velocity_y = 0.0;
        state.on_ground = true;
    }

    pos.x = pos.x.clamp(-BOUNDS, BOUNDS);
    pos.z = pos.z.clamp(-BOUNDS, BOUNDS);
    let resolved = field.resolve(pos.x, pos.z, RADIUS);
    pos.x = resolved.x;
    pos.z = resolved.y;

    let rate = if state.is_moving {
        WALK_CYCLE_RATE
    } else {
        IDLE_CYCLE_RATE
    };
    state.walk_time += rate * dt;
}

/// Limb rotations (radians about the hip/shoulder axis) for the left side;
/// the right side mirrors them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbSwing {
    pub leg: f32,
    pub arm: f32,
}

pub fn limb_swing(state: &WorldState) -> LimbSwing {
    let s = state.walk_time.sin();
    if state.is_moving {
        LimbSwing {
            leg: s * 0.6,
            arm: -s * 0.5,
        }
    } else {
        LimbSwing {
            leg: 0.0,
            arm: s * 0.08,
        }
    }
}
