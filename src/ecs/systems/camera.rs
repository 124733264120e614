use glam::{Mat4, Vec2, Vec3};

use crate::ecs::world_state::WorldState;

/// Orbit distance from the player.
const DISTANCE: f32 = 10.0;
/// Extra height of the orbit center above the player's feet.
const LIFT: f32 = 3.0;
/// Look-at point height above the player's feet.
const LOOK_HEIGHT: f32 = 2.0;
/// Position smoothing rate (1/s).
const FOLLOW_RATE: f32 = 5.0;
pub const MIN_PHI: f32 = 0.15;
pub const MAX_PHI: f32 = 1.2;

/// Apply an orbit delta in radians. Pitch is clamped so the camera never flips or dips under the ground.
pub fn apply_orbit(state: &mut WorldState, delta: Vec2) {
    state.camera_theta -= delta.x;
    state.camera_phi = (state.camera_phi - delta.y).clamp(MIN_PHI, MAX_PHI);
}

/// Where the camera wants to be for the current player position and orbit angles.
pub fn ideal_position(state: &WorldState) -> Vec3 {
    let (theta, phi) = (state.camera_theta, state.camera_phi);
    state.player_position
        + Vec3::new(
            theta.sin() * DISTANCE * phi.cos(),
            LIFT + DISTANCE * phi.sin(),
            theta.cos() * DISTANCE * phi.cos(),
        )
}

/// Trailing orbital camera.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraRig {
    /// Start already settled behind the player.
    pub fn new(state: &WorldState) -> Self {
        Self {
            position: ideal_position(state),
            target: state.player_position + Vec3::Y * LOOK_HEIGHT,
        }
    }

    pub fn follow(&mut self, state: &WorldState, dt: f32) {
        let t = (FOLLOW_RATE * dt).min(1.0);
        self.position = self.position.lerp(ideal_position(state), t);
        self.target = state.player_position + Vec3::Y * LOOK_HEIGHT;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut state = WorldState::new();
        apply_orbit(&mut state, Vec2::new(0.0, -10.0));
        assert_eq!(state.camera_phi, MAX_PHI);
        apply_orbit(&mut state, Vec2::new(0.5, 10.0));
        assert_eq!(state.camera_phi, MIN_PHI);
        assert_eq!(state.camera_theta, -0.5);
    }

    #[test]
    fn follows_toward_ideal_without_overshoot() {
        let mut state = WorldState::new();
        let mut rig = CameraRig::new(&state);
        state.player_position = Vec3::new(10.0, 0.0, 0.0);
        let ideal = ideal_position(&state);

        let before = rig.position.distance(ideal);
        rig.follow(&state, 0.05);
        let after = rig.position.distance(ideal);
        assert!((after - before * 0.75).abs() < 1e-3);

        // A huge step snaps instead of overshooting.
        rig.follow(&state, 1.0);
        assert!(rig.position.distance(ideal) < 1e-4);
        assert_eq!(rig.target, Vec3::new(10.0, 2.0, 0.0));
    }

    #[test]
    fn view_looks_at_player() {
        let state = WorldState::new();
        let rig = CameraRig::new(&state);
        let view = rig.view_matrix();
        // The look-at target lands on the view axis, in front of the camera.
        let p = view.transform_point3(rig.target);
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
        assert!(p.z < 0.0);
    }
}
