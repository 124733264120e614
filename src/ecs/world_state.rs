use glam::Vec3;

/// Initial camera pitch above the horizon (radians).
const START_PHI: f32 = 0.6;

/// Frame-shared record tying the player, camera and animals together.
///
/// Field ownership:
/// - `player_position`, `player_rotation_y`, `velocity_y`, `on_ground`, `is_moving`,
///   `walk_time`: written only by the player controller.
/// - `camera_theta`, `camera_phi`: written only by the camera orbit input.
///
/// Everything else reads.
#[derive(Debug, Clone, Copy)]
pub struct WorldState {
    pub player_position: Vec3,
    pub player_rotation_y: f32,
    pub camera_theta: f32,
    pub camera_phi: f32,
    pub velocity_y: f32,
    pub on_ground: bool,
    pub is_moving: bool,
    /// Walk-cycle phase, advanced every frame.
    pub walk_time: f32,
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            player_position: Vec3::ZERO,
            player_rotation_y: 0.0,
            camera_theta: 0.0,
            camera_phi: START_PHI,
            velocity_y: 0.0,
            on_ground: true,
            is_moving: false,
            walk_time: 0.0,
        }
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}
