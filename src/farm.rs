use glam::{Mat4, Vec2, Vec3};

use crate::animal;
use crate::collision::CollisionField;
use crate::config::Settings;
use crate::daynight::{Clock, EnvironmentState};
use crate::ecs::components::{Body, Brain, Species};
use crate::ecs::systems::{self, camera::CameraRig, player};
use crate::ecs::world_state::WorldState;
use crate::events::FarmEvent;
use crate::input::FrameInput;
use crate::pickups::Stars;
use crate::portals::Portals;
use crate::session::{Screen, Session};

/// What the render driver needs to place one animal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimalPose {
    pub species: Species,
    pub state: &'static str,
    /// World position; `y` is the cosmetic lift.
    pub position: Vec3,
    pub heading: f32,
}

/// Everything the render driver draws for one frame. Reused across frames.
#[derive(Debug, Default)]
pub struct Scene {
    pub view: Mat4,
    pub player: Vec3,
    pub player_yaw: f32,
    /// Outfit color of the selected character, 0xRRGGBB.
    pub outfit: u32,
    pub limbs: Option<player::LimbSwing>,
    /// Render positions of the stars still to be collected.
    pub stars: Vec<Vec3>,
    pub animals: Vec<AnimalPose>,
    pub tooltip: Option<String>,
}

/// The whole simulated farm, advanced once per displayed frame.
pub struct Farm {
    state: WorldState,
    rig: CameraRig,
    world: hecs::World,
    field: CollisionField,
    stars: Stars,
    portals: Portals,
    session: Session,
    clock: Clock,
    rng: fastrand::Rng,
    elapsed: f32,
    /// Screen as of the end of the previous frame.
    screen: Screen,
    events: Vec<FarmEvent>,
}

impl Farm {
    pub fn new(settings: Settings) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut world = hecs::World::new();
        animal::spawn_animals(&mut world, &mut rng);
        let field = CollisionField::farm();
        log::info!(
            "farm ready: {} animals, {} colliders, playing as {}",
            world.len(),
            field.len(),
            settings.character.name()
        );

        let state = WorldState::new();
        let mut session = Session::new(settings.character);
        session.start_game();
        Self {
            rig: CameraRig::new(&state),
            state,
            world,
            field,
            stars: Stars::new(),
            portals: Portals::new(),
            screen: session.screen,
            session,
            clock: settings.clock,
            rng,
            elapsed: 0.0,
            events: Vec::with_capacity(8),
        }
    }

    /// Advance one displayed frame. Returns the events raised during it.
    pub fn frame(&mut self, raw_dt: f32, input: &FrameInput) -> &[FarmEvent] {
        let dt = systems::clamp_dt(raw_dt);
        if dt != raw_dt {
            log::debug!("frame dt {raw_dt} clamped to {dt}");
        }
        self.events.clear();
        self.session.update(dt);

        if self.session.screen == Screen::Game {
            self.elapsed += dt;
            systems::tick(
                &mut self.world,
                &mut self.state,
                &self.field,
                input,
                dt,
                self.elapsed,
                &mut self.rng,
                &mut self.events,
            );
            let player = self.player_ground();
            self.stars.update(player, &mut self.session, &mut self.events);
            self.portals.update(player, &mut self.session, &mut self.events);
            self.rig.follow(&self.state, dt);
        }

        self.note_screen_change();
        &self.events
    }

    fn player_ground(&self) -> Vec2 {
        Vec2::new(self.state.player_position.x, self.state.player_position.z)
    }

    fn note_screen_change(&mut self) {
        if self.session.screen != self.screen {
            self.screen = self.session.screen;
            self.events.push(FarmEvent::ScreenChanged(self.screen));
        }
    }

    /// Leave a mini-game back to the farm. Returns false when not in a mini-game.
    pub fn leave_mini_game(&mut self) -> bool {
        match self.session.screen {
            Screen::MathWorld => self.session.leave_math_world(),
            Screen::WordWorld => self.session.leave_word_world(),
            Screen::Start | Screen::Game => return false,
        }
        true
    }

    /// Return to the start screen: score, stars and player are reset, pending timers dropped.
    pub fn go_back(&mut self) {
        log::info!(
            "back to start with {} points, dropping {} pending timers",
            self.session.points,
            self.session.pending_timers()
        );
        self.session.go_back();
        self.stars.reset();
        self.state = WorldState::new();
        self.rig = CameraRig::new(&self.state);
    }

    pub fn start_game(&mut self) {
        self.session.start_game();
    }

    pub fn environment(&self) -> EnvironmentState {
        self.clock.environment()
    }

    /// Refill `out` with every animal's current pose.
    pub fn build_poses(&self, out: &mut Vec<AnimalPose>) {
        out.clear();
        for (_, (body, brain)) in self.world.query::<(&Body, &Brain)>().iter() {
            out.push(AnimalPose {
                species: brain.species(),
                state: brain.state_label(),
                position: Vec3::new(body.pos.x, body.lift, body.pos.y),
                heading: body.heading,
            });
        }
    }

    pub fn limb_swing(&self) -> player::LimbSwing {
        player::limb_swing(&self.state)
    }

    /// Refill `scene` from the current frame.
    pub fn snapshot(&self, scene: &mut Scene) {
        scene.view = self.rig.view_matrix();
        scene.player = self.state.player_position;
        scene.player_yaw = self.state.player_rotation_y;
        scene.outfit = self.session.character.outfit();
        scene.limbs = Some(self.limb_swing());
        scene.stars.clear();
        scene.stars.extend(
            self.stars
                .stars
                .iter()
                .filter(|s| !s.collected)
                .map(|s| s.render_position(self.elapsed)),
        );
        self.build_poses(&mut scene.animals);
        scene.tooltip.clone_from(&self.session.tooltip);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MoveKeys;
    use crate::session::Character;

    fn farm() -> Farm {
        Farm::new(Settings {
            seed: Some(11),
            clock: Clock::Fixed(12.0),
            character: Character::Aylin,
        })
    }

    fn walk(keys: MoveKeys) -> FrameInput {
        FrameInput { keys, orbit: Vec2::ZERO }
    }

    #[test]
    fn starts_in_game_with_full_roster() {
        let farm = farm();
        assert_eq!(farm.session().screen, Screen::Game);
        let mut poses = Vec::new();
        farm.build_poses(&mut poses);
        assert_eq!(poses.len(), 6);
        assert!(poses.iter().any(|p| p.species == Species::Rabbit));
        assert_eq!(farm.environment().angle, 1.0);
    }

    #[test]
    fn stalled_frame_is_clamped() {
        let mut farm = farm();
        let input = walk(MoveKeys { forward: true, ..MoveKeys::default() });
        farm.frame(3.0, &input);
        let moved = farm.state.player_position.length();
        assert!((moved - player::SPEED * systems::MAX_FRAME_DT).abs() < 1e-4);
        assert!((farm.elapsed - systems::MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn invalid_frame_changes_nothing() {
        let mut farm = farm();
        let input = walk(MoveKeys { right: true, ..MoveKeys::default() });
        let events = farm.frame(f32::NAN, &input).len();
        assert_eq!(events, 0);
        assert_eq!(farm.state.player_position, Vec3::ZERO);
        assert_eq!(farm.elapsed, 0.0);
    }

    #[test]
    fn orbit_input_turns_camera() {
        let mut farm = farm();
        let input = FrameInput {
            keys: MoveKeys::default(),
            orbit: Vec2::new(0.3, 5.0),
        };
        farm.frame(0.016, &input);
        assert!((farm.state.camera_theta + 0.3).abs() < 1e-6);
        assert_eq!(farm.state.camera_phi, systems::camera::MIN_PHI);
    }

    #[test]
    fn star_pickup_raises_event() {
        let mut farm = farm();
        farm.state.player_position = Vec3::new(5.0, 0.0, 19.5);
        let events = farm.frame(0.016, &FrameInput::default()).to_vec();
        assert!(events.contains(&FarmEvent::StarCollected { collected: 1, total: 12 }));
        assert_eq!(farm.session().points, 20);
    }

    #[test]
    fn portal_enters_mini_game_and_pauses_farm() {
        let mut farm = farm();
        farm.state.player_position = Vec3::new(-5.0, 0.0, 23.0);
        let mut seen = Vec::new();
        for _ in 0..30 {
            seen.extend_from_slice(farm.frame(0.02, &FrameInput::default()));
        }
        assert_eq!(seen.first(), Some(&FarmEvent::PortalTriggered(Screen::MathWorld)));
        assert!(seen.contains(&FarmEvent::ScreenChanged(Screen::MathWorld)));
        assert_eq!(farm.session().screen, Screen::MathWorld);

        // The farm is paused while the mini-game runs.
        let before = farm.state.player_position;
        let input = walk(MoveKeys { back: true, ..MoveKeys::default() });
        farm.frame(0.02, &input);
        assert_eq!(farm.state.player_position, before);

        // Escape brings the player back, still standing in the disarmed portal.
        assert!(farm.leave_mini_game());
        let events = farm.frame(0.02, &FrameInput::default()).to_vec();
        assert_eq!(events, vec![FarmEvent::ScreenChanged(Screen::Game)]);
        assert!(!farm.leave_mini_game());
    }

    #[test]
    fn snapshot_reflects_the_frame() {
        let mut farm = farm();
        farm.state.player_position = Vec3::new(5.0, 0.0, 19.5);
        farm.frame(0.016, &FrameInput::default());
        let mut scene = Scene::default();
        farm.snapshot(&mut scene);
        assert_eq!(scene.stars.len(), 11);
        assert_eq!(scene.animals.len(), 6);
        assert_eq!(scene.outfit, Character::Aylin.outfit());
        assert_eq!(scene.tooltip.as_deref(), Some("+20 pts! (1/12)"));
        assert!(scene.limbs.is_some());
    }

    #[test]
    fn go_back_resets_the_run() {
        let mut farm = farm();
        farm.state.player_position = Vec3::new(5.0, 0.0, 19.5);
        farm.frame(0.016, &FrameInput::default());
        farm.go_back();
        let events = farm.frame(0.016, &FrameInput::default()).to_vec();
        assert_eq!(events, vec![FarmEvent::ScreenChanged(Screen::Start)]);
        assert_eq!(farm.session().points, 0);
        assert_eq!(farm.stars.remaining(), 12);
        assert_eq!(farm.state.player_position, Vec3::ZERO);
        assert_eq!(farm.session().pending_timers(), 0);
    }
}
