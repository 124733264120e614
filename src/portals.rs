use glam::Vec2;

use crate::events::FarmEvent;
use crate::session::{Screen, Session};
use crate::timers::TimerAction;

/// Entering a portal's trigger disc starts the transition.
const TRIGGER_RADIUS: f32 = 3.0;
/// A triggered portal re-arms only once the player is this far out.
const REARM_RADIUS: f32 = TRIGGER_RADIUS + 1.0;
/// Short pause between stepping in and the screen change.
const ENTER_DELAY: f32 = 0.4;

#[derive(Debug, Clone, Copy)]
pub struct Portal {
    pub pos: Vec2,
    pub destination: Screen,
    armed: bool,
}

impl Portal {
    pub fn new(x: f32, z: f32, destination: Screen) -> Self {
        Self {
            pos: Vec2::new(x, z),
            destination,
            armed: true,
        }
    }

    /// Returns true when the player just stepped in.
    fn check(&mut self, player: Vec2) -> bool {
        let dist = self.pos.distance(player);
        if self.armed && dist < TRIGGER_RADIUS {
            self.armed = false;
            return true;
        }
        if dist > REARM_RADIUS {
            self.armed = true;
        }
        false
    }
}

/// The farm's two mini-game gateways.
pub struct Portals {
    pub portals: [Portal; 2],
}

impl Portals {
    pub fn new() -> Self {
        Self {
            portals: [
                Portal::new(-5.0, 25.0, Screen::MathWorld),
                Portal::new(20.0, 25.0, Screen::WordWorld),
            ],
        }
    }

    pub fn update(&mut self, player: Vec2, session: &mut Session, events: &mut Vec<FarmEvent>) {
        for portal in &mut self.portals {
            if portal.check(player) {
                log::debug!("portal to {} triggered", portal.destination.label());
                session.schedule(ENTER_DELAY, TimerAction::Enter(portal.destination));
                events.push(FarmEvent::PortalTriggered(portal.destination));
            }
        }
    }
}

impl Default for Portals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Character;

    #[test]
    fn stepping_in_enters_after_delay() {
        let mut portals = Portals::new();
        let mut session = Session::new(Character::Aylin);
        session.start_game();
        let mut events = Vec::new();

        portals.update(Vec2::new(-5.0, 23.0), &mut session, &mut events);
        assert_eq!(events, vec![FarmEvent::PortalTriggered(Screen::MathWorld)]);
        session.update(0.3);
        assert_eq!(session.screen, Screen::Game);
        session.update(0.2);
        assert_eq!(session.screen, Screen::MathWorld);
    }

    #[test]
    fn stays_disarmed_until_player_leaves() {
        let mut portal = Portal::new(0.0, 0.0, Screen::WordWorld);
        assert!(portal.check(Vec2::new(1.0, 0.0)));
        assert!(!portal.check(Vec2::new(0.5, 0.0)));
        // Between trigger and re-arm radius: still disarmed.
        assert!(!portal.check(Vec2::new(3.5, 0.0)));
        assert!(!portal.check(Vec2::new(2.0, 0.0)));
        assert!(!portal.armed);

        assert!(!portal.check(Vec2::new(4.5, 0.0)));
        assert!(portal.armed);
        assert!(portal.check(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn far_player_triggers_nothing() {
        let mut portals = Portals::new();
        let mut session = Session::new(Character::Ailani);
        let mut events = Vec::new();
        portals.update(Vec2::ZERO, &mut session, &mut events);
        assert!(events.is_empty());
        assert_eq!(session.pending_timers(), 0);
    }
}
