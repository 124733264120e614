use glam::{Vec2, Vec3};

use crate::events::FarmEvent;
use crate::session::Session;
use crate::timers::TimerAction;

/// Ground positions (x, z) of the collectible stars.
const STAR_POSITIONS: [[f32; 2]; 12] = [
    [-20.0, 30.0], [15.0, 35.0], [35.0, 20.0], [-35.0, -10.0],
    [20.0, -30.0], [-10.0, -35.0], [40.0, 0.0], [-40.0, 15.0],
    [0.0, 40.0], [30.0, -15.0], [-25.0, -30.0], [5.0, 20.0],
];

const PICKUP_RADIUS: f32 = 1.5;
const BASE_HEIGHT: f32 = 2.0;
const BOB_HEIGHT: f32 = 0.4;
/// Delay before the all-collected tooltip replaces the last pickup tooltip.
const ALL_COLLECTED_DELAY: f32 = 2.0;

#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub collected: bool,
}

impl Star {
    /// Bobbing render position at session time `t`.
    pub fn render_position(&self, t: f32) -> Vec3 {
        let y = BASE_HEIGHT + (t * 2.0 + self.pos.x).sin() * BOB_HEIGHT;
        Vec3::new(self.pos.x, y, self.pos.y)
    }
}

/// Manages the one-shot star pickups.
pub struct Stars {
    pub stars: Vec<Star>,
}

impl Stars {
    pub fn new() -> Self {
        Self {
            stars: STAR_POSITIONS
                .iter()
                .map(|&[x, z]| Star {
                    pos: Vec2::new(x, z),
                    collected: false,
                })
                .collect(),
        }
    }

    pub fn total(&self) -> u32 {
        self.stars.len() as u32
    }

    pub fn remaining(&self) -> usize {
        self.stars.iter().filter(|s| !s.collected).count()
    }

    /// Collect every uncollected star within reach of `player`.
    pub fn update(&mut self, player: Vec2, session: &mut Session, events: &mut Vec<FarmEvent>) {
        let total = self.total();
        for star in self.stars.iter_mut().filter(|s| !s.collected) {
            if star.pos.distance(player) >= PICKUP_RADIUS {
                continue;
            }
            star.collected = true;
            let collected = session.collect_star();
            log::info!("star collected ({collected}/{total}), {} points", session.points);
            session.show_tooltip(format!("+20 pts! ({collected}/{total})"));
            events.push(FarmEvent::StarCollected { collected, total });
            if collected == total {
                session.schedule(
                    ALL_COLLECTED_DELAY,
                    TimerAction::ShowTooltip("All stars collected!".into()),
                );
            }
        }
    }

    /// Put every star back, e.g. after the session is reset.
    pub fn reset(&mut self) {
        log::debug!("restoring {} collected stars", self.stars.len() - self.remaining());
        for star in &mut self.stars {
            star.collected = false;
        }
    }
}

impl Default for Stars {
    fn default() -> Self {
        Self::new()
    }
}
