use glam::Vec2;

use crate::ecs::components::Species;
use crate::session::Screen;

/// Something that happened during a frame, for audio/UI collaborators to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum FarmEvent {
    /// An animal called out because the player came close.
    Vocalized { species: Species, position: Vec2 },
    StarCollected { collected: u32, total: u32 },
    /// The player stepped into a portal; the screen change follows after a short delay.
    PortalTriggered(Screen),
    ScreenChanged(Screen),
}
