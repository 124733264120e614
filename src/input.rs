use std::collections::HashMap;

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Orbit radians per pixel of pointer-locked mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.003;
/// Orbit radians per pixel of single-finger touch drag.
pub const TOUCH_SENSITIVITY: f32 = 0.005;

/// Held movement keys. Opposite directions may both be held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Input snapshot consumed by one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub keys: MoveKeys,
    /// Orbit delta in radians (x: yaw, y: pitch), already scaled per device.
    pub orbit: Vec2,
}

/// One held flag per physical key the farm listens to.
#[derive(Debug, Clone, Copy, Default)]
struct HeldKeys {
    w: bool,
    up: bool,
    s: bool,
    down: bool,
    a: bool,
    left: bool,
    d: bool,
    right: bool,
    space: bool,
}

impl HeldKeys {
    fn slot(&mut self, code: KeyCode) -> Option<&mut bool> {
        Some(match code {
            KeyCode::KeyW => &mut self.w,
            KeyCode::ArrowUp => &mut self.up,
            KeyCode::KeyS => &mut self.s,
            KeyCode::ArrowDown => &mut self.down,
            KeyCode::KeyA => &mut self.a,
            KeyCode::ArrowLeft => &mut self.left,
            KeyCode::KeyD => &mut self.d,
            KeyCode::ArrowRight => &mut self.right,
            KeyCode::Space => &mut self.space,
            _ => return None,
        })
    }

    /// Letter and arrow keys are aliases; either one holds the direction.
    fn directions(&self) -> MoveKeys {
        MoveKeys {
            forward: self.w || self.up,
            back: self.s || self.down,
            left: self.a || self.left,
            right: self.d || self.right,
            jump: self.space,
        }
    }
}

/// Accumulates raw device events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    keys: HeldKeys,
    orbit: Vec2,
    pointer_locked: bool,
    /// Last known position of each finger on the screen.
    touches: HashMap<u64, Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is one the farm uses.
    pub fn key(&mut self, code: KeyCode, pressed: bool) -> bool {
        match self.keys.slot(code) {
            Some(held) => {
                *held = pressed;
                true
            }
            None => false,
        }
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Raw mouse motion. Ignored unless the pointer is locked.
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.pointer_locked {
            self.orbit += Vec2::new(dx, dy) * MOUSE_SENSITIVITY;
        }
    }

    pub fn touch_start(&mut self, id: u64, at: Vec2) {
        self.touches.insert(id, at);
    }

    /// Only a single-finger drag orbits the camera.
    pub fn touch_move(&mut self, id: u64, at: Vec2) {
        let single = self.touches.len() == 1;
        if let Some(last) = self.touches.get_mut(&id) {
            if single {
                self.orbit += (at - *last) * TOUCH_SENSITIVITY;
            }
            *last = at;
        }
    }

    pub fn touch_end(&mut self, id: u64) {
        self.touches.remove(&id);
    }

    /// Drop held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys = HeldKeys::default();
        self.touches.clear();
    }

    /// Snapshot for this frame. Drains the accumulated orbit delta; held keys persist.
    pub fn take_frame(&mut self) -> FrameInput {
        FrameInput {
            keys: self.keys.directions(),
            orbit: std::mem::take(&mut self.orbit),
        }
    }
}
