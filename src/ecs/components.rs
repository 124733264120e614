use glam::Vec2;

use crate::animal::{chicken, cow, horse, pig, rabbit, sheep};

/// Fixed point an animal roams around.
#[derive(Debug, Clone, Copy)]
pub struct Home {
    pub center: Vec2,
    /// Roam targets are always picked inside this radius.
    pub radius: f32,
}

impl Home {
    pub fn new(x: f32, z: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, z),
            radius,
        }
    }

    /// Uniform random point inside the roam disc.
    pub fn sample_target(&self, rng: &mut fastrand::Rng) -> Vec2 {
        let r = self.radius * rng.f32().sqrt();
        let angle = rng.f32() * std::f32::consts::TAU;
        self.center + Vec2::new(angle.cos(), angle.sin()) * r
    }
}

/// Shared per-animal kinematics and timer.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    /// Ground-plane position (x, z).
    pub pos: Vec2,
    /// Cosmetic vertical offset (hops, trot bob).
    pub lift: f32,
    /// Direction of travel the body turns toward (radians).
    pub facing: f32,
    /// Rendered yaw, smoothed toward `facing`.
    pub heading: f32,
    /// Seconds until the state machine re-evaluates.
    pub timer: f32,
    pub target: Vec2,
}

impl Body {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            lift: 0.0,
            facing: 0.0,
            heading: 0.0,
            timer: 0.0,
            target: pos,
        }
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.target - self.pos).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Species {
    Cow,
    Chicken,
    Pig,
    Sheep,
    Horse,
    Rabbit,
}

impl Species {
    pub fn label(self) -> &'static str {
        match self {
            Species::Cow => "cow",
            Species::Chicken => "chicken",
            Species::Pig => "pig",
            Species::Sheep => "sheep",
            Species::Horse => "horse",
            Species::Rabbit => "rabbit",
        }
    }
}

/// Species-tagged behavior state plus its cosmetic phase accumulators.
#[derive(Debug, Clone, Copy)]
pub enum Brain {
    Cow(cow::Cow),
    Chicken(chicken::Chicken),
    Pig(pig::Pig),
    Sheep(sheep::Sheep),
    Horse(horse::Horse),
    Rabbit(rabbit::Rabbit),
}

impl Brain {
    pub fn species(&self) -> Species {
        match self {
            Brain::Cow(_) => Species::Cow,
            Brain::Chicken(_) => Species::Chicken,
            Brain::Pig(_) => Species::Pig,
            Brain::Sheep(_) => Species::Sheep,
            Brain::Horse(_) => Species::Horse,
            Brain::Rabbit(_) => Species::Rabbit,
        }
    }

    /// Name of the current behavior state.
    pub fn state_label(&self) -> &'static str {
        match self {
            Brain::Cow(b) => b.state.label(),
            Brain::Chicken(b) => b.state.label(),
            Brain::Pig(b) => b.state.label(),
            Brain::Sheep(b) => b.state.label(),
            Brain::Horse(b) => b.state.label(),
            Brain::Rabbit(b) => b.state.label(),
        }
    }
}

/// Proximity vocalization gate for animals that call out to the player.
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    /// Seconds until the next proximity check may fire.
    pub cooldown: f32,
    /// Cooldown after a call is drawn from `[min, min + spread)`.
    pub min: f32,
    pub spread: f32,
}

impl Voice {
    pub fn new(min: f32, spread: f32) -> Self {
        Self {
            cooldown: 2.0,
            min,
            spread,
        }
    }
}
