/// Day/night cycle based on the local wall clock.
/// Every lighting parameter is derived from a single sun angle so the scene stays in sync.
use glam::Vec3;

/// Radius of the sun/moon orbit around the farm.
const ORBIT_RADIUS: f32 = 65.0;

/// Named band of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Night,
    Dawn,
    Morning,
    Afternoon,
    Sunset,
    Dusk,
}

impl DayPhase {
    pub fn label(self) -> &'static str {
        match self {
            DayPhase::Night => "night",
            DayPhase::Dawn => "dawn",
            DayPhase::Morning => "morning",
            DayPhase::Afternoon => "afternoon",
            DayPhase::Sunset => "sunset",
            DayPhase::Dusk => "dusk",
        }
    }
}

/// Scene lighting snapshot for one hour of the day. Recomputed on every query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentState {
    /// Hour (0.0-24.0, with fractional minutes).
    pub hour: f32,
    /// 0 = deep night, 1 = solar noon.
    pub angle: f32,
    pub phase: DayPhase,
    pub is_night: bool,
    pub sun_position: Vec3,
    pub moon_position: Vec3,
    pub sky_color: [f32; 3],
    pub fog_color: [f32; 3],
    pub fog_density: f32,
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    pub hemi_sky_color: [f32; 3],
    pub hemi_ground_color: [f32; 3],
    pub hemi_intensity: f32,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub stars_opacity: f32,
    pub cloud_opacity: f32,
    pub moon_opacity: f32,
    /// Tone-mapping exposure.
    pub exposure: f32,
    /// Lantern glow, full at night and off in daylight.
    pub lantern_brightness: f32,
}

/// Unpack a 0xRRGGBB literal into normalized components.
const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

const SKY_NIGHT: [f32; 3] = rgb(0x0c1a3a);
const SKY_DAWN: [f32; 3] = rgb(0xdba174);
const SKY_DAY: [f32; 3] = rgb(0x87ceeb);
const SKY_SUNSET: [f32; 3] = rgb(0xd4764e);
const SKY_DUSK: [f32; 3] = rgb(0x1e2d55);

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Lerp between two [f32; 3] arrays.
fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Fold any hour value into [0, 24).
fn wrap_hour(hour: f32) -> f32 {
    if !hour.is_finite() {
        return 0.0;
    }
    let h = hour.rem_euclid(24.0);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs.
    if h >= 24.0 {
        0.0
    } else {
        h
    }
}

/// Which band of the day `hour` falls in.
pub fn phase(hour: f32) -> DayPhase {
    let h = wrap_hour(hour);
    if h >= 22.0 || h < 5.0 {
        DayPhase::Night
    } else if h < 7.0 {
        DayPhase::Dawn
    } else if h < 12.0 {
        DayPhase::Morning
    } else if h < 17.0 {
        DayPhase::Afternoon
    } else if h < 19.5 {
        DayPhase::Sunset
    } else {
        DayPhase::Dusk
    }
}

/// Piecewise-linear sun angle: 0 at night, 1 at noon.
pub fn sun_angle(hour: f32) -> f32 {
    let h = wrap_hour(hour);
    match phase(h) {
        DayPhase::Night => 0.0,
        DayPhase::Dawn => clamp01((h - 5.0) / 2.0) * 0.25,
        DayPhase::Morning => 0.25 + clamp01((h - 7.0) / 5.0) * 0.75,
        DayPhase::Afternoon => 1.0 - clamp01((h - 12.0) / 5.0) * 0.45,
        DayPhase::Sunset => 0.55 - clamp01((h - 17.0) / 2.5) * 0.50,
        DayPhase::Dusk => 0.05 - clamp01((h - 19.5) / 2.5) * 0.05,
    }
}

fn sky_color(phase: DayPhase, angle: f32) -> [f32; 3] {
    match phase {
        DayPhase::Night => SKY_NIGHT,
        DayPhase::Dawn => lerp3(SKY_DUSK, SKY_DAWN, clamp01(angle / 0.25)),
        DayPhase::Morning => lerp3(SKY_DAWN, SKY_DAY, clamp01((angle - 0.25) / 0.75)),
        DayPhase::Afternoon => SKY_DAY,
        DayPhase::Sunset => lerp3(SKY_DAY, SKY_SUNSET, clamp01((0.55 - angle) / 0.50)),
        DayPhase::Dusk => lerp3(SKY_SUNSET, SKY_NIGHT, clamp01((0.05 - angle) / 0.05)),
    }
}

/// Compute all scene lighting parameters for a decimal hour.
pub fn compute_environment(hour: f32) -> EnvironmentState {
    let hour = wrap_hour(hour);
    let angle = sun_angle(hour);
    let phase = phase(hour);
    let is_night = angle < 0.08;

    // Sun sinks below the horizon once the angle drops under 0.05.
    let elevation = clamp01((angle - 0.05) / 0.95) * std::f32::consts::PI;
    let sun_position = Vec3::new(
        elevation.cos() * ORBIT_RADIUS,
        if angle < 0.05 {
            -15.0
        } else {
            elevation.sin() * ORBIT_RADIUS
        },
        -25.0,
    );

    let moon_elevation = clamp01(1.0 - angle * 4.0) * std::f32::consts::PI * 0.75;
    let moon_position = Vec3::new(
        -(moon_elevation * 0.8).cos() * ORBIT_RADIUS * 0.9,
        if is_night {
            moon_elevation.sin() * ORBIT_RADIUS
        } else {
            -20.0
        },
        25.0,
    );

    let sky = sky_color(phase, angle);

    let sun_color = if angle > 0.5 {
        rgb(0xfff8e0)
    } else {
        lerp3(rgb(0xff6b3a), rgb(0xfff8e0), clamp01(angle / 0.5))
    };

    let day_t = clamp01((angle - 0.05) * 4.0);

    EnvironmentState {
        hour,
        angle,
        phase,
        is_night,
        sun_position,
        moon_position,
        sky_color: sky,
        fog_color: sky,
        fog_density: if is_night { 0.006 } else { 0.008 },
        sun_color,
        sun_intensity: ((angle - 0.08) * 2.5).clamp(0.0, 1.2),
        hemi_sky_color: lerp3(rgb(0x2040a0), rgb(0x74b9ff), day_t),
        hemi_ground_color: lerp3(rgb(0x101830), rgb(0x7c5229), day_t),
        hemi_intensity: lerp(0.25, 0.6, day_t),
        ambient_color: if is_night { rgb(0x3355cc) } else { rgb(0xc9e8ff) },
        ambient_intensity: lerp(0.12, 0.28, day_t),
        stars_opacity: clamp01(1.0 - angle * 6.0),
        cloud_opacity: (angle * 4.0).clamp(0.08, 1.0),
        moon_opacity: clamp01(1.0 - angle * 4.0),
        exposure: lerp(0.7, 1.15, clamp01(angle * 2.5)),
        lantern_brightness: (1.0 - angle * 5.0).max(0.0),
    }
}

/// Current local hour from the system clock.
pub fn local_hour() -> f32 {
    use chrono::Timelike;

    let now = chrono::Local::now();
    now.hour() as f32 + now.minute() as f32 / 60.0 + now.second() as f32 / 3600.0
}

/// Where the environment model reads its hour from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clock {
    /// Local wall clock.
    Wall,
    /// Frozen at a fixed hour.
    Fixed(f32),
}

impl Clock {
    pub fn hour(self) -> f32 {
        match self {
            Clock::Wall => local_hour(),
            Clock::Fixed(h) => h,
        }
    }

    pub fn environment(self) -> EnvironmentState {
        compute_environment(self.hour())
    }
}
