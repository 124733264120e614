use std::str::FromStr;

use crate::daynight::Clock;
use crate::session::Character;

pub const SEED_VAR: &str = "FARMWALK_SEED";
pub const HOUR_VAR: &str = "FARMWALK_HOUR";
pub const CHARACTER_VAR: &str = "FARMWALK_CHARACTER";

/// Runtime settings read once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Session RNG seed; `None` picks a random one.
    pub seed: Option<u64>,
    pub clock: Clock,
    pub character: Character,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            clock: Clock::Wall,
            character: Character::Ailani,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Malformed values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(seed) = parse_var::<u64>(&lookup, SEED_VAR) {
            settings.seed = Some(seed);
        }

        if let Some(hour) = parse_var::<f32>(&lookup, HOUR_VAR) {
            if hour.is_finite() && (0.0..24.0).contains(&hour) {
                settings.clock = Clock::Fixed(hour);
            } else {
                log::warn!("{HOUR_VAR}={hour} is outside [0, 24), using the wall clock");
            }
        }

        if let Some(raw) = lookup(CHARACTER_VAR) {
            match Character::parse(&raw) {
                Some(c) => settings.character = c,
                None => log::warn!("{CHARACTER_VAR}={raw:?} is not a known character, keeping {}", settings.character.name()),
            }
        }

        log::debug!("settings: {settings:?}");
        settings
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring malformed {key}={raw:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Settings::from_lookup(|_| None), Settings::default());
    }

    #[test]
    fn reads_every_setting() {
        let s = Settings::from_lookup(lookup(&[
            (SEED_VAR, "1234"),
            (HOUR_VAR, " 18.5"),
            (CHARACTER_VAR, "Carolina"),
        ]));
        assert_eq!(s.seed, Some(1234));
        assert_eq!(s.clock, Clock::Fixed(18.5));
        assert_eq!(s.character, Character::Carolina);
    }

    #[test]
    fn malformed_values_fall_back() {
        let s = Settings::from_lookup(lookup(&[
            (SEED_VAR, "-3"),
            (HOUR_VAR, "25"),
            (CHARACTER_VAR, "dragon"),
        ]));
        assert_eq!(s, Settings::default());
    }
}
