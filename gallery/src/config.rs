use std::env;

use serde::Serialize;

use crate::util::parse_seed;

pub const DEFAULT_FRAMES: u32 = 12;
pub const DEFAULT_FRAME_MS: u64 = 250;
pub const DEFAULT_FRAMES_PER_CLOCK: u32 = 4;
pub const DEFAULT_SHUFFLE: bool = true;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Debug, Serialize)]
pub struct GalleryConfig {
    /// `None` seeds from the wall clock.
    pub seed: Option<u64>,
    pub shuffle: bool,
    pub frames: u32,
    pub frame_ms: u64,
    pub frames_per_clock: u32,
    /// `None` starts at the current time.
    pub start_ms: Option<u64>,
    pub direction: Direction,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            seed: None,
            shuffle: DEFAULT_SHUFFLE,
            frames: DEFAULT_FRAMES,
            frame_ms: DEFAULT_FRAME_MS,
            frames_per_clock: DEFAULT_FRAMES_PER_CLOCK,
            start_ms: None,
            direction: Direction::Forward,
        }
    }
}

impl GalleryConfig {
    pub fn from_env() -> Self {
        let reverse = read_env_bool("GALLERY_REVERSE", false);
        Self {
            seed: read_env_seed("GALLERY_SEED"),
            shuffle: read_env_bool("GALLERY_SHUFFLE", DEFAULT_SHUFFLE),
            frames: read_env_u32("GALLERY_FRAMES", DEFAULT_FRAMES),
            frame_ms: read_env_u64("GALLERY_FRAME_MS", DEFAULT_FRAME_MS),
            frames_per_clock: read_env_u32("GALLERY_FRAMES_PER_CLOCK", DEFAULT_FRAMES_PER_CLOCK),
            start_ms: read_env_start_ms("GALLERY_START_MS"),
            direction: if reverse {
                Direction::Backward
            } else {
                Direction::Forward
            },
        }
    }
}

pub(crate) fn read_env_u32(name: &str, default: u32) -> u32 {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => value,
        _ => {
            tracing::warn!("{}={:?} ignored. Falling back to {}.", name, raw, default);
            default
        }
    }
}

pub(crate) fn read_env_u64(name: &str, default: u64) -> u64 {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => value,
        _ => {
            tracing::warn!("{}={:?} ignored. Falling back to {}.", name, raw, default);
            default
        }
    }
}

pub(crate) fn read_env_bool(name: &str, default: bool) -> bool {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    parse_bool(&raw).unwrap_or_else(|| {
        tracing::warn!("{}={:?} ignored. Falling back to {}.", name, raw, default);
        default
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Epoch zero is a valid start, so only unparsable values are rejected.
pub(crate) fn read_env_start_ms(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("{} ignored ({}). Starting at the current time.", name, err);
            None
        }
    }
}

pub(crate) fn read_env_seed(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match parse_seed(&raw) {
        Ok(seed) => Some(seed),
        Err(err) => {
            tracing::warn!("{} ignored ({}). Falling back to a time seed.", name, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_spellings() {
        for truthy in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_bool(truthy), Some(true), "{truthy}");
        }
        for falsy in ["0", "false", "Off", "no"] {
            assert_eq!(parse_bool(falsy), Some(false), "{falsy}");
        }
        for invalid in ["", "maybe", "ture"] {
            assert_eq!(parse_bool(invalid), None, "{invalid}");
        }
    }

    #[test]
    fn test_invalid_env_values_fall_back_to_defaults() {
        env::set_var("GALLERY_TEST_TYPO_BOOL", "ture");
        env::set_var("GALLERY_TEST_FALSE_BOOL", "false");
        env::set_var("GALLERY_TEST_BAD_U32", "twelve");
        env::set_var("GALLERY_TEST_ZERO_U64", "0");
        env::set_var("GALLERY_TEST_BAD_START", "-5");
        env::set_var("GALLERY_TEST_ZERO_START", "0");

        assert!(read_env_bool("GALLERY_TEST_TYPO_BOOL", DEFAULT_SHUFFLE));
        assert!(!read_env_bool("GALLERY_TEST_FALSE_BOOL", DEFAULT_SHUFFLE));
        assert_eq!(read_env_u32("GALLERY_TEST_BAD_U32", DEFAULT_FRAMES), DEFAULT_FRAMES);
        assert_eq!(read_env_u64("GALLERY_TEST_ZERO_U64", DEFAULT_FRAME_MS), DEFAULT_FRAME_MS);
        assert_eq!(read_env_start_ms("GALLERY_TEST_BAD_START"), None);
        assert_eq!(read_env_start_ms("GALLERY_TEST_ZERO_START"), Some(0));
    }

    #[test]
    fn test_missing_env_uses_defaults() {
        assert_eq!(read_env_u32("GALLERY_TEST_UNSET_U32", 7), 7);
        assert_eq!(read_env_u64("GALLERY_TEST_UNSET_U64", 9), 9);
        assert!(read_env_bool("GALLERY_TEST_UNSET_BOOL", true));
        assert_eq!(read_env_seed("GALLERY_TEST_UNSET_SEED"), None);
        assert_eq!(read_env_start_ms("GALLERY_TEST_UNSET_START"), None);
    }

    #[test]
    fn test_default_config() {
        let config = GalleryConfig::default();
        assert_eq!(config.frames, DEFAULT_FRAMES);
        assert_eq!(config.direction, Direction::Forward);
        assert!(config.shuffle);
        assert!(config.seed.is_none());
    }
}
