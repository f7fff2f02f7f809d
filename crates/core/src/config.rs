//! Game configuration and its validation.
//!
//! A [`GameConfig`] must pass [`GameConfig::validate`] before a game can be
//! built from it, so a malformed configuration fails at startup instead of
//! producing an unplayable field.

use thiserror::Error;

use crate::types::{
    BASE_DROP_MS, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, MIN_DROP_MS, MIN_FIELD_DIM,
    SPEED_STEP_MS, SPEED_STEP_SCORE,
};

/// Playfield dimensions and speed curve parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Drop interval at score 0
    pub base_drop_ms: u32,
    /// Drop interval floor
    pub min_drop_ms: u32,
    /// Score needed per speed step
    pub speed_step_score: u32,
    /// Interval reduction per speed step
    pub speed_step_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("playfield {width}x{height} has a zero dimension")]
    ZeroDimension { width: usize, height: usize },
    #[error("playfield {width}x{height} is smaller than {min}x{min}")]
    FieldTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("drop interval floor {min_drop_ms}ms must be in 1..={base_drop_ms}ms")]
    InvalidDropInterval { base_drop_ms: u32, min_drop_ms: u32 },
    #[error("arena is {actual:?} but the configuration expects {expected:?}")]
    ArenaMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("speed step score must be positive")]
    InvalidSpeedStep,
    #[error("environment variable {name}={value:?} is not a valid number")]
    InvalidEnv { name: &'static str, value: String },
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            base_drop_ms: BASE_DROP_MS,
            min_drop_ms: MIN_DROP_MS,
            speed_step_score: SPEED_STEP_SCORE,
            speed_step_ms: SPEED_STEP_MS,
        }
    }
}

impl GameConfig {
    /// Default configuration with a custom playfield size.
    pub fn with_field(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        if width < MIN_FIELD_DIM || height < MIN_FIELD_DIM {
            return Err(ConfigError::FieldTooSmall {
                width,
                height,
                min: MIN_FIELD_DIM,
            });
        }
        if self.min_drop_ms == 0 || self.min_drop_ms > self.base_drop_ms {
            return Err(ConfigError::InvalidDropInterval {
                base_drop_ms: self.base_drop_ms,
                min_drop_ms: self.min_drop_ms,
            });
        }
        if self.speed_step_score == 0 {
            return Err(ConfigError::InvalidSpeedStep);
        }
        Ok(self)
    }

    /// Read overrides from `BLOCKFALL_*` environment variables.
    ///
    /// - `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`: playfield size
    /// - `BLOCKFALL_BASE_DROP_MS`, `BLOCKFALL_MIN_DROP_MS`: speed curve bounds
    /// - `BLOCKFALL_SPEED_STEP_SCORE`, `BLOCKFALL_SPEED_STEP_MS`: speed curve steps
    ///
    /// The result is validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Like [`GameConfig::from_env`] with an injectable variable lookup.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        read_var(&lookup, "BLOCKFALL_WIDTH", &mut cfg.width)?;
        read_var(&lookup, "BLOCKFALL_HEIGHT", &mut cfg.height)?;
        read_var(&lookup, "BLOCKFALL_BASE_DROP_MS", &mut cfg.base_drop_ms)?;
        read_var(&lookup, "BLOCKFALL_MIN_DROP_MS", &mut cfg.min_drop_ms)?;
        read_var(&lookup, "BLOCKFALL_SPEED_STEP_SCORE", &mut cfg.speed_step_score)?;
        read_var(&lookup, "BLOCKFALL_SPEED_STEP_MS", &mut cfg.speed_step_ms)?;
        cfg.validate()
    }
}

fn read_var<F, T>(lookup: &F, name: &'static str, out: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(raw) = lookup(name) else {
        return Ok(());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    *out = trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { name, value: raw.clone() })?;
    Ok(())
}
