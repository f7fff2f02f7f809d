//! High-score persistence.
//!
//! The game keeps a single number across sessions. [`JsonFileStore`] writes
//! it to a small JSON file under the user's config directory;
//! [`MemoryStore`] keeps it in memory for tests and headless runs.
//!
//! Loading never fails: a missing, unreadable or malformed file reads as 0.

use std::cell::Cell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit high-score file.
pub const HIGHSCORE_PATH_ENV: &str = "BLOCKFALL_HIGHSCORE";

pub trait HighScoreStore {
    /// Stored high score, or 0 if there is none.
    fn load(&self) -> u32;

    fn save(&self, high_score: u32) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    high_score: u32,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$BLOCKFALL_HIGHSCORE`, else `$XDG_CONFIG_HOME/blockfall/highscore.json`,
    /// else `$HOME/.config/blockfall/highscore.json`, else a path relative to
    /// the working directory.
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var_os(name))
    }

    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(explicit) = lookup(HIGHSCORE_PATH_ENV).filter(|p| !p.is_empty()) {
            return Self::with_path(explicit);
        }

        let base = lookup("XDG_CONFIG_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                lookup("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("blockfall");
        path.push("highscore.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        let Ok(bytes) = fs::read(&self.path) else {
            log::debug!("no high score at {}", self.path.display());
            return 0;
        };
        match serde_json::from_slice::<HighScoreFile>(&bytes) {
            Ok(file) => file.high_score,
            Err(err) => {
                log::warn!(
                    "ignoring malformed high score file {}: {err}",
                    self.path.display()
                );
                0
            }
        }
    }

    fn save(&self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        let file = HighScoreFile {
            version: default_version(),
            high_score,
        };
        let text = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, text)
            .with_context(|| format!("write high score to {}", self.path.display()))?;
        log::debug!("saved high score {high_score} to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the high score for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Cell<u32>,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Cell::new(initial),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.get()
    }

    fn save(&self, high_score: u32) -> Result<()> {
        self.value.set(high_score);
        Ok(())
    }
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&self, high_score: u32) -> Result<()> {
        (**self).save(high_score)
    }
}
