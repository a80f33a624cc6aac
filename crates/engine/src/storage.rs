//! Best score and settings persistence
//!
//! Both values live as small JSON files under one data directory. Loads never
//! fail: a missing file is the first run, and a malformed one is reported on
//! stderr and replaced by the default. Saves return `anyhow::Result` so the
//! host can decide how loud to be.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::settings::Settings;

pub const BEST_SCORE_FILE: &str = "best-score.json";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn best_score_path(&self) -> PathBuf {
        self.dir.join(BEST_SCORE_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Stored best score, 0 when absent or unreadable
    pub fn load_best_score(&self) -> u32 {
        let path = self.best_score_path();
        match read_optional(&path) {
            Ok(Some(raw)) => match serde_json::from_str::<u32>(raw.trim()) {
                Ok(score) => score,
                Err(e) => {
                    eprintln!("[Storage] ignoring malformed {}: {}", path.display(), e);
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                eprintln!("[Storage] {:#}", e);
                0
            }
        }
    }

    pub fn save_best_score(&self, score: u32) -> Result<()> {
        let json = serde_json::to_string(&score)?;
        self.write(&self.best_score_path(), json.as_bytes())
    }

    /// Stored settings merged over defaults
    pub fn load_settings(&self) -> Settings {
        let path = self.settings_path();
        match read_optional(&path) {
            Ok(Some(raw)) => match serde_json::from_str::<Settings>(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("[Storage] failed to load settings from {}: {}", path.display(), e);
                    Settings::default()
                }
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                eprintln!("[Storage] {:#}", e);
                Settings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_vec_pretty(settings)?;
        self.write(&self.settings_path(), &json)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating data dir {}", self.dir.display()))?;
        fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "blockfall-storage-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_files_load_defaults() {
        let storage = Storage::new(scratch("missing"));
        assert_eq!(storage.load_best_score(), 0);
        assert_eq!(storage.load_settings(), Settings::default());
    }

    #[test]
    fn best_score_round_trip() {
        let dir = scratch("best");
        let storage = Storage::new(&dir);
        storage.save_best_score(4200).unwrap();
        assert_eq!(storage.load_best_score(), 4200);
        assert_eq!(fs::read_to_string(dir.join(BEST_SCORE_FILE)).unwrap(), "4200");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn malformed_best_score_loads_zero() {
        let dir = scratch("malformed-best");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(BEST_SCORE_FILE), "not a number").unwrap();
        assert_eq!(Storage::new(&dir).load_best_score(), 0);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn settings_round_trip() {
        let dir = scratch("settings");
        let storage = Storage::new(&dir);
        let settings = Settings {
            ghost_piece_enabled: false,
            hard_drop_enabled: true,
            jk_rotation_reversed: true,
        };
        storage.save_settings(&settings).unwrap();
        assert_eq!(storage.load_settings(), settings);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        let dir = scratch("malformed-settings");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SETTINGS_FILE), "{ghost").unwrap();
        assert_eq!(Storage::new(&dir).load_settings(), Settings::default());
        fs::remove_dir_all(dir).unwrap();
    }
}
