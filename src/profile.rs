//! Player profile persistence: high score and preferred mode.
//!
//! A small JSON file in the platform config directory. The profile is read
//! once at startup; the high score is written only when a session ends with
//! a new record.

use crate::ruleset::Mode;
use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Writes the persisted high score. The orchestrator calls this on
/// termination when the score beats the stored record.
pub trait ScoreStore {
    fn save_high_score(&mut self, score: u32) -> io::Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub high_score: u32,
    pub mode: Mode,
    /// Unix timestamp of the last write.
    pub last_played: i64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            high_score: 0,
            mode: Mode::Assisted,
            last_played: 0,
        }
    }
}

/// Reads and writes the profile file. Cheap to clone; holds only the path.
#[derive(Debug, Clone)]
pub struct ProfileManager {
    path: PathBuf,
}

impl ProfileManager {
    /// Locate (and create if needed) the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "neonbird").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            path: config_dir.join("profile.json"),
        })
    }

    /// Use an explicit file path (tests point this at a temp directory).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the profile; a missing or unreadable file yields the default
    /// (high score 0, assisted mode).
    pub fn load(&self) -> Profile {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Profile::default(),
        }
    }

    fn store(&self, profile: &Profile) -> io::Result<()> {
        let text = serde_json::to_string_pretty(profile)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }

    /// Persist the preferred mode, keeping the stored high score.
    pub fn save_mode(&self, mode: Mode) -> io::Result<()> {
        let mut profile = self.load();
        profile.mode = mode;
        profile.last_played = Utc::now().timestamp();
        self.store(&profile)
    }
}

impl ScoreStore for ProfileManager {
    fn save_high_score(&mut self, score: u32) -> io::Result<()> {
        let mut profile = self.load();
        profile.high_score = score;
        profile.last_played = Utc::now().timestamp();
        self.store(&profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_manager(name: &str) -> ProfileManager {
        let path = std::env::temp_dir().join(format!("neonbird-test-{name}.json"));
        let _ = fs::remove_file(&path);
        ProfileManager::at_path(path)
    }

    #[test]
    fn test_missing_profile_defaults_to_zero() {
        let manager = temp_manager("missing");
        let profile = manager.load();
        assert_eq!(profile.high_score, 0);
        assert_eq!(profile.mode, Mode::Assisted);
    }

    #[test]
    fn test_high_score_round_trip() {
        let mut manager = temp_manager("roundtrip");
        manager.save_high_score(42).unwrap();
        let profile = manager.load();
        assert_eq!(profile.high_score, 42);
        assert!(profile.last_played > 0);
        let _ = fs::remove_file(&manager.path);
    }

    #[test]
    fn test_save_mode_keeps_high_score() {
        let mut manager = temp_manager("mode");
        manager.save_high_score(7).unwrap();
        manager.save_mode(Mode::Strict).unwrap();
        let profile = manager.load();
        assert_eq!(profile.high_score, 7);
        assert_eq!(profile.mode, Mode::Strict);
        let _ = fs::remove_file(&manager.path);
    }

    #[test]
    fn test_corrupt_profile_falls_back_to_default() {
        let manager = temp_manager("corrupt");
        fs::write(&manager.path, "not json {").unwrap();
        let profile = manager.load();
        assert_eq!(profile.high_score, 0);
        let _ = fs::remove_file(&manager.path);
    }
}
