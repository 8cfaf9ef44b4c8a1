//! Configuration of the rover daemon, loaded from a TOML file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Daemon configuration. Every field has a default, so a missing file and a
/// partial file both work.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Names of the rovers to start, one watcher thread each.
    #[serde(default = "default_rovers")]
    pub rovers: Vec<String>,

    /// Map every rover starts on.
    #[serde(default = "default_map")]
    pub map: PathBuf,

    /// Directory holding the per-rover command files.
    #[serde(default = "default_command_dir")]
    pub command_dir: PathBuf,

    /// Seconds between polls of a command file.
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,

    /// Seconds after which a watcher stops serving commands.
    #[serde(default = "default_max_runtime_secs")]
    pub max_runtime_secs: u64,
}

fn default_rovers() -> Vec<String> {
    vec!["Rover1".into(), "Rover2".into()]
}

fn default_map() -> PathBuf {
    "maps/map1.txt".into()
}

fn default_command_dir() -> PathBuf {
    ".".into()
}

fn default_poll_secs() -> u64 {
    5
}

fn default_max_runtime_secs() -> u64 {
    36000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rovers: default_rovers(),
            map: default_map(),
            command_dir: default_command_dir(),
            poll_secs: default_poll_secs(),
            max_runtime_secs: default_max_runtime_secs(),
        }
    }
}

impl Config {
    /// Load the configuration from `path`, falling back to the defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("could not read config file '{}'", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("could not parse config file '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Path::new("does/not/exist.toml")).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roverd.toml");
        fs::write(&path, "rovers = [\"Curiosity\"]\npoll_secs = 1\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.rovers, vec!["Curiosity".to_owned()]);
        assert_eq!(config.poll_secs, 1);
        assert_eq!(config.map, PathBuf::from("maps/map1.txt"));
        assert_eq!(config.max_runtime_secs, 36000);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roverd.toml");
        fs::write(&path, "rovers = 5").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
