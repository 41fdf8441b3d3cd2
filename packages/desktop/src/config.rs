//! Locating and reading `rustyfin.toml`.
//!
//! Loading never fails: a missing file means defaults, and a file that cannot
//! be read or parsed also means defaults plus a warning. Warnings are returned
//! instead of logged because tracing is set up from the loaded config.

use std::io;
use std::path::{Path, PathBuf};

use store::RustyfinConfig;

/// `<config dir>/rustyfin/rustyfin.toml`, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rustyfin").join(RustyfinConfig::filename()))
}

/// Load the config from the platform config dir.
pub fn load() -> (RustyfinConfig, Vec<String>) {
    match config_path() {
        Some(path) => load_from(&path),
        None => (
            RustyfinConfig::default(),
            vec!["No config directory on this platform".to_string()],
        ),
    }
}

pub fn load_from(path: &Path) -> (RustyfinConfig, Vec<String>) {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return (RustyfinConfig::default(), Vec::new());
        }
        Err(e) => {
            return (
                RustyfinConfig::default(),
                vec![format!("Failed to read {}: {}", path.display(), e)],
            );
        }
    };

    match RustyfinConfig::from_toml(&text) {
        Ok(config) => (config, Vec::new()),
        Err(e) => (
            RustyfinConfig::default(),
            vec![format!("Failed to parse {}: {}", path.display(), e)],
        ),
    }
}
