//! Configuration file discovery

use std::path::PathBuf;

/// Configuration file locations (in order of precedence)
pub const CONFIG_LOCATIONS: &[&str] = &[
    "./parallel-manager.yaml",
    "./parallel-manager.yml",
    "./parallel-manager.json",
    "./.parallel-manager.yaml",
    "~/.config/parallel-manager/config.yaml",
    "~/.parallel-manager.yaml",
];

/// Find configuration file in standard locations
pub fn find_config_file() -> Option<PathBuf> {
    CONFIG_LOCATIONS
        .iter()
        .map(|location| expand_path(location))
        .find(|path| path.exists())
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
