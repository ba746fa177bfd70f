// Linkstash platform paths for Linux
// Config: ~/.config/linkstash
// Data:   ~/.local/share/linkstash

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for Linkstash on Linux.
/// Uses `$XDG_CONFIG_HOME/linkstash` if set, otherwise `~/.config/linkstash`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("linkstash")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("linkstash")
    }
}

/// Returns the data directory for Linkstash on Linux.
/// Uses `$XDG_DATA_HOME/linkstash` if set, otherwise `~/.local/share/linkstash`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("linkstash")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("linkstash")
    }
}
