// Linkstash platform paths for Windows
// Config and data both live under %APPDATA%/Linkstash

use std::env;
use std::path::PathBuf;

fn appdata_dir() -> PathBuf {
    let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp"));
    PathBuf::from(appdata).join("Linkstash")
}

/// Returns the configuration directory for Linkstash on Windows.
pub fn get_config_dir() -> PathBuf {
    appdata_dir()
}

/// Returns the data directory for Linkstash on Windows.
pub fn get_data_dir() -> PathBuf {
    appdata_dir()
}
