use std::path::PathBuf;
use std::sync::OnceLock;

/// Directory layout for speechcoach.
///
/// Linux (XDG):
///   Config:  $XDG_CONFIG_HOME/speechcoach  (~/.config/speechcoach)
///   Data:    $XDG_DATA_HOME/speechcoach    (~/.local/share/speechcoach)
///
/// macOS puts both under ~/Library/Application Support/speechcoach.
/// Base paths are resolved once and cached.

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

const APP_DIR: &str = "speechcoach";

pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    })
}

pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    })
}

/// <config_dir>/config.toml
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// <data_dir>/reports
pub fn reports_dir() -> PathBuf {
    data_dir().join("reports")
}
