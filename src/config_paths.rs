//! Where tabview keeps its config file and logs
//!
//! Both sit in one per-user `tabview` directory. The CLI's `--config` flag
//! bypasses [`config_file`]; logging always uses [`ensure_logs_dir`].

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "tabview";

/// Per-user tabview directory: `$XDG_CONFIG_HOME/tabview`, falling back to
/// `~/.config/tabview`, or `%APPDATA%\tabview` on Windows. `None` when no
/// home directory can be found.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// Default `EngineConfig` location, `config.yaml` in [`config_dir`]
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Rolling log files go here
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Create the log directory if needed; the error is a message for stderr
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
