use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Environment variable that points at an alternate config file.
pub const CONFIG_ENV: &str = "MULTIPROMPT_CONFIG";

/// Base multiprompt config directory (~/.config/multiprompt/ on Unix-likes)
pub fn multiprompt() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("multiprompt"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("multiprompt"))
    }
}

/// Config file path, honoring `MULTIPROMPT_CONFIG`.
pub fn config_json() -> Result<PathBuf> {
    match env::var(CONFIG_ENV) {
        Ok(custom) if !custom.trim().is_empty() => Ok(expand(&custom)),
        _ => Ok(multiprompt()?.join("multiprompt.json")),
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
