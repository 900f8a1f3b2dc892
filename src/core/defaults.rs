use serde::{Deserialize, Serialize};
use std::fs;

use super::paths;

pub use super::paths::CONFIG_ENV;

/// Root configuration structure for multiprompt.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MultipromptConfig {
    #[serde(default)]
    pub display: DisplaySettings,
}

/// How a session is drawn and confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    /// Shown in place of a missing or unformattable response.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Prefix of every response line.
    #[serde(default = "default_indent")]
    pub indent: String,

    #[serde(default)]
    pub highlight: HighlightStyle,

    /// Draw the form in the terminal's alternate screen.
    #[serde(default = "default_alternate_screen")]
    pub alternate_screen: bool,

    /// Leading text of the confirm prompt.
    #[serde(default = "default_confirm_label")]
    pub confirm_label: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStyle {
    #[default]
    Reverse,
    Bold,
    Underline,
    None,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            indent: default_indent(),
            highlight: HighlightStyle::default(),
            alternate_screen: default_alternate_screen(),
            confirm_label: default_confirm_label(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_placeholder() -> String {
    "__".to_string()
}

fn default_indent() -> String {
    "    ".to_string()
}

fn default_alternate_screen() -> bool {
    true
}

fn default_confirm_label() -> String {
    "Confirm".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Display settings from multiprompt.json merged over built-in defaults.
pub fn load_settings() -> DisplaySettings {
    load_config().display
}

/// Load the full config, falling back to defaults on any error.
/// A missing file is silent; an unreadable or invalid one is reported.
pub fn load_config() -> MultipromptConfig {
    let path = match paths::config_json() {
        Ok(path) => path,
        Err(_) => return MultipromptConfig::default(),
    };

    if !path.exists() {
        return MultipromptConfig::default();
    }

    match parse_config_file(&path) {
        Ok(config) => config,
        Err(err) => {
            log_status!(
                "config",
                "Ignoring {}: {} ({})",
                path.display(),
                err.message,
                err.details
            );
            MultipromptConfig::default()
        }
    }
}

fn parse_config_file(path: &std::path::Path) -> crate::Result<MultipromptConfig> {
    let content = crate::utils::io::read_file(path, &format!("read {}", path.display()))?;
    parse_config(&content, &path.display().to_string())
}

/// Parse config JSON; `origin` names the source in errors.
pub fn parse_config(content: &str, origin: &str) -> crate::Result<MultipromptConfig> {
    let config: MultipromptConfig =
        serde_json::from_str(content).map_err(|e| crate::Error::config_invalid_json(origin, e))?;
    validate_display(&config.display)?;
    Ok(config)
}

/// An empty placeholder would leave unanswered fields and the highlight invisible.
fn validate_display(display: &DisplaySettings) -> crate::Result<()> {
    if display.placeholder.is_empty() {
        return Err(crate::Error::config_invalid_value(
            "display.placeholder",
            Some(display.placeholder.clone()),
            "Placeholder must not be empty",
        ));
    }
    Ok(())
}

/// Save config to multiprompt.json (creates if missing).
pub fn save_config(config: &MultipromptConfig) -> crate::Result<()> {
    let path = paths::config_json()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize multiprompt.json".to_string()))
    })?;

    crate::utils::io::write_file_atomic(&path, &content, &format!("write {}", path.display()))
}

/// Check if the config file exists
pub fn config_exists() -> bool {
    paths::config_json().map(|p| p.exists()).unwrap_or(false)
}

/// Delete the config file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::config_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the config path (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::config_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> MultipromptConfig {
    MultipromptConfig::default()
}
