// Hanfe Toggle Configuration
// Parses the INI-style toggle.ini that selects the mode-switch keys

use std::fs;
use std::path::Path;

use crate::engine::InputMode;
use crate::key::{self, codes};

/// Configuration errors; these map to exit code 2 in the binary.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read toggle config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid line in {source_name}: {line}")]
    Syntax { source_name: String, line: String },

    #[error("no toggle keys defined in {0}")]
    EmptyKeys(String),

    #[error("unknown key name '{name}' in {source_name}")]
    UnknownKey { name: String, source_name: String },

    #[error("invalid default_mode '{value}' in {source_name}")]
    InvalidMode { value: String, source_name: String },

    #[error("unknown layout: {0}")]
    UnknownLayout(String),
}

/// Which keys flip Hangul/Latin mode, and the mode to start in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleConfig {
    pub toggle_keys: Vec<u16>,
    pub default_mode: InputMode,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            toggle_keys: vec![codes::KEY_RIGHTALT, codes::KEY_HANGEUL],
            default_mode: InputMode::Hangul,
        }
    }
}

/// Load a toggle config from disk.
pub fn load_toggle_config(path: &Path) -> Result<ToggleConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_toggle_config(&text, &path.display().to_string())
}

/// Parse toggle config text. `source_name` is used in diagnostics only.
///
/// The dialect is a minimal INI: `#`/`;` comments, one recognized section
/// `[toggle]` with `keys = NAME[,NAME...]` (required) and
/// `default_mode = hangul|latin` (optional).
pub fn parse_toggle_config(text: &str, source_name: &str) -> Result<ToggleConfig, ConfigError> {
    let mut in_toggle = false;
    let mut keys_value: Option<String> = None;
    let mut mode_value: Option<String> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            let section = line[1..line.len() - 1].trim();
            in_toggle = section == "toggle";
            continue;
        }
        if !in_toggle {
            continue;
        }
        let Some((name, value)) = line.split_once('=') else {
            return Err(ConfigError::Syntax {
                source_name: source_name.to_string(),
                line: line.to_string(),
            });
        };
        match name.trim() {
            "keys" => keys_value = Some(value.trim().to_string()),
            "default_mode" => mode_value = Some(value.trim().to_string()),
            _ => {}
        }
    }

    let keys_value = keys_value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::EmptyKeys(source_name.to_string()))?;

    let mut toggle_keys = Vec::new();
    for token in keys_value.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        toggle_keys.push(parse_key_name(token, source_name)?);
    }
    if toggle_keys.is_empty() {
        return Err(ConfigError::EmptyKeys(source_name.to_string()));
    }

    let default_mode = match mode_value.as_deref() {
        None | Some("") => InputMode::Hangul,
        Some(value) => match value.to_lowercase().as_str() {
            "hangul" => InputMode::Hangul,
            "latin" => InputMode::Latin,
            _ => {
                return Err(ConfigError::InvalidMode {
                    value: value.to_string(),
                    source_name: source_name.to_string(),
                })
            }
        },
    };

    Ok(ToggleConfig {
        toggle_keys,
        default_mode,
    })
}

/// Resolve a key name from the config into a keycode.
///
/// Accepts canonical `KEY_*` names, bare names (a `KEY_` prefix is added),
/// and a handful of X-style aliases, all case-insensitively.
fn parse_key_name(name: &str, source_name: &str) -> Result<u16, ConfigError> {
    let upper = name.to_uppercase();
    let canonical = match upper.as_str() {
        "ALT_R" => "KEY_RIGHTALT".to_string(),
        "ALT_L" => "KEY_LEFTALT".to_string(),
        "CTRL_R" => "KEY_RIGHTCTRL".to_string(),
        "CTRL_L" => "KEY_LEFTCTRL".to_string(),
        "SHIFT_R" => "KEY_RIGHTSHIFT".to_string(),
        "SHIFT_L" => "KEY_LEFTSHIFT".to_string(),
        "HANGUL" => "KEY_HANGUL".to_string(),
        _ if upper.starts_with("KEY_") => upper,
        _ => format!("KEY_{upper}"),
    };
    key::key_from_name(&canonical).ok_or_else(|| ConfigError::UnknownKey {
        name: name.to_string(),
        source_name: source_name.to_string(),
    })
}
