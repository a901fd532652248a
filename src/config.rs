//! Shell appearance settings, optionally loaded from `~/.config/befsh.toml`.
//!
//! The file is tiny, so a small hand-rolled parser is used instead of a full
//! TOML dependency: only the `[shell]` section is read, with `key = value`
//! pairs whose values may be quoted.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use cross_xdg::BaseDirs;

#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Prompt shown before each command line.
    pub prompt: String,
    /// Underline character for the help listing header.
    pub ruler: char,
    /// Underline character for the help listing subheaders.
    pub subruler: char,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: ">>> ".to_string(),
            ruler: '=',
            subruler: '-',
        }
    }
}

static CONFIG: OnceLock<ShellConfig> = OnceLock::new();

pub fn config() -> &'static ShellConfig {
    CONFIG.get_or_init(|| load_from_toml().unwrap_or_default())
}

fn load_from_toml() -> Option<ShellConfig> {
    let base_dirs = BaseDirs::new().ok()?;

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let config_home = base_dirs.config_home();

    let mut path = PathBuf::from(config_home);
    path.push("befsh.toml");

    let content = fs::read_to_string(path).ok()?;
    Some(parse_config(&content))
}

/// Apply `[shell]` keys from `content` on top of the defaults.
fn parse_config(content: &str) -> ShellConfig {
    let mut in_shell = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_shell = &line[1..line.len() - 1] == "shell";
            continue;
        }
        if !in_shell {
            continue;
        }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq + 1..].trim();
            // Accept quoted or unquoted
            let val = if val_raw.starts_with('"') && val_raw.ends_with('"') && val_raw.len() >= 2 {
                val_raw[1..val_raw.len() - 1].to_string()
            } else {
                val_raw.to_string()
            };
            map.insert(key, val);
        }
    }

    let mut cfg = ShellConfig::default();
    if let Some(prompt) = map.get("prompt") {
        cfg.prompt = prompt.clone();
    }
    if let Some(ch) = map.get("ruler").and_then(|v| v.chars().next()) {
        cfg.ruler = ch;
    }
    if let Some(ch) = map.get("subruler").and_then(|v| v.chars().next()) {
        cfg.subruler = ch;
    }
    cfg
}
