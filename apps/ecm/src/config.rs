use std::{fs, io, path::Path};

use anyhow::Context;
use rotors::order::{DEFAULT_CIPHER_ORDER, DEFAULT_CONTROL_ORDER, DEFAULT_INDEX_ORDER};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "ecm.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cipher_order: String,
    pub control_order: String,
    pub index_order: String,
    pub machine: String,
    pub cipher_pos: String,
    pub control_pos: String,
    pub index_pos: String,
    pub navy_init: bool,
    pub group_size: usize,
    pub line_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cipher_order: DEFAULT_CIPHER_ORDER.into(),
            control_order: DEFAULT_CONTROL_ORDER.into(),
            index_order: DEFAULT_INDEX_ORDER.into(),
            machine: "CSP889".into(),
            cipher_pos: "OOOOO".into(),
            control_pos: "OOOOO".into(),
            index_pos: "00000".into(),
            navy_init: false,
            group_size: 5,
            line_width: 70,
        }
    }
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = read_settings_file(path)?;
    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    match fs::read_to_string(path) {
        Ok(raw) => toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(err) => Err(err)
            .with_context(|| format!("failed to read settings file '{}'", path.display())),
    }
}

/// Overlays `ECM_<NAME>` and then `APP__<NAME>` variables. Values that do not
/// parse are ignored.
pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| {
        lookup(&format!("APP__{name}")).or_else(|| lookup(&format!("ECM_{name}")))
    };

    if let Some(v) = var("CIPHER_ORDER") {
        settings.cipher_order = v;
    }
    if let Some(v) = var("CONTROL_ORDER") {
        settings.control_order = v;
    }
    if let Some(v) = var("INDEX_ORDER") {
        settings.index_order = v;
    }
    if let Some(v) = var("MACHINE") {
        settings.machine = v;
    }
    if let Some(v) = var("CIPHER_POS") {
        settings.cipher_pos = v;
    }
    if let Some(v) = var("CONTROL_POS") {
        settings.control_pos = v;
    }
    if let Some(v) = var("INDEX_POS") {
        settings.index_pos = v;
    }
    if let Some(v) = var("NAVY_INIT") {
        match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => settings.navy_init = true,
            "0" | "false" | "no" => settings.navy_init = false,
            _ => {}
        }
    }
    if let Some(parsed) = var("GROUP_SIZE").and_then(|v| v.parse().ok()) {
        settings.group_size = parsed;
    }
    if let Some(parsed) = var("LINE_WIDTH").and_then(|v| v.parse().ok()) {
        settings.line_width = parsed;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
