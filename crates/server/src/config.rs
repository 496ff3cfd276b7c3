use std::{collections::HashMap, fs, path::PathBuf};

use serde::Deserialize;
use shared::domain::SectionSet;

pub const SETTINGS_FILE: &str = "server.toml";

/// Sections built when neither the request nor the config names any.
pub const DEFAULT_SECTIONS: &[&str] = &["BCS-6G"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub sheets_dir: PathBuf,
    pub default_sheet_id: Option<String>,
    pub default_sections: Vec<String>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".into(),
            sheets_dir: PathBuf::from("./data/sheets"),
            default_sheet_id: None,
            default_sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the `server.toml` contents, then environment variables.
pub(crate) fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("sheets_dir") {
                settings.sheets_dir = PathBuf::from(v);
            }
            if let Some(v) = file_cfg.get("default_sheet_id") {
                settings.default_sheet_id = non_empty(v);
            }
            if let Some(v) = file_cfg.get("default_sections") {
                settings.default_sections = SectionSet::parse(v).to_vec();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Some(v) = env("SHEETS_DIR") {
        settings.sheets_dir = PathBuf::from(v);
    }
    if let Some(v) = env("APP__SHEETS_DIR") {
        settings.sheets_dir = PathBuf::from(v);
    }

    if let Some(v) = env("APP__DEFAULT_SHEET_ID") {
        settings.default_sheet_id = non_empty(&v);
    }
    if let Some(v) = env("APP__DEFAULT_SECTIONS") {
        settings.default_sections = SectionSet::parse(&v).to_vec();
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
