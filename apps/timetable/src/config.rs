use std::{collections::HashMap, fs, path::PathBuf};

use storage::sqlite_url_for_path;

pub const SETTINGS_FILE: &str = "timetable.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub database_url: String,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            database_url: default_database_url(),
            log_filter: "warn".into(),
        }
    }
}

/// Per-user SQLite file, falling back to the working directory.
fn default_database_url() -> String {
    let path = dirs::data_local_dir()
        .map(|base| base.join("timetable").join("timetable.db"))
        .unwrap_or_else(|| PathBuf::from("./timetable.db"));
    sqlite_url_for_path(&path)
}

pub fn load_settings() -> ClientSettings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the `timetable.toml` contents, then environment variables.
/// Command-line flags are applied on top by the caller.
pub(crate) fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
        }
    }

    if let Some(v) = env("TIMETABLE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("TIMETABLE_DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}
