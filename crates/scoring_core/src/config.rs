use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Serialize;
use shared::protocol::SNAPSHOT_KEY;

use crate::debounce::DEFAULT_TAP_WINDOW;

pub const DEFAULT_CONFIG_FILE: &str = "scorekeeper.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub tap_window_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            storage_key: SNAPSHOT_KEY.into(),
            tap_window_ms: u64::try_from(DEFAULT_TAP_WINDOW.as_millis()).unwrap_or(u64::MAX),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn tap_window(&self) -> Duration {
        Duration::from_millis(self.tap_window_ms)
    }
}

/// Defaults, then the optional TOML file, then environment overrides. Values that do not
/// parse are ignored and leave the previous layer in place. A zero tap window would make
/// every tap expire before it can be confirmed, so it is rejected the same way.
pub fn load_settings_from(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = config_path.and_then(|path| fs::read_to_string(path).ok()) {
        if let Ok(file_cfg) = raw.parse::<toml::Table>() {
            if let Some(v) = file_cfg.get("data_dir").and_then(toml::Value::as_str) {
                settings.data_dir = PathBuf::from(v);
            }
            if let Some(v) = file_cfg.get("storage_key").and_then(toml::Value::as_str) {
                settings.storage_key = v.to_string();
            }
            if let Some(v) = file_cfg
                .get("tap_window_ms")
                .and_then(toml::Value::as_integer)
                .and_then(|v| u64::try_from(v).ok())
                .filter(|v| *v > 0)
            {
                settings.tap_window_ms = v;
            }
            if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
                settings.log_filter = v.to_string();
            }
        }
    }

    if let Some(v) = env("SCOREKEEPER_DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }
    if let Some(v) = env("APP__DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }

    if let Some(v) = env("APP__STORAGE_KEY") {
        settings.storage_key = v;
    }

    if let Some(v) = env("APP__TAP_WINDOW_MS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) if parsed > 0 => settings.tap_window_ms = parsed,
            _ => {}
        }
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }

    settings
}
