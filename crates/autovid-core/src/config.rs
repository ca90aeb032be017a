// crates/autovid-core/src/config.rs
//
// The persisted application document (`gui_config.json`).
//
// Shape:
//   { "input_path": "...", "output_path": "...",
//     "auto_clipper": { ... }, "vid_compiler": { ... } }
//
// Top-level keys are always present after load: serde fills any missing one
// from the defaults, and an absent or malformed file yields the defaults
// outright. Nothing here is surfaced to the user; failures only trace.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the config document, written beside the executable.
pub const CONFIG_FILE_NAME: &str = "gui_config.json";

/// Tab-scoped key/value section names.
pub const AUTO_CLIPPER_SECTION: &str = "auto_clipper";
pub const VID_COMPILER_SECTION: &str = "vid_compiler";

pub type TabConfig = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not write {path}: {source}")]
    Write {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_input_path")]
    pub input_path:   String,
    #[serde(default = "default_output_path")]
    pub output_path:  String,
    #[serde(default)]
    pub auto_clipper: TabConfig,
    #[serde(default)]
    pub vid_compiler: TabConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path:   default_input_path(),
            output_path:  default_output_path(),
            auto_clipper: TabConfig::new(),
            vid_compiler: TabConfig::new(),
        }
    }
}

impl AppConfig {
    /// Section lookup by the name used on disk.
    pub fn tab(&self, name: &str) -> Option<&TabConfig> {
        match name {
            AUTO_CLIPPER_SECTION => Some(&self.auto_clipper),
            VID_COMPILER_SECTION => Some(&self.vid_compiler),
            _ => None,
        }
    }
}

/// `<Videos>/Captures`, the platform's default screen-capture folder.
pub fn default_input_path() -> String {
    dirs::video_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Videos")))
        .unwrap_or_else(|| PathBuf::from("Videos"))
        .join("Captures")
        .to_string_lossy()
        .into_owned()
}

/// The platform's downloads folder.
pub fn default_output_path() -> String {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
        .to_string_lossy()
        .into_owned()
}

/// Parse a config document, or `None` if the text is not a JSON object of
/// the expected shape.
pub fn parse_config(text: &str) -> Option<AppConfig> {
    match serde_json::from_str::<AppConfig>(text) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!("[config] malformed document, using defaults: {e}");
            None
        }
    }
}

/// Read `path`, falling back to defaults when it is absent or unreadable.
pub fn load_config(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_config(&text).unwrap_or_default(),
        Err(e) => {
            debug!("[config] {} not loaded ({e}), using defaults", path.display());
            AppConfig::default()
        }
    }
}

// ── ConfigStore ───────────────────────────────────────────────────────────────

/// Owns the document and its location. Only ever mutated from the UI thread.
pub struct ConfigStore {
    path:   PathBuf,
    config: AppConfig,
}

impl ConfigStore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path   = path.into();
        let config = load_config(&path);
        Self { path, config }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Write the document as pretty-printed JSON.
    pub fn save(&self) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, text).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Save and swallow the error after tracing it. Persistence is
    /// best-effort everywhere in the panel.
    pub fn save_logged(&self) {
        if let Err(e) = self.save() {
            warn!("[config] {e}");
        }
    }

    pub fn set_input_path(&mut self, path: impl Into<String>) {
        self.config.input_path = path.into();
        self.save_logged();
    }

    pub fn set_output_path(&mut self, path: impl Into<String>) {
        self.config.output_path = path.into();
        self.save_logged();
    }

    /// Replace one tab's section wholesale and persist. Unknown section
    /// names are ignored.
    pub fn save_tab(&mut self, name: &str, tab: TabConfig) {
        match name {
            AUTO_CLIPPER_SECTION => self.config.auto_clipper = tab,
            VID_COMPILER_SECTION => self.config.vid_compiler = tab,
            other => {
                warn!("[config] unknown section '{other}' not saved");
                return;
            }
        }
        self.save_logged();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_top_level_keys_are_filled_from_defaults() {
        let cfg = parse_config(r#"{ "vid_compiler": { "trim_seconds": "10" } }"#).unwrap();
        assert_eq!(cfg.input_path, default_input_path());
        assert_eq!(cfg.output_path, default_output_path());
        assert!(cfg.auto_clipper.is_empty());
        assert_eq!(cfg.vid_compiler.get("trim_seconds").map(String::as_str), Some("10"));
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(parse_config("not json").is_none());
        assert!(parse_config("[1, 2, 3]").is_none());
    }

    #[test]
    fn default_input_ends_in_captures() {
        assert!(default_input_path().ends_with("Captures"));
    }

    #[test]
    fn tab_lookup_by_section_name() {
        let mut cfg = AppConfig::default();
        cfg.auto_clipper.insert("config_selection".into(), "full".into());
        assert_eq!(cfg.tab(AUTO_CLIPPER_SECTION).unwrap().len(), 1);
        assert!(cfg.tab(VID_COMPILER_SECTION).unwrap().is_empty());
        assert!(cfg.tab("nope").is_none());
    }
}
