// crates/autovid-core/src/lib.rs
//
// Pure control-panel data. No egui, ffmpeg or threads.
// Everything in here is driven from the UI loop and unit-testable headless.

pub mod assets;
pub mod clipper;
pub mod commands;
pub mod compile;
pub mod config;
pub mod helpers;
pub mod state;
pub mod status;
pub mod watcher;

pub use config::{AppConfig, ConfigError, ConfigStore};
pub use state::PanelState;
pub use status::{LogLevel, StatusLog};
pub use watcher::{FolderChange, FolderWatcher, WatchedFolder};
