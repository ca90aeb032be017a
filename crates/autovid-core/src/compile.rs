// crates/autovid-core/src/compile.rs
//
// Plain data describing one compilation run. No threads here. The runner
// in autovid-media owns the worker; this module owns what crosses into it
// and what comes back out.

use std::path::{Path, PathBuf};

use crate::assets::DEFAULT_TRIM;
use crate::config::TabConfig;
use crate::status::LogLevel;

// ── Environment contract for subprocess compilers ─────────────────────────────

pub const ENV_GUI_MODE:     &str = "GUI_MODE";
pub const ENV_INPUT_PATH:   &str = "VIDEO_INPUT_PATH";
pub const ENV_OUTPUT_PATH:  &str = "VIDEO_OUTPUT_PATH";
pub const ENV_TRIM_SECONDS: &str = "TRIM_SECONDS";
pub const ENV_MUSIC:        &str = "MUSIC_SELECTION";
pub const ENV_INTRO:        &str = "INTRO_SELECTION";

/// Seconds cut from the end of each source clip. `None` in the dropdown
/// means no trimming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrimSetting(pub Option<u32>);

impl TrimSetting {
    /// Parse the dropdown value. Anything that is not a whole number counts
    /// as "None".
    pub fn parse(s: &str) -> Self {
        TrimSetting(s.trim().parse::<u32>().ok())
    }

    pub fn seconds(self) -> u32 {
        self.0.unwrap_or(0)
    }

    /// The string handed to subprocess compilers and persisted in config.
    pub fn as_label(self) -> String {
        match self.0 {
            Some(n) => n.to_string(),
            None    => "None".to_string(),
        }
    }
}

impl Default for TrimSetting {
    fn default() -> Self {
        TrimSetting::parse(DEFAULT_TRIM)
    }
}

/// Validated parameters for a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct CompileParams {
    pub input_path:      PathBuf,
    pub output_path:     PathBuf,
    pub trim:            TrimSetting,
    pub music_selection: String,
    pub intro_selection: String,
}

impl CompileParams {
    /// The six environment variables exported to a subprocess compiler.
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        vec![
            (ENV_GUI_MODE,     "1".to_string()),
            (ENV_INPUT_PATH,   self.input_path.to_string_lossy().into_owned()),
            (ENV_OUTPUT_PATH,  self.output_path.to_string_lossy().into_owned()),
            (ENV_TRIM_SECONDS, self.trim.as_label()),
            (ENV_MUSIC,        self.music_selection.clone()),
            (ENV_INTRO,        self.intro_selection.clone()),
        ]
    }

    /// Parameter struct for compilers running inside this process.
    pub fn compiler_config(&self) -> CompilerConfig {
        let trim = self.trim.seconds();
        CompilerConfig {
            intro_selection: self.intro_selection.clone(),
            music_selection: self.music_selection.clone(),
            trim_seconds:    trim,
            clip_duration:   trim as f64,
            video_folder:    self.input_path.clone(),
            output_folder:   self.output_path.clone(),
        }
    }
}

/// The in-process compiler's recognized configuration keys.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilerConfig {
    pub intro_selection: String,
    pub music_selection: String,
    pub trim_seconds:    u32,
    pub clip_duration:   f64,
    pub video_folder:    PathBuf,
    pub output_folder:   PathBuf,
}

/// What the user has typed/selected, before validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompileRequest {
    pub input_path:      String,
    pub output_path:     String,
    pub trim_seconds:    String,
    pub music_selection: String,
    pub intro_selection: String,
}

impl CompileRequest {
    pub fn input(&self) -> &Path {
        Path::new(self.input_path.trim())
    }

    pub fn output(&self) -> &Path {
        Path::new(self.output_path.trim())
    }
}

/// Messages sent from the compile worker thread to the UI, in emission
/// order. `Finished` is always the last message of a run.
#[derive(Clone, Debug, PartialEq)]
pub enum CompileEvent {
    Log { level: LogLevel, text: String },
    Finished(RunOutcome),
}

/// Transient result of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    pub success: bool,
    /// The caught error or non-zero exit description on failure.
    pub error:   Option<String>,
    /// Number of compiler output lines forwarded.
    pub lines:   usize,
}

// ── Trigger affordance ────────────────────────────────────────────────────────

/// State of the "RUN VIDEO COMPILER" button across a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl TriggerState {
    pub fn label(self) -> &'static str {
        match self {
            TriggerState::Idle      => "RUN VIDEO COMPILER",
            TriggerState::Running   => "Compiling... Please Wait",
            TriggerState::Succeeded => "[OK] Compilation Complete! Click to Compile Again",
            TriggerState::Failed    => "[ERROR] Compilation Failed - Click to Try Again",
        }
    }

    pub fn is_enabled(self) -> bool {
        self != TriggerState::Running
    }

    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        if outcome.success { TriggerState::Succeeded } else { TriggerState::Failed }
    }
}

// ── Persisted tab state ───────────────────────────────────────────────────────

/// Fields of the Vid Compiler tab saved under `vid_compiler`.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilerSettings {
    pub trim_seconds:    String,
    pub music_selection: String,
    pub intro_selection: String,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            trim_seconds:    DEFAULT_TRIM.to_string(),
            music_selection: String::new(),
            intro_selection: String::new(),
        }
    }
}

impl CompilerSettings {
    pub fn from_tab(tab: &TabConfig) -> Self {
        let mut s = Self::default();
        if let Some(v) = tab.get("trim_seconds")    { s.trim_seconds    = v.clone(); }
        if let Some(v) = tab.get("music_selection") { s.music_selection = v.clone(); }
        if let Some(v) = tab.get("intro_selection") { s.intro_selection = v.clone(); }
        s
    }

    /// The section also mirrors the top-level paths, as the panel always has.
    pub fn to_tab(&self, input_path: &str, output_path: &str) -> TabConfig {
        let mut tab = TabConfig::new();
        tab.insert("input_path".into(),      input_path.to_string());
        tab.insert("output_path".into(),     output_path.to_string());
        tab.insert("trim_seconds".into(),    self.trim_seconds.clone());
        tab.insert("music_selection".into(), self.music_selection.clone());
        tab.insert("intro_selection".into(), self.intro_selection.clone());
        tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CompileParams {
        CompileParams {
            input_path:      PathBuf::from("/in"),
            output_path:     PathBuf::from("/out"),
            trim:            TrimSetting::parse("20"),
            music_selection: "theme".into(),
            intro_selection: "StockDefault".into(),
        }
    }

    #[test]
    fn trim_none_is_zero_seconds() {
        let t = TrimSetting::parse("None");
        assert_eq!(t, TrimSetting(None));
        assert_eq!(t.seconds(), 0);
        assert_eq!(t.as_label(), "None");
        assert_eq!(TrimSetting::default().seconds(), 15);
    }

    #[test]
    fn env_vars_cover_the_subprocess_contract() {
        let vars = params().env_vars();
        let names: Vec<_> = vars.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec![
            "GUI_MODE", "VIDEO_INPUT_PATH", "VIDEO_OUTPUT_PATH",
            "TRIM_SECONDS", "MUSIC_SELECTION", "INTRO_SELECTION",
        ]);
        assert_eq!(vars[0].1, "1");
        assert_eq!(vars[3].1, "20");
    }

    #[test]
    fn compiler_config_mirrors_params() {
        let cfg = params().compiler_config();
        assert_eq!(cfg.trim_seconds, 20);
        assert_eq!(cfg.clip_duration, 20.0);
        assert_eq!(cfg.video_folder, PathBuf::from("/in"));
        assert_eq!(cfg.output_folder, PathBuf::from("/out"));
        assert_eq!(cfg.music_selection, "theme");
    }

    #[test]
    fn settings_default_trim_and_mirror_paths() {
        let s = CompilerSettings::from_tab(&TabConfig::new());
        assert_eq!(s.trim_seconds, "15");
        let tab = s.to_tab("/in", "/out");
        assert_eq!(tab.get("input_path").map(String::as_str), Some("/in"));
        assert_eq!(tab.len(), 5);
    }

    #[test]
    fn trigger_follows_outcome() {
        let failed = RunOutcome { success: false, error: Some("boom".into()), lines: 1 };
        assert_eq!(TriggerState::from_outcome(&failed), TriggerState::Failed);
        assert!(TriggerState::Failed.label().contains("Try Again"));
        assert!(!TriggerState::Running.is_enabled());
    }
}
