// crates/autovid-core/src/state.rs
//
// PanelState: everything the two tabs render from. Modules read it and emit
// PanelCommands; app.rs is the only writer.

use std::path::{Path, PathBuf};

use crate::assets::{
    available_intros, available_music, list_matching, preview_videos, reconcile_selection,
    AUDIO_EXTENSIONS, INTROS_DIR_NAME, MUSIC_DIR_NAME, OPTION_RANDOM, STOCK_INTRO,
    VIDEO_EXTENSIONS,
};
use crate::clipper::ClipperSettings;
use crate::commands::Tab;
use crate::compile::{CompileRequest, CompilerSettings, TriggerState};
use crate::config::{AppConfig, TabConfig, AUTO_CLIPPER_SECTION, VID_COMPILER_SECTION};
use crate::helpers::summary::FolderSummary;
use crate::status::StatusLog;
use crate::watcher::{FolderChange, WatchedFolder};

/// At most this many thumbnails are shown in the strip.
pub const MAX_PREVIEWS: usize = 20;

/// One entry of the thumbnail strip.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewEntry {
    pub name: String,
    pub path: PathBuf,
}

pub struct PanelState {
    pub tab:           Tab,
    pub input_path:    String,
    pub output_path:   String,
    pub compiler:      CompilerSettings,
    pub clipper:       ClipperSettings,
    pub music_dir:     PathBuf,
    pub intros_dir:    PathBuf,
    pub music_options: Vec<String>,
    pub intro_options: Vec<String>,
    /// Matching files on disk, for the summary box.
    pub music_count:   usize,
    pub intro_count:   usize,
    pub trigger:       TriggerState,
    /// Vid Compiler "Status & Information" log.
    pub status:        StatusLog,
    /// Shown under the Auto Clipper code view after a copy.
    pub clipper_note:  Option<String>,
    /// Sorted video files in the input folder. The strip shows the first
    /// MAX_PREVIEWS of these.
    pub previews:      Vec<PreviewEntry>,
}

impl PanelState {
    /// Build from the persisted document. Dropdowns are filled from disk
    /// immediately; saved selections that are no longer offered fall back.
    pub fn from_config(config: &AppConfig, app_dir: &Path) -> Self {
        let compiler = config.tab(VID_COMPILER_SECTION)
            .map(CompilerSettings::from_tab)
            .unwrap_or_default();
        let clipper = config.tab(AUTO_CLIPPER_SECTION)
            .map(ClipperSettings::from_tab)
            .unwrap_or_default();

        let mut state = Self {
            tab:           Tab::default(),
            input_path:    config.input_path.clone(),
            output_path:   config.output_path.clone(),
            compiler,
            clipper,
            music_dir:     app_dir.join(MUSIC_DIR_NAME),
            intros_dir:    app_dir.join(INTROS_DIR_NAME),
            music_options: Vec::new(),
            intro_options: Vec::new(),
            music_count:   0,
            intro_count:   0,
            trigger:       TriggerState::Idle,
            status:        StatusLog::default(),
            clipper_note:  None,
            previews:      Vec::new(),
        };
        state.music_options = available_music(&state.music_dir);
        state.intro_options = available_intros(&state.intros_dir);
        state.recount();
        state.compiler.music_selection = reconcile_selection(
            &state.compiler.music_selection, &state.music_options, OPTION_RANDOM);
        state.compiler.intro_selection = reconcile_selection(
            &state.compiler.intro_selection, &state.intro_options, STOCK_INTRO);
        state
    }

    // ── Dropdown refresh ──────────────────────────────────────────────────────

    pub fn refresh_music(&mut self) {
        self.music_options = available_music(&self.music_dir);
        self.recount();
        self.compiler.music_selection = reconcile_selection(
            &self.compiler.music_selection, &self.music_options, OPTION_RANDOM);
        self.status.success(format!("Music list refreshed - {} tracks", self.music_options.len()));
    }

    pub fn refresh_intros(&mut self) {
        self.intro_options = available_intros(&self.intros_dir);
        self.recount();
        self.compiler.intro_selection = reconcile_selection(
            &self.compiler.intro_selection, &self.intro_options, STOCK_INTRO);
        self.status.success(format!("Intro list refreshed - {} videos", self.intro_options.len()));
    }

    fn recount(&mut self) {
        self.music_count = count_matching(&self.music_dir, AUDIO_EXTENSIONS);
        self.intro_count = count_matching(&self.intros_dir, VIDEO_EXTENSIONS);
    }

    pub fn refresh(&mut self, folder: WatchedFolder) {
        match folder {
            WatchedFolder::Music  => self.refresh_music(),
            WatchedFolder::Intros => self.refresh_intros(),
        }
    }

    /// Watcher output: refresh the affected dropdown, then log the counts.
    pub fn apply_folder_changes(&mut self, changes: &[FolderChange]) {
        for change in changes {
            self.refresh(change.folder);
            for line in change.summary_lines() {
                self.status.info(line);
            }
        }
    }

    // ── Thumbnail strip ───────────────────────────────────────────────────────

    /// Re-list the input folder. A missing folder just empties the strip;
    /// an unreadable one also logs an error.
    pub fn refresh_previews(&mut self) {
        let dir = PathBuf::from(self.input_path.trim());
        self.previews.clear();
        if self.input_path.trim().is_empty() || !dir.is_dir() {
            return;
        }
        match preview_videos(&dir) {
            Ok(found) => {
                self.previews = found.into_iter()
                    .map(|(name, path)| PreviewEntry { name, path })
                    .collect();
            }
            Err(e) => self.status.error(format!("Could not read input folder: {e}")),
        }
    }

    pub fn visible_previews(&self) -> &[PreviewEntry] {
        &self.previews[..self.previews.len().min(MAX_PREVIEWS)]
    }

    /// Count of files beyond the visible strip, for the "...and N more" label.
    pub fn hidden_previews(&self) -> usize {
        self.previews.len().saturating_sub(MAX_PREVIEWS)
    }

    // ── Compile / persistence ─────────────────────────────────────────────────

    pub fn compile_request(&self) -> CompileRequest {
        CompileRequest {
            input_path:      self.input_path.clone(),
            output_path:     self.output_path.clone(),
            trim_seconds:    self.compiler.trim_seconds.clone(),
            music_selection: self.compiler.music_selection.clone(),
            intro_selection: self.compiler.intro_selection.clone(),
        }
    }

    pub fn compiler_tab(&self) -> TabConfig {
        self.compiler.to_tab(&self.input_path, &self.output_path)
    }

    pub fn clipper_tab(&self) -> TabConfig {
        self.clipper.to_tab()
    }

    /// The "FOLDER CONFIGURATION" text. Counts are as of the last refresh.
    pub fn summary(&self) -> String {
        FolderSummary {
            input_path:  &self.input_path,
            output_path: &self.output_path,
            music_dir:   &self.music_dir,
            music_count: self.music_count,
            intro_dir:   &self.intros_dir,
            intro_count: self.intro_count,
        }
        .render()
    }
}

fn count_matching(dir: &Path, extensions: &[&str]) -> usize {
    list_matching(dir, extensions).map(|v| v.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn app_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Music")).unwrap();
        fs::create_dir(dir.path().join("Intros")).unwrap();
        dir
    }

    fn config(input: &str) -> AppConfig {
        AppConfig { input_path: input.into(), output_path: "/out".into(), ..Default::default() }
    }

    #[test]
    fn stale_saved_selection_falls_back() {
        let dir = app_dir();
        let mut cfg = config("");
        cfg.vid_compiler.insert("music_selection".into(), "deleted_song".into());
        cfg.vid_compiler.insert("intro_selection".into(), "None".into());
        let state = PanelState::from_config(&cfg, dir.path());
        assert_eq!(state.compiler.music_selection, "None");
        assert_eq!(state.compiler.intro_selection, "None");
    }

    #[test]
    fn refresh_keeps_selection_still_offered() {
        let dir = app_dir();
        fs::write(dir.path().join("Music/theme.mp3"), b"").unwrap();
        let mut state = PanelState::from_config(&config(""), dir.path());
        state.compiler.music_selection = "theme".into();

        fs::write(dir.path().join("Music/boss.wav"), b"").unwrap();
        state.refresh_music();
        assert_eq!(state.compiler.music_selection, "theme");
        assert_eq!(state.music_options.len(), 4);
        assert_eq!(state.music_count, 2);
        assert!(state.summary().contains("(2 tracks)"));

        fs::remove_file(dir.path().join("Music/theme.mp3")).unwrap();
        state.refresh_music();
        assert_eq!(state.compiler.music_selection, "None");
        let last = state.status.lines().last().unwrap();
        assert!(last.text.ends_with("[OK] Music list refreshed - 3 tracks"));
    }

    #[test]
    fn folder_changes_refresh_then_log_counts() {
        let dir = app_dir();
        let mut state = PanelState::from_config(&config(""), dir.path());
        let change = FolderChange {
            folder:  WatchedFolder::Intros,
            added:   ["a.mp4".to_string()].into_iter().collect(),
            removed: Default::default(),
        };
        state.apply_folder_changes(&[change]);
        let texts: Vec<&str> = state.status.lines().map(|l| &l.text[11..]).collect();
        assert_eq!(texts, vec!["[OK] Intro list refreshed - 2 videos", "[+] Added 1 intro video(s)"]);
    }

    #[test]
    fn previews_are_sorted_and_capped() {
        let dir   = app_dir();
        let input = dir.path().join("clips");
        fs::create_dir(&input).unwrap();
        for i in 0..25 {
            fs::write(input.join(format!("clip{i:02}.mp4")), b"").unwrap();
        }
        fs::write(input.join("notes.txt"), b"").unwrap();

        let mut state = PanelState::from_config(&config(&input.display().to_string()), dir.path());
        state.refresh_previews();
        assert_eq!(state.previews.len(), 25);
        assert_eq!(state.visible_previews().len(), MAX_PREVIEWS);
        assert_eq!(state.hidden_previews(), 5);
        assert_eq!(state.previews[0].name, "clip00.mp4");
    }

    #[test]
    fn missing_input_folder_empties_strip_quietly() {
        let dir = app_dir();
        let mut state = PanelState::from_config(&config("/no/such/folder"), dir.path());
        state.refresh_previews();
        assert!(state.previews.is_empty());
        assert!(state.status.is_empty());
    }

    #[test]
    fn request_carries_current_fields() {
        let dir = app_dir();
        let mut state = PanelState::from_config(&config("/in"), dir.path());
        state.compiler.trim_seconds = "30".into();
        let req = state.compile_request();
        assert_eq!(req.input_path, "/in");
        assert_eq!(req.trim_seconds, "30");
        assert_eq!(state.compiler_tab().get("output_path").map(String::as_str), Some("/out"));
    }
}
