// crates/autovid-ui/src/context.rs
//
// AppContext owns all runtime handles that are NOT part of PanelState.
// AutoVidApp holds one of these plus a PanelState, the ConfigStore and the
// two tab modules.
//
//   AppContext
//     ├── runner       compile worker slot + event channel
//     ├── watcher      Music / Intros polling, driven from update()
//     ├── thumbnails   decoded previews, memoized per absolute path
//     ├── textures     GPU handles for the decoded previews
//     └── refresh_due  delayed dropdown refreshes after "open folder"

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::debug;

use autovid_core::compile::{CompileEvent, RunOutcome};
use autovid_core::{FolderChange, FolderWatcher, PanelState, WatchedFolder};
use autovid_media::{locate_compiler, CompileRunner, FfmpegDecoder, ThumbnailCache};

use crate::modules::TextureCache;

/// Delay between opening Music/Intros in the file browser and re-reading it.
pub const OPEN_FOLDER_REFRESH_DELAY: Duration = Duration::from_secs(1);

pub struct AppContext {
    pub runner:   CompileRunner,
    pub watcher:  FolderWatcher,
    thumbnails:   ThumbnailCache<FfmpegDecoder>,
    pub textures: TextureCache,
    /// Paths whose decode failed since the last explicit refresh. Keeps the
    /// per-frame pump from retrying a broken file every frame.
    skipped:      HashSet<PathBuf>,
    refresh_due:  Vec<(Instant, WatchedFolder)>,
}

impl AppContext {
    pub fn new(app_dir: &Path, state: &PanelState) -> Self {
        Self {
            runner:      CompileRunner::new(locate_compiler(app_dir)),
            watcher:     FolderWatcher::new(&state.music_dir, &state.intros_dir),
            thumbnails:  ThumbnailCache::new(FfmpegDecoder),
            textures:    TextureCache::new(),
            skipped:     HashSet::new(),
            refresh_due: Vec::new(),
        }
    }

    // ── Compile events ───────────────────────────────────────────────────────

    /// Drain the runner channel into the status log. Returns the outcome when
    /// the run finished during this drain.
    pub fn ingest_compile_events(&mut self, state: &mut PanelState) -> Option<RunOutcome> {
        let mut finished = None;
        for event in self.runner.poll() {
            match event {
                CompileEvent::Log { level, text } => state.status.push(level, text),
                CompileEvent::Finished(outcome)   => finished = Some(outcome),
            }
        }
        finished
    }

    // ── Folder refresh scheduling ────────────────────────────────────────────

    pub fn schedule_refresh(&mut self, folder: WatchedFolder, now: Instant) {
        self.refresh_due.push((now + OPEN_FOLDER_REFRESH_DELAY, folder));
    }

    /// Watcher changes plus any delayed refreshes that came due.
    pub fn tick_folders(&mut self, state: &mut PanelState, now: Instant) {
        let changes: Vec<FolderChange> = self.watcher.tick(now);
        state.apply_folder_changes(&changes);

        let (due, pending): (Vec<_>, Vec<_>) = self.refresh_due
            .drain(..)
            .partition(|(at, _)| *at <= now);
        self.refresh_due = pending;
        for (_, folder) in due {
            state.refresh(folder);
        }
    }

    /// Earliest moment update() has timed work to do.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let delayed = self.refresh_due.iter()
            .map(|(at, _)| at.saturating_duration_since(now))
            .min();
        match (self.watcher.time_until_next_check(now), delayed) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b)             => a.or(b),
        }
    }

    // ── Thumbnails ───────────────────────────────────────────────────────────

    /// Forget skipped files so an explicit refresh retries them.
    pub fn retry_skipped_thumbnails(&mut self) {
        self.skipped.clear();
    }

    /// Decode at most one missing thumbnail per frame so a folder of large
    /// files never stalls the UI for more than a single decode.
    pub fn pump_thumbnails(&mut self, state: &PanelState, ctx: &egui::Context) {
        let next = state.visible_previews().iter()
            .find(|p| !self.textures.contains_key(&p.path) && !self.skipped.contains(&p.path));
        let Some(entry) = next else { return };

        match self.thumbnails.get_or_create(&entry.path) {
            Some(thumb) => {
                let tex = ctx.load_texture(
                    format!("thumb-{}", entry.path.display()),
                    egui::ColorImage::from_rgba_unmultiplied(
                        [thumb.width as usize, thumb.height as usize], &thumb.rgba,
                    ),
                    egui::TextureOptions::LINEAR,
                );
                self.textures.insert(entry.path.clone(), tex);
            }
            None => {
                debug!("[thumb] no preview for {}", entry.name);
                self.skipped.insert(entry.path.clone());
            }
        }
        ctx.request_repaint();
    }
}
