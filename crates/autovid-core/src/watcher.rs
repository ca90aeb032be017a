// crates/autovid-core/src/watcher.rs
//
// Polling folder watcher for the Music and Intros directories.
//
// No filesystem-event API: every CHECK_INTERVAL the current file-name set of
// each directory is compared with the previous one. The watcher has no
// thread of its own. The UI calls `tick(now)` once per frame and asks egui to
// repaint after `time_until_next_check`, so checks run on the UI loop and are
// strictly serialized.
//
// Lifecycle:
//   start()  → baseline captured, first check scheduled
//   tick()   → check() when due, then reschedule while active
//   stop()   → active cleared; a due check becomes a no-op

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::assets::{file_name_set, AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};

/// Fixed polling period. Not user-configurable.
pub const CHECK_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WatchedFolder {
    Music,
    Intros,
}

impl WatchedFolder {
    /// Noun used in the "[+] Added N …" summary lines.
    fn noun(self) -> &'static str {
        match self {
            WatchedFolder::Music  => "music file(s)",
            WatchedFolder::Intros => "intro video(s)",
        }
    }
}

/// One directory's delta between two consecutive polls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderChange {
    pub folder:  WatchedFolder,
    pub added:   BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

impl FolderChange {
    /// One summary line per non-empty side, added first.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if !self.added.is_empty() {
            lines.push(format!("[+] Added {} {}", self.added.len(), self.folder.noun()));
        }
        if !self.removed.is_empty() {
            lines.push(format!("[-] Removed {} {}", self.removed.len(), self.folder.noun()));
        }
        lines
    }
}

/// `(curr − prev, prev − curr)`. Sorted so change reports are deterministic.
pub fn diff_snapshots(
    prev: &HashSet<String>,
    curr: &HashSet<String>,
) -> (BTreeSet<String>, BTreeSet<String>) {
    let added   = curr.difference(prev).cloned().collect();
    let removed = prev.difference(curr).cloned().collect();
    (added, removed)
}

struct WatchedDir {
    folder:     WatchedFolder,
    path:       PathBuf,
    extensions: &'static [&'static str],
    last:       HashSet<String>,
}

impl WatchedDir {
    fn snapshot(&self) -> HashSet<String> {
        file_name_set(&self.path, self.extensions)
    }

    /// Diff against the stored baseline, then replace the baseline
    /// unconditionally.
    fn poll(&mut self) -> Option<FolderChange> {
        let current          = self.snapshot();
        let (added, removed) = diff_snapshots(&self.last, &current);
        self.last = current;
        if added.is_empty() && removed.is_empty() {
            return None;
        }
        Some(FolderChange { folder: self.folder, added, removed })
    }
}

pub struct FolderWatcher {
    dirs:       [WatchedDir; 2],
    active:     bool,
    next_check: Option<Instant>,
    interval:   Duration,
}

impl FolderWatcher {
    pub fn new(music_dir: impl Into<PathBuf>, intros_dir: impl Into<PathBuf>) -> Self {
        Self {
            dirs: [
                WatchedDir {
                    folder:     WatchedFolder::Music,
                    path:       music_dir.into(),
                    extensions: AUDIO_EXTENSIONS,
                    last:       HashSet::new(),
                },
                WatchedDir {
                    folder:     WatchedFolder::Intros,
                    path:       intros_dir.into(),
                    extensions: VIDEO_EXTENSIONS,
                    last:       HashSet::new(),
                },
            ],
            active:     false,
            next_check: None,
            interval:   CHECK_INTERVAL,
        }
    }

    pub fn path(&self, folder: WatchedFolder) -> &Path {
        &self.dir(folder).path
    }

    fn dir(&self, folder: WatchedFolder) -> &WatchedDir {
        match folder {
            WatchedFolder::Music  => &self.dirs[0],
            WatchedFolder::Intros => &self.dirs[1],
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Capture both baselines and schedule the first check.
    pub fn start(&mut self, now: Instant) {
        for dir in &mut self.dirs {
            dir.last = dir.snapshot();
        }
        self.active     = true;
        self.next_check = Some(now);
        debug!("[watch] monitoring {} and {}",
            self.dirs[0].path.display(), self.dirs[1].path.display());
    }

    pub fn stop(&mut self) {
        self.active     = false;
        self.next_check = None;
    }

    /// Run one check right now. Inactive watchers do nothing and do not
    /// reschedule.
    pub fn check(&mut self, now: Instant) -> Vec<FolderChange> {
        if !self.active {
            return Vec::new();
        }
        let changes: Vec<FolderChange> = self.dirs.iter_mut()
            .filter_map(WatchedDir::poll)
            .collect();
        for c in &changes {
            debug!("[watch] {:?}: +{} -{}", c.folder, c.added.len(), c.removed.len());
        }
        self.next_check = Some(now + self.interval);
        changes
    }

    /// Per-frame driver: checks only when the scheduled time has come.
    pub fn tick(&mut self, now: Instant) -> Vec<FolderChange> {
        match self.next_check {
            Some(due) if self.active && now >= due => self.check(now),
            _ => Vec::new(),
        }
    }

    /// Time left before the next scheduled check, `None` when stopped.
    pub fn time_until_next_check(&self, now: Instant) -> Option<Duration> {
        if !self.active {
            return None;
        }
        self.next_check.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diff_is_plain_set_difference() {
        let prev = set(&["a.mp3", "b.mp3"]);
        let curr = set(&["b.mp3", "c.mp3"]);
        let (added, removed) = diff_snapshots(&prev, &curr);
        assert_eq!(added.into_iter().collect::<Vec<_>>(), vec!["c.mp3"]);
        assert_eq!(removed.into_iter().collect::<Vec<_>>(), vec!["a.mp3"]);
    }

    #[test]
    fn identical_snapshots_produce_nothing() {
        let s = set(&["x.wav"]);
        let (added, removed) = diff_snapshots(&s, &s);
        assert!(added.is_empty() && removed.is_empty());
    }

    #[test]
    fn summary_lines_use_folder_noun() {
        let change = FolderChange {
            folder:  WatchedFolder::Intros,
            added:   ["a.mp4".to_string(), "b.mp4".to_string()].into_iter().collect(),
            removed: ["c.mp4".to_string()].into_iter().collect(),
        };
        assert_eq!(change.summary_lines(), vec![
            "[+] Added 2 intro video(s)".to_string(),
            "[-] Removed 1 intro video(s)".to_string(),
        ]);
    }

    #[test]
    fn path_reports_each_watched_folder() {
        let w = FolderWatcher::new("/app/Music", "/app/Intros");
        assert_eq!(w.path(WatchedFolder::Music), Path::new("/app/Music"));
        assert_eq!(w.path(WatchedFolder::Intros), Path::new("/app/Intros"));
    }

    #[test]
    fn stopped_watcher_does_not_reschedule() {
        let now = Instant::now();
        let mut w = FolderWatcher::new("/no/such/Music", "/no/such/Intros");
        w.start(now);
        assert_eq!(w.time_until_next_check(now), Some(Duration::ZERO));
        w.stop();
        assert!(w.tick(now + CHECK_INTERVAL).is_empty());
        assert!(w.check(now).is_empty());
        assert_eq!(w.time_until_next_check(now), None);
    }

    #[test]
    fn tick_waits_for_interval() {
        let now = Instant::now();
        let mut w = FolderWatcher::new("/no/such/Music", "/no/such/Intros");
        w.start(now);
        w.tick(now);
        assert_eq!(w.time_until_next_check(now), Some(CHECK_INTERVAL));
        w.tick(now + Duration::from_millis(100));
        assert_eq!(
            w.time_until_next_check(now + Duration::from_millis(100)),
            Some(CHECK_INTERVAL - Duration::from_millis(100)),
        );
    }
}
