// crates/autovid-core/src/commands.rs
//
// Every user action in the panel is expressed as a PanelCommand.
// Tabs emit these; app.rs processes them after the UI pass.
// Adding a new action = add a variant here + one match arm in app.rs.

use std::path::PathBuf;

use crate::clipper::ClipperPreset;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    AutoClipper,
    #[default]
    VidCompiler,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::AutoClipper => "Auto Clipper",
            Tab::VidCompiler => "Vid Compiler",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    // ── Navigation ───────────────────────────────────────────────────────────
    SelectTab(Tab),

    // ── Vid Compiler fields ──────────────────────────────────────────────────
    SetInputPath(PathBuf),
    SetOutputPath(PathBuf),
    SetTrim(String),
    SelectMusic(String),
    SelectIntro(String),

    // ── Vid Compiler actions ─────────────────────────────────────────────────
    RunCompiler,
    RefreshThumbnails,
    OpenLogs,
    OpenOutputFolder,
    OpenMusicFolder,
    OpenIntroFolder,

    // ── Auto Clipper ─────────────────────────────────────────────────────────
    SelectClipperPreset(ClipperPreset),
    /// The tab copies to the clipboard itself (it owns the egui context);
    /// this only records the outcome in the tab's status view.
    ClipperCodeCopied,
    ShowClipperInfo,
}
