// crates/autovid-core/src/clipper.rs
//
// Auto Clipper tab data. The tab is a viewer only: it shows a script snippet
// for an external game-client scripting environment and lets the user copy
// it. No detection, recording or processing happens in this application.
//
// The snippets below are placeholders. The real templates ship separately.

use crate::config::TabConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClipperPreset {
    #[default]
    Basic,
    Webhook,
    Full,
}

pub const ALL_PRESETS: &[ClipperPreset] = &[
    ClipperPreset::Basic,
    ClipperPreset::Webhook,
    ClipperPreset::Full,
];

impl ClipperPreset {
    /// Value stored under `config_selection`.
    pub fn key(self) -> &'static str {
        match self {
            ClipperPreset::Basic   => "basic",
            ClipperPreset::Webhook => "webhook",
            ClipperPreset::Full    => "full",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_PRESETS.iter().copied().find(|p| p.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            ClipperPreset::Basic   => "🎯 Basic - Simple Kill Recording",
            ClipperPreset::Webhook => "🔔 With Discord Webhook",
            ClipperPreset::Full    => "📊 With Player Data & Webhook",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ClipperPreset::Basic   => "Records kills only, no extra features",
            ClipperPreset::Webhook => "Basic recording + Discord notifications",
            ClipperPreset::Full    => "Full tracking with stats and Discord notifications",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ClipperPreset::Basic => BASIC_SNIPPET,
            ClipperPreset::Webhook => WEBHOOK_SNIPPET,
            ClipperPreset::Full => FULL_SNIPPET,
        }
    }
}

const BASIC_SNIPPET: &str = "\
// Auto Clipper - BASIC CONFIGURATION
// Placeholder template: records a clip whenever a kill is detected.
var CLIP_SECONDS = 15;

function OnKill() {
    StartRecording(CLIP_SECONDS);
}
";

const WEBHOOK_SNIPPET: &str = "\
// Auto Clipper - WEBHOOK CONFIGURATION
// Placeholder template: basic recording plus a Discord notification.
var CLIP_SECONDS = 15;
var WEBHOOK_URL  = \"\"; // paste your Discord webhook URL here

function OnKill() {
    StartRecording(CLIP_SECONDS);
    Notify(WEBHOOK_URL, \"Clip recorded\");
}
";

const FULL_SNIPPET: &str = "\
// Auto Clipper - FULL CONFIGURATION
// Placeholder template: player stats tracking, recording and notifications.
var CLIP_SECONDS = 15;
var WEBHOOK_URL  = \"\"; // paste your Discord webhook URL here
var PLAYER_NAME  = \"\"; // your character name

function OnKill(victim) {
    RecordStat(PLAYER_NAME, victim);
    StartRecording(CLIP_SECONDS);
    Notify(WEBHOOK_URL, PLAYER_NAME + \" defeated \" + victim);
}
";

/// Step-by-step usage text shown under the code view.
pub const INSTRUCTIONS: &[&str] = &[
    "1. SELECT a configuration option above (Basic, Webhook, or Full)",
    "2. COPY the code with the Copy Code button",
    "3. PASTE it into a new script in your game client's script editor",
    "4. CONFIGURE these variables in the code:",
    "     • CLIP_SECONDS - how long each clip records",
    "     • WEBHOOK_URL  - Discord webhook (Webhook / Full only)",
    "     • PLAYER_NAME  - your character (Full only)",
    "5. RUN the script; it will:",
    "     • Start recording for the configured duration",
    "     • Send notifications to Discord (if configured)",
    "6. COMPILE the recorded clips from the Vid Compiler tab",
];

/// Title and body of the "Learn More" dialog.
pub const MORE_INFO_TITLE: &str = "Auto Clipper - More Information";
pub const MORE_INFO: &str = "\
Auto Clipper - Coming Soon

How Auto Clipper will work:

1. AUTOMATIC DETECTION
   Finds exciting moments in gameplay videos: kills, deaths and multi-kills.

2. SMART TIMING
   Each clip keeps a few seconds before and after the event for context.

3. BATCH PROCESSING
   Processes a whole session of videos at once for a highlight reel.

4. PREVIEW & EDIT
   Review detected clips before saving; accept, reject or retime each one.

5. EXPORT OPTIONS
   Save clips individually or compile them into one highlight video.

Technical approach:
  - Audio analysis for combat sounds and kill notifications
  - Visual recognition of on-screen indicators
  - Frame difference analysis for significant events

Until then, use the scripts above to record clips and compile them
from the Vid Compiler tab.";

// ── Persisted tab state ───────────────────────────────────────────────────────

/// Fields of the Auto Clipper tab saved under `auto_clipper`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipperSettings {
    pub preset:        ClipperPreset,
    pub input_path:    String,
    pub output_path:   String,
    pub sensitivity:   String,
    pub clip_duration: String,
}

impl Default for ClipperSettings {
    fn default() -> Self {
        Self {
            preset:        ClipperPreset::Basic,
            input_path:    String::new(),
            output_path:   String::new(),
            sensitivity:   "Medium".into(),
            clip_duration: "15".into(),
        }
    }
}

impl ClipperSettings {
    /// Missing or unknown keys keep their defaults.
    pub fn from_tab(tab: &TabConfig) -> Self {
        let mut s = Self::default();
        if let Some(p) = tab.get("config_selection").and_then(|k| ClipperPreset::from_key(k)) {
            s.preset = p;
        }
        if let Some(v) = tab.get("input_path")    { s.input_path    = v.clone(); }
        if let Some(v) = tab.get("output_path")   { s.output_path   = v.clone(); }
        if let Some(v) = tab.get("sensitivity")   { s.sensitivity   = v.clone(); }
        if let Some(v) = tab.get("clip_duration") { s.clip_duration = v.clone(); }
        s
    }

    pub fn to_tab(&self) -> TabConfig {
        let mut tab = TabConfig::new();
        tab.insert("config_selection".into(), self.preset.key().into());
        tab.insert("input_path".into(),       self.input_path.clone());
        tab.insert("output_path".into(),      self.output_path.clone());
        tab.insert("sensitivity".into(),      self.sensitivity.clone());
        tab.insert("clip_duration".into(),    self.clip_duration.clone());
        tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_keys_round_trip() {
        for p in ALL_PRESETS {
            assert_eq!(ClipperPreset::from_key(p.key()), Some(*p));
        }
        assert_eq!(ClipperPreset::from_key("fancy"), None);
    }

    #[test]
    fn settings_tolerate_unknown_selection() {
        let mut tab = TabConfig::new();
        tab.insert("config_selection".into(), "fancy".into());
        tab.insert("sensitivity".into(), "High".into());
        let s = ClipperSettings::from_tab(&tab);
        assert_eq!(s.preset, ClipperPreset::Basic);
        assert_eq!(s.sensitivity, "High");
        assert_eq!(s.clip_duration, "15");
    }

    #[test]
    fn every_snippet_names_its_configuration() {
        assert!(ClipperPreset::Basic.code().contains("BASIC"));
        assert!(ClipperPreset::Webhook.code().contains("WEBHOOK"));
        assert!(ClipperPreset::Full.code().contains("FULL"));
    }

    #[test]
    fn more_info_lists_every_planned_feature() {
        for heading in [
            "AUTOMATIC DETECTION", "SMART TIMING", "BATCH PROCESSING",
            "PREVIEW & EDIT", "EXPORT OPTIONS",
        ] {
            assert!(MORE_INFO.contains(heading), "missing {heading}");
        }
        assert!(MORE_INFO.starts_with("Auto Clipper - Coming Soon"));
    }
}
