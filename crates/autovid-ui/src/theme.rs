// crates/autovid-ui/src/theme.rs
use egui::{Color32, Context, Stroke, Style, Visuals};

use autovid_core::status::LogLevel;
use autovid_core::compile::TriggerState;

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb( 46, 139,  87);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb( 34, 100,  62);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb( 72, 170, 112);
pub const BUTTON:        Color32 = Color32::from_rgb( 34, 139,  34);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 30,  30,  30);
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 42,  42,  42);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 52,  52,  52);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 64,  64,  64);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 78,  78,  78);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(235, 235, 235);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(150, 150, 150);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 70,  70,  70);

pub const LOG_TEXT:      Color32 = Color32::from_rgb(  0, 255,   0);
pub const SUCCESS:       Color32 = Color32::from_rgb( 50, 205,  50);
pub const WARNING:       Color32 = Color32::from_rgb(218, 165,  32);
pub const ERROR:         Color32 = Color32::from_rgb(220,  20,  60);

pub fn level_color(level: LogLevel) -> Color32 {
    match level {
        LogLevel::Info    => LOG_TEXT,
        LogLevel::Success => SUCCESS,
        LogLevel::Warning => WARNING,
        LogLevel::Error   => ERROR,
    }
}

/// Fill of the RUN button for each trigger state.
pub fn trigger_color(state: TriggerState) -> Color32 {
    match state {
        TriggerState::Idle      => ACCENT,
        TriggerState::Running   => WARNING,
        TriggerState::Succeeded => SUCCESS,
        TriggerState::Failed    => ERROR,
    }
}

/// Dark sea-green look for both tabs. Applied once at startup; app.rs pins
/// the theme preference so an OS light/dark switch does not reset it.
pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();
    style.spacing.item_spacing     = egui::vec2(8.0, 6.0);
    style.spacing.window_margin    = egui::Margin::same(12);
    style.spacing.button_padding   = egui::vec2(12.0, 6.0);
    style.spacing.combo_width      = 160.0;
    style.spacing.scroll.bar_width = 10.0;

    let v = &mut style.visuals;
    *v = Visuals::dark();
    v.panel_fill       = DARK_BG_1;
    v.window_fill      = DARK_BG_2;
    v.faint_bg_color   = DARK_BG_0;
    v.extreme_bg_color = DARK_BG_0;
    v.code_bg_color    = DARK_BG_0;
    v.window_stroke    = Stroke::new(1.0, DARK_BORDER);
    v.hyperlink_color  = ACCENT_HOVER;
    v.selection.bg_fill = ACCENT;
    v.selection.stroke  = Stroke::new(1.0, Color32::WHITE);
    v.override_text_color = Some(DARK_TEXT);

    // (widget state, fill, border, text)
    let rounding = egui::CornerRadius::same(5);
    for (w, fill, border, text) in [
        (&mut v.widgets.noninteractive, DARK_BG_2, Stroke::new(1.0, DARK_BORDER), Stroke::new(1.0, DARK_TEXT_DIM)),
        (&mut v.widgets.inactive,       DARK_BG_3, Stroke::new(1.0, DARK_BORDER), Stroke::new(1.0, DARK_TEXT)),
        (&mut v.widgets.hovered,        DARK_BG_4, Stroke::new(1.0, ACCENT_DIM),  Stroke::new(1.5, ACCENT_HOVER)),
        (&mut v.widgets.active,         ACCENT_DIM, Stroke::new(1.0, ACCENT),     Stroke::new(2.0, Color32::WHITE)),
    ] {
        w.bg_fill       = fill;
        w.weak_bg_fill  = fill;
        w.bg_stroke     = border;
        w.fg_stroke     = text;
        w.corner_radius = rounding;
    }

    ctx.set_style(style);
}
