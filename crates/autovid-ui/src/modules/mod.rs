// crates/autovid-ui/src/modules/mod.rs
//
// Tab registry. To add a new tab:
//   1. Create modules/mytab.rs implementing PanelModule
//   2. Add `pub mod mytab;` below
//   3. Add a Tab variant in autovid-core and one field + match arm in app.rs

pub mod auto_clipper;
pub mod vid_compiler;

use std::collections::HashMap;
use std::path::PathBuf;

use autovid_core::commands::{PanelCommand, Tab};
use autovid_core::PanelState;
use egui::{TextureHandle, Ui};

/// GPU-resident preview thumbnails keyed by video path.
pub type TextureCache = HashMap<PathBuf, TextureHandle>;

/// Every tab implements this trait.
/// Modules read state and emit commands. They never mutate state directly.
pub trait PanelModule {
    fn tab(&self) -> Tab;
    fn ui(
        &mut self,
        ui:       &mut Ui,
        state:    &PanelState,
        textures: &TextureCache,
        cmd:      &mut Vec<PanelCommand>,
    );
}

/// Titled frame used for every section of both tabs.
pub(crate) fn section<R>(ui: &mut Ui, title: &str, add: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .fill(crate::theme::DARK_BG_2)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).strong().size(13.0).color(crate::theme::ACCENT_HOVER));
            ui.add_space(6.0);
            add(ui)
        })
        .inner
}
