// crates/autovid-ui/src/modules/auto_clipper.rs
//
// Viewer for the Auto Clipper script snippets. Nothing here records or
// detects anything; the tab shows text and copies it to the clipboard.

use egui::{Color32, RichText, Ui};

use autovid_core::clipper::{ALL_PRESETS, INSTRUCTIONS};
use autovid_core::commands::{PanelCommand, Tab};
use autovid_core::PanelState;

use super::{section, PanelModule, TextureCache};
use crate::theme::{ACCENT, BUTTON, DARK_BG_0, DARK_TEXT_DIM, SUCCESS};

pub struct AutoClipperModule;

impl PanelModule for AutoClipperModule {
    fn tab(&self) -> Tab { Tab::AutoClipper }

    fn ui(&mut self, ui: &mut Ui, state: &PanelState, _textures: &TextureCache, cmd: &mut Vec<PanelCommand>) {
        section(ui, "Auto Clipper", |ui| {
            ui.label("Script templates that record a clip automatically when you get a kill.");
            ui.label(RichText::new(
                "Pick a configuration, copy the code, and run it in your game client's script editor.",
            ).color(DARK_TEXT_DIM));
        });

        ui.add_space(8.0);
        section(ui, "Choose Configuration", |ui| {
            for preset in ALL_PRESETS.iter().copied() {
                let selected = state.clipper.preset == preset;
                if ui.radio(selected, RichText::new(preset.label()).strong()).clicked() && !selected {
                    cmd.push(PanelCommand::SelectClipperPreset(preset));
                }
                ui.indent(preset.key(), |ui| {
                    ui.label(RichText::new(preset.description()).size(11.0).color(DARK_TEXT_DIM));
                });
            }
        });

        ui.add_space(8.0);
        let code = state.clipper.preset.code();
        section(ui, "Script Code", |ui| {
            egui::Frame::new()
                .fill(DARK_BG_0)
                .inner_margin(egui::Margin::same(6))
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("clipper_code")
                        .max_height(260.0)
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            let mut view = code;
                            ui.add(
                                egui::TextEdit::multiline(&mut view)
                                    .code_editor()
                                    .desired_width(f32::INFINITY),
                            );
                        });
                });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let copy = egui::Button::new(RichText::new("📋 Copy Code").strong().color(Color32::WHITE))
                    .fill(ACCENT)
                    .min_size(egui::vec2(0.0, 30.0));
                if ui.add(copy).clicked() {
                    ui.ctx().copy_text(code.to_string());
                    cmd.push(PanelCommand::ClipperCodeCopied);
                }

                if ui.add(
                    egui::Button::new(RichText::new("ℹ Learn More").color(Color32::WHITE))
                        .fill(BUTTON)
                        .min_size(egui::vec2(0.0, 30.0)),
                ).clicked() {
                    cmd.push(PanelCommand::ShowClipperInfo);
                }

                let switch = egui::Button::new(RichText::new("🎬 Switch to Vid Compiler").color(Color32::WHITE))
                    .fill(BUTTON)
                    .min_size(egui::vec2(0.0, 30.0));
                if ui.add(switch).clicked() {
                    cmd.push(PanelCommand::SelectTab(Tab::VidCompiler));
                }
            });

            if let Some(note) = &state.clipper_note {
                ui.label(RichText::new(note).color(SUCCESS));
            }
        });

        ui.add_space(8.0);
        section(ui, "Setup Notes & Tips", |ui| {
            for line in INSTRUCTIONS {
                ui.label(RichText::new(*line).monospace().size(11.0));
            }
        });
    }
}
