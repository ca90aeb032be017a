// crates/autovid-ui/src/modules/vid_compiler.rs
//
// The Vid Compiler tab, top to bottom:
//   folder rows → trim / music / intro → RUN → secondary buttons
//   → status log → folder summary → thumbnail strip
//
// Path fields are editable; the typed value is committed when the field
// loses focus. Everything else goes straight out as a PanelCommand.

use std::path::PathBuf;

use egui::{Align, Color32, Layout, RichText, Ui};
use rfd::FileDialog;

use autovid_core::assets::TRIM_OPTIONS;
use autovid_core::commands::{PanelCommand, Tab};
use autovid_core::helpers::format::{count_label, short_label};
use autovid_core::PanelState;
use autovid_media::thumbnail::THUMB_BOX;

use super::{section, PanelModule, TextureCache};
use crate::theme::{self, BUTTON, DARK_BG_0, DARK_BG_3, DARK_TEXT_DIM};

const LOG_HEIGHT: f32 = 220.0;

#[derive(Default)]
pub struct VidCompilerModule {
    input_buf:  String,
    output_buf: String,
}

impl PanelModule for VidCompilerModule {
    fn tab(&self) -> Tab { Tab::VidCompiler }

    fn ui(&mut self, ui: &mut Ui, state: &PanelState, textures: &TextureCache, cmd: &mut Vec<PanelCommand>) {
        section(ui, "Folder Configuration", |ui| {
            egui::Grid::new("vid_paths")
                .num_columns(3)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    path_row(ui, "[INPUT] Input Folder:", "Select Input Folder (Video Clips)",
                        &mut self.input_buf, &state.input_path, cmd, PanelCommand::SetInputPath);
                    ui.end_row();
                    path_row(ui, "[OUTPUT] Output Folder:", "Select Output Folder",
                        &mut self.output_buf, &state.output_path, cmd, PanelCommand::SetOutputPath);
                    ui.end_row();
                });
        });

        ui.add_space(8.0);
        options_row(ui, state, cmd);
        ui.add_space(8.0);

        // ── Main action ──────────────────────────────────────────────────────
        let trigger = state.trigger;
        let run_btn = egui::Button::new(
            RichText::new(trigger.label()).strong().size(16.0).color(Color32::WHITE),
        )
        .fill(theme::trigger_color(trigger))
        .min_size(egui::vec2(ui.available_width(), 48.0));
        if ui.add_enabled(trigger.is_enabled(), run_btn).clicked() {
            cmd.push(PanelCommand::RunCompiler);
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            for (label, action) in [
                ("📄 View Logs",     PanelCommand::OpenLogs),
                ("📁 Output Folder", PanelCommand::OpenOutputFolder),
                ("🎬 Intro Videos",  PanelCommand::OpenIntroFolder),
                ("🎵 Music Folder",  PanelCommand::OpenMusicFolder),
            ] {
                if ui.add(secondary_btn(label)).clicked() {
                    cmd.push(action);
                }
            }
        });

        ui.add_space(8.0);
        section(ui, "Status & Information", |ui| status_view(ui, state));

        ui.add_space(8.0);
        section(ui, "Current Configuration", |ui| {
            ui.label(RichText::new(state.summary()).monospace().size(11.0));
        });

        ui.add_space(8.0);
        section(ui, "Video Preview", |ui| thumbnail_strip(ui, state, textures, cmd));
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

fn path_row(
    ui:      &mut Ui,
    label:   &str,
    title:   &str,
    buf:     &mut String,
    current: &str,
    cmd:     &mut Vec<PanelCommand>,
    make:    fn(PathBuf) -> PanelCommand,
) {
    ui.label(RichText::new(label).strong());

    let edit = egui::TextEdit::singleline(buf).desired_width(ui.available_width() - 90.0);
    let resp = ui.add(edit);
    if !resp.has_focus() && !resp.lost_focus() {
        // Follow the store while the user is not typing.
        if buf.as_str() != current {
            *buf = current.to_string();
        }
    }
    if resp.lost_focus() && buf.trim() != current {
        cmd.push(make(PathBuf::from(buf.trim())));
    }

    if ui.add(secondary_btn("Browse")).clicked() {
        let mut dialog = FileDialog::new().set_title(title);
        if !current.trim().is_empty() {
            dialog = dialog.set_directory(current.trim());
        }
        if let Some(dir) = dialog.pick_folder() {
            *buf = dir.display().to_string();
            cmd.push(make(dir));
        }
    }
}

fn options_row(ui: &mut Ui, state: &PanelState, cmd: &mut Vec<PanelCommand>) {
    let trim_opts: Vec<String> = TRIM_OPTIONS.iter().map(|s| s.to_string()).collect();
    ui.columns(3, |cols| {
        dropdown(&mut cols[0], "[TIME] Trim End:", "trim_combo",
            &state.compiler.trim_seconds, &trim_opts, cmd, PanelCommand::SetTrim);
        dropdown(&mut cols[1], "[MUSIC] Music:", "music_combo",
            &state.compiler.music_selection, &state.music_options, cmd, PanelCommand::SelectMusic);
        dropdown(&mut cols[2], "Intro:", "intro_combo",
            &state.compiler.intro_selection, &state.intro_options, cmd, PanelCommand::SelectIntro);
    });
}

fn dropdown(
    ui:       &mut Ui,
    label:    &str,
    id:       &str,
    current:  &str,
    options:  &[String],
    cmd:      &mut Vec<PanelCommand>,
    make:     fn(String) -> PanelCommand,
) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(current)
        .show_ui(ui, |ui| {
            for opt in options {
                if ui.selectable_label(opt == current, opt.as_str()).clicked() && opt != current {
                    cmd.push(make(opt.clone()));
                }
            }
        });
}

// ── Status log ────────────────────────────────────────────────────────────────

fn status_view(ui: &mut Ui, state: &PanelState) {
    egui::Frame::new()
        .fill(DARK_BG_0)
        .inner_margin(egui::Margin::same(6))
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("status_log")
                .max_height(LOG_HEIGHT)
                .min_scrolled_height(LOG_HEIGHT)
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for line in state.status.lines() {
                        ui.label(
                            RichText::new(&line.text)
                                .monospace()
                                .size(11.0)
                                .color(theme::level_color(line.level)),
                        );
                    }
                });
        });
}

// ── Thumbnails ────────────────────────────────────────────────────────────────

fn thumbnail_strip(ui: &mut Ui, state: &PanelState, textures: &TextureCache, cmd: &mut Vec<PanelCommand>) {
    ui.horizontal(|ui| {
        ui.label("Videos in Input Folder:");
        ui.label(RichText::new(count_label(state.previews.len(), "video")).color(DARK_TEXT_DIM));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.add(secondary_btn("🔄 Refresh")).clicked() {
                cmd.push(PanelCommand::RefreshThumbnails);
            }
        });
    });
    ui.add_space(4.0);

    if state.previews.is_empty() {
        ui.label(RichText::new("No videos found in input folder").italics().color(DARK_TEXT_DIM));
        return;
    }

    let (box_w, box_h) = (THUMB_BOX.0 as f32, THUMB_BOX.1 as f32);
    egui::ScrollArea::horizontal()
        .id_salt("thumb_strip")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for entry in state.visible_previews() {
                    ui.vertical(|ui| {
                        ui.set_width(box_w);
                        match textures.get(&entry.path) {
                            Some(tex) => {
                                let size = tex.size_vec2();
                                ui.add(egui::Image::new((tex.id(), size)));
                            }
                            None => {
                                let (rect, _) = ui.allocate_exact_size(
                                    egui::vec2(box_w, box_h), egui::Sense::hover());
                                ui.painter().rect_filled(rect, 4.0, DARK_BG_3);
                                ui.painter().text(
                                    rect.center(), egui::Align2::CENTER_CENTER, "🎬",
                                    egui::FontId::proportional(24.0), DARK_TEXT_DIM,
                                );
                            }
                        }
                        ui.label(RichText::new(short_label(&entry.name)).size(10.0))
                            .on_hover_text(entry.name.as_str());
                    });
                }
                let hidden = state.hidden_previews();
                if hidden > 0 {
                    ui.label(RichText::new(format!("...and {hidden} more")).color(DARK_TEXT_DIM));
                }
            });
        });
}

fn secondary_btn(label: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(label.to_string()).size(12.0).color(Color32::WHITE))
        .fill(BUTTON)
        .min_size(egui::vec2(0.0, 26.0))
}
