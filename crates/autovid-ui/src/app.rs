// src/app.rs (autovid-ui)
use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{info, warn};

use autovid_core::clipper::{MORE_INFO, MORE_INFO_TITLE};
use autovid_core::commands::{PanelCommand, Tab};
use autovid_core::compile::TriggerState;
use autovid_core::config::{AUTO_CLIPPER_SECTION, VID_COMPILER_SECTION};
use autovid_core::{ConfigStore, PanelState, WatchedFolder};
use autovid_media::RunError;

use crate::context::AppContext;
use crate::helpers::{dialog, open::open_folder};
use crate::modules::{
    PanelModule,
    auto_clipper::AutoClipperModule,
    vid_compiler::VidCompilerModule,
};
use crate::paths;
use crate::theme::{configure_style, ACCENT, ACCENT_HOVER, DARK_BG_0, DARK_TEXT_DIM};
use crate::{APP_SUBTITLE, APP_TITLE, APP_VERSION};

/// Poll cadence for the compile channel while a run is outstanding.
const RUN_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ── App ───────────────────────────────────────────────────────────────────────

pub struct AutoVidApp {
    app_dir:      PathBuf,
    store:        ConfigStore,
    state:        PanelState,
    context:      AppContext,
    auto_clipper: AutoClipperModule,
    vid_compiler: VidCompilerModule,
    /// Commands emitted by modules each frame, processed after the UI pass
    pending_cmds: Vec<PanelCommand>,
}

impl AutoVidApp {
    pub fn new(cc: &eframe::CreationContext<'_>, app_dir: PathBuf) -> Self {
        configure_style(&cc.egui_ctx);
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let store = ConfigStore::load(paths::config_path(&app_dir));
        // First run: write the defaults so the file exists from now on.
        if !store.path().exists() {
            store.save_logged();
        }

        let mut state = PanelState::from_config(store.config(), &app_dir);
        let mut context = AppContext::new(&app_dir, &state);

        state.status.info(format!("{APP_TITLE} v{APP_VERSION} ready"));
        state.status.info(format!("Compiler: {}", context.runner.compiler_description()));
        state.refresh_previews();
        context.watcher.start(Instant::now());
        info!("[app] config {}, app dir {}", store.path().display(), app_dir.display());

        Self {
            app_dir,
            store,
            state,
            context,
            auto_clipper: AutoClipperModule,
            vid_compiler: VidCompilerModule::default(),
            pending_cmds: Vec::new(),
        }
    }

    fn save_compiler_tab(&mut self) {
        self.store.save_tab(VID_COMPILER_SECTION, self.state.compiler_tab());
    }

    fn save_clipper_tab(&mut self) {
        self.store.save_tab(AUTO_CLIPPER_SECTION, self.state.clipper_tab());
    }

    fn process_command(&mut self, cmd: PanelCommand) {
        match cmd {
            // ── Navigation ───────────────────────────────────────────────────
            PanelCommand::SelectTab(tab) => {
                self.state.tab = tab;
            }

            // ── Vid Compiler fields ──────────────────────────────────────────
            PanelCommand::SetInputPath(path) => {
                self.state.input_path = path.display().to_string();
                self.store.set_input_path(self.state.input_path.clone());
                self.save_compiler_tab();
                self.state.refresh_previews();
            }
            PanelCommand::SetOutputPath(path) => {
                self.state.output_path = path.display().to_string();
                self.store.set_output_path(self.state.output_path.clone());
                self.save_compiler_tab();
            }
            PanelCommand::SetTrim(v) => {
                self.state.compiler.trim_seconds = v;
                self.save_compiler_tab();
            }
            PanelCommand::SelectMusic(v) => {
                self.state.compiler.music_selection = v;
                self.save_compiler_tab();
            }
            PanelCommand::SelectIntro(v) => {
                self.state.compiler.intro_selection = v;
                self.save_compiler_tab();
            }

            // ── Vid Compiler actions ─────────────────────────────────────────
            PanelCommand::RunCompiler => self.start_run(),
            PanelCommand::RefreshThumbnails => {
                self.context.retry_skipped_thumbnails();
                self.state.refresh_previews();
            }
            PanelCommand::OpenLogs => {
                let logs = paths::logs_dir(&self.app_dir);
                if logs.is_dir() {
                    open_or_report(&logs, "logs directory");
                } else {
                    dialog::info("Info", "No logs directory found yet.");
                }
            }
            PanelCommand::OpenOutputFolder => {
                let out = PathBuf::from(self.state.output_path.trim());
                if !self.state.output_path.trim().is_empty() && out.is_dir() {
                    open_or_report(&out, "output folder");
                } else {
                    dialog::warning("Warning", "Output folder not set or does not exist.");
                }
            }
            PanelCommand::OpenMusicFolder => {
                self.open_asset_folder(WatchedFolder::Music);
            }
            PanelCommand::OpenIntroFolder => {
                self.open_asset_folder(WatchedFolder::Intros);
            }

            // ── Auto Clipper ─────────────────────────────────────────────────
            PanelCommand::SelectClipperPreset(preset) => {
                self.state.clipper.preset = preset;
                self.state.clipper_note   = None;
                self.save_clipper_tab();
            }
            PanelCommand::ShowClipperInfo => {
                dialog::info(MORE_INFO_TITLE, MORE_INFO);
            }
            PanelCommand::ClipperCodeCopied => {
                info!("[clipper] copied {} snippet", self.state.clipper.preset.key());
                self.state.clipper_note = Some(
                    "[OK] Code copied to clipboard. Paste it into your script editor.".into(),
                );
            }
        }
    }

    fn start_run(&mut self) {
        // The run is a mutation of the tab's fields; persist them first.
        self.save_compiler_tab();

        match self.context.runner.run(&self.state.compile_request()) {
            Ok(dispatched) => {
                // Banner lines are already queued on the channel and land
                // after this clear.
                self.state.status.clear();
                self.state.trigger = TriggerState::Running;
                info!("[app] compile dispatched: {:?}", dispatched.params);
            }
            Err(RunError::Busy) => {
                self.state.status.warning("A compilation is already running");
            }
            Err(e) => {
                self.state.status.error(e.to_string());
                dialog::error(e.dialog_title(), &e.to_string());
            }
        }
    }

    fn open_asset_folder(&mut self, folder: WatchedFolder) {
        let dir  = self.context.watcher.path(folder).to_path_buf();
        let noun = match folder {
            WatchedFolder::Music  => "music folder",
            WatchedFolder::Intros => "intro folder",
        };
        if !dir.is_dir() {
            let label = match folder {
                WatchedFolder::Music  => "Music folder not found.",
                WatchedFolder::Intros => "Intro folder not found.",
            };
            dialog::warning("Warning", label);
            return;
        }
        if open_or_report(&dir, noun) {
            self.context.schedule_refresh(folder, Instant::now());
        }
    }

    fn poll_background(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.context.tick_folders(&mut self.state, now);

        if let Some(outcome) = self.context.ingest_compile_events(&mut self.state) {
            self.state.trigger = TriggerState::from_outcome(&outcome);
            if outcome.success {
                self.state.status.success("Video compilation completed!");
                dialog::info("Success!", "Video compilation completed!\n\nYour compiled video is ready.");
            } else {
                self.state.status.error("Compilation failed");
                dialog::error("Compilation Failed", "Compilation failed\n\nCheck the status log for details.");
            }
        }

        self.context.pump_thumbnails(&self.state, ctx);

        if self.context.runner.is_running() {
            ctx.request_repaint_after(RUN_POLL_INTERVAL);
        } else if let Some(wait) = self.context.next_wakeup(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.label(egui::RichText::new(APP_TITLE).strong().size(20.0).color(ACCENT));
        ui.label(egui::RichText::new(APP_SUBTITLE).size(11.0).color(DARK_TEXT_DIM));
        ui.label(egui::RichText::new(format!("v{APP_VERSION}")).size(10.0).color(DARK_TEXT_DIM));
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            for tab in [Tab::AutoClipper, Tab::VidCompiler] {
                let selected = self.state.tab == tab;
                let text = egui::RichText::new(tab.title()).strong().size(13.0);
                let text = if selected { text.color(ACCENT_HOVER) } else { text };
                if ui.selectable_label(selected, text).clicked() && !selected {
                    self.pending_cmds.push(PanelCommand::SelectTab(tab));
                }
            }
        });
        ui.add_space(4.0);
    }
}

/// Open in the OS file browser; an error dialog names the folder on failure.
fn open_or_report(path: &std::path::Path, noun: &str) -> bool {
    match open_folder(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("[app] could not open {}: {e}", path.display());
            dialog::error("Error", &format!("Could not open {noun}:\n{e}"));
            false
        }
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for AutoVidApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.watcher.stop();
        self.save_compiler_tab();
        self.save_clipper_tab();
        self.store.save_logged();
        info!("[app] shutdown, config saved");
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background(ctx);

        egui::TopBottomPanel::top("header_panel")
            .frame(egui::Frame::new().fill(DARK_BG_0).inner_margin(egui::Margin::symmetric(16, 4)))
            .show(ctx, |ui| self.header(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("tab_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let textures = &self.context.textures;
                    let module: &mut dyn PanelModule = match self.state.tab {
                        Tab::AutoClipper => &mut self.auto_clipper,
                        Tab::VidCompiler => &mut self.vid_compiler,
                    };
                    debug_assert_eq!(module.tab(), self.state.tab);
                    module.ui(ui, &self.state, textures, &mut self.pending_cmds);
                });
        });

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<PanelCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }
    }
}
