#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod paths;
mod theme;

use tracing::{error, info, warn};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub const APP_TITLE:    &str = "AutoVid Compiler";
pub const APP_SUBTITLE: &str = "Video compilation & clipping control panel";
pub const APP_VERSION:  &str = env!("CARGO_PKG_VERSION");

fn main() {
    helpers::log::init();
    info!("[app] {APP_TITLE} v{APP_VERSION} starting, diagnostics in {}",
        helpers::log::log_path().display());

    // Thumbnails degrade to "no preview" without FFmpeg; the panel still runs.
    if let Err(e) = ffmpeg_the_third::init() {
        warn!("[app] FFmpeg init failed, thumbnails disabled: {e}");
    }

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{APP_TITLE} - Control Panel"))
            .with_inner_size([950.0, 920.0])
            .with_min_inner_size([720.0, 600.0])
            .with_resizable(true),
        ..Default::default()
    };

    let app_dir = paths::app_dir();
    let result = eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app::AutoVidApp::new(cc, app_dir)))
        }),
    );

    if let Err(e) = result {
        error!("[app] window construction failed: {e}");
        helpers::dialog::error(
            "Application Error",
            &format!("Error starting application:\n{e}"),
        );
        std::process::exit(1);
    }
}
