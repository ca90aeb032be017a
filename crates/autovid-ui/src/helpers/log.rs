// crates/autovid-ui/src/helpers/log.rs
//
// Diagnostic logging for the binary.
//
// In release builds with `windows_subsystem = "windows"` there is no console,
// so stderr output is lost. Every event is therefore written twice: to stderr
// and to an append-only file in the OS temp directory.
//
// File: %TEMP%\autovid.log (or $TMPDIR/autovid.log)
//
// Filter with RUST_LOG, e.g. `RUST_LOG=autovid_media=debug`. Default: info.
//
// This is not the user-facing status log. That one lives in PanelState.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use parking_lot::{Mutex, MutexGuard};
use tracing_subscriber::fmt::{self, writer::MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "autovid.log";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

struct FileLog {
    file: Mutex<File>,
}

struct FileLogGuard<'a>(MutexGuard<'a, File>);

impl Write for FileLogGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for FileLog {
    type Writer = FileLogGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileLogGuard(self.file.lock())
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored. A log file that cannot be opened only drops the file layer.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    let file_layer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())
        .ok()
        .map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(FileLog { file: Mutex::new(file) })
        });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}
