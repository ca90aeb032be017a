// crates/autovid-media/src/runner.rs
//
// CompileRunner: validates a request, owns the single worker slot, and hands
// every log line plus the final outcome back to the UI over one channel.
//
// Thread model:
//   UI thread     run(), poll()         (sole consumer of `rx`)
//   worker        one std::thread per run, at most one alive at a time
//
// The worker never touches UI state. Everything it has to say goes through
// `tx` in emission order and the last message of a run is always
// `CompileEvent::Finished`.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use thiserror::Error;
use tracing::{error, info, warn};

use autovid_core::compile::{CompileEvent, CompileParams, CompileRequest, RunOutcome, TrimSetting};
use autovid_core::status::LogLevel;

use crate::compiler::{ExternalCompiler, OutputSink};

/// Reasons a run was refused before any worker existed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Please select both input and output folders")]
    MissingPaths,

    #[error("Input folder does not exist: {0}")]
    InputMissing(PathBuf),

    #[error("Could not create output directory {path}: {source}")]
    OutputCreate {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A compilation is already running")]
    Busy,
}

impl RunError {
    /// Title for the blocking dialog the UI shows.
    pub fn dialog_title(&self) -> &'static str {
        match self {
            RunError::MissingPaths    => "Configuration Error",
            RunError::InputMissing(_) => "Path Error",
            RunError::OutputCreate { .. } => "Directory Error",
            RunError::Busy            => "Compilation Running",
        }
    }
}

/// What `run` accepted and dispatched.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatched {
    pub params:         CompileParams,
    /// The output folder did not exist and was created for this run.
    pub created_output: bool,
}

pub struct CompileRunner {
    /// Log lines and completion, in worker emission order.
    pub rx:   Receiver<CompileEvent>,
    tx:       Sender<CompileEvent>,
    /// Single-slot task handle. Cleared when `Finished` is consumed.
    slot:     Option<JoinHandle<()>>,
    compiler: Arc<dyn ExternalCompiler>,
}

impl CompileRunner {
    pub fn new(compiler: Arc<dyn ExternalCompiler>) -> Self {
        let (tx, rx) = unbounded();
        Self { rx, tx, slot: None, compiler }
    }

    pub fn compiler_description(&self) -> String {
        self.compiler.describe()
    }

    /// True from dispatch until the UI has consumed the run's `Finished`.
    pub fn is_running(&self) -> bool {
        self.slot.is_some()
    }

    /// Validate the request and make sure the output folder exists.
    ///
    /// Returns the params plus whether the output folder had to be created.
    pub fn prepare(req: &CompileRequest) -> Result<(CompileParams, bool), RunError> {
        let input  = req.input();
        let output = req.output();
        if input.as_os_str().is_empty() || output.as_os_str().is_empty() {
            return Err(RunError::MissingPaths);
        }
        if !input.exists() {
            return Err(RunError::InputMissing(input.to_path_buf()));
        }

        let mut created = false;
        if !output.exists() {
            std::fs::create_dir_all(output).map_err(|source| RunError::OutputCreate {
                path: output.to_path_buf(),
                source,
            })?;
            created = true;
        }

        let params = CompileParams {
            input_path:      input.to_path_buf(),
            output_path:     output.to_path_buf(),
            trim:            TrimSetting::parse(&req.trim_seconds),
            music_selection: req.music_selection.clone(),
            intro_selection: req.intro_selection.clone(),
        };
        Ok((params, created))
    }

    /// Start a run. Busy is checked before anything touches the filesystem.
    pub fn run(&mut self, req: &CompileRequest) -> Result<Dispatched, RunError> {
        if self.is_running() {
            warn!("[compile] run refused: worker still active");
            return Err(RunError::Busy);
        }
        let (params, created_output) = Self::prepare(req)?;

        let send = |level, text: String| {
            let _ = self.tx.send(CompileEvent::Log { level, text });
        };
        if created_output {
            send(LogLevel::Success,
                format!("Created output directory: {}", params.output_path.display()));
        }
        send(LogLevel::Info, "[START] Starting video compilation...".into());
        send(LogLevel::Info, format!("[INPUT] Input: {}", params.input_path.display()));
        send(LogLevel::Info, format!("[OUTPUT] Output: {}", params.output_path.display()));

        let tx       = self.tx.clone();
        let compiler = Arc::clone(&self.compiler);
        let job      = params.clone();
        info!("[compile] dispatching via {}", compiler.describe());
        self.slot = Some(thread::spawn(move || worker(compiler, job, tx)));

        Ok(Dispatched { params, created_output })
    }

    /// Drain every pending event without blocking. Called once per frame.
    pub fn poll(&mut self) -> Vec<CompileEvent> {
        let events: Vec<CompileEvent> = self.rx.try_iter().collect();
        if events.iter().any(|e| matches!(e, CompileEvent::Finished(_))) {
            self.release_slot();
        }
        events
    }

    /// Block up to `timeout` for the next event.
    pub fn next_event(&mut self, timeout: Duration) -> Option<CompileEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => {
                if matches!(ev, CompileEvent::Finished(_)) {
                    self.release_slot();
                }
                Some(ev)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    fn release_slot(&mut self) {
        if let Some(handle) = self.slot.take() {
            // Finished is the worker's last act; the join returns promptly.
            if handle.join().is_err() {
                error!("[compile] worker thread ended abnormally");
            }
        }
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

fn worker(compiler: Arc<dyn ExternalCompiler>, params: CompileParams, tx: Sender<CompileEvent>) {
    let send = |level, text: String| {
        let _ = tx.send(CompileEvent::Log { level, text });
    };

    send(LogLevel::Info, "[START] Background compilation thread started".into());
    send(LogLevel::Info, format!("[CONFIG] Intro: {}", params.intro_selection));
    send(LogLevel::Info, format!("[CONFIG] Music: {}", params.music_selection));
    send(LogLevel::Info, format!("[CONFIG] Trim: {}", params.trim.as_label()));
    send(LogLevel::Info, format!("[PROCESS] Running {}...", compiler.describe()));

    let mut sink = OutputSink::new(tx.clone());
    let result   = catch_unwind(AssertUnwindSafe(|| compiler.run(&params, &mut sink)));
    sink.finish();

    let error = match result {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(format!("{e:#}")),
        Err(panic) => Some(format!("compiler panicked: {}", panic_message(&*panic))),
    };
    if let Some(msg) = &error {
        warn!("[compile] run failed: {msg}");
        send(LogLevel::Error, format!("Compilation error: {msg}"));
    }

    let outcome = RunOutcome { success: error.is_none(), error, lines: sink.count() };
    let _ = tx.send(CompileEvent::Finished(outcome));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
