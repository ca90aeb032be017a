// crates/autovid-media/src/compiler.rs
//
// The external compiler seam.
//
// Two shapes, one trait:
//   InProcessCompiler   a Rust entry point handed an explicit CompilerConfig
//   SubprocessCompiler  a child process configured through environment
//                       variables; combined stdout/stderr is streamed back
//                       line by line and exit code 0 means success
//
// Both write progress through an OutputSink, which numbers every non-blank
// line and forwards it to the UI over the runner's channel.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use crossbeam_channel::Sender;
use tracing::{debug, info};

use autovid_core::compile::{CompileEvent, CompileParams, CompilerConfig};
use autovid_core::status::LogLevel;

/// Environment override naming the compiler program to launch.
pub const COMPILER_ENV_OVERRIDE: &str = "AUTOVID_COMPILER";
/// Base name of a compiler shipped beside the application.
pub const BUNDLED_COMPILER_STEM: &str = "vid_compiler";

// ── OutputSink ────────────────────────────────────────────────────────────────

/// Line-numbering forwarder for compiler output.
///
/// Also implements `io::Write` so in-process compilers can `writeln!` into
/// it. Partial lines are buffered until a newline or `finish()`.
pub struct OutputSink {
    tx:      Sender<CompileEvent>,
    count:   usize,
    pending: Vec<u8>,
}

impl OutputSink {
    pub fn new(tx: Sender<CompileEvent>) -> Self {
        Self { tx, count: 0, pending: Vec::new() }
    }

    /// Forward one line as `[n] text`. `\r`, `\n` and `\r\n` all end a line.
    /// Blank lines are dropped and do not advance the counter.
    pub fn line(&mut self, text: &str) {
        for part in text.split(['\r', '\n']) {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            self.count += 1;
            let _ = self.tx.send(CompileEvent::Log {
                level: LogLevel::Info,
                text:  format!("[{}] {part}", self.count),
            });
        }
    }

    /// Number of lines forwarded so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flush a trailing partial line.
    pub fn finish(&mut self) {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.line(&String::from_utf8_lossy(&rest));
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(nl) = self.pending.iter().position(|&b| b == b'\n' || b == b'\r') {
            let line: Vec<u8> = self.pending.drain(..=nl).collect();
            self.line(&String::from_utf8_lossy(&line));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// An external compilation routine. Runs on the worker thread only.
pub trait ExternalCompiler: Send + Sync {
    /// Short human description for the status log.
    fn describe(&self) -> String;

    /// Run to completion. `Err` means the run failed; panics are caught by
    /// the runner and treated the same way.
    fn run(&self, params: &CompileParams, out: &mut OutputSink) -> Result<()>;
}

// ── In-process ────────────────────────────────────────────────────────────────

type EntryPoint = dyn Fn(&CompilerConfig, &mut OutputSink) -> Result<()> + Send + Sync;

pub struct InProcessCompiler {
    name:  String,
    entry: Box<EntryPoint>,
}

impl InProcessCompiler {
    pub fn new<F>(name: impl Into<String>, entry: F) -> Self
    where
        F: Fn(&CompilerConfig, &mut OutputSink) -> Result<()> + Send + Sync + 'static,
    {
        Self { name: name.into(), entry: Box::new(entry) }
    }

    /// Stand-in used when no compiler is installed: every run fails with an
    /// explanation instead of silently doing nothing.
    pub fn unavailable(app_dir: &Path) -> Self {
        let hint = app_dir.join(BUNDLED_COMPILER_STEM);
        Self::new("no compiler installed", move |_cfg, out| {
            out.line(&format!(
                "Looked for {} and ${COMPILER_ENV_OVERRIDE}",
                hint.display(),
            ));
            bail!("no video compiler is installed beside the application")
        })
    }
}

impl ExternalCompiler for InProcessCompiler {
    fn describe(&self) -> String {
        format!("in-process ({})", self.name)
    }

    fn run(&self, params: &CompileParams, out: &mut OutputSink) -> Result<()> {
        let cfg = params.compiler_config();
        debug!("[compile] in-process config: {cfg:?}");
        (self.entry)(&cfg, out)
    }
}

// ── Subprocess ────────────────────────────────────────────────────────────────

pub struct SubprocessCompiler {
    /// A bare name is looked up on PATH; anything with a separator is used
    /// as given.
    program:     OsString,
    args:        Vec<OsString>,
    working_dir: PathBuf,
}

impl SubprocessCompiler {
    pub fn new(program: impl Into<OsString>, working_dir: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new(), working_dir: working_dir.into() }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// A Python script run unbuffered so progress arrives as it is printed.
    pub fn python_script(script: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        let interpreter = if cfg!(target_os = "windows") { "python" } else { "python3" };
        Self::new(interpreter, working_dir)
            .arg("-u")
            .arg(script.into().into_os_string())
    }
}

impl ExternalCompiler for SubprocessCompiler {
    fn describe(&self) -> String {
        format!("subprocess ({})", self.program.to_string_lossy())
    }

    fn run(&self, params: &CompileParams, out: &mut OutputSink) -> Result<()> {
        let mut expr = duct::cmd(self.program.clone(), self.args.clone())
            .dir(self.working_dir.clone())
            .stderr_to_stdout()
            .unchecked();
        for (key, value) in params.env_vars() {
            expr = expr.env(key, value);
        }

        let reader = expr.reader()
            .with_context(|| format!("could not launch {}", self.program.to_string_lossy()))?;

        // The sink splits on \r as well as \n, so progress bars arrive one
        // update per line.
        std::io::copy(&mut &reader, out).context("reading compiler output")?;
        out.finish();

        let output = reader.try_wait()
            .context("waiting for compiler")?
            .ok_or_else(|| anyhow!("compiler closed its output but did not exit"))?;
        if output.status.success() {
            Ok(())
        } else {
            match output.status.code() {
                Some(code) => bail!("compiler exited with status {code}"),
                None       => bail!("compiler was terminated by a signal"),
            }
        }
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Pick the compiler for this session.
///
/// Order: `$AUTOVID_COMPILER`, a `vid_compiler` executable beside the app,
/// a `vid_compiler.py` script beside the app, else the unavailable stub.
pub fn locate_compiler(app_dir: &Path) -> Arc<dyn ExternalCompiler> {
    if let Some(program) = std::env::var_os(COMPILER_ENV_OVERRIDE).filter(|p| !p.is_empty()) {
        info!("[compile] using ${COMPILER_ENV_OVERRIDE} = {}", program.to_string_lossy());
        return Arc::new(SubprocessCompiler::new(program, app_dir));
    }

    let exe = app_dir.join(format!("{BUNDLED_COMPILER_STEM}{}", std::env::consts::EXE_SUFFIX));
    if exe.is_file() {
        info!("[compile] using bundled compiler {}", exe.display());
        return Arc::new(SubprocessCompiler::new(exe, app_dir));
    }

    let script = app_dir.join(format!("{BUNDLED_COMPILER_STEM}.py"));
    if script.is_file() {
        info!("[compile] using compiler script {}", script.display());
        return Arc::new(SubprocessCompiler::python_script(script, app_dir));
    }

    info!("[compile] no compiler found in {}", app_dir.display());
    Arc::new(InProcessCompiler::unavailable(app_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn drain(rx: &crossbeam_channel::Receiver<CompileEvent>) -> Vec<String> {
        rx.try_iter()
            .filter_map(|e| match e {
                CompileEvent::Log { text, .. } => Some(text),
                CompileEvent::Finished(_) => None,
            })
            .collect()
    }

    #[test]
    fn sink_numbers_non_blank_lines() {
        let (tx, rx) = unbounded();
        let mut sink = OutputSink::new(tx);
        sink.line("first");
        sink.line("   ");
        sink.line("second\nthird");
        assert_eq!(drain(&rx), vec!["[1] first", "[2] second", "[3] third"]);
        assert_eq!(sink.count(), 3);
    }

    #[test]
    fn sink_buffers_partial_writes() {
        let (tx, rx) = unbounded();
        let mut sink = OutputSink::new(tx);
        write!(sink, "encoding ").unwrap();
        write!(sink, "clip 1\nencoding clip").unwrap();
        assert_eq!(drain(&rx), vec!["[1] encoding clip 1"]);
        write!(sink, " 2").unwrap();
        sink.finish();
        assert_eq!(drain(&rx), vec!["[2] encoding clip 2"]);
    }

    #[test]
    fn carriage_returns_end_lines() {
        let (tx, rx) = unbounded();
        let mut sink = OutputSink::new(tx);
        write!(sink, "frame 1/3\rframe 2/3\rframe 3/3\ndone\r\n").unwrap();
        sink.finish();
        assert_eq!(
            drain(&rx),
            vec!["[1] frame 1/3", "[2] frame 2/3", "[3] frame 3/3", "[4] done"],
        );
        sink.line("a\rb");
        assert_eq!(drain(&rx), vec!["[5] a", "[6] b"]);
    }

    fn params() -> CompileParams {
        CompileParams {
            input_path:      "/in".into(),
            output_path:     "/out".into(),
            trim:            Default::default(),
            music_selection: "None".into(),
            intro_selection: "None".into(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn bare_program_name_is_found_on_path() {
        // The working dir holds no `sh`; launching must still find it.
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = unbounded();
        let mut sink = OutputSink::new(tx);
        let compiler = SubprocessCompiler::new("sh", dir.path()).arg("-c").arg("pwd");
        compiler.run(&params(), &mut sink).unwrap();

        let lines = drain(&rx);
        assert_eq!(lines.len(), 1);
        let printed = std::path::PathBuf::from(lines[0].trim_start_matches("[1] "));
        assert_eq!(
            printed.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap(),
        );
    }

    #[test]
    fn unavailable_compiler_fails_with_reason() {
        let (tx, _rx) = unbounded();
        let mut sink  = OutputSink::new(tx);
        let compiler  = InProcessCompiler::unavailable(Path::new("/app"));
        let err = compiler.run(&params(), &mut sink).unwrap_err();
        assert!(err.to_string().contains("no video compiler"));
    }

    #[test]
    fn empty_dir_falls_back_to_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        // Only meaningful when the override is not set in the test environment.
        if std::env::var_os(COMPILER_ENV_OVERRIDE).is_none() {
            let c = locate_compiler(dir.path());
            assert!(c.describe().contains("no compiler installed"));
        }
    }

    #[test]
    fn script_beside_app_is_preferred_over_stub() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vid_compiler.py"), "print('hi')\n").unwrap();
        if std::env::var_os(COMPILER_ENV_OVERRIDE).is_none() {
            let c = locate_compiler(dir.path());
            assert!(c.describe().starts_with("subprocess"));
        }
    }
}
