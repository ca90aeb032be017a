// Compile runner lifecycle against real threads and directories, with
// in-process fake compilers standing in for the external one.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::bounded;

use autovid_core::compile::{CompileRequest, TriggerState};
use autovid_core::status::LogLevel;
use autovid_media::{CompileEvent, CompileRunner, InProcessCompiler, RunError, RunOutcome};

const WAIT: Duration = Duration::from_secs(10);

fn request(input: &std::path::Path, output: &std::path::Path) -> CompileRequest {
    CompileRequest {
        input_path:      input.display().to_string(),
        output_path:     output.display().to_string(),
        trim_seconds:    "15".into(),
        music_selection: "[RANDOM] Random".into(),
        intro_selection: "StockDefault".into(),
    }
}

/// Pull events until the run finishes. Returns the log texts and the outcome.
fn finish(runner: &mut CompileRunner) -> (Vec<(LogLevel, String)>, RunOutcome) {
    let mut logs = Vec::new();
    loop {
        match runner.next_event(WAIT).expect("worker went quiet") {
            CompileEvent::Log { level, text } => logs.push((level, text)),
            CompileEvent::Finished(outcome) => return (logs, outcome),
        }
    }
}

fn ok_compiler() -> Arc<InProcessCompiler> {
    Arc::new(InProcessCompiler::new("ok", |cfg, out| {
        writeln!(out, "intro={}", cfg.intro_selection)?;
        writeln!(out, "trim={}", cfg.trim_seconds)?;
        Ok(())
    }))
}

#[test]
fn second_run_while_outstanding_is_busy() {
    let dir = tempfile::tempdir().unwrap();
    let (gate_tx, gate_rx) = bounded::<()>(0);
    let compiler = InProcessCompiler::new("gated", move |_cfg, _out| {
        gate_rx.recv()?;
        Ok(())
    });
    let mut runner = CompileRunner::new(Arc::new(compiler));
    let req = request(dir.path(), dir.path());

    runner.run(&req).unwrap();
    assert!(runner.is_running());
    assert!(matches!(runner.run(&req), Err(RunError::Busy)));

    gate_tx.send(()).unwrap();
    let (_, outcome) = finish(&mut runner);
    assert!(outcome.success);
    assert!(!runner.is_running());

    // Slot is free again.
    runner.run(&req).unwrap();
    gate_tx.send(()).unwrap();
    assert!(finish(&mut runner).1.success);
}

#[test]
fn missing_output_folder_is_created_and_run_proceeds() {
    let dir    = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("nested");
    let mut runner = CompileRunner::new(ok_compiler());

    let dispatched = runner.run(&request(dir.path(), &output)).unwrap();
    assert!(dispatched.created_output);
    assert!(output.is_dir());

    let (logs, outcome) = finish(&mut runner);
    assert!(outcome.success);
    assert_eq!(logs[0].0, LogLevel::Success);
    assert!(logs[0].1.starts_with("Created output directory"));
}

#[test]
fn uncreatable_output_aborts_without_worker() {
    let dir     = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file.txt");
    std::fs::write(&blocker, b"x").unwrap();
    let mut runner = CompileRunner::new(ok_compiler());

    let err = runner.run(&request(dir.path(), &blocker.join("out"))).unwrap_err();
    assert!(matches!(err, RunError::OutputCreate { .. }));
    assert_eq!(err.dialog_title(), "Directory Error");
    assert!(!runner.is_running());
    assert!(runner.poll().is_empty());
}

#[test]
fn compiler_error_is_a_failed_run() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = InProcessCompiler::new("broken", |_cfg, out| {
        out.line("starting");
        anyhow::bail!("codec not found")
    });
    let mut runner = CompileRunner::new(Arc::new(compiler));
    runner.run(&request(dir.path(), dir.path())).unwrap();

    let (logs, outcome) = finish(&mut runner);
    assert!(!outcome.success);
    assert_eq!(outcome.lines, 1);
    assert!(logs.iter().any(|(lvl, t)| *lvl == LogLevel::Error && t.contains("codec not found")));
    assert_eq!(TriggerState::from_outcome(&outcome), TriggerState::Failed);
}

#[test]
fn compiler_panic_is_caught() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = InProcessCompiler::new("panicky", |_cfg, _out| panic!("ran out of clips"));
    let mut runner = CompileRunner::new(Arc::new(compiler));
    runner.run(&request(dir.path(), dir.path())).unwrap();

    let (_, outcome) = finish(&mut runner);
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("ran out of clips"));
    assert!(!runner.is_running());
}

#[test]
fn log_lines_arrive_in_emission_order() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = InProcessCompiler::new("chatty", |_cfg, out| {
        for i in 0..200 {
            writeln!(out, "step {i}")?;
        }
        Ok(())
    });
    let mut runner = CompileRunner::new(Arc::new(compiler));
    runner.run(&request(dir.path(), dir.path())).unwrap();

    let (logs, outcome) = finish(&mut runner);
    assert_eq!(outcome.lines, 200);
    let numbered: Vec<&str> = logs.iter()
        .map(|(_, t)| t.as_str())
        .filter(|t| t.starts_with("[") && t.contains("] step "))
        .collect();
    assert_eq!(numbered.len(), 200);
    for (i, line) in numbered.iter().enumerate() {
        assert_eq!(*line, format!("[{}] step {i}", i + 1));
    }

    let start  = logs.iter().position(|(_, t)| t.starts_with("[START] Starting")).unwrap();
    let config = logs.iter().position(|(_, t)| t.starts_with("[CONFIG] Intro")).unwrap();
    assert!(start < config);
}

#[test]
fn in_process_compiler_receives_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut runner = CompileRunner::new(ok_compiler());
    let mut req = request(dir.path(), dir.path());
    req.trim_seconds = "None".into();
    runner.run(&req).unwrap();

    let (logs, outcome) = finish(&mut runner);
    assert!(outcome.success);
    let texts: Vec<&str> = logs.iter().map(|(_, t)| t.as_str()).collect();
    assert!(texts.contains(&"[1] intro=StockDefault"));
    assert!(texts.contains(&"[2] trim=0"));
    assert!(texts.contains(&"[CONFIG] Trim: None"));
}

#[cfg(unix)]
#[test]
fn subprocess_gets_environment_and_nonzero_exit_fails() {
    use autovid_media::SubprocessCompiler;

    let dir = tempfile::tempdir().unwrap();
    let script = "echo \"in=$VIDEO_INPUT_PATH\"; \
                  echo \"trim=$TRIM_SECONDS gui=$GUI_MODE\"; \
                  echo \"music=$MUSIC_SELECTION\"; \
                  echo oops 1>&2; \
                  exit 3";
    let compiler = SubprocessCompiler::new("sh", dir.path()).arg("-c").arg(script);
    let mut runner = CompileRunner::new(Arc::new(compiler));
    runner.run(&request(dir.path(), dir.path())).unwrap();

    let (logs, outcome) = finish(&mut runner);
    let texts: Vec<&str> = logs.iter().map(|(_, t)| t.as_str()).collect();
    assert!(texts.contains(&format!("[1] in={}", dir.path().display()).as_str()));
    assert!(texts.contains(&"[2] trim=15 gui=1"));
    assert!(texts.contains(&"[3] music=[RANDOM] Random"));
    assert!(texts.contains(&"[4] oops"));
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("status 3"));
}

#[cfg(unix)]
#[test]
fn subprocess_zero_exit_is_success() {
    use autovid_media::SubprocessCompiler;

    let dir = tempfile::tempdir().unwrap();
    let compiler = SubprocessCompiler::new("sh", dir.path()).arg("-c").arg("echo done");
    let mut runner = CompileRunner::new(Arc::new(compiler));
    runner.run(&request(dir.path(), dir.path())).unwrap();

    let (_, outcome) = finish(&mut runner);
    assert!(outcome.success);
    assert_eq!(outcome.lines, 1);
}

#[cfg(unix)]
#[test]
fn subprocess_progress_with_carriage_returns_is_split() {
    use autovid_media::SubprocessCompiler;

    let dir = tempfile::tempdir().unwrap();
    let compiler = SubprocessCompiler::new("sh", dir.path())
        .arg("-c")
        .arg("printf 'a\\rb\\rc\\ndone\\n'");
    let mut runner = CompileRunner::new(Arc::new(compiler));
    runner.run(&request(dir.path(), dir.path())).unwrap();

    let (logs, outcome) = finish(&mut runner);
    assert!(outcome.success);
    assert_eq!(outcome.lines, 4);
    let numbered: Vec<&str> = logs.iter()
        .map(|(_, t)| t.as_str())
        .filter(|t| t.starts_with("[1]") || t.starts_with("[2]") || t.starts_with("[3]") || t.starts_with("[4]"))
        .collect();
    assert_eq!(numbered, vec!["[1] a", "[2] b", "[3] c", "[4] done"]);
}

/// True when `python3` can be launched from this environment.
#[cfg(unix)]
fn have_python3() -> bool {
    duct::cmd!("python3", "--version")
        .stdout_null()
        .stderr_null()
        .run()
        .is_ok()
}

#[cfg(unix)]
#[test]
fn discovered_script_runs_end_to_end() {
    use autovid_media::{compiler::COMPILER_ENV_OVERRIDE, locate_compiler, ExternalCompiler};

    if !have_python3() || std::env::var_os(COMPILER_ENV_OVERRIDE).is_some() {
        eprintln!("skipped: python3 not available or compiler override set");
        return;
    }

    let app = tempfile::tempdir().unwrap();
    let clips = tempfile::tempdir().unwrap();
    std::fs::write(
        app.path().join("vid_compiler.py"),
        "import os\n\
         print('gui=' + os.environ['GUI_MODE'])\n\
         print('trim=' + os.environ['TRIM_SECONDS'])\n\
         print('intro=' + os.environ['INTRO_SELECTION'])\n",
    ).unwrap();

    let compiler = locate_compiler(app.path());
    assert!(compiler.describe().starts_with("subprocess"));

    let mut runner = CompileRunner::new(compiler);
    runner.run(&request(clips.path(), &clips.path().join("out"))).unwrap();

    let (logs, outcome) = finish(&mut runner);
    assert!(outcome.success, "{outcome:?}");
    assert_eq!(outcome.lines, 3);
    let texts: Vec<&str> = logs.iter().map(|(_, t)| t.as_str()).collect();
    assert!(texts.contains(&"[1] gui=1"));
    assert!(texts.contains(&"[2] trim=15"));
    assert!(texts.contains(&"[3] intro=StockDefault"));
}
