// crates/autovid-ui/src/helpers/open.rs
//
// Hand a folder to the OS file browser. The opener is waited on from a
// short-lived thread so its process entry is reaped once it exits.

use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const OPENER: &str = "xdg-open";

pub fn open_folder(path: &Path) -> io::Result<()> {
    debug!("[open] {OPENER} {}", path.display());
    spawn_reaped(OPENER, path).map(drop)
}

/// Start `program path` without blocking. The returned thread yields the
/// exit status, or `None` if waiting failed.
fn spawn_reaped(program: &str, path: &Path) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    // explorer.exe exits 1 on success; never treat the status as an error.
    let handle = duct::cmd(program, [path])
        .stdout_null()
        .stderr_null()
        .unchecked()
        .start()?;
    let name = program.to_string();
    Ok(thread::spawn(move || match handle.wait() {
        Ok(output) => Some(output.status),
        Err(e) => {
            warn!("[open] {name} did not finish: {e}");
            None
        }
    }))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn opener_is_waited_on() {
        let dir = tempfile::tempdir().unwrap();
        let status = spawn_reaped("true", dir.path()).unwrap().join().unwrap();
        assert!(status.is_some_and(|s| s.success()));
    }

    #[test]
    fn failing_opener_status_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let status = spawn_reaped("false", dir.path()).unwrap().join().unwrap();
        assert!(status.is_some_and(|s| !s.success()));
    }

    #[test]
    fn missing_opener_fails_to_start() {
        let dir = tempfile::tempdir().unwrap();
        assert!(spawn_reaped("autovid-no-such-opener", dir.path()).is_err());
    }
}
