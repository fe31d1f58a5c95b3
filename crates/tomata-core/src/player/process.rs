//! Child-process bridge to the music helper.
//!
//! Owns a single child handle. Commands are serialized as one JSON line
//! on the helper's stdin; events stream back as JSON lines on its stdout,
//! decoded on a reader thread and handed to the host loop through a
//! channel (`poll_events`). The bridge never panics or returns errors
//! from its steady-state surface - transport failures are logged and
//! degrade to no-ops.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use tracing::{debug, info, warn};

use super::protocol::{PlayerCommand, PlayerEvent};
use crate::error::BridgeError;

/// Whole-process-tree termination capability.
///
/// A plain kill on the helper leaves its forked audio subprocesses
/// orphaned on some platforms, so each backend takes the whole tree down.
pub trait TerminateTree {
    fn terminate_tree(&mut self) -> std::io::Result<()>;
}

impl TerminateTree for Child {
    #[cfg(unix)]
    fn terminate_tree(&mut self) -> std::io::Result<()> {
        // The child was spawned as its own process group leader, so the
        // group id equals its pid.
        let pid = self.id();
        let status = Command::new("kill")
            .args(["-9", &format!("-{pid}")])
            .status();
        match status {
            Ok(s) if s.success() => Ok(()),
            _ => self.kill(),
        }
    }

    #[cfg(windows)]
    fn terminate_tree(&mut self) -> std::io::Result<()> {
        let pid = self.id();
        let status = Command::new("taskkill")
            .args(["/pid", &pid.to_string(), "/T", "/F"])
            .status();
        match status {
            Ok(s) if s.success() => Ok(()),
            _ => self.kill(),
        }
    }

    #[cfg(not(any(unix, windows)))]
    fn terminate_tree(&mut self) -> std::io::Result<()> {
        self.kill()
    }
}

/// Handle to the running helper process and its stream pumps.
struct Running {
    child: Child,
    stdin: ChildStdin,
    events: Receiver<PlayerEvent>,
    reader: Option<JoinHandle<()>>,
    stderr_pump: Option<JoinHandle<()>>,
}

/// The process bridge. One instance owns at most one helper process.
#[derive(Default)]
pub struct PlayerProcess {
    running: Option<Running>,
}

impl PlayerProcess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the helper.
    ///
    /// A logged no-op if a process is already running. The working
    /// directory is the executable's own directory (the helper resolves
    /// its music library relative to itself); `device_id` is passed as
    /// the first argument when present.
    pub fn start(&mut self, exe_path: &Path, device_id: Option<i64>) -> Result<(), BridgeError> {
        if self.is_running() {
            warn!("player process already running, ignoring start");
            return Ok(());
        }

        let mut command = Command::new(exe_path);
        if let Some(id) = device_id {
            command.arg(id.to_string());
        }
        if let Some(dir) = exe_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }
        command
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Own process group so terminate_tree can kill the whole tree.
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|source| BridgeError::SpawnFailed {
            path: exe_path.to_path_buf(),
            source,
        })?;

        let stdin = child.stdin.take().ok_or(BridgeError::StdinUnavailable)?;
        let stdout = child.stdout.take().ok_or(BridgeError::StdinUnavailable)?;
        let stderr = child.stderr.take();

        let (tx, rx) = std::sync::mpsc::channel();
        let reader = std::thread::spawn(move || pump_stdout(stdout, tx));
        let stderr_pump = stderr.map(|s| std::thread::spawn(move || pump_stderr(s)));

        info!(path = %exe_path.display(), "player process started");
        self.running = Some(Running {
            child,
            stdin,
            events: rx,
            reader: Some(reader),
            stderr_pump,
        });
        Ok(())
    }

    /// Tear the helper down, killing its whole process tree.
    ///
    /// Safe and idempotent when nothing is running. No grace period.
    pub fn stop(&mut self) {
        let Some(mut running) = self.running.take() else {
            return;
        };
        if let Err(e) = running.child.terminate_tree() {
            warn!("failed to kill player process: {e}");
        }
        // Reap so the pid is not left as a zombie; the pumps end when the
        // pipes close.
        let _ = running.child.wait();
        if let Some(handle) = running.reader.take() {
            let _ = handle.join();
        }
        if let Some(handle) = running.stderr_pump.take() {
            let _ = handle.join();
        }
        info!("player process stopped");
    }

    /// True while the child is alive. Clears state if it exited on its own.
    pub fn is_running(&mut self) -> bool {
        let Some(running) = self.running.as_mut() else {
            return false;
        };
        match running.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                info!(%status, "player process exited");
                self.running = None;
                false
            }
            Err(e) => {
                warn!("failed to poll player process: {e}");
                self.running = None;
                false
            }
        }
    }

    /// Serialize one command line to the helper's stdin.
    ///
    /// Returns false (logged) when no process is running or the write
    /// fails; the caller treats the controls as inert.
    pub fn send(&mut self, command: &PlayerCommand) -> bool {
        if !self.is_running() {
            warn!(?command, "player process not running, dropping command");
            return false;
        }
        let Some(running) = self.running.as_mut() else {
            return false;
        };
        let line = match serde_json::to_string(command) {
            Ok(line) => line,
            Err(e) => {
                warn!("failed to encode player command: {e}");
                return false;
            }
        };
        match writeln!(running.stdin, "{line}").and_then(|_| running.stdin.flush()) {
            Ok(()) => {
                debug!(%line, "player command sent");
                true
            }
            Err(e) => {
                warn!("failed to write player command: {e}");
                false
            }
        }
    }

    /// Drain events pushed by the helper since the last poll.
    pub fn poll_events(&mut self) -> Vec<PlayerEvent> {
        let Some(running) = self.running.as_mut() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        loop {
            match running.events.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

impl Drop for PlayerProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Decode stdout lines into typed events until the pipe closes.
fn pump_stdout(stdout: std::process::ChildStdout, tx: Sender<PlayerEvent>) {
    let reader = BufReader::new(stdout);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("player stdout read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match PlayerEvent::parse_line(&line) {
            Ok(Some(event)) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Ok(None) => warn!(%line, "unknown player event, dropping"),
            Err(e) => warn!(%line, "malformed player event line: {e}"),
        }
    }
    debug!("player stdout closed");
}

fn pump_stderr(stderr: std::process::ChildStderr) {
    let reader = BufReader::new(stderr);
    for line in reader.lines().map_while(|l| l.ok()) {
        debug!(target: "tomata_core::player::helper", "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_without_process_returns_false() {
        let mut bridge = PlayerProcess::new();
        assert!(!bridge.send(&PlayerCommand::Toggle));
        assert!(!bridge.send(&PlayerCommand::GetStatus));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut bridge = PlayerProcess::new();
        bridge.stop();
        bridge.stop();
        assert!(!bridge.is_running());
    }

    #[test]
    fn start_on_missing_binary_fails_cleanly() {
        let mut bridge = PlayerProcess::new();
        let result = bridge.start(Path::new("/nonexistent/helper-binary"), None);
        assert!(matches!(result, Err(BridgeError::SpawnFailed { .. })));
        assert!(!bridge.is_running());
    }

    #[cfg(unix)]
    #[test]
    fn receives_events_from_helper_stdout() {
        use std::time::{Duration, Instant};

        // A stand-in helper that speaks a few protocol lines and exits.
        let script = r#"
            echo '{"event":"ready","data":{}}'
            echo '{"event":"play_state","data":{"playing":true}}'
            echo '{"event":"bogus","data":{}}'
            echo 'not json'
            echo '{"event":"progress","data":{"current":1,"duration":10}}'
        "#;
        let dir = tempfile::tempdir().unwrap();
        let helper = dir.path().join("helper.sh");
        std::fs::write(&helper, format!("#!/bin/sh\n{script}\nsleep 5\n")).unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&helper, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let mut bridge = PlayerProcess::new();
        bridge.start(&helper, None).unwrap();
        assert!(bridge.is_running());

        let mut events = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        while events.len() < 3 && Instant::now() < deadline {
            events.extend(bridge.poll_events());
            std::thread::sleep(Duration::from_millis(20));
        }

        // The bogus event and the malformed line were dropped.
        assert_eq!(
            events,
            vec![
                PlayerEvent::Ready,
                PlayerEvent::PlayState { playing: true },
                PlayerEvent::Progress {
                    current: 1.0,
                    duration: 10.0
                },
            ]
        );

        bridge.stop();
        assert!(!bridge.is_running());
        assert!(!bridge.send(&PlayerCommand::Toggle));
    }

    #[cfg(unix)]
    #[test]
    fn second_start_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let helper = dir.path().join("helper.sh");
        std::fs::write(&helper, "#!/bin/sh\nsleep 5\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&helper, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let mut bridge = PlayerProcess::new();
        bridge.start(&helper, None).unwrap();
        // Second start must not replace the running child.
        bridge.start(&helper, Some(2)).unwrap();
        assert!(bridge.is_running());
        bridge.stop();
    }
}
