use parking_lot::Mutex;
use portable_pty::{native_pty_system, ChildKiller, MasterPty, PtySize};
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use super::task::BuildToolsTask;
use crate::error::{ShellError, ShellResult};

/// A BuildTools process that has not been reaped yet.
struct RunningBuild {
    // Kept alive so the terminal stays open while output drains.
    _master: Box<dyn MasterPty + Send>,
    killer: Box<dyn ChildKiller + Send + Sync>,
    pid: Option<u32>,
}

impl RunningBuild {
    fn terminate(&mut self) {
        // BuildTools forks git and maven; take the whole process group down.
        #[cfg(unix)]
        {
            if let Some(pid) = self.pid {
                unsafe {
                    libc::kill(-(pid as i32), libc::SIGTERM);
                    std::thread::sleep(std::time::Duration::from_millis(100));
                    libc::kill(-(pid as i32), libc::SIGKILL);
                }
                return;
            }
        }

        let _ = self.killer.kill();
    }
}

/// Claim on the runner between the start request and the spawn. Released on drop.
pub struct Reservation {
    starting: Arc<AtomicBool>,
}

impl Drop for Reservation {
    fn drop(&mut self) {
        self.starting.store(false, Ordering::SeqCst);
    }
}

/// Runs at most one BuildTools process at a time and streams its output line by line.
pub struct BuildToolsRunner {
    running: Arc<Mutex<Option<RunningBuild>>>,
    starting: Arc<AtomicBool>,
}

impl BuildToolsRunner {
    pub fn new() -> Self {
        Self {
            running: Arc::new(Mutex::new(None)),
            starting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a run is being prepared or its process is alive.
    pub fn is_running(&self) -> bool {
        self.running.lock().is_some() || self.starting.load(Ordering::SeqCst)
    }

    /// Claim the runner before the setup that precedes [`spawn`](Self::spawn).
    pub fn reserve(&self) -> ShellResult<Reservation> {
        let running = self.running.lock();
        if running.is_some()
            || self
                .starting
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
        {
            return Err(ShellError::AlreadyRunning);
        }
        Ok(Reservation {
            starting: self.starting.clone(),
        })
    }

    /// Spawn `task` in a pseudo-terminal, consuming the reservation.
    ///
    /// `on_line` is called from a reader thread for every output line, in order.
    /// `on_exit` is called once after the process was reaped and its output drained.
    pub fn spawn<L, E>(
        &self,
        reservation: Reservation,
        task: &BuildToolsTask,
        on_line: L,
        on_exit: E,
    ) -> ShellResult<()>
    where
        L: Fn(String) + Send + 'static,
        E: FnOnce(Option<u32>) + Send + 'static,
    {
        let mut running = self.running.lock();
        if running.is_some() {
            return Err(ShellError::AlreadyRunning);
        }

        let pair = native_pty_system()
            .openpty(PtySize {
                rows: 40,
                cols: 200,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| ShellError::Spawn(format!("failed to open PTY: {e}")))?;

        let mut child = pair
            .slave
            .spawn_command(task.command())
            .map_err(|e| ShellError::Spawn(e.to_string()))?;
        // Release our handle on the slave so the reader sees EOF once the child exits.
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| ShellError::Spawn(format!("failed to read PTY: {e}")))?;

        let pid = child.process_id();
        log::info!(
            "spawned BuildTools (pid {:?}): {}",
            pid,
            task.command_line().join(" ")
        );

        let reader_thread = thread::spawn(move || {
            let mut reader = BufReader::new(reader);
            let mut buf = Vec::with_capacity(256);
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => on_line(decode_line(&buf)),
                    Err(_) => break,
                }
            }
        });

        *running = Some(RunningBuild {
            _master: pair.master,
            killer: child.clone_killer(),
            pid,
        });
        drop(reservation);

        let slot = self.running.clone();
        thread::spawn(move || {
            let code = match child.wait() {
                Ok(status) => Some(status.exit_code()),
                Err(e) => {
                    log::warn!("waiting on BuildTools failed: {e}");
                    None
                }
            };
            // Dropping the master closes the terminal on platforms where EOF needs it.
            drop(slot.lock().take());
            let _ = reader_thread.join();
            log::info!("BuildTools exited with code {:?}", code);
            on_exit(code);
        });

        Ok(())
    }

    /// Kill the running process, if any. Its exit is still reported through `on_exit`.
    pub fn cancel(&self) -> bool {
        let mut running = self.running.lock();
        match running.as_mut() {
            Some(build) => {
                log::info!("cancelling BuildTools (pid {:?})", build.pid);
                build.terminate();
                true
            }
            None => false,
        }
    }

    /// Used during shutdown.
    pub fn shutdown(&self) {
        if let Some(mut build) = self.running.lock().take() {
            build.terminate();
        }
    }
}

impl Default for BuildToolsRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BuildToolsRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One output line without its line terminator.
fn decode_line(raw: &[u8]) -> String {
    let line = String::from_utf8_lossy(raw);
    line.trim_end_matches(['\n', '\r']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_line_strips_crlf() {
        assert_eq!(decode_line(b"Loading BuildTools version\r\n"), "Loading BuildTools version");
        assert_eq!(decode_line(b"no terminator"), "no terminator");
        assert_eq!(decode_line(b"\r\n"), "");
    }

    #[test]
    fn decode_line_replaces_invalid_utf8() {
        assert_eq!(decode_line(b"caf\xe9\n"), "caf\u{fffd}");
    }

    #[test]
    fn idle_runner_has_nothing_to_cancel() {
        let runner = BuildToolsRunner::new();
        assert!(!runner.is_running());
        assert!(!runner.cancel());
    }

    #[test]
    fn second_start_is_refused_while_the_first_is_preparing() {
        let runner = BuildToolsRunner::new();
        let first = runner.reserve().unwrap();
        assert!(runner.is_running());
        assert!(matches!(runner.reserve(), Err(ShellError::AlreadyRunning)));

        drop(first);
        assert!(!runner.is_running());
        assert!(runner.reserve().is_ok());
    }
}
