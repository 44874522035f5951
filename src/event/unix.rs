//! File-backed event state for unix targets.
//!
//! A named event is one byte of state in a file under `/dev/shm` (or the
//! system temp directory when that is missing), named after the event with
//! the Windows session-namespace prefix stripped. Observers keep the file
//! open, so they continue to see the last state even after the owner has
//! removed the name.

use std::fs::{self, File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use scopeguard::ScopeGuard;
use tracing::warn;

use crate::{Error, Result};

const SET: &[u8] = b"1";
const RESET: &[u8] = b"0";

/// How often a blocked waiter re-reads the state byte.
const WAIT_POLL: Duration = Duration::from_millis(10);

fn state_dir() -> PathBuf {
    let shm = Path::new("/dev/shm");
    if shm.is_dir() {
        shm.to_path_buf()
    } else {
        std::env::temp_dir()
    }
}

/// Map a full event name to its backing path. The part after the last
/// backslash becomes the file name, so `Global\SensorLimit.CpuHot` lands at
/// `/dev/shm/SensorLimit.CpuHot`.
pub(super) fn event_path(name: &str) -> Result<PathBuf> {
    let file_name = name.rsplit('\\').next().unwrap_or(name);
    if file_name.is_empty() || file_name.contains('/') || matches!(file_name, "." | "..") {
        return Err(Error::invalid_event_name(name));
    }
    Ok(state_dir().join(file_name))
}

#[derive(Debug)]
pub(super) struct RawEvent {
    file: File,
    path: PathBuf,
    owned: bool,
}

impl RawEvent {
    /// Create the named event as its owner. The state always starts
    /// unasserted; a file left behind by a crashed owner is claimed and
    /// cleared, never adopted.
    pub(super) fn create(name: &str) -> Result<Self> {
        let path = event_path(name)?;
        let file = OpenOptions::new().read(true).write(true).create(true).open(&path)?;

        // Claim the file by writing the initial state; remove it if that
        // fails.
        let cleanup = scopeguard::guard(&path, |path| {
            let _ = fs::remove_file(path);
        });
        file.write_all_at(RESET, 0)?;
        ScopeGuard::into_inner(cleanup);

        Ok(Self { file, path, owned: true })
    }

    /// Open an existing named event as an observer.
    pub(super) fn open(name: &str) -> Result<Self> {
        let path = event_path(name)?;
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        Ok(Self { file, path, owned: false })
    }

    pub(super) fn exists(name: &str) -> bool {
        event_path(name).map(|path| path.exists()).unwrap_or(false)
    }

    pub(super) fn set(&self) -> Result<()> {
        self.file.write_all_at(SET, 0)?;
        Ok(())
    }

    pub(super) fn reset(&self) -> Result<()> {
        self.file.write_all_at(RESET, 0)?;
        Ok(())
    }

    pub(super) fn is_set(&self) -> Result<bool> {
        let mut state = [0u8; 1];
        self.file.read_exact_at(&mut state, 0)?;
        Ok(&state[..] == SET)
    }

    pub(super) fn wait_timeout(&self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_set()? {
                return Ok(true);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            thread::sleep(WAIT_POLL.min(deadline - now));
        }
    }
}

impl Drop for RawEvent {
    fn drop(&mut self) {
        if self.owned {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!("Could not remove event state {}: {}", self.path.display(), err);
            }
        }
    }
}
