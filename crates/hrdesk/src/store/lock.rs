//! Exclusive writer lock for a dataset file.
//!
//! The lock is a sibling file named `<dataset>.lock`, created with
//! create-new semantics so that only one writer can hold it. It holds the
//! owner's process id and is removed when the guard drops. A lock whose
//! owner is no longer running is removed by the next writer.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Pause between attempts while another writer holds the lock.
const RETRY_INTERVAL: Duration = Duration::from_millis(25);

/// Guard holding the dataset lock until dropped.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    /// Lock file path for a dataset.
    #[must_use]
    pub fn lock_path(dataset: &Path) -> PathBuf {
        let mut name = dataset
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".lock");
        dataset.with_file_name(name)
    }

    /// Acquire the lock for `dataset`, waiting at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer still holds the lock
    /// when the timeout expires, or an I/O error if the lock file cannot be
    /// created for another reason.
    pub fn acquire(dataset: &Path, timeout: Duration) -> Result<Self> {
        let path = Self::lock_path(dataset);
        let deadline = Instant::now() + timeout;
        let mut contended = false;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    if let Err(err) = write_owner(file) {
                        if let Err(cleanup) = fs::remove_file(&path) {
                            warn!("Failed to remove lock {}: {}", path.display(), cleanup);
                        }
                        return Err(err.into());
                    }
                    debug!("Acquired dataset lock {}", path.display());
                    return Ok(Self { path });
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    if remove_if_stale(&path)? {
                        continue;
                    }
                    if Instant::now() >= deadline {
                        return Err(Error::LockTimeout { path });
                    }
                    if !contended {
                        warn!(
                            "Dataset is locked by another writer, waiting for {}",
                            path.display()
                        );
                        contended = true;
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Path of the held lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Released dataset lock {}", self.path.display()),
            Err(err) => warn!("Failed to remove lock {}: {}", self.path.display(), err),
        }
    }
}

fn write_owner(mut file: fs::File) -> io::Result<()> {
    writeln!(file, "{}", process::id())?;
    file.sync_all()
}

/// Remove the lock at `path` if the process that wrote it is gone.
///
/// Returns `true` when the lock no longer exists. A lock without a readable
/// owner id counts as held, since its writer may not have written it yet.
fn remove_if_stale(path: &Path) -> Result<bool> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(true),
        Err(err) => return Err(err.into()),
    };
    let Ok(owner) = contents.trim().parse::<u32>() else {
        return Ok(false);
    };
    if is_process_running(owner) {
        return Ok(false);
    }

    warn!(
        "Removing stale lock {} (pid {} no longer running)",
        path.display(),
        owner
    );
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(true),
        Err(err) => Err(err.into()),
    }
}

/// Whether a process with the given id exists. Assumes it does when the
/// check itself cannot run.
fn is_process_running(pid: u32) -> bool {
    if pid == process::id() {
        return true;
    }

    #[cfg(unix)]
    {
        // Signal 0 only checks that the process exists.
        process::Command::new("kill")
            .arg("-0")
            .arg(pid.to_string())
            .stdout(process::Stdio::null())
            .stderr(process::Stdio::null())
            .status()
            .map_or(true, |status| status.success())
    }

    #[cfg(windows)]
    {
        process::Command::new("tasklist")
            .args(["/FI", &format!("PID eq {pid}"), "/NH"])
            .stdout(process::Stdio::piped())
            .stderr(process::Stdio::null())
            .output()
            .map_or(true, |output| {
                String::from_utf8_lossy(&output.stdout).contains(&pid.to_string())
            })
    }

    #[cfg(not(any(unix, windows)))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path() {
        assert_eq!(
            StoreLock::lock_path(Path::new("data/hr.csv")),
            PathBuf::from("data/hr.csv.lock")
        );
    }

    #[test]
    fn test_acquire_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("hr.csv");

        let lock = StoreLock::acquire(&dataset, Duration::from_millis(100)).unwrap();
        let lock_file = lock.path().to_path_buf();
        assert!(lock_file.exists());

        drop(lock);
        assert!(!lock_file.exists());
    }

    #[test]
    fn test_second_writer_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("hr.csv");

        let _held = StoreLock::acquire(&dataset, Duration::from_millis(100)).unwrap();
        let err = StoreLock::acquire(&dataset, Duration::from_millis(60)).unwrap_err();
        assert!(matches!(err, Error::LockTimeout { .. }));
    }

    #[test]
    fn test_lock_reacquired_after_release() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("hr.csv");

        drop(StoreLock::acquire(&dataset, Duration::from_millis(100)).unwrap());
        assert!(StoreLock::acquire(&dataset, Duration::from_millis(100)).is_ok());
    }

    #[test]
    fn test_lock_file_records_owner_pid() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("hr.csv");

        let lock = StoreLock::acquire(&dataset, Duration::from_millis(100)).unwrap();
        let owner = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(owner.trim(), process::id().to_string());
    }

    #[test]
    fn test_stale_lock_from_dead_process_is_removed() {
        crate::logging::init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("hr.csv");
        // Above the largest pid Linux hands out.
        fs::write(StoreLock::lock_path(&dataset), "999999999\n").unwrap();

        let lock = StoreLock::acquire(&dataset, Duration::from_millis(100)).unwrap();
        let owner = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(owner.trim(), process::id().to_string());
    }

    #[test]
    fn test_lock_without_owner_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("hr.csv");
        fs::write(StoreLock::lock_path(&dataset), "").unwrap();

        let err = StoreLock::acquire(&dataset, Duration::from_millis(60)).unwrap_err();
        assert!(matches!(err, Error::LockTimeout { .. }));
        assert!(StoreLock::lock_path(&dataset).exists());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("absent").join("hr.csv");

        let err = StoreLock::acquire(&dataset, Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
