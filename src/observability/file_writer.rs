//! Append-only trace file with size-based rotation.
//!
//! Each exported batch becomes one line. When the file grows past the policy's
//! byte limit it is renamed to `<stem>.json.<unix_secs>` and a fresh file is
//! started; only the newest backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MB per file, three backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write, so construction never fails.
///
/// # Examples
///
/// ```ignore
/// let writer = TraceFile::new(dir.join("game-library-otlp.json"), RotationPolicy::default());
/// writer.append_line("{\"resourceSpans\":[]}")?;
/// ```
pub struct TraceFile {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl TraceFile {
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when rotating, opening, or writing
    /// fails, or an `Other` error if the lock was poisoned.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.policy.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_nanos();
        let backup = self.path.with_extension(format!("json.{stamp}"));
        if self.path.exists() {
            fs::rename(&self.path, backup)?;
        }
        self.prune_backups()
    }

    /// Deletes all but the `max_backups` newest backups. Individual delete
    /// failures are ignored.
    fn prune_backups(&self) -> io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{stem}.json.");

        let mut backups: Vec<(Option<SystemTime>, PathBuf)> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .map(|path| (fs::metadata(&path).and_then(|m| m.modified()).ok(), path))
            .collect();

        backups.sort_by(|a, b| b.cmp(a));
        for (_, stale) in backups.iter().skip(self.policy.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for TraceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backups_in(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().contains(".json."))
            .count()
    }

    #[test]
    fn appends_one_line_per_call() {
        let dir = TempDir::new().unwrap();
        let writer = TraceFile::new(dir.path().join("t.json"), RotationPolicy::default());

        writer.append_line("{\"a\":1}").unwrap();
        writer.append_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents.lines().collect::<Vec<_>>(), vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn rotates_past_limit_and_prunes_backups() {
        let dir = TempDir::new().unwrap();
        let policy = RotationPolicy { max_bytes: 8, max_backups: 2 };
        let writer = TraceFile::new(dir.path().join("t.json"), policy);

        for i in 0..6 {
            writer.append_line(&format!("line-number-{i}")).unwrap();
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(backups_in(dir.path()) <= 2);
        let current = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(current.trim(), "line-number-5");
    }
}
