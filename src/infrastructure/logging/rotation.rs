//! Log file rotation and cleanup
//!
//! Provides a size-bounded log file writer:
//! - The active file is rotated once it would exceed `max_size`
//! - Rotated files are renamed with a timestamp and optionally gzipped
//! - At most `max_backups` rotated files are kept
//! - Rotated files older than `max_age` are deleted

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, info, warn};

use super::config::RotationPolicy;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESSED_SUFFIX: &str = ".gz";

/// Log file writer with size, count and age-based rotation
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_size: u64,
    max_backups: usize,
    max_age: Duration,
    compress: bool,
    file: Option<File>,
    size: u64,
}

impl RotatingFile {
    /// Open (or create) the active log file at `path`
    ///
    /// Creates parent directories if they don't exist and appends to an
    /// existing file.
    pub fn open(path: impl AsRef<Path>, policy: &RotationPolicy) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut rotating = Self {
            path,
            max_size: policy.max_size_bytes(),
            max_backups: policy.max_backups,
            max_age: Duration::days(i64::from(policy.max_age_days)),
            compress: policy.compress,
            file: None,
            size: 0,
        };
        rotating.open_active()?;
        Ok(rotating)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_active(&mut self) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.size = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    /// Rotate the active file and open a fresh one
    ///
    /// The file is renamed to `<stem>-<timestamp>.<ext>` (gzipped when the
    /// policy asks for it), then old backups are pruned.
    pub fn rotate(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        let rotated = self.backup_path(Utc::now());
        if self.path.exists() {
            fs::rename(&self.path, &rotated)?;
            info!(
                old_path = %self.path.display(),
                new_path = %rotated.display(),
                "rotated log file"
            );
            if self.compress {
                if let Err(e) = compress_file(&rotated) {
                    warn!(path = %rotated.display(), error = %e, "failed to compress rotated log file");
                }
            }
        }

        self.open_active()?;

        if let Err(e) = self.cleanup_old_logs() {
            warn!(error = %e, "failed to clean up old log files");
        }
        Ok(())
    }

    /// Delete rotated files beyond the retention count or age
    ///
    /// # Returns
    /// Number of files deleted
    pub fn cleanup_old_logs(&self) -> io::Result<usize> {
        let cutoff = Utc::now() - self.max_age;
        let mut backups = self.backups()?;
        // newest first
        backups.sort_by(|a, b| b.1.cmp(&a.1));

        let mut deleted = 0;
        for (index, (path, modified)) in backups.iter().enumerate() {
            if index >= self.max_backups || *modified < cutoff {
                fs::remove_file(path)?;
                debug!(path = %path.display(), "deleted old log file");
                deleted += 1;
            }
        }

        if deleted > 0 {
            info!(count = deleted, "cleaned up old log files");
        }
        Ok(deleted)
    }

    /// Rotated files belonging to this log, with their modification times
    pub fn backups(&self) -> io::Result<Vec<(PathBuf, DateTime<Utc>)>> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let (stem, ext) = self.stem_and_ext();
        let prefix = format!("{stem}-");

        let mut backups = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path == self.path {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let name = name.strip_suffix(COMPRESSED_SUFFIX).unwrap_or(name);
            if !name.starts_with(&prefix) || !name.ends_with(&ext) {
                continue;
            }
            let modified: DateTime<Utc> = entry.metadata()?.modified()?.into();
            backups.push((path, modified));
        }
        Ok(backups)
    }

    fn backup_path(&self, now: DateTime<Utc>) -> PathBuf {
        let (stem, ext) = self.stem_and_ext();
        let name = format!("{stem}-{}{ext}", now.format(TIMESTAMP_FORMAT));
        self.path.with_file_name(name)
    }

    /// File stem and extension (with leading dot, possibly empty)
    fn stem_and_ext(&self) -> (String, String) {
        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "log".to_string(), |s| s.to_string_lossy().into_owned());
        let ext = self
            .path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        (stem, ext)
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if self.size > 0 && self.size + len > self.max_size {
            self.rotate()?;
        }
        if self.file.is_none() {
            self.open_active()?;
        }
        let written = match self.file.as_mut() {
            Some(file) => file.write(buf)?,
            None => return Err(io::Error::other("log file is not open")),
        };
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Gzip `path` into `path.gz` and remove the original
fn compress_file(path: &Path) -> io::Result<()> {
    let mut compressed_name = path.as_os_str().to_owned();
    compressed_name.push(COMPRESSED_SUFFIX);
    let compressed_path = PathBuf::from(compressed_name);

    let mut reader = BufReader::new(File::open(path)?);
    let mut encoder = GzEncoder::new(File::create(&compressed_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?.sync_all()?;
    fs::remove_file(path)?;
    Ok(())
}
