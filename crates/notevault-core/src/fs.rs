//! Filesystem utilities for atomic writes.
//!
//! A vault is never written in place. Bytes go to a uniquely named
//! temporary file next to the destination, are synced, and only then is the
//! temporary renamed over the target. A crash before the rename leaves the
//! previous file untouched.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// An in-progress atomic replacement of `destination`.
///
/// Dropping without calling [`AtomicWrite::commit`] removes the temp file and
/// leaves the destination as it was.
#[derive(Debug)]
pub struct AtomicWrite {
    file: Option<File>,
    temp_path: PathBuf,
    destination: PathBuf,
}

impl AtomicWrite {
    /// Create the temporary file that will replace `destination`.
    ///
    /// Missing parent directories are created.
    pub fn begin(destination: &Path) -> io::Result<Self> {
        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let filename = destination
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid vault filename"))?;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("System time error: {}", e)))?
            .as_nanos();
        let temp_path = parent.join(format!(".{}.{}.{}.tmp", filename, std::process::id(), nanos));

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let file = options.open(&temp_path)?;

        Ok(Self {
            file: Some(file),
            temp_path,
            destination: destination.to_path_buf(),
        })
    }

    /// Path of the temporary file being written.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Append bytes to the temporary file.
    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(data),
            None => Err(io::Error::new(io::ErrorKind::Other, "Atomic write already finished")),
        }
    }

    /// Sync the temporary file and rename it over the destination.
    ///
    /// On failure the temporary file is removed and the destination is left
    /// as it was.
    pub fn commit(mut self) -> io::Result<()> {
        let file = self
            .file
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Atomic write already finished"))?;
        let synced = file.sync_all();
        drop(file);

        let result = synced.and_then(|()| replace_file(&self.temp_path, &self.destination));
        if result.is_err() {
            let _ = fs::remove_file(&self.temp_path);
        }
        result
    }
}

impl Drop for AtomicWrite {
    fn drop(&mut self) {
        if self.file.take().is_some() {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Write `data` to `destination` atomically.
pub fn write_atomic(destination: &Path, data: &[u8]) -> io::Result<()> {
    let mut write = AtomicWrite::begin(destination)?;
    write.write_all(data)?;
    write.commit()
}

/// Rename `temp_path` over `destination` in a single step.
///
/// `fs::rename` replaces an existing file on both Unix and Windows. The
/// destination is never removed first, so a failed rename leaves it intact.
pub fn replace_file(temp_path: &Path, destination: &Path) -> io::Result<()> {
    fs::rename(temp_path, destination).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!(
                "Atomic rename to {} failed: {}",
                destination.display(),
                e
            ),
        )
    })
}
