//! Scanner module for directory traversal and content comparison.
//!
//! This module provides functionality for:
//! - Ordered, single-threaded directory walking using walkdir
//! - Byte-for-byte content comparison of two files
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`compare`]: The [`ContentComparator`] seam and its filesystem implementation
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{ContentComparator, FsComparator, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let files = walker.list_files().unwrap();
//!
//! let comparator = FsComparator::new();
//! if let [a, b, ..] = files.as_slice() {
//!     println!("equal: {}", comparator.compare(a, b).unwrap());
//! }
//! ```

pub mod compare;
pub mod walker;

use serde::Serialize;
use std::path::{Path, PathBuf};

// Re-export main types
pub use compare::{ContentComparator, FsComparator, DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};
pub use walker::Walker;

/// Handle to a discovered regular file.
///
/// Only the path is stored. The size is read from filesystem metadata every
/// time [`FileEntry::size`] is called, so a file that changes or disappears
/// after listing is noticed by whoever asks next.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FileEntry {
    /// Path to the file as produced by traversal
    pub path: PathBuf,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Borrow the path of this entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current byte length of the file.
    ///
    /// # Errors
    ///
    /// Returns a [`CompareError`] if the metadata cannot be read.
    pub fn size(&self) -> Result<u64, CompareError> {
        std::fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| CompareError::from_io(&self.path, e))
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,
}

impl WalkerConfig {
    /// Create a new configuration from CLI arguments.
    #[must_use]
    pub fn new(skip_hidden: bool) -> Self {
        Self { skip_hidden }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while reading sizes or comparing contents.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// The file disappeared between listing and comparison.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl CompareError {
    /// Classify an I/O error raised while touching `path`.
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
