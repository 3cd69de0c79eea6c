//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for listing every regular file
//! under a root directory. The resulting order is significant: the grouping
//! algorithm only looks ahead until the first mismatch, so the walker sorts
//! the children of each directory by file name to keep runs reproducible.
//!
//! # Features
//!
//! - Single-threaded, depth-first traversal
//! - Symbolic links are never followed and are not reported
//! - Hidden file filtering
//! - Fails on the first traversal error
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("./images"), WalkerConfig::default());
//! for file in walker.list_files().unwrap() {
//!     println!("{}", file.path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{FileEntry, ScanError, WalkerConfig};

/// Directory walker for ordered file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// List all regular files under the root.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotFound`] or [`ScanError::NotADirectory`] if the
    /// root is unusable, and the first error hit while reading directories.
    pub fn list_files(&self) -> Result<Vec<FileEntry>, ScanError> {
        self.check_root()?;

        let skip_hidden = self.config.skip_hidden;
        let walk = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && entry.depth() > 0 && is_hidden(entry)));

        let mut files = Vec::new();
        for entry in walk {
            let entry = entry.map_err(|e| self.handle_walk_error(e))?;
            let file_type = entry.file_type();

            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                log::trace!("Skipping non-regular entry: {}", entry.path().display());
                continue;
            }

            files.push(FileEntry::new(entry.into_path()));
        }

        log::debug!("Listed {} files under {}", files.len(), self.root.display());
        Ok(files)
    }

    fn check_root(&self) -> Result<(), ScanError> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScanError::NotFound(self.root.clone()),
            std::io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(self.root.clone()),
            _ => ScanError::Io {
                path: self.root.clone(),
                source: e,
            },
        })?;

        if metadata.is_dir() {
            Ok(())
        } else {
            Err(ScanError::NotADirectory(self.root.clone()))
        }
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);

        match error.into_io_error() {
            Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
                ScanError::PermissionDenied(path)
            }
            Some(io) if io.kind() == std::io::ErrorKind::NotFound => ScanError::NotFound(path),
            Some(io) => ScanError::Io { path, source: io },
            // Only symlink loops land here, and links are not followed.
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
