//! Byte-for-byte content comparison.
//!
//! # Overview
//!
//! [`ContentComparator`] is the seam between the grouping algorithm and the
//! filesystem: the grouper only ever asks for a file's size or whether two
//! files hold the same bytes. [`FsComparator`] answers those questions by
//! streaming both files through fixed-size buffers, so memory use does not
//! depend on file size.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{CompareError, FileEntry};

/// Default read buffer size for content comparison (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Largest accepted read buffer size (64 MiB).
pub const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Source of file sizes and content equality.
pub trait ContentComparator {
    /// Byte length of `file`, read on demand.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be inspected.
    fn size(&self, file: &FileEntry) -> Result<u64, CompareError>;

    /// Whether `a` and `b` have identical full contents.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read.
    fn compare(&self, a: &FileEntry, b: &FileEntry) -> Result<bool, CompareError>;
}

impl<C: ContentComparator + ?Sized> ContentComparator for &C {
    fn size(&self, file: &FileEntry) -> Result<u64, CompareError> {
        (**self).size(file)
    }

    fn compare(&self, a: &FileEntry, b: &FileEntry) -> Result<bool, CompareError> {
        (**self).compare(a, b)
    }
}

/// Filesystem-backed comparator.
#[derive(Debug, Clone)]
pub struct FsComparator {
    buffer_size: usize,
}

impl Default for FsComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl FsComparator {
    /// Create a comparator with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Create a comparator with a custom buffer size, clamped to
    /// `1..=MAX_BUFFER_SIZE`.
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.clamp(1, MAX_BUFFER_SIZE),
        }
    }

    /// Buffer size used for each read.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn open(path: &Path) -> Result<File, CompareError> {
        File::open(path).map_err(|e| CompareError::from_io(path, e))
    }
}

impl ContentComparator for FsComparator {
    fn size(&self, file: &FileEntry) -> Result<u64, CompareError> {
        file.size()
    }

    fn compare(&self, a: &FileEntry, b: &FileEntry) -> Result<bool, CompareError> {
        // `fill` reads whole buffers, so plain files need no extra buffering.
        let mut reader_a = Self::open(a.path())?;
        let mut reader_b = Self::open(b.path())?;

        let mut buf_a = vec![0u8; self.buffer_size];
        let mut buf_b = vec![0u8; self.buffer_size];

        loop {
            let n_a =
                fill(&mut reader_a, &mut buf_a).map_err(|e| CompareError::from_io(a.path(), e))?;
            let n_b =
                fill(&mut reader_b, &mut buf_b).map_err(|e| CompareError::from_io(b.path(), e))?;

            if n_a != n_b || buf_a[..n_a] != buf_b[..n_b] {
                return Ok(false);
            }
            // Both readers hit EOF at the same offset.
            if n_a == 0 {
                return Ok(true);
            }
        }
    }
}

/// Read until `buf` is full or the reader is exhausted.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> FileEntry {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        FileEntry::new(path)
    }

    #[test]
    fn test_identical_files_are_equal() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a", b"hello world");
        let b = write(&dir, "b", b"hello world");

        assert!(FsComparator::new().compare(&a, &b).unwrap());
    }

    #[test]
    fn test_different_files_are_not_equal() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a", b"hello world");
        let b = write(&dir, "b", b"hello there");

        assert!(!FsComparator::new().compare(&a, &b).unwrap());
    }

    #[test]
    fn test_prefix_is_not_equal() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a", b"abc");
        let b = write(&dir, "b", b"abcd");

        let cmp = FsComparator::new();
        assert!(!cmp.compare(&a, &b).unwrap());
        assert!(!cmp.compare(&b, &a).unwrap());
    }

    #[test]
    fn test_empty_files() {
        let dir = TempDir::new().unwrap();
        let e1 = write(&dir, "e1", b"");
        let e2 = write(&dir, "e2", b"");
        let full = write(&dir, "full", b"x");

        let cmp = FsComparator::new();
        assert!(cmp.compare(&e1, &e2).unwrap());
        assert!(!cmp.compare(&e1, &full).unwrap());
        assert!(!cmp.compare(&full, &e2).unwrap());
    }

    #[test]
    fn test_reflexive() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a", b"same file twice");

        assert!(FsComparator::new().compare(&a, &a).unwrap());
    }

    #[test]
    fn test_difference_after_first_buffer() {
        let dir = TempDir::new().unwrap();
        let mut content = vec![b'z'; 100];
        let a = write(&dir, "a", &content);
        content[99] = b'q';
        let b = write(&dir, "b", &content);

        // Tiny buffer forces many reads before the mismatch shows up.
        let cmp = FsComparator::with_buffer_size(7);
        assert!(!cmp.compare(&a, &b).unwrap());
        assert!(cmp.compare(&a, &a).unwrap());
    }

    #[test]
    fn test_buffer_size_is_clamped() {
        assert_eq!(FsComparator::with_buffer_size(0).buffer_size(), 1);
        assert_eq!(FsComparator::new().buffer_size(), DEFAULT_BUFFER_SIZE);
        assert_eq!(
            FsComparator::with_buffer_size(usize::MAX).buffer_size(),
            MAX_BUFFER_SIZE
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a", b"data");
        let gone = FileEntry::new(dir.path().join("gone"));

        let err = FsComparator::new().compare(&a, &gone).unwrap_err();
        assert!(matches!(err, CompareError::NotFound(p) if p == gone.path));
    }

    #[test]
    fn test_size_delegates_to_metadata() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a", b"12345");
        assert_eq!(FsComparator::new().size(&a).unwrap(), 5);
    }
}
