//! Content groups produced by a grouping pass.
//!
//! # Overview
//!
//! A [`DuplicateGroup`] is an ordered list of files believed to share the
//! same bytes. The first member is the *representative*; every other member
//! is a *copy* whose removal would free disk space. A [`GroupList`] keeps
//! every group from one scan, singletons included, in discovery order.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::DuplicateGroup;
//! use dupescan::scanner::FileEntry;
//!
//! let group = DuplicateGroup::new(vec![
//!     FileEntry::new("/photos/a.jpg"),
//!     FileEntry::new("/backup/a.jpg"),
//! ]);
//!
//! assert_eq!(group.representative().path.to_str(), Some("/photos/a.jpg"));
//! assert_eq!(group.duplicate_count(), 1);
//! ```

use serde::Serialize;
use std::path::PathBuf;

use crate::scanner::{CompareError, ContentComparator, FileEntry};

/// All groups discovered in one scan, in discovery order.
pub type GroupList = Vec<DuplicateGroup>;

/// Files believed to share identical content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Members in discovery order; never empty
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Create a new group.
    ///
    /// # Panics
    ///
    /// Debug assertion fails if `files` is empty.
    #[must_use]
    pub fn new(files: Vec<FileEntry>) -> Self {
        debug_assert!(!files.is_empty(), "a group needs a representative");
        Self { files }
    }

    /// First-found member of the group.
    #[must_use]
    pub fn representative(&self) -> &FileEntry {
        &self.files[0]
    }

    /// Every member except the representative.
    #[must_use]
    pub fn copies(&self) -> &[FileEntry] {
        self.files.get(1..).unwrap_or_default()
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check if this group holds actual duplicates (2+ files).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }

    /// Number of duplicate copies (total - 1 representative).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Summed size of the copies, read on demand through `comparator`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while reading a copy's size.
    pub fn reclaimable_space<C: ContentComparator>(
        &self,
        comparator: &C,
    ) -> Result<u64, CompareError> {
        let mut total = 0u64;
        for file in self.copies() {
            total += comparator.size(file)?;
        }
        Ok(total)
    }

    /// Get just the paths of files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Counters collected during one grouping pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Files handed to the grouper
    pub total_files: usize,
    /// Groups produced, singletons included
    pub groups: usize,
    /// Groups with two or more members
    pub duplicate_groups: usize,
    /// Files that are copies of some representative
    pub duplicate_files: usize,
    /// Full content comparisons performed
    pub comparisons: usize,
    /// Size checks performed (size-filtered strategy only)
    pub size_checks: usize,
    /// Size checks that ended a round early
    pub size_mismatches: usize,
}

impl GroupingStats {
    /// Fill in the group-derived counters from a finished list.
    pub(crate) fn record_groups(&mut self, groups: &[DuplicateGroup]) {
        self.groups = groups.len();
        self.duplicate_groups = groups.iter().filter(|g| g.has_duplicates()).count();
        self.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedSizes(HashMap<PathBuf, u64>);

    impl ContentComparator for FixedSizes {
        fn size(&self, file: &FileEntry) -> Result<u64, CompareError> {
            self.0
                .get(&file.path)
                .copied()
                .ok_or_else(|| CompareError::NotFound(file.path.clone()))
        }

        fn compare(&self, _a: &FileEntry, _b: &FileEntry) -> Result<bool, CompareError> {
            unreachable!("groups never compare contents")
        }
    }

    fn group(names: &[&str]) -> DuplicateGroup {
        DuplicateGroup::new(names.iter().map(|n| FileEntry::new(*n)).collect())
    }

    #[test]
    fn test_representative_and_copies() {
        let g = group(&["a", "b", "c"]);
        assert_eq!(g.representative(), &FileEntry::new("a"));
        assert_eq!(g.copies(), &[FileEntry::new("b"), FileEntry::new("c")]);
        assert_eq!(g.len(), 3);
        assert_eq!(g.duplicate_count(), 2);
        assert!(g.has_duplicates());
    }

    #[test]
    fn test_singleton_group() {
        let g = group(&["only"]);
        assert!(g.copies().is_empty());
        assert_eq!(g.duplicate_count(), 0);
        assert!(!g.has_duplicates());
        assert!(!g.is_empty());
    }

    #[test]
    fn test_reclaimable_space_skips_representative() {
        let sizes = FixedSizes(HashMap::from([
            (PathBuf::from("a"), 1000),
            (PathBuf::from("b"), 100),
            (PathBuf::from("c"), 200),
        ]));
        assert_eq!(group(&["a", "b", "c"]).reclaimable_space(&sizes).unwrap(), 300);
        assert_eq!(group(&["a"]).reclaimable_space(&sizes).unwrap(), 0);
    }

    #[test]
    fn test_reclaimable_space_propagates_errors() {
        let sizes = FixedSizes(HashMap::from([(PathBuf::from("a"), 1)]));
        let err = group(&["a", "missing"]).reclaimable_space(&sizes).unwrap_err();
        assert!(matches!(err, CompareError::NotFound(_)));
    }

    #[test]
    fn test_record_groups() {
        let groups = vec![group(&["a", "b"]), group(&["c"]), group(&["d", "e", "f"])];
        let mut stats = GroupingStats::default();
        stats.record_groups(&groups);

        assert_eq!(stats.groups, 3);
        assert_eq!(stats.duplicate_groups, 2);
        assert_eq!(stats.duplicate_files, 3);
    }

    #[test]
    fn test_paths() {
        let g = group(&["x", "y"]);
        assert_eq!(g.paths(), vec![PathBuf::from("x"), PathBuf::from("y")]);
    }
}
