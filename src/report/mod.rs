//! Report generation for grouping results.
//!
//! The reporter derives two independent summaries from a
//! [`GroupList`](crate::duplicates::GroupList):
//!
//! - the group with the most members (first one wins a tie), and
//! - the group whose copies occupy the most space (a later group only wins
//!   if its total is strictly larger).
//!
//! Sizes are read on demand through a [`ContentComparator`], so a file that
//! disappears after grouping surfaces as an error here.
//!
//! Rendering lives in the submodules:
//! - [`text`]: human-readable report for the terminal
//! - [`json`]: machine-readable report for scripting
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::report::{summarize, text::TextReport};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, _stats) = finder.find_duplicates(Path::new(".")).unwrap();
//! let summary = summarize(&groups, finder.comparator()).unwrap();
//!
//! print!("{}", TextReport::new(summary.as_ref()));
//! ```

pub mod json;
pub mod text;

pub use json::{JsonOutput, RunReport};
pub use text::TextReport;

use serde::Serialize;
use std::path::PathBuf;

use crate::duplicates::DuplicateGroup;
use crate::scanner::{CompareError, ContentComparator};

/// One group singled out by the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    /// Position of the group in the scanned list
    pub index: usize,
    /// Path of the representative
    pub representative: PathBuf,
    /// Paths of the copies, in group order
    pub copies: Vec<PathBuf>,
    /// Summed size of the copies in bytes
    pub reclaimable_bytes: u64,
}

impl GroupSummary {
    fn new(index: usize, group: &DuplicateGroup, reclaimable_bytes: u64) -> Self {
        Self {
            index,
            representative: group.representative().path.clone(),
            copies: group.copies().iter().map(|f| f.path.clone()).collect(),
            reclaimable_bytes,
        }
    }

    /// Number of copies.
    #[must_use]
    pub fn copy_count(&self) -> usize {
        self.copies.len()
    }
}

/// Both summaries derived from a non-empty group list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Group with the greatest member count
    pub most_duplicates: GroupSummary,
    /// Group whose copies take up the most space
    pub most_space: GroupSummary,
}

/// Compute the report summaries for `groups`.
///
/// Returns `None` for an empty list. When every group is a singleton the
/// summaries still name the first group, with zero copies and zero bytes.
///
/// # Errors
///
/// Returns the first error raised while reading a copy's size.
pub fn summarize<C: ContentComparator>(
    groups: &[DuplicateGroup],
    comparator: &C,
) -> Result<Option<Summary>, CompareError> {
    if groups.is_empty() {
        return Ok(None);
    }

    let space = groups
        .iter()
        .map(|g| g.reclaimable_space(comparator))
        .collect::<Result<Vec<u64>, _>>()?;

    let mut most_duplicates = 0;
    let mut most_space = 0;
    for (i, group) in groups.iter().enumerate().skip(1) {
        if group.len() > groups[most_duplicates].len() {
            most_duplicates = i;
        }
        if space[i] > space[most_space] {
            most_space = i;
        }
    }

    log::debug!(
        "Report: most duplicates in group {}, most space in group {} ({} bytes)",
        most_duplicates + 1,
        most_space + 1,
        space[most_space]
    );

    Ok(Some(Summary {
        most_duplicates: GroupSummary::new(
            most_duplicates,
            &groups[most_duplicates],
            space[most_duplicates],
        ),
        most_space: GroupSummary::new(most_space, &groups[most_space], space[most_space]),
    }))
}
