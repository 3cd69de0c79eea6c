//! Duplicate finder implementation.
//!
//! # Overview
//!
//! The finder partitions an ordered list of files into groups of equal
//! content. Each round takes the first remaining file as the representative
//! and scans the rest of the list left to right:
//!
//! - [`Strategy::Baseline`] compares every candidate's full content and stops
//!   the round at the first mismatch.
//! - [`Strategy::SizeFiltered`] checks sizes first. A size mismatch stops the
//!   round without reading any content; a same-size content mismatch does
//!   not stop it.
//!
//! Matched candidates leave the list. Everything else stays, in order, and
//! becomes the input of the next round. Because a round ends early, true
//! duplicates separated by a non-matching file can end up in different
//! groups; both strategies keep that behaviour.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig, Strategy};
//! use std::path::Path;
//!
//! let config = FinderConfig::default().with_strategy(Strategy::SizeFiltered);
//! let finder = DuplicateFinder::new(config);
//! let (groups, stats) = finder.find_duplicates(Path::new("./images")).unwrap();
//!
//! println!("{} groups after {} comparisons", groups.len(), stats.comparisons);
//! ```

use serde::Serialize;
use std::fmt;
use std::path::Path;

use super::groups::{DuplicateGroup, GroupList, GroupingStats};
use crate::scanner::{
    CompareError, ContentComparator, FileEntry, FsComparator, ScanError, Walker, WalkerConfig,
    DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE,
};

/// Grouping algorithm variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Full comparison of every candidate; any mismatch ends the round.
    #[default]
    Baseline,
    /// Size check before comparing; only a size mismatch ends the round.
    SizeFiltered,
}

impl Strategy {
    /// Machine-readable name of the strategy.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::SizeFiltered => "size-filtered",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that abort a grouping pass.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root is unusable or directory traversal failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Reading a size or comparing contents failed.
    #[error(transparent)]
    Compare(#[from] CompareError),
}

/// Configuration for the duplicate finder.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Grouping algorithm to run.
    pub strategy: Strategy,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Read buffer size for content comparison.
    pub buffer_size: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            walker_config: WalkerConfig::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl FinderConfig {
    /// Set the grouping strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the comparison buffer size, clamped to `1..=MAX_BUFFER_SIZE`.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.clamp(1, MAX_BUFFER_SIZE);
        self
    }
}

/// Outcome of testing one candidate against a round's representative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// Same content; the candidate joins the group.
    Member,
    /// Different content; keep scanning.
    Pass,
    /// Mismatch that ends the round.
    Stop,
}

/// Duplicate finder that groups files by exact content.
#[derive(Debug, Clone)]
pub struct DuplicateFinder<C = FsComparator> {
    config: FinderConfig,
    comparator: C,
}

impl DuplicateFinder<FsComparator> {
    /// Create a finder backed by the filesystem.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let comparator = FsComparator::with_buffer_size(config.buffer_size);
        Self { config, comparator }
    }

    /// Create a finder with the default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }
}

impl<C: ContentComparator> DuplicateFinder<C> {
    /// Create a finder with a custom comparator.
    #[must_use]
    pub fn with_comparator(config: FinderConfig, comparator: C) -> Self {
        Self { config, comparator }
    }

    /// The comparator used for sizes and contents.
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// List every regular file under `root` and group it.
    ///
    /// # Errors
    ///
    /// Fails if `root` is missing or not a directory, if traversal fails, or
    /// if any size or content read fails during grouping.
    pub fn find_duplicates(&self, root: &Path) -> Result<(GroupList, GroupingStats), FinderError> {
        let walker = Walker::new(root, self.config.walker_config.clone());
        let files = walker.list_files()?;
        log::info!("Found {} files under {}", files.len(), root.display());

        self.group_files(files)
    }

    /// Partition `files` into equal-content groups, preserving input order.
    ///
    /// Every input file ends up in exactly one group. Groups of one member
    /// are unique files.
    ///
    /// # Errors
    ///
    /// Returns the first size or comparison error; the pass is abandoned.
    pub fn group_files(
        &self,
        files: Vec<FileEntry>,
    ) -> Result<(GroupList, GroupingStats), FinderError> {
        let strategy = self.config.strategy;
        let mut stats = GroupingStats {
            total_files: files.len(),
            ..GroupingStats::default()
        };

        // Rounds shuffle indices; the entries stay put until the end.
        let mut worklist: Vec<usize> = (0..files.len()).collect();
        let mut rounds: Vec<Vec<usize>> = Vec::new();

        while let Some((&head, rest)) = worklist.split_first() {
            let mut members = vec![head];
            let mut remaining = Vec::with_capacity(rest.len());
            let mut stopped = false;

            for &candidate in rest {
                if stopped {
                    remaining.push(candidate);
                    continue;
                }
                let verdict = self.examine(
                    &files[head],
                    &files[candidate],
                    &mut stats,
                )?;
                match verdict {
                    Verdict::Member => members.push(candidate),
                    Verdict::Pass => remaining.push(candidate),
                    Verdict::Stop => {
                        log::trace!(
                            "{}: round for {} stopped at {}",
                            strategy,
                            files[head].path.display(),
                            files[candidate].path.display()
                        );
                        stopped = true;
                        remaining.push(candidate);
                    }
                }
            }

            if members.len() > 1 {
                log::debug!(
                    "Duplicate group {}: {} with {} copies",
                    rounds.len() + 1,
                    files[head].path.display(),
                    members.len() - 1
                );
            }
            rounds.push(members);
            worklist = remaining;
        }

        let mut slots: Vec<Option<FileEntry>> = files.into_iter().map(Some).collect();
        let groups: GroupList = rounds
            .into_iter()
            .map(|members| {
                DuplicateGroup::new(members.into_iter().filter_map(|i| slots[i].take()).collect())
            })
            .collect();

        stats.record_groups(&groups);
        log::info!(
            "Grouping complete ({}): {} groups, {} with duplicates, {} comparisons, {} size checks",
            strategy,
            stats.groups,
            stats.duplicate_groups,
            stats.comparisons,
            stats.size_checks
        );

        Ok((groups, stats))
    }

    /// Test one candidate against the round's representative.
    ///
    /// Sizes are read fresh on every check, the representative's included.
    fn examine(
        &self,
        head: &FileEntry,
        candidate: &FileEntry,
        stats: &mut GroupingStats,
    ) -> Result<Verdict, CompareError> {
        match self.config.strategy {
            Strategy::Baseline => {
                stats.comparisons += 1;
                if self.comparator.compare(head, candidate)? {
                    Ok(Verdict::Member)
                } else {
                    Ok(Verdict::Stop)
                }
            }
            Strategy::SizeFiltered => {
                stats.size_checks += 1;
                if self.comparator.size(head)? != self.comparator.size(candidate)? {
                    stats.size_mismatches += 1;
                    return Ok(Verdict::Stop);
                }

                stats.comparisons += 1;
                if self.comparator.compare(head, candidate)? {
                    Ok(Verdict::Member)
                } else {
                    Ok(Verdict::Pass)
                }
            }
        }
    }
}
