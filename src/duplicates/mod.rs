//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Partitioning an ordered file list into equal-content groups
//! - Two grouping strategies (baseline and size-filtered)
//! - Duplicate group management

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, Strategy};
pub use groups::{DuplicateGroup, GroupList, GroupingStats};
