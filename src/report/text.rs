//! Human-readable report output.

use bytesize::ByteSize;
use std::fmt;

use super::{GroupSummary, Summary};

/// Banner printed at the top of every text report.
pub const BANNER: &str = "== == Duplicate File Finder Report == ==";

/// Message printed when the scan produced no groups at all.
pub const NO_DUPLICATES: &str = "No duplicates found.";

/// Text renderer for a report summary.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    summary: Option<&'a Summary>,
}

impl<'a> TextReport<'a> {
    /// Create a renderer; `None` renders the "no duplicates" report.
    #[must_use]
    pub fn new(summary: Option<&'a Summary>) -> Self {
        Self { summary }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;

        let Some(summary) = self.summary else {
            return writeln!(f, "{NO_DUPLICATES}");
        };

        writeln!(f, "The file with the most duplicates is:")?;
        write_group(f, &summary.most_duplicates)?;

        let bytes = summary.most_space.reclaimable_bytes;
        writeln!(
            f,
            "The most disk space ({bytes} bytes, {}) could be recovered by deleting copies of this file:",
            ByteSize::b(bytes)
        )?;
        write_group(f, &summary.most_space)
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, group: &GroupSummary) -> fmt::Result {
    writeln!(f, "{}", group.representative.display())?;
    writeln!(
        f,
        "Here {} its {} {}:",
        if group.copy_count() == 1 { "is" } else { "are" },
        group.copy_count(),
        if group.copy_count() == 1 { "copy" } else { "copies" }
    )?;
    for copy in &group.copies {
        writeln!(f, "  {}", copy.display())?;
    }
    Ok(())
}
