//! Row configurations: the per-term output of a treatment strategy.

use std::fmt;

use bitsift_common::{error::Error, Result};
use smallvec::SmallVec;

use crate::term::Rank;

/// A single `(rank, count)` entry: `count` rows at the given rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowConfigurationEntry {
    rank: Rank,
    count: u8,
}

impl RowConfigurationEntry {
    pub fn new(rank: Rank, count: u8) -> RowConfigurationEntry {
        RowConfigurationEntry { rank, count }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}

/// An ordered collection of [`RowConfigurationEntry`] values describing all
/// rows a term occupies.
///
/// Strategies produce entries low rank first and prepend each one, so a
/// finished configuration lists ranks in descending order. The container is
/// bounded by [`RowConfiguration::CAPACITY`]; exceeding it is a
/// `CapacityExceeded` error, which well-formed strategies never trigger
/// because they emit at most one entry per rank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowConfiguration {
    entries: SmallVec<[RowConfigurationEntry; CAPACITY]>,
}

const CAPACITY: usize = 10;

impl RowConfiguration {
    /// Maximum number of entries a configuration can hold.
    pub const CAPACITY: usize = CAPACITY;

    /// Creates an empty configuration.
    pub fn new() -> RowConfiguration {
        RowConfiguration::default()
    }

    /// Prepends an entry.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` when the configuration already holds
    /// [`RowConfiguration::CAPACITY`] entries.
    pub fn push_front(&mut self, entry: RowConfigurationEntry) -> Result<()> {
        if self.entries.len() >= Self::CAPACITY {
            return Err(Error::capacity_exceeded(Self::CAPACITY));
        }
        self.entries.insert(0, entry);
        Ok(())
    }

    /// Iterates entries front to back.
    pub fn iter(&self) -> std::slice::Iter<'_, RowConfigurationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of rows across all entries: the term's row footprint.
    pub fn total_row_count(&self) -> u32 {
        self.entries.iter().map(|e| e.count() as u32).sum()
    }
}

impl<'a> IntoIterator for &'a RowConfiguration {
    type Item = &'a RowConfigurationEntry;
    type IntoIter = std::slice::Iter<'a, RowConfigurationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for RowConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "({}, {})", entry.rank(), entry.count())?;
        }
        Ok(())
    }
}
