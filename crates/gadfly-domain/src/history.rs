//! Bounded history - a ring buffer that evicts the oldest entry first

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::VecDeque;

/// Ordered list holding at most `CAP` entries
///
/// Pushing onto a full history drops the oldest entry. It serializes as a plain
/// list; loading a longer list keeps only the newest `CAP` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T, const CAP: usize> {
    entries: VecDeque<T>,
}

impl<T, const CAP: usize> BoundedHistory<T, CAP> {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(CAP),
        }
    }

    /// Maximum number of entries kept
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Append an entry, returning the evicted one if the history was full
    pub fn push(&mut self, entry: T) -> Option<T> {
        let evicted = if self.entries.len() >= CAP {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Number of entries held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest-first iterator
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The newest `n` entries, oldest first
    pub fn latest(&self, n: usize) -> impl Iterator<Item = &T> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&T> {
        self.entries.back()
    }
}

impl<T, const CAP: usize> Default for BoundedHistory<T, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAP: usize> FromIterator<T> for BoundedHistory<T, CAP> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut history = Self::new();
        for entry in iter {
            history.push(entry);
        }
        history
    }
}

impl<T: Serialize, const CAP: usize> Serialize for BoundedHistory<T, CAP> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

impl<'de, T: Deserialize<'de>, const CAP: usize> Deserialize<'de> for BoundedHistory<T, CAP> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<T>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
