//! Data model shared by the pipeline stages.

use std::{collections::HashMap, fmt};

/// Uppercase nucleotide sequence loaded from a single FASTA file.
///
/// Always non-empty and ASCII-only when produced by
/// [`load_genome`](crate::genome::load_genome), so one byte is one base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    seq: String,
}

impl Genome {
    pub(crate) fn new(seq: String) -> Self {
        Self { seq }
    }

    pub fn as_str(&self) -> &str {
        &self.seq
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.seq.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Half-open slice `[start, end)`, or `None` unless `start < end <= len`.
    pub fn slice(&self, start: usize, end: usize) -> Option<&[u8]> {
        if start < end {
            self.as_bytes().get(start..end)
        } else {
            None
        }
    }
}

impl From<&str> for Genome {
    fn from(seq: &str) -> Self {
        Self::new(seq.to_string())
    }
}

/// Half-open peak interval `[start, end)` in 0-based genome coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeakInterval {
    pub start: usize,
    pub end: usize,
}

impl PeakInterval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<(usize, usize)> for PeakInterval {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for PeakInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Map from TF name to an ordered list of items, iterated in first-seen
/// order of the TF names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TfMap<T> {
    entries: Vec<(String, Vec<T>)>,
    index: HashMap<String, usize>,
}

/// TF name -> validated peak intervals, in table row order.
pub type TfCoordinates = TfMap<PeakInterval>;

/// TF name -> extracted sequences, in interval order.
pub type TfSequences = TfMap<Vec<u8>>;

impl<T> Default for TfMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> TfMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the list for `name`, inserting an empty one on first sight.
    pub fn entry(&mut self, name: &str) -> &mut Vec<T> {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.entries.push((name.to_string(), Vec::new()));
                self.index.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        &mut self.entries[idx].1
    }

    pub fn push(&mut self, name: &str, item: T) {
        self.entry(name).push(item);
    }

    pub fn get(&self, name: &str) -> Option<&[T]> {
        self.index
            .get(name)
            .map(|&idx| self.entries[idx].1.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of TF names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of items across all TFs.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.entries
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}

impl<T> FromIterator<(String, Vec<T>)> for TfMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, Vec<T>)>>(iter: I) -> Self {
        let mut map = TfMap::new();
        for (name, items) in iter {
            map.entry(&name).extend(items);
        }
        map
    }
}
