//! Line sequences and their odd/even partition

/// A single line as raw bytes, terminator included
pub type Line = Vec<u8>;

/// Ordered lines of a source file, each keeping its original terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<Line>,
}

impl LineSequence {
    /// Split raw content into lines on `\n`.
    ///
    /// The `\n` stays attached to the line it ends, so a `\r\n` pair is kept
    /// intact and a trailing line without terminator is kept as is.
    pub fn from_bytes(content: &[u8]) -> Self {
        let lines = content
            .split_inclusive(|b| *b == b'\n')
            .map(|line| line.to_vec())
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}

impl From<Vec<Line>> for LineSequence {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

impl IntoIterator for LineSequence {
    type Item = Line;
    type IntoIter = std::vec::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

/// Lines split by 1-based position parity.
///
/// `odd` holds lines 1, 3, 5, ... (zero-based indices 0, 2, 4, ...) and
/// `even` holds lines 2, 4, 6, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    pub odd: Vec<T>,
    pub even: Vec<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            odd: Vec::new(),
            even: Vec::new(),
        }
    }
}

impl<T> Partition<T> {
    /// Total number of lines across both halves
    pub fn len(&self) -> usize {
        self.odd.len() + self.even.len()
    }

    pub fn is_empty(&self) -> bool {
        self.odd.is_empty() && self.even.is_empty()
    }

    /// Rebuild the original order: `odd[i]` at `2i`, `even[i]` at `2i + 1`
    pub fn interleave(self) -> Vec<T> {
        let mut merged = Vec::with_capacity(self.len());
        let mut even = self.even.into_iter();
        for line in self.odd {
            merged.push(line);
            if let Some(next) = even.next() {
                merged.push(next);
            }
        }
        merged.extend(even);
        merged
    }
}
