//! Per-sample read counts of two FASTQ files
//!
//! Reads are grouped by the part of their identifier before a separator
//! (e.g. `sampleA` for `sampleA_1234` with separator `_`), and the group sizes
//! of both files are reported side by side.

use std::{collections::HashMap, fmt, path::Path};

use memchr::memmem;

use crate::{
    reader::{FastqReader, SequenceReader},
    Result,
};

/// Read counts per identifier prefix, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdCounts {
    order: Vec<String>,
    counts: HashMap<String, usize>,
    total: usize,
}
impl IdCounts {
    /// Counts one identifier under its prefix
    pub fn add(&mut self, id: &str, separator: &str) {
        let key = prefix(id, separator);
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.to_string());
                self.counts.insert(key.to_string(), 1);
            }
        }
        self.total += 1;
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.counts.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Prefixes in the order they were first seen
    pub fn keys(&self) -> &[String] {
        &self.order
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// Returns the part of `id` before the first occurrence of `separator`
///
/// An empty separator keeps the whole identifier.
pub fn prefix<'a>(id: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        return id;
    }
    match memmem::find(id.as_bytes(), separator.as_bytes()) {
        Some(pos) => &id[..pos],
        None => id,
    }
}

pub fn count_records<S: SequenceReader>(mut reader: S, separator: &str) -> Result<IdCounts> {
    let mut counts = IdCounts::default();
    while let Some(record) = reader.next_record() {
        counts.add(record?.id(), separator);
    }
    Ok(counts)
}

pub fn count_ids<P: AsRef<Path>>(path: P, separator: &str) -> Result<IdCounts> {
    count_records(FastqReader::from_path(path)?, separator)
}

/// One line of a comparison report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub name: String,
    pub file1: usize,
    pub file2: usize,
}
impl ComparisonRow {
    pub fn difference(&self) -> i64 {
        self.file1 as i64 - self.file2 as i64
    }

    /// Difference relative to the first file, `None` when the first file has no reads
    pub fn difference_percent(&self) -> Option<f64> {
        if self.file1 == 0 {
            None
        } else {
            Some(self.difference() as f64 / self.file1 as f64 * 100.0)
        }
    }
}
impl fmt::Display for ComparisonRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "\tfile1:  {}", self.file1)?;
        writeln!(f, "\tfile2:  {}", self.file2)?;
        writeln!(f, "\tdifference:  {}", self.difference())?;
        // `{:?}` keeps the fractional part, so whole percentages print as `25.0`
        match self.difference_percent() {
            Some(pct) => writeln!(f, "\tdifference (%):  {pct:?}"),
            None => writeln!(f, "\tdifference (%):  NA"),
        }
    }
}

/// Side-by-side read counts of two files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub total: ComparisonRow,
}
impl Comparison {
    /// Builds the report rows
    ///
    /// Both first-seen key lists are walked in parallel. A key from the first
    /// file always yields a row; a key from the second file yields a row only
    /// when the first file never saw it.
    pub fn new(first: &IdCounts, second: &IdCounts) -> Self {
        let mut rows = Vec::new();
        let width = first.keys().len().max(second.keys().len());
        for idx in 0..width {
            if let Some(key) = first.keys().get(idx) {
                rows.push(ComparisonRow {
                    name: key.clone(),
                    file1: first.get(key).unwrap_or(0),
                    file2: second.get(key).unwrap_or(0),
                });
            }
            if let Some(key) = second.keys().get(idx) {
                if !first.contains(key) {
                    rows.push(ComparisonRow {
                        name: key.clone(),
                        file1: 0,
                        file2: second.get(key).unwrap_or(0),
                    });
                }
            }
        }
        let total = ComparisonRow {
            name: "total reads: ".to_string(),
            file1: first.total(),
            file2: second.total(),
        };
        Self { rows, total }
    }
}
impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            write!(f, "{row}")?;
        }
        writeln!(f, "---------------")?;
        write!(f, "{}", self.total)
    }
}

/// Counts both files and compares them
pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(
    file1: P,
    file2: Q,
    separator: &str,
) -> Result<Comparison> {
    let first = count_ids(file1, separator)?;
    let second = count_ids(file2, separator)?;
    Ok(Comparison::new(&first, &second))
}
