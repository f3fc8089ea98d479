//! In-memory read sets
//!
//! A catalog holds every record of every input file, in file order and
//! within-file order. A record's position inside its [`InputSet`] is its
//! identity for sampling.

use std::path::{Path, PathBuf};

use log::info;

use crate::{
    reader::{read_all, FastqReader},
    sampler::SelectionIndex,
    Record, Result,
};

/// All records of one input file
#[derive(Debug, Clone)]
pub struct InputSet {
    path: PathBuf,
    records: Vec<Record>,
}
impl InputSet {
    pub fn new<P: AsRef<Path>>(path: P, records: Vec<Record>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records,
        }
    }

    /// Reads a FASTQ file fully into memory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = FastqReader::from_path(&path)?;
        let records = read_all(reader)?;
        Ok(Self::new(path, records))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Ordered collection of input sets, one per input file
#[derive(Debug, Clone, Default)]
pub struct InputCatalog {
    sets: Vec<InputSet>,
}
impl InputCatalog {
    pub fn new(sets: Vec<InputSet>) -> Self {
        Self { sets }
    }

    /// Loads every file in order; the first failure aborts the whole catalog
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut sets = Vec::with_capacity(paths.len());
        for path in paths {
            let set = InputSet::load(path)?;
            info!("Loaded {} reads from {}", set.len(), set.path().display());
            sets.push(set);
        }
        Ok(Self::new(sets))
    }

    /// Builds a catalog from records already in memory, labelling each set by position
    pub fn from_records(records: Vec<Vec<Record>>) -> Self {
        let sets = records
            .into_iter()
            .enumerate()
            .map(|(idx, records)| InputSet::new(format!("#{idx}"), records))
            .collect();
        Self::new(sets)
    }

    pub fn sets(&self) -> &[InputSet] {
        &self.sets
    }

    /// Number of input files
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Read counts per file, in file order
    pub fn counts(&self) -> Vec<usize> {
        self.sets.iter().map(InputSet::len).collect()
    }

    /// Total number of reads across all files
    pub fn total(&self) -> usize {
        self.sets.iter().map(InputSet::len).sum()
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.sets.iter().map(InputSet::path).collect()
    }

    /// Resolves a selection to its record
    pub fn get(&self, selection: SelectionIndex) -> Option<&Record> {
        self.sets
            .get(selection.file)
            .and_then(|set| set.records.get(selection.record))
    }
}

#[cfg(test)]
mod testing {
    use std::io::Write;

    use super::*;
    use anyhow::Result;

    fn write_fastq(path: &Path, prefix: &str, n: usize) -> Result<()> {
        let mut handle = std::fs::File::create(path)?;
        for idx in 0..n {
            writeln!(handle, "@{prefix}_{idx} sample\nACGT\n+\nIIII")?;
        }
        Ok(())
    }

    #[test]
    fn test_load_preserves_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let a = dir.path().join("a.fastq");
        let b = dir.path().join("b.fastq");
        write_fastq(&a, "a", 3)?;
        write_fastq(&b, "b", 5)?;

        let catalog = InputCatalog::load(&[&a, &b])?;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.counts(), vec![3, 5]);
        assert_eq!(catalog.total(), 8);
        assert_eq!(catalog.paths(), vec![a.as_path(), b.as_path()]);

        let record = catalog.get(SelectionIndex::new(1, 4)).unwrap();
        assert_eq!(record.id(), "b_4");
        assert!(catalog.get(SelectionIndex::new(0, 3)).is_none());
        assert!(catalog.get(SelectionIndex::new(2, 0)).is_none());
        Ok(())
    }

    #[test]
    fn test_load_aborts_on_missing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let a = dir.path().join("a.fastq");
        write_fastq(&a, "a", 3)?;
        let missing = dir.path().join("missing.fastq");

        assert!(InputCatalog::load(&[&a, &missing]).is_err());
        Ok(())
    }

    #[test]
    fn test_from_records() {
        let catalog = InputCatalog::from_records(vec![
            vec![Record::new("x", "A", "I")],
            Vec::new(),
        ]);
        assert_eq!(catalog.counts(), vec![1, 0]);
        assert!(catalog.sets()[1].is_empty());
        assert_eq!(catalog.sets()[0].path(), Path::new("#0"));
    }
}
