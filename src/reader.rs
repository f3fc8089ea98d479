use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use auto_impl::auto_impl;
use seq_io::fastq::{self, Record as _};

use crate::{error::ReadError, Record, Result};

/// Source of FASTQ records
///
/// Implemented by [`FastqReader`]; anything that can yield owned [`Record`]s in file order
/// can stand in for it (e.g. in tests).
#[auto_impl(&mut, Box)]
pub trait SequenceReader {
    /// Returns the next record, `None` at the end of the stream
    fn next_record(&mut self) -> Option<Result<Record>>;

    /// Returns the number of records yielded so far
    fn n_processed(&self) -> usize;
}

pub struct FastqReader<R: Read> {
    inner: fastq::Reader<R>,
    /// Label used in error messages (the file path, or `-` for in-memory readers)
    path: PathBuf,
    n_processed: usize,
}
impl FastqReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let handle = File::open(path).map_err(|source| ReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_label(handle, path))
    }
}
impl<R: Read> FastqReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_label(inner, "-")
    }

    fn with_label<P: AsRef<Path>>(inner: R, path: P) -> Self {
        Self {
            inner: fastq::Reader::new(inner),
            path: path.as_ref().to_path_buf(),
            n_processed: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl<R: Read> SequenceReader for FastqReader<R> {
    fn next_record(&mut self) -> Option<Result<Record>> {
        let record = match self.inner.next()? {
            Ok(record) => record,
            Err(source) => {
                return Some(Err(ReadError::Parse {
                    path: self.path.clone(),
                    source,
                }
                .into()))
            }
        };
        self.n_processed += 1;
        Some(Record::from_parts(record.head(), record.seq(), record.qual()))
    }

    fn n_processed(&self) -> usize {
        self.n_processed
    }
}

/// Drains a reader into memory, preserving record order
pub fn read_all<S: SequenceReader>(mut reader: S) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    while let Some(record) = reader.next_record() {
        records.push(record?);
    }
    Ok(records)
}

#[cfg(test)]
mod testing {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_read_records_in_order() -> Result<()> {
        let data = b"@r1 desc\nACGT\n+\nIIII\n@r2\nGGCC\n+\n!!!!\n";
        let mut reader = FastqReader::new(&data[..]);

        let first = reader.next_record().unwrap()?;
        assert_eq!(first, Record::new("r1", "ACGT", "IIII"));
        let second = reader.next_record().unwrap()?;
        assert_eq!(second, Record::new("r2", "GGCC", "!!!!"));
        assert!(reader.next_record().is_none());
        assert_eq!(reader.n_processed(), 2);
        Ok(())
    }

    #[test]
    fn test_read_all_empty() -> Result<()> {
        let records = read_all(FastqReader::new(&b""[..]))?;
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_error() {
        let data = b">not fastq\nACGT\n";
        let result = read_all(FastqReader::new(&data[..]));
        assert!(matches!(
            result,
            Err(crate::Error::ReadError(ReadError::Parse { .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = FastqReader::from_path("does/not/exist.fastq");
        assert!(matches!(
            result,
            Err(crate::Error::ReadError(ReadError::Open { .. }))
        ));
    }
}
