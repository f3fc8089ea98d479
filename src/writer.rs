use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, ErrorKind, Write},
    path::Path,
};

use auto_impl::auto_impl;

use crate::{
    error::{ValidationError, WriteError},
    Record, Result,
};

/// Sink for FASTQ records
#[auto_impl(&mut, Box)]
pub trait SequenceWriter {
    /// Writes one record as `@id`, sequence, `+`, quality
    fn write(&mut self, id: &str, seq: &str, qual: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write(record.id(), record.seq(), record.qual())
    }
}

/// Write a single FASTQ entry to the writer.
pub fn write_fastq<W: Write>(writer: &mut W, id: &[u8], seq: &[u8], qual: &[u8]) -> Result<()> {
    writer.write_all(b"@")?;
    writer.write_all(id)?;
    writer.write_all(b"\n")?;
    writer.write_all(seq)?;
    writer.write_all(b"\n+\n")?;
    writer.write_all(qual)?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub struct FastqWriter<W: Write> {
    /// Inner writer
    inner: BufWriter<W>,

    /// Number of records written
    records_written: usize,
}
impl FastqWriter<File> {
    /// Creates a new output file, refusing to replace an existing one
    pub fn create_new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let handle = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| match source.kind() {
                ErrorKind::AlreadyExists => ValidationError::OutputExists(path.to_path_buf()).into(),
                _ => crate::Error::from(WriteError::Create {
                    path: path.to_path_buf(),
                    source,
                }),
            })?;
        Ok(Self::new(handle))
    }
}
impl<W: Write> FastqWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            records_written: 0,
        }
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flushes all buffered records and returns the inner writer
    pub fn into_inner(self) -> Result<W> {
        match self.inner.into_inner() {
            Ok(inner) => Ok(inner),
            Err(e) => Err(std::io::Error::from(e).into()),
        }
    }
}
impl<W: Write> SequenceWriter for FastqWriter<W> {
    fn write(&mut self, id: &str, seq: &str, qual: &str) -> Result<()> {
        write_fastq(
            &mut self.inner,
            id.as_bytes(),
            seq.as_bytes(),
            qual.as_bytes(),
        )?;
        self.records_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
