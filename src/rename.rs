use std::path::Path;

use log::info;

use crate::{
    reader::{FastqReader, SequenceReader},
    validate::check_outputs_absent,
    FastqWriter, Result, SequenceWriter,
};

/// Rewrites every identifier of a FASTQ file as `{base}{n}{suffix}`, with `n` counting from 1
///
/// Sequences and qualities are copied unchanged. Returns the number of records written.
pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    base: &str,
    suffix: Option<&str>,
) -> Result<usize> {
    check_outputs_absent(&[output.as_ref()])?;
    let reader = FastqReader::from_path(input.as_ref())?;
    let writer = FastqWriter::create_new(output.as_ref())?;
    let written = rename_records(reader, writer, base, suffix.unwrap_or_default())?;
    info!(
        "Renamed {written} reads from {} into {}",
        input.as_ref().display(),
        output.as_ref().display()
    );
    Ok(written)
}

/// Streams records from `reader` to `writer`, replacing identifiers
pub fn rename_records<S: SequenceReader, W: SequenceWriter>(
    mut reader: S,
    mut writer: W,
    base: &str,
    suffix: &str,
) -> Result<usize> {
    let mut ibuf = itoa::Buffer::new();
    let mut id = String::with_capacity(base.len() + suffix.len() + 20);
    let mut n = 0usize;
    while let Some(record) = reader.next_record() {
        let record = record?;
        n += 1;

        id.clear();
        id.push_str(base);
        id.push_str(ibuf.format(n));
        id.push_str(suffix);
        writer.write(&id, record.seq(), record.qual())?;
    }
    writer.flush()?;
    Ok(n)
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::{Error, ValidationError};
    use anyhow::Result;

    #[test]
    fn test_rename_records() -> Result<()> {
        let data = b"@old_a desc\nACGT\n+\nIIII\n@old_b\nTT\n+\n##\n";
        let mut out = FastqWriter::new(Vec::new());
        let n = rename_records(FastqReader::new(&data[..]), &mut out, "sample_", "/1")?;
        assert_eq!(n, 2);
        assert_eq!(
            out.into_inner()?,
            b"@sample_1/1\nACGT\n+\nIIII\n@sample_2/1\nTT\n+\n##\n"
        );
        Ok(())
    }

    #[test]
    fn test_rename_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.fastq");
        let output = dir.path().join("out.fastq");
        std::fs::write(&input, b"@x\nA\n+\nI\n")?;

        assert_eq!(rename(&input, &output, "read", None)?, 1);
        assert_eq!(std::fs::read(&output)?, b"@read1\nA\n+\nI\n");

        // second attempt must not overwrite
        let result = rename(&input, &output, "other", None);
        assert!(matches!(
            result,
            Err(Error::ValidationError(ValidationError::OutputExists(_)))
        ));
        assert_eq!(std::fs::read(&output)?, b"@read1\nA\n+\nI\n");
        Ok(())
    }
}
