use crate::{error::SampleError, InputCatalog, Result, SelectionIndex, SequenceWriter};

/// Writes selected reads, and optionally their mates, in selection order
///
/// The primary writer receives the read from the primary catalog; the mate
/// writer receives the record at the same `(file, record)` position of the
/// mate catalog. Both outputs advance in lock-step.
pub struct PairedEmitter<W1: SequenceWriter, W2: SequenceWriter> {
    primary: W1,
    mate: Option<W2>,
}
impl<W1: SequenceWriter, W2: SequenceWriter> PairedEmitter<W1, W2> {
    pub fn paired(primary: W1, mate: W2) -> Self {
        Self {
            primary,
            mate: Some(mate),
        }
    }

    pub fn is_paired(&self) -> bool {
        self.mate.is_some()
    }

    /// Writes every selection and returns the number of reads (or pairs) written
    ///
    /// # Arguments
    /// * `selection` - The shuffled selection, written in this order
    /// * `primary` - Catalog of the primary input files
    /// * `mates` - Catalog of the paired input files; required exactly when a mate writer is set
    pub fn emit(
        &mut self,
        selection: &[SelectionIndex],
        primary: &InputCatalog,
        mates: Option<&InputCatalog>,
    ) -> Result<usize> {
        let mut targets = match (self.mate.as_mut(), mates) {
            (Some(writer), Some(catalog)) => Some((writer, catalog)),
            (None, None) => None,
            _ => return Err(SampleError::MateMismatch.into()),
        };

        for &sel in selection {
            self.primary.write_record(resolve(primary, sel)?)?;
            if let Some((writer, catalog)) = targets.as_mut() {
                writer.write_record(resolve(catalog, sel)?)?;
            }
        }

        self.primary.flush()?;
        if let Some((writer, _)) = targets {
            writer.flush()?;
        }
        Ok(selection.len())
    }

    pub fn into_inner(self) -> (W1, Option<W2>) {
        (self.primary, self.mate)
    }
}
impl<W1: SequenceWriter> PairedEmitter<W1, W1> {
    pub fn single(primary: W1) -> Self {
        Self {
            primary,
            mate: None,
        }
    }
}

fn resolve(catalog: &InputCatalog, sel: SelectionIndex) -> Result<&crate::Record> {
    catalog.get(sel).ok_or_else(|| {
        SampleError::OutOfRange {
            file: sel.file,
            record: sel.record,
        }
        .into()
    })
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::{FastqWriter, Record};
    use anyhow::Result;

    fn catalog(tag: &str, sizes: &[usize]) -> InputCatalog {
        InputCatalog::from_records(
            sizes
                .iter()
                .enumerate()
                .map(|(file, &n)| {
                    (0..n)
                        .map(|idx| Record::new(format!("{tag}{file}.{idx}"), "ACGT", "IIII"))
                        .collect()
                })
                .collect(),
        )
    }

    fn ids(bytes: &[u8]) -> Vec<String> {
        std::str::from_utf8(bytes)
            .unwrap()
            .lines()
            .step_by(4)
            .map(|line| line.trim_start_matches('@').to_string())
            .collect()
    }

    #[test]
    fn test_emit_single_in_selection_order() -> Result<()> {
        let reads = catalog("r", &[3, 2]);
        let selection = [
            SelectionIndex::new(1, 1),
            SelectionIndex::new(0, 2),
            SelectionIndex::new(0, 0),
        ];
        let mut emitter = PairedEmitter::single(FastqWriter::new(Vec::new()));
        assert!(!emitter.is_paired());
        assert_eq!(emitter.emit(&selection, &reads, None)?, 3);

        let (primary, mate) = emitter.into_inner();
        assert!(mate.is_none());
        let bytes = primary.into_inner()?;
        assert_eq!(ids(&bytes), ["r1.1", "r0.2", "r0.0"]);
        assert!(bytes.starts_with(b"@r1.1\nACGT\n+\nIIII\n"));
        Ok(())
    }

    #[test]
    fn test_emit_paired_keeps_mates_aligned() -> Result<()> {
        let reads = catalog("fwd", &[4, 4]);
        let mates = catalog("rev", &[4, 4]);
        let selection = [
            SelectionIndex::new(0, 3),
            SelectionIndex::new(1, 0),
            SelectionIndex::new(1, 2),
        ];
        let mut emitter =
            PairedEmitter::paired(FastqWriter::new(Vec::new()), FastqWriter::new(Vec::new()));
        emitter.emit(&selection, &reads, Some(&mates))?;

        let (primary, mate) = emitter.into_inner();
        let primary = ids(&primary.into_inner()?);
        let mate = ids(&mate.unwrap().into_inner()?);
        assert_eq!(primary, ["fwd0.3", "fwd1.0", "fwd1.2"]);
        assert_eq!(mate, ["rev0.3", "rev1.0", "rev1.2"]);
        Ok(())
    }

    #[test]
    fn test_emit_out_of_range() {
        let reads = catalog("r", &[2]);
        let mut emitter = PairedEmitter::single(FastqWriter::new(Vec::new()));
        let result = emitter.emit(&[SelectionIndex::new(0, 2)], &reads, None);
        assert!(matches!(
            result,
            Err(crate::Error::SampleError(SampleError::OutOfRange { file: 0, record: 2 }))
        ));
    }

    #[test]
    fn test_emit_mate_mismatch() {
        let reads = catalog("r", &[2]);
        let mut emitter = PairedEmitter::single(FastqWriter::new(Vec::new()));
        let result = emitter.emit(&[], &reads, Some(&reads));
        assert!(matches!(
            result,
            Err(crate::Error::SampleError(SampleError::MateMismatch))
        ));
    }
}
