use crate::Result;

/// A single FASTQ read held in memory
///
/// Records are immutable once built. The identifier is the part of the FASTQ
/// header before the first whitespace; any description that follows it is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: String,
    seq: String,
    qual: String,
}
impl Record {
    pub fn new(id: impl Into<String>, seq: impl Into<String>, qual: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            seq: seq.into(),
            qual: qual.into(),
        }
    }

    /// Builds a record from the raw parts of a FASTQ entry
    ///
    /// # Arguments
    /// * `head` - The full header line without the leading `@`
    /// * `seq` - The nucleotide sequence
    /// * `qual` - The quality string
    pub fn from_parts(head: &[u8], seq: &[u8], qual: &[u8]) -> Result<Self> {
        Ok(Self {
            id: String::from_utf8(identifier(head).to_vec())?,
            seq: String::from_utf8(seq.to_vec())?,
            qual: String::from_utf8(qual.to_vec())?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seq(&self) -> &str {
        &self.seq
    }

    pub fn qual(&self) -> &str {
        &self.qual
    }
}

/// Returns the identifier portion of a FASTQ header (everything before the first space or tab)
pub fn identifier(head: &[u8]) -> &[u8] {
    match memchr::memchr2(b' ', b'\t', head) {
        Some(pos) => &head[..pos],
        None => head,
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_identifier_strips_description() {
        assert_eq!(identifier(b"read1 length=4"), b"read1");
        assert_eq!(identifier(b"read1\tlane=2"), b"read1");
        assert_eq!(identifier(b"read1"), b"read1");
        assert_eq!(identifier(b""), b"");
    }

    #[test]
    fn test_from_parts() -> Result<()> {
        let record = Record::from_parts(b"r7 extra words", b"ACGT", b"IIII")?;
        assert_eq!(record.id(), "r7");
        assert_eq!(record.seq(), "ACGT");
        assert_eq!(record.qual(), "IIII");
        Ok(())
    }

    #[test]
    fn test_from_parts_invalid_utf8() {
        let result = Record::from_parts(&[0xff, 0xfe], b"ACGT", b"IIII");
        assert!(matches!(result, Err(crate::Error::Utf8Error(_))));
    }
}
