use std::ops::Range;

/// Policy for choosing which record indices of a file may be sampled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PopulationPolicy {
    /// Every record of the file is eligible
    #[default]
    Full,
    /// The last record of every file is never eligible
    ///
    /// Reproduces the output of legacy mix-shuffle releases, whose index
    /// population stopped one short of the file length.
    ExcludeLast,
}
impl PopulationPolicy {
    /// Returns the range of eligible record indices for a file holding `count` records
    pub fn population(&self, count: usize) -> Range<usize> {
        match self {
            Self::Full => 0..count,
            Self::ExcludeLast => 0..count.saturating_sub(1),
        }
    }
}
