use std::fmt;

/// Outcome tally of one save invocation. `total` is fixed at the batch size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub saved: usize,
    pub failed: usize,
    pub total: usize,
}

impl SaveSummary {
    pub fn new(total: usize) -> Self {
        Self {
            saved: 0,
            failed: 0,
            total,
        }
    }

    /// Summary for a run where the operator declined to save.
    pub fn declined(total: usize) -> Self {
        Self::new(total)
    }

    pub fn record_saved(&mut self) {
        self.saved += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn processed(&self) -> usize {
        self.saved + self.failed
    }
}

impl fmt::Display for SaveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Successfully saved: {}", self.saved)?;
        writeln!(f, "Failed to save: {}", self.failed)?;
        write!(f, "Total processed: {}", self.total)
    }
}
