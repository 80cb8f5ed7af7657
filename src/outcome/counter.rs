use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Passed => "Passed",
            Outcome::Failed => "Failed",
            Outcome::Skipped => "Skipped",
        };
        f.write_str(label)
    }
}

/// Pass/fail/skip tally for one session.
///
/// Owned by the session runner; every executed probe increments exactly one
/// of the three counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounter {
    passed: u64,
    failed: u64,
    skipped: u64,
}

impl OutcomeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    pub fn passed(&self) -> u64 {
        self.passed
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn total(&self) -> u64 {
        self.passed + self.failed + self.skipped
    }

    /// Share of passed probes in percent, 0 when nothing ran.
    pub fn pass_percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.passed as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_increments_one_count() {
        let mut counter = OutcomeCounter::new();
        counter.record(Outcome::Passed);
        counter.record(Outcome::Passed);
        counter.record(Outcome::Failed);
        counter.record(Outcome::Skipped);

        assert_eq!(counter.passed(), 2);
        assert_eq!(counter.failed(), 1);
        assert_eq!(counter.skipped(), 1);
        assert_eq!(counter.total(), 4);
    }

    #[test]
    fn test_pass_percentage_empty_session() {
        let counter = OutcomeCounter::new();
        assert_eq!(counter.total(), 0);
        assert_eq!(counter.pass_percentage(), 0.0);
    }

    #[test]
    fn test_pass_percentage() {
        let mut counter = OutcomeCounter::new();
        for _ in 0..2 {
            counter.record(Outcome::Passed);
        }
        counter.record(Outcome::Failed);
        assert!((counter.pass_percentage() - 66.666_666).abs() < 1e-3);

        counter.record(Outcome::Skipped);
        assert_eq!(counter.pass_percentage(), 50.0);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Passed.to_string(), "Passed");
        assert_eq!(Outcome::Failed.to_string(), "Failed");
        assert_eq!(Outcome::Skipped.to_string(), "Skipped");
    }
}
