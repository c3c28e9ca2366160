//! Per-unit outcomes and run tallies

use std::fmt;

use crate::state::RunState;

/// What happened to one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Unit ran to completion
    Applied,
    /// Unit did not run (section or sub-option off, or precedence rule), or
    /// found nothing to work on and changed nothing
    Skipped,
    /// Unit returned an error or panicked; its tables were restored
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Applied => "applied",
            Status::Skipped => "skipped",
            Status::Failed => "failed",
        })
    }
}

/// Outcome record, handed to the reporter and then dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Owning section
    pub section: String,
    /// Unit name
    pub unit: String,
    /// Result
    pub status: Status,
    /// Reason for a skip or failure
    pub message: Option<String>,
}

impl Outcome {
    /// Applied outcome
    pub fn applied(section: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            unit: unit.into(),
            status: Status::Applied,
            message: None,
        }
    }

    /// Skipped outcome
    pub fn skipped(section: impl Into<String>, unit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            unit: unit.into(),
            status: Status::Skipped,
            message: Some(reason.into()),
        }
    }

    /// Failed outcome
    pub fn failed(section: impl Into<String>, unit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            unit: unit.into(),
            status: Status::Failed,
            message: Some(reason.into()),
        }
    }
}

/// Outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Units applied
    pub applied: usize,
    /// Units skipped
    pub skipped: usize,
    /// Units (or whole sections) failed
    pub failed: usize,
}

impl Tally {
    /// Count one outcome
    pub fn count(&mut self, status: Status) {
        match status {
            Status::Applied => self.applied += 1,
            Status::Skipped => self.skipped += 1,
            Status::Failed => self.failed += 1,
        }
    }

    /// Add another tally to this one
    pub fn merge(&mut self, other: Tally) {
        self.applied += other.applied;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }

    /// Total outcomes counted
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.applied + self.skipped + self.failed
    }
}

/// Result of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Outcome counts over every section
    pub tally: Tally,
    /// Terminal state, always `Completed` for a returned summary
    pub state: RunState,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} applied, {} skipped, {} failed",
            self.tally.applied, self.tally.skipped, self.tally.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_and_merges() {
        let mut a = Tally::default();
        a.count(Status::Applied);
        a.count(Status::Failed);
        let mut b = Tally::default();
        b.count(Status::Skipped);
        a.merge(b);
        assert_eq!(
            a,
            Tally {
                applied: 1,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(a.total(), 3);
    }

    #[test]
    fn outcome_constructors() {
        let outcome = Outcome::failed("stash", "biggerStash", "boom");
        assert_eq!(outcome.status, Status::Failed);
        assert_eq!(outcome.message.as_deref(), Some("boom"));
        assert_eq!(Outcome::applied("s", "u").message, None);
    }
}
