//! Error types for the patch engine

use softcore_dataset::{DatasetError, TableId};

use crate::state::RunState;

/// Failure of a single mutation unit.
///
/// Never escapes a run: the section applier turns it into a `failed`
/// outcome and rolls the unit's tables back.
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    /// Unit tried to write a table it did not declare
    #[error("scope violation: write to {table} is outside the unit's scope")]
    ScopeViolation {
        /// Table the unit tried to write
        table: TableId,
    },

    /// Dataset access failed
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Record had an unexpected shape
    #[error("unexpected data at {table}{pointer}: {reason}")]
    Malformed {
        /// Table holding the record
        table: TableId,
        /// Pointer of the record
        pointer: String,
        /// What was wrong
        reason: String,
    },

    /// Anything else the unit reports
    #[error("{0}")]
    Other(String),

    /// Unit panicked
    #[error("panicked: {0}")]
    Panicked(String),
}

impl UnitError {
    /// Create malformed record error
    pub fn malformed(table: TableId, pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            table,
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }

    /// Create generic unit error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Failure to drive a patch run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Run state machine rejected a transition
    #[error("illegal run state transition: {from} -> {to}")]
    IllegalTransition {
        /// Current state
        from: RunState,
        /// Requested state
        to: RunState,
    },
}

/// Failure of a log sink; swallowed by the [`Reporter`](crate::Reporter)
#[derive(Debug, thiserror::Error)]
#[error("log sink failed: {0}")]
pub struct SinkError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_violation_names_table() {
        let err = UnitError::ScopeViolation {
            table: TableId::Traders,
        };
        assert_eq!(
            err.to_string(),
            "scope violation: write to traders is outside the unit's scope"
        );
    }

    #[test]
    fn dataset_error_is_transparent() {
        let err = UnitError::from(DatasetError::MissingTable(TableId::Items));
        assert_eq!(err.to_string(), "table not found: templates.items");
    }

    #[test]
    fn illegal_transition_display() {
        let err = RunError::IllegalTransition {
            from: RunState::Completed,
            to: RunState::Running(0),
        };
        assert_eq!(
            err.to_string(),
            "illegal run state transition: completed -> running(0)"
        );
    }
}
