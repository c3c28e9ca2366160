//! Run state machine
//!
//! A run is linear: `NotStarted -> Running(0) -> Running(1) -> ... -> Completed`.
//! There are no retries and no way back.

use std::fmt;

use crate::error::RunError;

/// Progress of a patch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Orchestrator built, nothing applied
    NotStarted,
    /// Section at this index is being applied
    Running(usize),
    /// Every section has been visited
    Completed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::NotStarted => f.write_str("not-started"),
            RunState::Running(index) => write!(f, "running({index})"),
            RunState::Completed => f.write_str("completed"),
        }
    }
}

/// Validates a run state transition.
///
/// # Errors
/// `RunError::IllegalTransition` for anything but the next step of a linear run.
pub fn validate_transition(from: RunState, to: RunState) -> Result<(), RunError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(RunError::IllegalTransition { from, to })
    }
}

/// States reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: RunState) -> Vec<RunState> {
    match from {
        RunState::NotStarted => vec![RunState::Running(0)],
        RunState::Running(index) => vec![RunState::Running(index + 1), RunState::Completed],
        RunState::Completed => vec![],
    }
}
