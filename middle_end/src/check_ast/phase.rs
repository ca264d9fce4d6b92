//! Compilation progress as seen by the checks.

use std::fmt;

use thiserror::Error;
use tracing::trace;

/// Milestones the driver signals exactly once each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Parse,
    Resolution,
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Milestone::Parse => write!(f, "parsing"),
            Milestone::Resolution => write!(f, "resolution"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("{0} has already been marked complete")]
    AlreadyComplete(Milestone),

    #[error("resolution cannot complete before parsing has")]
    ResolvedBeforeParsed,
}

/// Where compilation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Parsing,
    Resolving,
    Resolved,
}

/// Two monotonic flags. Once set, a flag stays set for the rest of the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseState {
    parsed: bool,
    resolved: bool,
}

impl PhaseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn current(&self) -> Phase {
        match (self.parsed, self.resolved) {
            (_, true) => Phase::Resolved,
            (true, false) => Phase::Resolving,
            (false, false) => Phase::Parsing,
        }
    }

    pub fn mark_parsed(&mut self) -> Result<(), PhaseError> {
        if self.parsed {
            return Err(PhaseError::AlreadyComplete(Milestone::Parse));
        }
        self.parsed = true;
        trace!("parsing complete");
        Ok(())
    }

    pub fn mark_resolved(&mut self) -> Result<(), PhaseError> {
        if self.resolved {
            return Err(PhaseError::AlreadyComplete(Milestone::Resolution));
        }
        if !self.parsed {
            return Err(PhaseError::ResolvedBeforeParsed);
        }
        self.resolved = true;
        trace!("resolution complete");
        Ok(())
    }
}
