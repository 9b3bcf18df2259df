use thiserror::Error;

/// The result of invoking one arc, or of running an entire propagation pass. Propagation either
/// succeeds (possibly narrowing domains) or identifies that the current partial assignment is
/// infeasible.
pub type PropagationResult = Result<(), PropagationFailure>;

/// The signal that a narrowing would empty a domain, i.e. the current partial assignment is
/// locally infeasible.
///
/// This is an expected, recoverable outcome, not a programming error: the search layer driving
/// the engine observes it and backtracks by restoring a previously captured state. It carries an
/// optional diagnostic message and no structural payload.
///
/// Malformed-graph conditions (mismatched generic element counts, kind-confused node access) are
/// *not* reported through this type; those are fatal usage errors and panic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
#[error("propagation failure: {}", message.as_deref().unwrap_or("a domain would become empty"))]
pub struct PropagationFailure {
    message: Option<String>,
}

impl PropagationFailure {
    pub fn new() -> Self {
        PropagationFailure { message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        PropagationFailure {
            message: Some(message.into()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
