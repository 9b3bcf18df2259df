use crate::basic_types::PropagationFailure;
use crate::basic_types::PropagationResult;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for a relation that reduced to a truth value at synthesis time, e.g. `0 * Z <= -1`.
/// A satisfied relation is normally not posted at all; the unsatisfied case must still fail
/// through the regular propagation channel rather than at post time.
#[derive(Clone, Copy, Debug)]
pub struct TrivialArc {
    satisfied: bool,
}

impl TrivialArc {
    pub fn new(satisfied: bool) -> Self {
        TrivialArc { satisfied }
    }
}

impl Arc for TrivialArc {
    fn sources(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn targets(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Bounds
    }

    fn name(&self) -> &str {
        "Trivial"
    }

    fn propagate(&mut self, _context: &mut PropagationContext<'_>) -> PropagationResult {
        if self.satisfied {
            Ok(())
        } else {
            Err(PropagationFailure::with_message(
                "relation between constants does not hold",
            ))
        }
    }
}
