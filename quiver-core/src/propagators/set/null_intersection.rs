use crate::basic_types::PropagationResult;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `a ∩ b = ∅`: a value committed to one side leaves the other.
#[derive(Clone, Copy, Debug)]
pub struct NullIntersectionArc {
    a: NodeId,
    b: NodeId,
}

impl NullIntersectionArc {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        NullIntersectionArc { a, b }
    }

    fn exclude_committed(
        context: &mut PropagationContext<'_>,
        committed: NodeId,
        other: NodeId,
    ) -> PropagationResult {
        let values: Vec<i32> = context
            .set_dom(committed)
            .required()
            .iter()
            .copied()
            .collect();
        context.set_dom_mut(other).exclude_all(values)
    }
}

impl Arc for NullIntersectionArc {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.a, self.b]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.a, self.b]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "NullIntersection"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        Self::exclude_committed(context, self.a, self.b)?;
        Self::exclude_committed(context, self.b, self.a)
    }
}
