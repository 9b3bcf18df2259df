use crate::basic_types::PropagationResult;
use crate::basic_types::RelOp;
use crate::domains::NumDomain;
use crate::domains::NumValue;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `x REL c` with a constant right-hand side. This is the target of algebraic
/// inversion: relations like `a + Z <= v` collapse into a single instance of this arc.
#[derive(Clone, Copy, Debug)]
pub struct NumBoundArc<T> {
    node: NodeId,
    op: RelOp,
    bound: T,
}

impl<T: NumValue> NumBoundArc<T> {
    pub fn new(node: NodeId, op: RelOp, bound: T) -> Self {
        NumBoundArc { node, op, bound }
    }

    pub(crate) fn op(&self) -> RelOp {
        self.op
    }

    pub(crate) fn bound(&self) -> T {
        self.bound
    }
}

impl<T: NumValue> Arc for NumBoundArc<T> {
    fn sources(&self) -> Vec<NodeId> {
        // The right-hand side is constant; once applied there is nothing to re-propagate.
        Vec::new()
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.node]
    }

    fn strength(&self) -> ConsistencyStrength {
        match self.op {
            RelOp::Neq => ConsistencyStrength::Range,
            _ => ConsistencyStrength::Bounds,
        }
    }

    fn name(&self) -> &str {
        "NumBound"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        match self.op {
            RelOp::Eq => context.set_value(self.node, self.bound),
            RelOp::Neq => context.remove_value(self.node, self.bound),
            RelOp::Lt => context.set_max(self.node, self.bound.strictly_below()),
            RelOp::Leq => context.set_max(self.node, self.bound),
            RelOp::Gt => context.set_min(self.node, self.bound.strictly_above()),
            RelOp::Geq => context.set_min(self.node, self.bound),
        }
    }
}

/// Arc for `min REL x REL max`, with either end optionally exclusive.
#[derive(Clone, Copy, Debug)]
pub struct BetweenArc<T> {
    node: NodeId,
    min: T,
    min_exclusive: bool,
    max: T,
    max_exclusive: bool,
}

impl<T: NumValue> BetweenArc<T> {
    pub fn new(node: NodeId, min: T, min_exclusive: bool, max: T, max_exclusive: bool) -> Self {
        BetweenArc {
            node,
            min,
            min_exclusive,
            max,
            max_exclusive,
        }
    }
}

impl<T: NumValue> Arc for BetweenArc<T> {
    fn sources(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.node]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Bounds
    }

    fn name(&self) -> &str {
        "Between"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let low = if self.min_exclusive {
            self.min.strictly_above()
        } else {
            self.min
        };
        let high = if self.max_exclusive {
            self.max.strictly_below()
        } else {
            self.max
        };
        context.set_min(self.node, low)?;
        context.set_max(self.node, high)
    }
}

/// Arc for `x NOT IN [min, max]` (both ends inclusive).
#[derive(Clone, Copy, Debug)]
pub struct NotBetweenArc<T> {
    node: NodeId,
    min: T,
    max: T,
}

impl<T: NumValue> NotBetweenArc<T> {
    pub fn new(node: NodeId, min: T, max: T) -> Self {
        NotBetweenArc { node, min, max }
    }
}

impl<T: NumValue> Arc for NotBetweenArc<T> {
    fn sources(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.node]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Range
    }

    fn name(&self) -> &str {
        "NotBetween"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        context.num_mut::<T>(self.node).remove_range(self.min, self.max)
    }
}
