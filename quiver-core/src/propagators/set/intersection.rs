use crate::basic_types::PropagationResult;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `a ∩ b = c`.
#[derive(Clone, Copy, Debug)]
pub struct IntersectionArc {
    a: NodeId,
    b: NodeId,
    c: NodeId,
}

impl IntersectionArc {
    pub fn new(a: NodeId, b: NodeId, c: NodeId) -> Self {
        IntersectionArc { a, b, c }
    }

    /// Values committed to one operand but ruled out of the intersection cannot be in the
    /// other operand.
    fn exclude_from_other(
        context: &mut PropagationContext<'_>,
        committed: NodeId,
        result: NodeId,
        other: NodeId,
    ) -> PropagationResult {
        let ruled_out: Vec<i32> = context
            .set_dom(committed)
            .required()
            .iter()
            .copied()
            .filter(|&value| !context.set_dom(result).is_possible(value))
            .collect();
        context.set_dom_mut(other).exclude_all(ruled_out)
    }
}

impl Arc for IntersectionArc {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.a, self.b, self.c]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.a, self.b, self.c]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "Intersection"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let (a, b, c) = (self.a, self.b, self.c);

        // c can only hold values still possible in both operands.
        let impossible: Vec<i32> = context
            .set_dom(c)
            .possible()
            .iter()
            .copied()
            .filter(|&value| {
                !context.set_dom(a).is_possible(value) || !context.set_dom(b).is_possible(value)
            })
            .collect();
        context.set_dom_mut(c).exclude_all(impossible)?;

        // Values committed to both operands are in the intersection.
        let in_both: Vec<i32> = context
            .set_dom(a)
            .required()
            .iter()
            .copied()
            .filter(|&value| context.set_dom(b).is_required(value))
            .collect();
        context.set_dom_mut(c).require_all(in_both)?;

        // Values committed to the intersection are in both operands.
        let in_c: Vec<i32> = context.set_dom(c).required().iter().copied().collect();
        context.set_dom_mut(a).require_all(in_c.iter().copied())?;
        context.set_dom_mut(b).require_all(in_c)?;

        Self::exclude_from_other(context, a, c, b)?;
        Self::exclude_from_other(context, b, c, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn intersection_drops_values_missing_from_an_operand() {
        let mut solver = TestGraph::default();
        let a = solver.new_set([1, 2, 3]);
        let b = solver.new_set([2, 3, 4]);
        let c = solver.new_set([1, 2, 3, 4]);

        let _ = solver.post(Box::new(IntersectionArc::new(a, b, c)));
        solver.propagate().expect("satisfiable");

        assert!(!solver.set_dom(c).is_possible(1));
        assert!(!solver.set_dom(c).is_possible(4));
        assert!(solver.set_dom(c).is_possible(2));
    }

    #[test]
    fn values_committed_to_both_operands_reach_the_result() {
        let mut solver = TestGraph::default();
        let a = solver.new_set([1, 2]);
        let b = solver.new_set([1, 2]);
        let c = solver.new_set([1, 2]);

        let _ = solver.post(Box::new(IntersectionArc::new(a, b, c)));
        solver
            .graph
            .modify(a, |domain| domain.as_set_mut().require(1))
            .expect("possible");
        solver
            .graph
            .modify(b, |domain| domain.as_set_mut().require(1))
            .expect("possible");
        solver.propagate().expect("satisfiable");

        assert!(solver.set_dom(c).is_required(1));
    }

    #[test]
    fn committed_result_value_reaches_both_operands() {
        let mut solver = TestGraph::default();
        let a = solver.new_set([1, 2]);
        let b = solver.new_set([1, 2]);
        let c = solver.new_set([1, 2]);

        let _ = solver.post(Box::new(IntersectionArc::new(a, b, c)));
        solver
            .graph
            .modify(c, |domain| domain.as_set_mut().require(2))
            .expect("possible");
        solver.propagate().expect("satisfiable");

        assert!(solver.set_dom(a).is_required(2));
        assert!(solver.set_dom(b).is_required(2));
    }

    #[test]
    fn committed_value_excluded_from_result_leaves_the_other_operand() {
        let mut solver = TestGraph::default();
        let a = solver.new_set([1, 2]);
        let b = solver.new_set([1, 2]);
        let c = solver.new_set([2]);

        let _ = solver.post(Box::new(IntersectionArc::new(a, b, c)));
        solver
            .graph
            .modify(a, |domain| domain.as_set_mut().require(1))
            .expect("possible");
        solver.propagate().expect("satisfiable");

        assert!(!solver.set_dom(b).is_possible(1));
    }
}
