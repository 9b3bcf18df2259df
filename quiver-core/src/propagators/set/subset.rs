use crate::basic_types::PropagationFailure;
use crate::basic_types::PropagationResult;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `sub ⊆ superset`, or `sub ⊂ superset` when strict.
#[derive(Clone, Copy, Debug)]
pub struct SubsetArc {
    sub: NodeId,
    superset: NodeId,
    strict: bool,
}

impl SubsetArc {
    pub fn new(sub: NodeId, superset: NodeId, strict: bool) -> Self {
        SubsetArc {
            sub,
            superset,
            strict,
        }
    }
}

impl Arc for SubsetArc {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.sub, self.superset]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.sub, self.superset]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "Subset"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let (sub, superset) = (self.sub, self.superset);

        let committed: Vec<i32> = context.set_dom(sub).required().iter().copied().collect();
        context.set_dom_mut(superset).require_all(committed)?;

        let ruled_out: Vec<i32> = context
            .set_dom(sub)
            .possible()
            .iter()
            .copied()
            .filter(|&value| !context.set_dom(superset).is_possible(value))
            .collect();
        context.set_dom_mut(sub).exclude_all(ruled_out)?;

        if self.strict
            && context.set_dom(sub).is_bound()
            && context.set_dom(superset).is_bound()
            && context.set_dom(sub).required() == context.set_dom(superset).required()
        {
            return Err(PropagationFailure::with_message(
                "strict subset bound to the same set as its superset",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn subset_pushes_committed_values_up() {
        let mut solver = TestGraph::default();
        let sub = solver.new_set([1, 2, 3]);
        let superset = solver.new_set([1, 2, 3, 4]);

        let _ = solver.post(Box::new(SubsetArc::new(sub, superset, false)));
        solver
            .graph
            .modify(sub, |domain| domain.as_set_mut().require(2))
            .expect("possible");
        solver.propagate().expect("satisfiable");

        assert!(solver.set_dom(superset).is_required(2));
    }

    #[test]
    fn subset_drops_values_the_superset_lost() {
        let mut solver = TestGraph::default();
        let sub = solver.new_set([1, 2, 3]);
        let superset = solver.new_set([1, 3]);

        let _ = solver.post(Box::new(SubsetArc::new(sub, superset, false)));
        solver.propagate().expect("satisfiable");

        assert!(!solver.set_dom(sub).is_possible(2));
    }

    #[test]
    fn strict_subset_equal_to_its_superset_fails() {
        let mut solver = TestGraph::default();
        let sub = solver.new_set([1, 2]);
        let superset = solver.new_set([1, 2]);

        let _ = solver.post(Box::new(SubsetArc::new(sub, superset, true)));
        solver
            .graph
            .modify(sub, |domain| domain.as_set_mut().require_all([1, 2]))
            .expect("possible");
        solver
            .graph
            .modify(superset, |domain| domain.as_set_mut().require_all([1, 2]))
            .expect("possible");

        assert!(solver.propagate().is_err());
    }
}
