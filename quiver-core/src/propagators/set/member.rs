use crate::basic_types::PropagationResult;
use crate::domains::NumDomain;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `element ∈ set`, between an int node and a set node. The negated form rules the
/// element out instead.
#[derive(Clone, Copy, Debug)]
pub struct MemberArc {
    element: NodeId,
    set: NodeId,
    negated: bool,
}

impl MemberArc {
    pub fn new(element: NodeId, set: NodeId) -> Self {
        MemberArc {
            element,
            set,
            negated: false,
        }
    }

    pub fn negated(element: NodeId, set: NodeId) -> Self {
        MemberArc {
            element,
            set,
            negated: true,
        }
    }

    fn propagate_member(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        // Walk the element's domain and drop values the set can no longer hold. Values are
        // collected first; the domain cannot be iterated while it is being narrowed.
        let mut unsupported = Vec::new();
        let dom = context.num::<i32>(self.element);
        let mut value = dom.min();
        loop {
            if !context.set_dom(self.set).is_possible(value) {
                unsupported.push(value);
            }
            let next = dom.next_higher(value);
            if next == value {
                break;
            }
            value = next;
        }
        context.num_mut::<i32>(self.element).remove_all(&unsupported)?;

        if context.is_bound::<i32>(self.element) {
            let value = context.min::<i32>(self.element);
            context.set_dom_mut(self.set).require(value)?;
        }
        Ok(())
    }

    fn propagate_not_member(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let committed: Vec<i32> = context.set_dom(self.set).required().iter().copied().collect();
        context.num_mut::<i32>(self.element).remove_all(&committed)?;

        if context.is_bound::<i32>(self.element) {
            let value = context.min::<i32>(self.element);
            context.set_dom_mut(self.set).exclude(value)?;
        }
        Ok(())
    }
}

impl Arc for MemberArc {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.element, self.set]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.element, self.set]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "Member"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        if self.negated {
            self.propagate_not_member(context)
        } else {
            self.propagate_member(context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn element_domain_shrinks_to_possible_set_values() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(0, 6);
        let s = solver.new_set([2, 3, 5]);

        let _ = solver.post(Box::new(MemberArc::new(x, s)));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(x, 2, 5);
        assert!(!solver.int_dom(x).contains(4));
    }

    #[test]
    fn bound_element_is_committed_to_the_set() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(3, 3);
        let s = solver.new_set([1, 2, 3]);

        let _ = solver.post(Box::new(MemberArc::new(x, s)));
        solver.propagate().expect("satisfiable");

        assert!(solver.set_dom(s).is_required(3));
    }

    #[test]
    fn negated_member_drops_committed_values() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(1, 3);
        let s = solver.new_set([1, 2, 3]);

        let _ = solver.post(Box::new(MemberArc::negated(x, s)));
        solver
            .graph
            .modify(s, |domain| domain.as_set_mut().require(2))
            .expect("possible");
        solver.propagate().expect("satisfiable");

        assert!(!solver.int_dom(x).contains(2));
    }

    #[test]
    fn member_with_no_supported_value_fails() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(4, 6);
        let s = solver.new_set([1, 2, 3]);

        let _ = solver.post(Box::new(MemberArc::new(x, s)));
        assert!(solver.propagate().is_err());
    }
}
