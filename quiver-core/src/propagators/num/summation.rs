use crate::basic_types::PropagationFailure;
use crate::basic_types::PropagationResult;
use crate::basic_types::RelOp;
use crate::domains::NumValue;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Hyper-arc for `Σ terms REL rhs` over an arbitrary number of term nodes. Bounds are
/// recomputed from scratch on every invocation; each term is then tightened against the slack
/// left by the other terms.
#[derive(Clone, Debug)]
pub struct SummationArc<T> {
    terms: Vec<NodeId>,
    op: RelOp,
    rhs: NodeId,
    marker: std::marker::PhantomData<T>,
}

impl<T: NumValue> SummationArc<T> {
    pub fn new(terms: Vec<NodeId>, op: RelOp, rhs: NodeId) -> Self {
        SummationArc {
            terms,
            op,
            rhs,
            marker: std::marker::PhantomData,
        }
    }

    fn sum_min(&self, context: &PropagationContext<'_>) -> T {
        self.terms
            .iter()
            .fold(T::zero(), |acc, &term| acc.add(context.min::<T>(term)))
    }

    fn sum_max(&self, context: &PropagationContext<'_>) -> T {
        self.terms
            .iter()
            .fold(T::zero(), |acc, &term| acc.add(context.max::<T>(term)))
    }

    /// Enforce `Σ terms <= bound`: each term may use at most the slack the other terms' lower
    /// bounds leave.
    fn tighten_below(
        &self,
        context: &mut PropagationContext<'_>,
        bound: T,
    ) -> PropagationResult {
        let sum_min = self.sum_min(context);
        if sum_min > bound {
            return Err(PropagationFailure::with_message(format!(
                "sum is at least {sum_min}, above {bound}"
            )));
        }
        for &term in &self.terms {
            let others = sum_min.sub(context.min::<T>(term));
            context.set_max(term, bound.sub(others))?;
        }
        Ok(())
    }

    /// Enforce `Σ terms >= bound`.
    fn tighten_above(
        &self,
        context: &mut PropagationContext<'_>,
        bound: T,
    ) -> PropagationResult {
        let sum_max = self.sum_max(context);
        if sum_max < bound {
            return Err(PropagationFailure::with_message(format!(
                "sum is at most {sum_max}, below {bound}"
            )));
        }
        for &term in &self.terms {
            let others = sum_max.sub(context.max::<T>(term));
            context.set_min(term, bound.sub(others))?;
        }
        Ok(())
    }
}

impl<T: NumValue> Arc for SummationArc<T> {
    fn sources(&self) -> Vec<NodeId> {
        let mut sources = self.terms.clone();
        sources.push(self.rhs);
        sources
    }

    fn targets(&self) -> Vec<NodeId> {
        self.sources()
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::HyperArc
    }

    fn name(&self) -> &str {
        "Summation"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let rhs = self.rhs;
        match self.op {
            RelOp::Eq => {
                context.set_min(rhs, self.sum_min(context))?;
                context.set_max(rhs, self.sum_max(context))?;
                self.tighten_below(context, context.max::<T>(rhs))?;
                self.tighten_above(context, context.min::<T>(rhs))
            }
            RelOp::Leq => {
                context.set_min(rhs, self.sum_min(context))?;
                self.tighten_below(context, context.max::<T>(rhs))
            }
            RelOp::Lt => {
                context.set_min(rhs, self.sum_min(context).strictly_above())?;
                self.tighten_below(context, context.max::<T>(rhs).strictly_below())
            }
            RelOp::Geq => {
                context.set_max(rhs, self.sum_max(context))?;
                self.tighten_above(context, context.min::<T>(rhs))
            }
            RelOp::Gt => {
                context.set_max(rhs, self.sum_max(context).strictly_below())?;
                self.tighten_above(context, context.min::<T>(rhs).strictly_above())
            }
            RelOp::Neq => {
                // Only refutable once everything is fixed.
                let sum_min = self.sum_min(context);
                if sum_min == self.sum_max(context)
                    && context.is_bound::<T>(rhs)
                    && sum_min == context.min::<T>(rhs)
                {
                    return Err(PropagationFailure::with_message(format!(
                        "sum is fixed at {sum_min}, equal to the excluded value"
                    )));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn equality_tightens_terms_against_slack() {
        let mut solver = TestGraph::default();
        let a = solver.new_int(0, 10);
        let b = solver.new_int(2, 3);
        let c = solver.new_int(1, 2);
        let rhs = solver.new_int(10, 10);

        let _ = solver.post(Box::new(SummationArc::<i32>::new(
            vec![a, b, c],
            RelOp::Eq,
            rhs,
        )));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(a, 5, 7);
    }

    #[test]
    fn equality_tightens_the_right_hand_side() {
        let mut solver = TestGraph::default();
        let a = solver.new_int(1, 2);
        let b = solver.new_int(3, 4);
        let rhs = solver.new_int(-100, 100);

        let _ = solver.post(Box::new(SummationArc::<i32>::new(
            vec![a, b],
            RelOp::Eq,
            rhs,
        )));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(rhs, 4, 6);
    }

    #[test]
    fn strict_upper_bound_leaves_one_less() {
        let mut solver = TestGraph::default();
        let a = solver.new_int(0, 10);
        let b = solver.new_int(3, 3);
        let rhs = solver.new_int(8, 8);

        let _ = solver.post(Box::new(SummationArc::<i32>::new(
            vec![a, b],
            RelOp::Lt,
            rhs,
        )));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(a, 0, 4);
    }

    #[test]
    fn infeasible_sum_reports_a_message() {
        let mut solver = TestGraph::default();
        let a = solver.new_int(5, 10);
        let b = solver.new_int(5, 10);
        let rhs = solver.new_int(0, 9);

        let _ = solver.post(Box::new(SummationArc::<i32>::new(
            vec![a, b],
            RelOp::Leq,
            rhs,
        )));
        let failure = solver.propagate().expect_err("10 > 9");
        assert!(failure.message().is_some());
    }

    #[test]
    fn fixed_sum_equal_to_excluded_value_fails() {
        let mut solver = TestGraph::default();
        let a = solver.new_int(2, 2);
        let b = solver.new_int(3, 3);
        let rhs = solver.new_int(5, 5);

        let _ = solver.post(Box::new(SummationArc::<i32>::new(
            vec![a, b],
            RelOp::Neq,
            rhs,
        )));
        assert!(solver.propagate().is_err());
    }
}
