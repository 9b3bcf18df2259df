use crate::basic_types::PropagationResult;
use crate::basic_types::RelOp;
use crate::domains::NumDomain;
use crate::domains::NumValue;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `x REL y` between two variables, filtering in both directions.
#[derive(Clone, Copy, Debug)]
pub struct BinaryRelationArc<T> {
    x: NodeId,
    y: NodeId,
    op: RelOp,
    marker: std::marker::PhantomData<T>,
}

impl<T: NumValue> BinaryRelationArc<T> {
    pub fn new(x: NodeId, y: NodeId, op: RelOp) -> Self {
        BinaryRelationArc {
            x,
            y,
            op,
            marker: std::marker::PhantomData,
        }
    }
}

impl<T: NumValue> Arc for BinaryRelationArc<T> {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.x, self.y]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.x, self.y]
    }

    fn strength(&self) -> ConsistencyStrength {
        match self.op {
            RelOp::Neq => ConsistencyStrength::Range,
            _ => ConsistencyStrength::Bounds,
        }
    }

    fn name(&self) -> &str {
        "BinaryRelation"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let (x, y) = (self.x, self.y);
        match self.op {
            RelOp::Eq => {
                context.set_min(x, context.min::<T>(y))?;
                context.set_max(x, context.max::<T>(y))?;
                context.set_min(y, context.min::<T>(x))?;
                context.set_max(y, context.max::<T>(x))
            }
            RelOp::Neq => {
                if context.is_bound::<T>(x) {
                    context.remove_value(y, context.min::<T>(x))?;
                }
                if context.is_bound::<T>(y) {
                    context.remove_value(x, context.min::<T>(y))?;
                }
                Ok(())
            }
            RelOp::Lt => {
                context.set_max(x, context.max::<T>(y).strictly_below())?;
                context.set_min(y, context.min::<T>(x).strictly_above())
            }
            RelOp::Leq => {
                context.set_max(x, context.max::<T>(y))?;
                context.set_min(y, context.min::<T>(x))
            }
            RelOp::Gt => {
                context.set_min(x, context.min::<T>(y).strictly_above())?;
                context.set_max(y, context.max::<T>(x).strictly_below())
            }
            RelOp::Geq => {
                context.set_min(x, context.min::<T>(y))?;
                context.set_max(y, context.max::<T>(x))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn inequality_filters_both_sides() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(3, 10);
        let y = solver.new_int(0, 7);

        let _ = solver.post(Box::new(BinaryRelationArc::<i32>::new(x, y, RelOp::Leq)));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(x, 3, 7);
        solver.assert_bounds(y, 3, 7);
    }

    #[test]
    fn equality_intersects_bounds() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(0, 6);
        let y = solver.new_int(4, 10);

        let _ = solver.post(Box::new(BinaryRelationArc::<i32>::new(x, y, RelOp::Eq)));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(x, 4, 6);
        solver.assert_bounds(y, 4, 6);
    }

    #[test]
    fn neq_removes_a_bound_value() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(5, 5);
        let y = solver.new_int(4, 6);

        let _ = solver.post(Box::new(BinaryRelationArc::<i32>::new(x, y, RelOp::Neq)));
        solver.propagate().expect("satisfiable");

        assert!(!solver.int_dom(y).contains(5));
        assert_eq!(2, solver.int_dom(y).size());
    }

    #[test]
    fn strict_inequality_with_no_room_fails() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(5, 5);
        let y = solver.new_int(0, 5);

        let _ = solver.post(Box::new(BinaryRelationArc::<i32>::new(x, y, RelOp::Lt)));
        assert!(solver.propagate().is_err());
    }
}
