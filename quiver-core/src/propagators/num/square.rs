use crate::basic_types::PropagationResult;
use crate::domains::NumValue;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;
use crate::math::rounding::RoundDir;

/// Arc for `x² = y`. Unlike [`super::PowerArc`], `x` may be negative.
#[derive(Clone, Copy, Debug)]
pub struct SquareArc<T> {
    x: NodeId,
    y: NodeId,
    marker: std::marker::PhantomData<T>,
}

impl<T: NumValue> SquareArc<T> {
    pub fn new(x: NodeId, y: NodeId) -> Self {
        SquareArc {
            x,
            y,
            marker: std::marker::PhantomData,
        }
    }
}

impl<T: NumValue> Arc for SquareArc<T> {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.x, self.y]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.x, self.y]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Bounds
    }

    fn name(&self) -> &str {
        "Square"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let (x, y) = (self.x, self.y);
        context.set_min(y, T::zero())?;

        let (x_min, x_max) = (context.min::<T>(x), context.max::<T>(x));
        if x_min >= T::zero() {
            context.set_min(y, x_min.pow_exp(2))?;
            context.set_max(y, x_max.pow_exp(2))?;
        } else if x_max <= T::zero() {
            context.set_min(y, x_max.pow_exp(2))?;
            context.set_max(y, x_min.pow_exp(2))?;
        } else {
            let far = if x_max.neg() < x_min { x_max } else { x_min };
            context.set_max(y, far.pow_exp(2))?;
        }

        let (y_min, y_max) = (context.min::<T>(y), context.max::<T>(y));
        let outer = y_max.root(2, RoundDir::Down);
        context.set_min(x, outer.neg())?;
        context.set_max(x, outer)?;
        let inner = y_min.root(2, RoundDir::Up);
        if context.min::<T>(x) >= T::zero() {
            context.set_min(x, inner)?;
        } else if context.max::<T>(x) <= T::zero() {
            context.set_max(x, inner.neg())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn forward_square_over_a_sign_change() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(-4, 3);
        let y = solver.new_int(-100, 100);

        let _ = solver.post(Box::new(SquareArc::<i32>::new(x, y)));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(y, 0, 16);
    }

    #[test]
    fn backward_root_rounds_inward() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(-100, 100);
        let y = solver.new_int(10, 26);

        let _ = solver.post(Box::new(SquareArc::<i32>::new(x, y)));
        solver.propagate().expect("satisfiable");

        // sqrt(26) rounds down to 5.
        solver.assert_bounds(x, -5, 5);
    }

    #[test]
    fn positive_x_gets_the_inner_root() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(0, 100);
        let y = solver.new_int(10, 26);

        let _ = solver.post(Box::new(SquareArc::<i32>::new(x, y)));
        solver.propagate().expect("satisfiable");

        // sqrt(10) rounds up to 4.
        solver.assert_bounds(x, 4, 5);
    }

    #[test]
    fn negative_square_fails() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(-10, 10);
        let y = solver.new_int(-8, -2);

        let _ = solver.post(Box::new(SquareArc::<i32>::new(x, y)));
        assert!(solver.propagate().is_err());
    }
}
