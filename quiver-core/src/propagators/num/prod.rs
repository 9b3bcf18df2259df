use crate::basic_types::PropagationResult;
use crate::domains::NumDomain;
use crate::domains::NumValue;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;
use crate::math::rounding::RoundDir;

/// Arc for `x * y = z`, via interval arithmetic over the four bound products.
///
/// The backward direction divides the bounds of `z` by a factor's bounds and is applied only
/// when that factor cannot straddle zero; rounding is `Up` for lower-bound candidates and
/// `Down` for upper-bound candidates, so no feasible integer is ever cut. Quotients are posted
/// as products with the operands shuffled (`z / y = x` becomes `x * y = z`).
#[derive(Clone, Copy, Debug)]
pub struct ProdArc<T> {
    x: NodeId,
    y: NodeId,
    z: NodeId,
    marker: std::marker::PhantomData<T>,
}

impl<T: NumValue> ProdArc<T> {
    pub fn new(x: NodeId, y: NodeId, z: NodeId) -> Self {
        ProdArc {
            x,
            y,
            z,
            marker: std::marker::PhantomData,
        }
    }

    fn tighten_product(
        &self,
        context: &mut PropagationContext<'_>,
        x: NodeId,
        y: NodeId,
        z: NodeId,
    ) -> PropagationResult {
        let candidates = [
            context.min::<T>(x).mul(context.min::<T>(y)),
            context.min::<T>(x).mul(context.max::<T>(y)),
            context.max::<T>(x).mul(context.min::<T>(y)),
            context.max::<T>(x).mul(context.max::<T>(y)),
        ];
        context.set_min(z, fold_min(candidates))?;
        context.set_max(z, fold_max(candidates))
    }

    /// Tighten `x` from `z / y`. A factor whose domain straddles zero admits arbitrarily large
    /// quotients, so nothing can be concluded from it.
    fn tighten_factor(
        &self,
        context: &mut PropagationContext<'_>,
        x: NodeId,
        y: NodeId,
        z: NodeId,
    ) -> PropagationResult {
        let (y_min, y_max) = (context.min::<T>(y), context.max::<T>(y));
        if y_min < T::zero() && y_max > T::zero() {
            return Ok(());
        }
        if y_min == T::zero() && y_max == T::zero() {
            // x * 0 = z; the forward pass pins z, x stays free.
            return Ok(());
        }
        // One divisor bound may still be zero; divide by its nearest nonzero neighbor.
        let y_min = if y_min == T::zero() {
            context.num::<T>(y).next_higher(T::zero())
        } else {
            y_min
        };
        let y_max = if y_max == T::zero() {
            context.num::<T>(y).next_lower(T::zero())
        } else {
            y_max
        };
        if y_min == T::zero() || y_max == T::zero() {
            // Continuous domains have no neighbor to step to; the divisor stays unusable.
            return Ok(());
        }

        let (z_min, z_max) = (context.min::<T>(z), context.max::<T>(z));
        let lower = [
            z_min.divide(y_min, RoundDir::Up),
            z_min.divide(y_max, RoundDir::Up),
            z_max.divide(y_min, RoundDir::Up),
            z_max.divide(y_max, RoundDir::Up),
        ];
        let upper = [
            z_min.divide(y_min, RoundDir::Down),
            z_min.divide(y_max, RoundDir::Down),
            z_max.divide(y_min, RoundDir::Down),
            z_max.divide(y_max, RoundDir::Down),
        ];
        context.set_min(x, fold_min(lower))?;
        context.set_max(x, fold_max(upper))
    }
}

fn fold_min<T: NumValue>(candidates: [T; 4]) -> T {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate < best {
            best = candidate;
        }
    }
    best
}

fn fold_max<T: NumValue>(candidates: [T; 4]) -> T {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate > best {
            best = candidate;
        }
    }
    best
}

impl<T: NumValue> Arc for ProdArc<T> {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.x, self.y, self.z]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.x, self.y, self.z]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Bounds
    }

    fn name(&self) -> &str {
        "Prod"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let (x, y, z) = (self.x, self.y, self.z);

        self.tighten_product(context, x, y, z)?;

        // A product excluding zero rules zero out of both factors, which in turn unlocks the
        // division step below when a factor's remaining bounds sit on one side of zero.
        if !context.num::<T>(z).contains(T::zero()) {
            context.remove_value(x, T::zero())?;
            context.remove_value(y, T::zero())?;
        }

        self.tighten_factor(context, x, y, z)?;
        self.tighten_factor(context, y, x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn forward_bounds_are_the_product_hull() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(-2, 3);
        let y = solver.new_int(4, 5);
        let z = solver.new_int(-100, 100);

        let _ = solver.post(Box::new(ProdArc::<i32>::new(x, y, z)));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(z, -10, 15);
    }

    #[test]
    fn backward_division_rounds_inward() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(-100, 100);
        let y = solver.new_int(3, 3);
        let z = solver.new_int(7, 11);

        let _ = solver.post(Box::new(ProdArc::<i32>::new(x, y, z)));
        solver.propagate().expect("satisfiable");

        // 7/3 rounds up to 3, 11/3 rounds down to 3.
        solver.assert_bounds(x, 3, 3);
    }

    #[test]
    fn zero_straddling_factor_concludes_nothing_backward() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(-10, 10);
        let y = solver.new_int(-1, 1);
        let z = solver.new_int(0, 5);

        let _ = solver.post(Box::new(ProdArc::<i32>::new(x, y, z)));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(x, -10, 10);
    }

    #[test]
    fn nonzero_product_removes_zero_from_factors() {
        let mut solver = TestGraph::default();
        let x = solver.new_int(0, 10);
        let y = solver.new_int(0, 1);
        let z = solver.new_int(6, 6);

        let _ = solver.post(Box::new(ProdArc::<i32>::new(x, y, z)));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(y, 1, 1);
        solver.assert_bounds(x, 6, 6);
    }

    #[test]
    fn continuous_division_is_exact() {
        let mut solver = TestGraph::default();
        let x = solver.new_num(0.0_f64, 100.0);
        let y = solver.new_num(4.0_f64, 4.0);
        let z = solver.new_num(10.0_f64, 10.0);

        let _ = solver.post(Box::new(ProdArc::<f64>::new(x, y, z)));
        solver.propagate().expect("satisfiable");

        solver.assert_bounds(x, 2.5, 2.5);
    }
}
