use crate::basic_types::PropagationResult;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;
use crate::domains::NumValue;
use crate::math::rounding::RoundDir;
use crate::quiver_asserts::quiver_assert_simple;

/// Arc for `xⁿ = y` with a constant positive exponent and a non-negative base. The base is
/// forced non-negative; exponentiation is then monotone and both directions are plain bound
/// maps.
#[derive(Clone, Copy, Debug)]
pub struct PowerArc<T> {
    x: NodeId,
    y: NodeId,
    exp: u32,
    marker: std::marker::PhantomData<T>,
}

impl<T: NumValue> PowerArc<T> {
    pub fn new(x: NodeId, y: NodeId, exp: u32) -> Self {
        quiver_assert_simple!(exp >= 1, "power arcs require a positive exponent");
        PowerArc {
            x,
            y,
            exp,
            marker: std::marker::PhantomData,
        }
    }
}

impl<T: NumValue> Arc for PowerArc<T> {
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
        "Power"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let (x, y) = (self.x, self.y);
        context.set_min(x, T::zero())?;
        context.set_min(y, T::zero())?;

        context.set_min(y, context.min::<T>(x).pow_exp(self.exp))?;
        context.set_max(y, context.max::<T>(x).pow_exp(self.exp))?;

        context.set_min(x, context.min::<T>(y).root(self.exp, RoundDir::Up))?;
        context.set_max(x, context.max::<T>(y).root(self.exp, RoundDir::Down))
    }
}
