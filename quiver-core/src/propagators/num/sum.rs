use crate::basic_types::PropagationResult;
use crate::domains::NumValue;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `x + y = z`, tightening the bounds of all three nodes. Differences are posted as
/// sums with the operands shuffled (`z - y = x` becomes `x + y = z`).
#[derive(Clone, Copy, Debug)]
pub struct SumArc<T> {
    x: NodeId,
    y: NodeId,
    z: NodeId,
    marker: std::marker::PhantomData<T>,
}

impl<T: NumValue> SumArc<T> {
    pub fn new(x: NodeId, y: NodeId, z: NodeId) -> Self {
        SumArc {
            x,
            y,
            z,
            marker: std::marker::PhantomData,
        }
    }
}

impl<T: NumValue> Arc for SumArc<T> {
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
        "Sum"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let (x, y, z) = (self.x, self.y, self.z);

        context.set_min(z, context.min::<T>(x).add(context.min::<T>(y)))?;
        context.set_max(z, context.max::<T>(x).add(context.max::<T>(y)))?;

        context.set_min(x, context.min::<T>(z).sub(context.max::<T>(y)))?;
        context.set_max(x, context.max::<T>(z).sub(context.min::<T>(y)))?;

        context.set_min(y, context.min::<T>(z).sub(context.max::<T>(x)))?;
        context.set_max(y, context.max::<T>(z).sub(context.min::<T>(x)))
    }
}
