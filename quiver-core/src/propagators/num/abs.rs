use crate::basic_types::PropagationResult;
use crate::domains::NumValue;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `|x| = y`.
#[derive(Clone, Copy, Debug)]
pub struct AbsArc<T> {
    x: NodeId,
    y: NodeId,
    marker: std::marker::PhantomData<T>,
}

impl<T: NumValue> AbsArc<T> {
    pub fn new(x: NodeId, y: NodeId) -> Self {
        AbsArc {
            x,
            y,
            marker: std::marker::PhantomData,
        }
    }
}

impl<T: NumValue> Arc for AbsArc<T> {
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
        "Abs"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let (x, y) = (self.x, self.y);
        context.set_min(y, T::zero())?;

        let (x_min, x_max) = (context.min::<T>(x), context.max::<T>(x));
        if x_min >= T::zero() {
            context.set_min(y, x_min)?;
            context.set_max(y, x_max)?;
        } else if x_max <= T::zero() {
            context.set_min(y, x_max.neg())?;
            context.set_max(y, x_min.neg())?;
        } else {
            let magnitude = if x_max > x_min.neg() { x_max } else { x_min.neg() };
            context.set_max(y, magnitude)?;
        }

        let (y_min, y_max) = (context.min::<T>(y), context.max::<T>(y));
        context.set_min(x, y_max.neg())?;
        context.set_max(x, y_max)?;
        // Once x is confined to one side of zero, the far bound of |x| carries over.
        if context.min::<T>(x) >= T::zero() {
            context.set_min(x, y_min)?;
        } else if context.max::<T>(x) <= T::zero() {
            context.set_max(x, y_min.neg())?;
        }
        Ok(())
    }
}
