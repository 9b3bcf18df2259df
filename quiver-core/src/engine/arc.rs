use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use crate::basic_types::PropagationResult;
use crate::containers::StorageKey;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Identifies an [`Arc`] in the graph's arc arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArcId(pub(crate) u32);

impl StorageKey for ArcId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ArcId(index as u32)
    }
}

/// How exhaustively an arc filters, ordered from weakest to strongest.
///
/// Bounds consistency only protects the endpoints of an interval; range consistency the
/// endpoints of each maximal contiguous sub-interval; arc consistency requires a support for
/// every retained value; hyper-arc consistency extends that to non-binary constraints.
/// Continuous domains support at most [`ConsistencyStrength::Range`], since their value sets
/// may be uncountable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsistencyStrength {
    Bounds,
    Range,
    Arc,
    /// The default: no cap on the filtering strength employed.
    #[default]
    HyperArc,
}

/// A propagation rule attached to one constraint: it reads its source nodes and narrows its
/// target node(s). Non-directional constraints list a node both as source and target.
///
/// Arcs are stateless with respect to the graph beyond their node references; they retain no
/// history across calls.
pub trait Arc: Downcast + std::fmt::Debug {
    /// The nodes this arc reads; a change to any of them re-schedules the arc.
    fn sources(&self) -> Vec<NodeId>;

    /// The nodes this arc may narrow.
    fn targets(&self) -> Vec<NodeId>;

    fn strength(&self) -> ConsistencyStrength;

    fn name(&self) -> &str;

    /// Narrow the target domains as far as the source domains allow. Either succeeds, or fails
    /// the entire propagation run.
    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult;
}

impl_downcast!(Arc);
