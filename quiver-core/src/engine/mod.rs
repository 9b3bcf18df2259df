//! The propagation engine: nodes wrap domains, arcs wrap constraints, and the
//! [`NodeArcGraph`] runs the worklist fixpoint algorithm over them.

mod arc;
mod context;
mod graph;
mod node;
mod queue;
#[cfg(test)]
pub(crate) mod test_graph;

pub use arc::*;
pub use context::*;
pub use graph::*;
pub use node::*;
pub(crate) use queue::*;
