//! The outward-facing orchestration surface: a [`ConstraintStore`] owning the graph, the
//! variable handles it hands out, and the posting/propagation entry points.

mod store;

pub use store::*;
