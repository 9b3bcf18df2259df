//! A constraint propagation engine over typed variable domains.
//!
//! Variables of kind int, long, float, double, bool, or set each carry a [`domains::Domain`]
//! of the values still possible. Constraints are decomposed into arcs, small propagation
//! rules that read some domains and narrow others, and the [`engine::NodeArcGraph`] runs a
//! worklist algorithm over them until no arc can narrow anything further (a fixpoint) or some
//! domain would become empty (a failure).
//!
//! The usual entry point is the [`ConstraintStore`]:
//!
//! ```
//! use quiver_core::ConstraintStore;
//!
//! let mut store = ConstraintStore::new();
//! let x = store.new_int("x", 0, 10);
//! let y = store.new_int("y", 0, 10);
//!
//! store.add_constraint(x.expr().add(3).leq(y))?;
//! store.propagate()?;
//!
//! assert_eq!(7, store.max(x));
//! # Ok::<(), quiver_core::PropagationFailure>(())
//! ```
//!
//! Expressions compose lazily: arithmetic operators build trees, and only posting a relation
//! over a tree synthesizes graph structure ([`expr`]). Families of variables indexed by one
//! or more [`generics::GenericIndex`] dimensions expand into one scalar constraint per index
//! combination when posted.
//!
//! Propagation failure is the *expected* infeasibility signal: it is returned, not panicked,
//! and the caller recovers by restoring a previously captured snapshot
//! ([`ConstraintStore::capture_state`]). Malformed graphs (mismatched element counts, kind
//! confusion) are programming errors and panic.

pub(crate) mod basic_types;
pub mod containers;
pub mod domains;
pub mod engine;
pub mod expr;
pub mod generics;
pub mod math;
pub mod propagators;
pub(crate) mod quiver_asserts;

mod api;

pub use api::*;

pub use crate::basic_types::PropagationFailure;
pub use crate::basic_types::PropagationResult;
pub use crate::basic_types::RelOp;
pub use crate::engine::ConsistencyStrength;
pub use crate::engine::RunState;
