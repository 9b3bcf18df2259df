//! The concrete arcs of the engine: one small propagation rule per constraint shape. Constraint
//! synthesis ([`crate::expr`]) decomposes posted relations into these.

mod boolean;
mod num;
mod set;
mod trivial;

pub use boolean::*;
pub use num::*;
pub use set::*;
pub use trivial::*;
