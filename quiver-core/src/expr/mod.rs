//! Lazy expression composition. Arithmetic operators build expression trees without touching
//! the graph; relational methods build [`Constraint`] descriptors; the concrete arcs are
//! synthesized only when a constraint is posted ([`crate::api::ConstraintStore`]).

mod boolean;
mod constraint;
mod generic;
mod handles;
mod num;
mod set;
pub(crate) mod synthesis;

pub use boolean::*;
pub use constraint::*;
pub use generic::*;
pub use handles::*;
pub use num::*;
pub use set::*;
