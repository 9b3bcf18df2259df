//! Symbolic indexing: "arrays" of constants and expressions addressed by named indices, with
//! row-major flattening and projection onto index subsets (fragments).

mod constant;
mod index;
mod layout;
mod name_gen;

pub use constant::*;
pub use index::*;
pub use layout::*;
pub use name_gen::*;
