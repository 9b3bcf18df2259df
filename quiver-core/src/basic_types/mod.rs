mod propagation_status;
mod relation;

pub use propagation_status::*;
pub use relation::*;
