mod abs;
mod binary;
mod bound;
mod power;
mod prod;
mod square;
mod sum;
mod summation;

pub use abs::*;
pub use binary::*;
pub use bound::*;
pub use power::*;
pub use prod::*;
pub use square::*;
pub use sum::*;
pub use summation::*;
