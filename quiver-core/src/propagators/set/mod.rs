mod intersection;
mod member;
mod null_intersection;
mod subset;
mod union;

pub use intersection::*;
pub use member::*;
pub use null_intersection::*;
pub use subset::*;
pub use union::*;
