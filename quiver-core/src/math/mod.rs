pub(crate) mod num_ext;
pub(crate) mod precision;
pub mod rounding;
