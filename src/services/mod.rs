pub mod ai;
pub mod validate;
