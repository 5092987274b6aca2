//! Tab-specific rendering modules.

pub mod summary;
pub mod tree;
