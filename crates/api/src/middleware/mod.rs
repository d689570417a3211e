//! Request extractors shared by handlers.
//!
//! - [`owner::Owner`] -- The caller identity every media operation is scoped to.

pub mod owner;
