//! Domain types shared by the database, API and client crates.

pub mod error;
pub mod media;
pub mod model;
pub mod serde_helpers;
pub mod types;
