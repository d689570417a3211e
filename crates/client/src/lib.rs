//! `watchlog-client` library crate.
//!
//! Holds a local projection of the server's media list and the views that
//! edit and display it. The projection is seeded by one full load and then
//! patched only with the exact result of each confirmed mutation.
//!
//! The binary entrypoint lives in `main.rs`.

pub mod api;
pub mod app;
pub mod error;
pub mod form;
pub mod store;
pub mod table;

#[cfg(test)]
mod testing;
