//! Database row types.
//!
//! Each submodule maps a table's rows with `FromRow` and converts them into
//! the shared types from `watchlog_core::model`, which it re-exports.

pub mod media;
