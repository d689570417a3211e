//! `Json` and `Query` extractors that reject with [`AppError`].
//!
//! Axum's own extractors answer a bad body or query string with a plain-text
//! 4xx. These wrappers route the rejection through [`AppError`] so clients
//! always get the `{error, code}` envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
