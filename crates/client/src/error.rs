use thiserror::Error;

/// Errors surfaced to the views.
///
/// `Display` is what the user sees inline, so server messages are shown
/// verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Form input that cannot be turned into a request.
    #[error("{0}")]
    Input(String),
}
