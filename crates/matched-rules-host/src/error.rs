//! Error types for the reference host.

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while matching against a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Selector text that cannot be parsed or uses unsupported syntax.
    ///
    /// This is the `SyntaxError` a browser throws from `Element.matches`.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// An element handle that does not belong to the document.
    #[error("Unknown element {0}")]
    UnknownElement(String),
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create an unknown element error.
    pub fn unknown_element(id: impl std::fmt::Debug) -> Self {
        Self::UnknownElement(format!("{id:?}"))
    }
}
