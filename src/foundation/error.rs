/// Convenience result type used across ember2d.
pub type EmberResult<T> = Result<T, EmberError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum EmberError {
    /// Invalid user-provided or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while loading or looking up a registered resource.
    #[error("resource error: {0}")]
    Resource(String),

    /// Errors from the host's audio sinks.
    #[error("audio error: {0}")]
    Audio(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmberError {
    /// Build an [`EmberError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`EmberError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build an [`EmberError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
