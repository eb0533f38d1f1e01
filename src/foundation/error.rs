/// Convenience result type used across the crate.
pub type CaptchaResult<T> = Result<T, CaptchaError>;

/// Top-level error taxonomy.
#[derive(thiserror::Error, Debug)]
pub enum CaptchaError {
    /// Invalid geometry, rotation bound, noise parameters or other user configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Font bytes could not be loaded, registered or discovered.
    #[error("font error: {0}")]
    Font(String),

    /// Internal rendering invariant broken (buffer sizes, missing surfaces).
    #[error("render error: {0}")]
    Render(String),

    /// Writer or container failure while producing an output stream.
    #[error(
        "encoding error{}: {message}",
        .frame.map(|i| format!(" at frame {i}")).unwrap_or_default()
    )]
    Encoding {
        /// Index of the frame being appended when the failure happened, if any.
        frame: Option<u64>,
        /// Underlying failure description.
        message: String,
    },

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptchaError {
    /// Build a [`CaptchaError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CaptchaError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CaptchaError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CaptchaError::Encoding`] value.
    pub fn encoding(frame: Option<u64>, msg: impl Into<String>) -> Self {
        Self::Encoding {
            frame,
            message: msg.into(),
        }
    }

    /// Build a [`CaptchaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Frame index attached to an encoding failure.
    pub fn failed_frame(&self) -> Option<u64> {
        match self {
            Self::Encoding { frame, .. } => *frame,
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
