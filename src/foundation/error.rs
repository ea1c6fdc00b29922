/// Convenience result type used across cardsmith.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by the card APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid user-provided data (unknown template, bad colour, failed form validation).
    #[error("validation error: {0}")]
    Validation(String),

    /// Rejected image upload. The model is never touched when this is returned.
    #[error("upload rejected: {0}")]
    Upload(String),

    /// QR matrix generation failed for the current contact payload.
    #[error("qr error: {0}")]
    Qr(String),

    /// Errors while building or rasterizing a card face.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while packaging an export artifact.
    #[error("export error: {0}")]
    Export(String),

    /// Errors reading or writing the snapshot store.
    #[error("storage error: {0}")]
    Storage(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Upload`] value.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Build a [`CardError::Qr`] value.
    pub fn qr(msg: impl Into<String>) -> Self {
        Self::Qr(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CardError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`CardError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
