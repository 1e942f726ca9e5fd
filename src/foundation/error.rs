/// Crate-wide result alias.
pub type FotobooResult<T> = Result<T, FotobooError>;

#[derive(thiserror::Error, Debug)]
pub enum FotobooError {
    /// Rejected user input: wrong file type, wrong photo count, wrong selection count, ...
    #[error("validation error: {0}")]
    Validation(String),

    #[error("device error: {0}")]
    Device(#[from] DeviceAccessError),

    #[error("render error: {0}")]
    Render(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FotobooError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for errors the user can fix by changing their input and retrying.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for FotobooError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

/// Failure to acquire a capture stream.
///
/// Display strings are the user-facing messages shown inline next to the live preview.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum DeviceAccessError {
    #[error("Camera permission denied. Please allow camera access and try again.")]
    PermissionDenied,

    #[error("No camera found. Please connect a camera and try again.")]
    NotFound,

    #[error("Camera is in use by another app. Please close other apps and try again.")]
    InUse,

    #[error("Unable to access camera.")]
    Unavailable,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
