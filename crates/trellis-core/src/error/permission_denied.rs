use super::Error;

/// Error when a principal is not allowed to perform an operation.
#[derive(Debug)]
pub(super) struct PermissionDeniedError {
    message: Box<str>,
}

impl std::error::Error for PermissionDeniedError {}

impl core::fmt::Display for PermissionDeniedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "permission denied: {}", self.message)
    }
}

impl Error {
    /// Creates a permission denied error.
    pub fn permission_denied(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::PermissionDenied(PermissionDeniedError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::PermissionDenied(err) => Some(err),
            _ => None,
        })
        .is_some()
    }
}
