use super::Error;

/// Error when a validated declaration still cannot be compiled.
///
/// This occurs when:
/// - A generated identifier exceeds the PostgreSQL identifier limit
/// - Two generated constraint names collide
/// - A stored schema snapshot cannot be decoded
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::InvalidSchema(err) => Some(err),
            _ => None,
        })
        .is_some()
    }
}
