use super::Error;

/// Error when a migration statement fails to apply.
///
/// The migration runs in a single transaction, so by the time this error is
/// returned the database has been rolled back to its pre-migration state. The
/// driver error that caused the failure is available as the cause.
#[derive(Debug)]
pub(super) struct MigrationFailedError {
    statement: Option<Box<str>>,
}

impl std::error::Error for MigrationFailedError {}

impl core::fmt::Display for MigrationFailedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.statement {
            Some(statement) => write!(f, "migration failed at `{statement}`"),
            None => f.write_str("migration failed"),
        }
    }
}

impl Error {
    /// Creates a migration failure for the given statement. Use with
    /// [`Error::context`] to attach the underlying cause.
    pub fn migration_failed(statement: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MigrationFailed(MigrationFailedError {
            statement: Some(statement.into().into()),
        }))
    }

    /// Returns `true` if this error is a migration failure.
    pub fn is_migration_failed(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::MigrationFailed(err) => Some(err),
            _ => None,
        })
        .is_some()
    }
}
