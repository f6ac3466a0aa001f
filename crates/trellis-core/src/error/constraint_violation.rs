use super::Error;

/// Which storage-level constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Unique,
    NotNull,
    Check,
    ForeignKey,
}

/// Error when the database rejects a row because it violates a constraint.
///
/// The surrounding transaction is rolled back by the driver before this error
/// reaches the caller.
#[derive(Debug)]
pub(super) struct ConstraintViolationError {
    kind: ConstraintKind,
    constraint: Option<Box<str>>,
    message: Box<str>,
}

impl std::error::Error for ConstraintViolationError {}

impl core::fmt::Display for ConstraintViolationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let kind = match self.kind {
            ConstraintKind::Unique => "unique",
            ConstraintKind::NotNull => "not-null",
            ConstraintKind::Check => "check",
            ConstraintKind::ForeignKey => "foreign key",
        };

        match &self.constraint {
            Some(name) => write!(f, "{kind} constraint `{name}` violated: {}", self.message),
            None => write!(f, "{kind} constraint violated: {}", self.message),
        }
    }
}

impl Error {
    /// Creates a constraint violation error.
    pub fn constraint_violation(
        kind: ConstraintKind,
        constraint: Option<&str>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::ConstraintViolation(
            ConstraintViolationError {
                kind,
                constraint: constraint.map(Into::into),
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        self.constraint_kind().is_some()
    }

    /// The kind of the violated constraint, if this is a constraint violation.
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::ConstraintViolation(err) => Some(&err.kind),
            _ => None,
        })
        .copied()
    }

    /// The name of the violated constraint, when the database reported it.
    pub fn constraint_name(&self) -> Option<&str> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::ConstraintViolation(err) => err.constraint.as_ref(),
            _ => None,
        })
        .map(|name| &**name)
    }
}
