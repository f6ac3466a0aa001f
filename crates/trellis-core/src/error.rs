mod adhoc;
mod cascade_cycle;
mod constraint_violation;
mod driver;
mod expression_evaluation_failed;
mod invalid_schema;
mod migration_failed;
mod permission_denied;
mod rate_limited;
mod schema_validation;

use adhoc::AdhocError;
use cascade_cycle::CascadeCycleError;
use constraint_violation::ConstraintViolationError;
use driver::DriverError;
use expression_evaluation_failed::ExpressionEvaluationFailed;
use invalid_schema::InvalidSchema;
use migration_failed::MigrationFailedError;
use permission_denied::PermissionDeniedError;
use rate_limited::RateLimitedError;
use schema_validation::SchemaValidationError;
use std::sync::Arc;

pub use constraint_violation::ConstraintKind;
pub use schema_validation::{Failure, FailureKind};

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Trellis.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => {
                    assert!(
                        inner.cause.is_none(),
                        "consequent error must not already have a cause"
                    );
                    inner.kind
                }
                // Shared consequents keep their message but lose identity
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Returns the innermost error in the context chain.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.inner.as_ref().and_then(|inner| inner.cause.as_ref()) {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Searches the context chain for the first error matching `f`.
    fn find_kind<T>(&self, f: impl Fn(&ErrorKind) -> Option<&T>) -> Option<&T> {
        self.chain().find_map(|err| f(err.kind()))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    CascadeCycle(CascadeCycleError),
    ConstraintViolation(ConstraintViolationError),
    Driver(DriverError),
    ExpressionEvaluationFailed(ExpressionEvaluationFailed),
    InvalidSchema(InvalidSchema),
    MigrationFailed(MigrationFailedError),
    PermissionDenied(PermissionDeniedError),
    RateLimited(RateLimitedError),
    SchemaValidation(SchemaValidationError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            CascadeCycle(err) => core::fmt::Display::fmt(err, f),
            ConstraintViolation(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            ExpressionEvaluationFailed(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            MigrationFailed(err) => core::fmt::Display::fmt(err, f),
            PermissionDenied(err) => core::fmt::Display::fmt(err, f),
            RateLimited(err) => core::fmt::Display::fmt(err, f),
            SchemaValidation(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown trellis error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn kind_predicates_search_the_chain() {
        let err = Error::constraint_violation(ConstraintKind::Unique, Some("uq_users_email"), "duplicate key")
            .context(err!("insert into users"));

        assert!(err.is_constraint_violation());
        assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));
        assert_eq!(
            err.to_string(),
            "insert into users: unique constraint `uq_users_email` violated: duplicate key"
        );
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn schema_validation_lists_every_failure() {
        let err = Error::schema_validation(vec![
            Failure::table("InvalidTable", "table name must match ^[a-z][a-z0-9_]*$"),
            Failure::field("orders", "customer", "related table `customers` does not exist")
                .with_kind(FailureKind::ForeignKeyReference),
        ]);

        assert!(err.is_schema_validation());
        assert!(err.is_foreign_key_reference());
        assert_eq!(err.failures().len(), 2);
        assert_eq!(
            err.to_string(),
            "schema validation failed: table `InvalidTable`: table name must match ^[a-z][a-z0-9_]*$; \
             field `orders.customer`: related table `customers` does not exist"
        );
    }

    #[test]
    fn cascade_cycle_message() {
        let err = Error::cascade_cycle(vec!["a".into(), "b".into(), "a".into()]);
        assert!(err.is_cascade_cycle());
        assert!(!err.is_schema_validation());
        assert_eq!(err.to_string(), "circular cascade delete detected: a -> b -> a");
    }

    #[test]
    fn rate_limited_exposes_retry_after() {
        let err = Error::rate_limited(Duration::from_secs(30));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(err.to_string(), "rate limit exceeded; retry after 30s");
    }

    #[test]
    fn migration_failed_wraps_cause() {
        let err = Error::from_args(format_args!("relation \"users\" already exists"))
            .context(Error::migration_failed("CREATE TABLE \"users\" ()"));

        assert!(err.is_migration_failed());
        assert_eq!(
            err.to_string(),
            "migration failed at `CREATE TABLE \"users\" ()`: relation \"users\" already exists"
        );
    }
}
