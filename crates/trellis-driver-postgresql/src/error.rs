use tokio_postgres::error::SqlState;
use trellis_core::{ConstraintKind, Error};

/// Converts a driver error, surfacing constraint violations as such.
pub(crate) fn from_postgres(err: tokio_postgres::Error) -> Error {
    let Some(db) = err.as_db_error() else {
        return Error::driver(err);
    };

    let kind = match db.code() {
        code if *code == SqlState::UNIQUE_VIOLATION => ConstraintKind::Unique,
        code if *code == SqlState::NOT_NULL_VIOLATION => ConstraintKind::NotNull,
        code if *code == SqlState::CHECK_VIOLATION => ConstraintKind::Check,
        code if *code == SqlState::FOREIGN_KEY_VIOLATION => ConstraintKind::ForeignKey,
        _ => return Error::driver(err),
    };

    Error::constraint_violation(kind, db.constraint(), db.message())
}
