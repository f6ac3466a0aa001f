use super::Error;

/// Category of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad name, duplicate, illegal option, view or permission misuse.
    Validation,

    /// A relationship or foreign key points at a missing table or column, or
    /// at a column that is neither a primary nor a unique key.
    ForeignKeyReference,
}

/// One problem found while validating a schema declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub table: Option<String>,
    pub field: Option<String>,
    pub message: String,
}

impl Failure {
    pub fn schema(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            table: None,
            field: None,
            message: message.into(),
        }
    }

    pub fn table(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::schema(message)
        }
    }

    pub fn field(
        table: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            table: Some(table.into()),
            field: Some(field.into()),
            ..Self::schema(message)
        }
    }

    pub fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = kind;
        self
    }
}

impl core::fmt::Display for Failure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match (&self.table, &self.field) {
            (Some(table), Some(field)) => write!(f, "field `{table}.{field}`: {}", self.message),
            (Some(table), None) => write!(f, "table `{table}`: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Error when a schema declaration fails validation. Carries every failure
/// found, not only the first.
#[derive(Debug)]
pub(super) struct SchemaValidationError {
    failures: Vec<Failure>,
}

impl std::error::Error for SchemaValidationError {}

impl core::fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("schema validation failed: ")?;
        let mut s = "";
        for failure in &self.failures {
            write!(f, "{s}{failure}")?;
            s = "; ";
        }
        Ok(())
    }
}

impl Error {
    /// Creates a schema validation error from the collected failures.
    pub fn schema_validation(failures: Vec<Failure>) -> Error {
        debug_assert!(!failures.is_empty());
        Error::from(super::ErrorKind::SchemaValidation(SchemaValidationError {
            failures,
        }))
    }

    /// Returns `true` if this error is a schema validation error.
    pub fn is_schema_validation(&self) -> bool {
        !self.failures().is_empty()
    }

    /// Returns `true` if any validation failure is a foreign key reference
    /// failure.
    pub fn is_foreign_key_reference(&self) -> bool {
        self.failures()
            .iter()
            .any(|failure| failure.kind == FailureKind::ForeignKeyReference)
    }

    /// The validation failures carried by this error. Empty for other kinds.
    pub fn failures(&self) -> &[Failure] {
        self.find_kind(|kind| match kind {
            super::ErrorKind::SchemaValidation(err) => Some(&err.failures),
            _ => None,
        })
        .map(Vec::as_slice)
        .unwrap_or(&[])
    }
}
