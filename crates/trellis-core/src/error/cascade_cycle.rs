use super::Error;

/// Error when the `onDelete = cascade` edges of a schema form a cycle.
///
/// Deleting any row on the cycle would recursively delete rows on every other
/// table of the cycle, including the starting table. The cycle is rejected at
/// compile time, before any DDL is produced.
#[derive(Debug)]
pub(super) struct CascadeCycleError {
    /// Table names along the cycle. The first and last entries are equal.
    path: Vec<String>,
}

impl std::error::Error for CascadeCycleError {}

impl core::fmt::Display for CascadeCycleError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "circular cascade delete detected: {}",
            self.path.join(" -> ")
        )
    }
}

impl Error {
    /// Creates a cascade cycle error from the table names along the cycle.
    pub fn cascade_cycle(path: Vec<String>) -> Error {
        Error::from(super::ErrorKind::CascadeCycle(CascadeCycleError { path }))
    }

    /// Returns `true` if this error is a cascade cycle error.
    pub fn is_cascade_cycle(&self) -> bool {
        self.cascade_cycle_path().is_some()
    }

    /// Table names along the detected cycle.
    pub fn cascade_cycle_path(&self) -> Option<&[String]> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::CascadeCycle(err) => Some(&err.path),
            _ => None,
        })
        .map(Vec::as_slice)
    }
}
