use serde::{Deserialize, Serialize};

/// A value supplied when the expression is evaluated rather than when it is
/// compiled. Row filters derived from permission rules reference the
/// requesting principal through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arg {
    PrincipalId,
    PrincipalOrganization,
}
