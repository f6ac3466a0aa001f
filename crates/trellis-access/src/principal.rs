use serde::{Deserialize, Serialize};
use trellis_core::stmt::{Arg, Value};

/// The authenticated caller of a request.
///
/// Sessions are issued elsewhere; this is only what enforcement needs to
/// know about the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Level of `role` in the role hierarchy. Resolved from the hierarchy
    /// when not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// The active organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(default)]
    pub banned: bool,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Principal {
        Principal {
            id: id.into(),
            role: None,
            level: None,
            organization: None,
            banned: false,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Principal {
        self.role = Some(role.into());
        self
    }

    pub fn with_level(mut self, level: u32) -> Principal {
        self.level = Some(level);
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Principal {
        self.organization = Some(organization.into());
        self
    }

    pub fn banned(mut self) -> Principal {
        self.banned = true;
        self
    }

    /// Values for the arguments of a row filter.
    pub fn args(&self) -> Vec<(Arg, Value)> {
        vec![
            (Arg::PrincipalId, Value::from(self.id.as_str())),
            (
                Arg::PrincipalOrganization,
                match &self.organization {
                    Some(organization) => Value::from(organization.as_str()),
                    None => Value::Null,
                },
            ),
        ]
    }
}
