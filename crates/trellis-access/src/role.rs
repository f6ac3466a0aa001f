use crate::Principal;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Role names ordered by numeric level. Higher levels imply the privileges
/// of every lower one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleHierarchy {
    levels: IndexMap<String, u32>,
}

impl RoleHierarchy {
    /// An empty hierarchy: roles only match by name.
    pub fn new() -> RoleHierarchy {
        RoleHierarchy {
            levels: IndexMap::new(),
        }
    }

    pub fn with_role(mut self, name: impl Into<String>, level: u32) -> RoleHierarchy {
        self.levels.insert(name.into(), level);
        self
    }

    pub fn level(&self, role: &str) -> Option<u32> {
        self.levels.get(role).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.levels.iter().map(|(name, level)| (name.as_str(), *level))
    }

    /// Fills in the principal's level from its role when the caller did not
    /// supply one.
    pub fn resolve<'a>(&self, principal: &'a Principal) -> Cow<'a, Principal> {
        if principal.level.is_some() {
            return Cow::Borrowed(principal);
        }

        match principal.role.as_deref().and_then(|role| self.level(role)) {
            Some(level) => Cow::Owned(principal.clone().with_level(level)),
            None => Cow::Borrowed(principal),
        }
    }
}

impl Default for RoleHierarchy {
    fn default() -> Self {
        RoleHierarchy::new()
            .with_role("owner", 100)
            .with_role("admin", 80)
            .with_role("member", 40)
            .with_role("viewer", 10)
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for RoleHierarchy {
    fn from_iter<T: IntoIterator<Item = (K, u32)>>(iter: T) -> Self {
        RoleHierarchy {
            levels: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
