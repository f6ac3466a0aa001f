use crate::{Principal, RoleHierarchy};

use serde::{Deserialize, Serialize};
use trellis_core::{
    schema::app::Rule,
    stmt::{Arg, Expr, Record},
};

/// A permission predicate with role names resolved against the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CompiledRule {
    /// Any principal that is not banned
    Authenticated,

    /// Membership in `names`, or a level of at least `min_level`
    Roles {
        names: Vec<String>,
        min_level: Option<u32>,
    },

    /// `column` holds the principal's identifier
    Owner { column: String },

    /// `column` holds the principal's active organization
    Organization { column: String },

    /// Nobody
    Deny,
}

impl CompiledRule {
    pub fn compile(rule: &Rule, roles: &RoleHierarchy) -> CompiledRule {
        match rule {
            Rule::Authenticated => CompiledRule::Authenticated,
            Rule::Roles { roles: names } => CompiledRule::Roles {
                names: names.clone(),
                min_level: names.iter().filter_map(|name| roles.level(name)).min(),
            },
            Rule::Owner { field } => CompiledRule::Owner {
                column: field.clone(),
            },
            Rule::OrganizationScoped { field } => CompiledRule::Organization {
                column: field.clone(),
            },
        }
    }

    /// Evaluates the rule for one record. Banned principals never pass.
    pub fn evaluate(&self, principal: &Principal, record: &Record) -> bool {
        if principal.banned {
            return false;
        }

        match self {
            CompiledRule::Authenticated => true,
            CompiledRule::Roles { names, min_level } => {
                let member = principal
                    .role
                    .as_ref()
                    .is_some_and(|role| names.contains(role));

                let ranked = match (principal.level, min_level) {
                    (Some(level), Some(min)) => level >= *min,
                    _ => false,
                };

                member || ranked
            }
            CompiledRule::Owner { column } => record.get(column).matches_identity(&principal.id),
            CompiledRule::Organization { column } => match &principal.organization {
                Some(organization) => record.get(column).matches_identity(organization),
                None => false,
            },
            CompiledRule::Deny => false,
        }
    }

    /// Returns `true` when the outcome depends on the record being checked.
    pub fn is_row_dependent(&self) -> bool {
        matches!(
            self,
            CompiledRule::Owner { .. } | CompiledRule::Organization { .. }
        )
    }

    /// Renders the rule as a filter over rows of the table, with the
    /// principal referenced through [`Arg`]s. Rules that do not depend on
    /// the row fold to a constant.
    pub fn row_filter(&self, principal: &Principal) -> Expr {
        if principal.banned {
            return Expr::from(false);
        }

        match self {
            CompiledRule::Owner { column } => {
                Expr::eq(Expr::column(column.as_str()), Arg::PrincipalId)
            }
            CompiledRule::Organization { column } if principal.organization.is_some() => {
                Expr::eq(Expr::column(column.as_str()), Arg::PrincipalOrganization)
            }
            rule => Expr::from(rule.evaluate(principal, &Record::new())),
        }
    }
}
