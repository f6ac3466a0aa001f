use super::Named;
use crate::stmt;

use serde::{Deserialize, Serialize};

/// A CHECK constraint over the columns of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    /// `ck_<table>_<field>_<kind>`
    pub name: String,

    pub expr: stmt::Expr,
}

impl Named for Check {
    fn name(&self) -> &str {
        &self.name
    }
}
