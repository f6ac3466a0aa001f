use super::{Compiled, Db, Shared};
use crate::{driver, driver::Driver, Result};

use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::sync::Mutex;
use trellis_access::RoleHierarchy;
use trellis_core::schema::{self, app};

#[derive(Debug, Default)]
pub struct Builder {
    /// Schema builder
    core: schema::Builder,

    roles: RoleHierarchy,

    /// Compiled and published when the handle is built. Nothing is applied
    /// to the database until [`Db::apply`].
    declaration: app::Schema,
}

impl Builder {
    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.core.table_name_prefix(prefix);
        self
    }

    pub fn roles(&mut self, roles: RoleHierarchy) -> &mut Self {
        self.roles = roles;
        self
    }

    pub fn declaration(&mut self, declaration: app::Schema) -> &mut Self {
        self.declaration = declaration;
        self
    }

    pub fn build(&self, driver: impl Driver) -> Result<Db> {
        self.build_boxed(Box::new(driver))
    }

    /// Builds a handle for the database at `url`.
    pub fn connect(&self, url: &str) -> Result<Db> {
        self.build_boxed(driver::from_url(url)?)
    }

    fn build_boxed(&self, driver: Box<dyn Driver>) -> Result<Db> {
        let schema = self.core.build(self.declaration.clone())?;
        let compiled = Compiled::new(schema, &self.roles);

        Ok(Db {
            shared: Arc::new(Shared {
                driver,
                builder: self.core.clone(),
                roles: self.roles.clone(),
                compiled: ArcSwap::from_pointee(compiled),
                apply: Mutex::new(()),
            }),
        })
    }
}
