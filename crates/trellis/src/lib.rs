pub mod db;
pub use db::{Applied, Compiled, Db};

pub mod driver;

pub use trellis_access::{
    BatchOp, Denial, Enforcer, PolicySet, Principal, ReadResult, RoleHierarchy,
};

pub use trellis_core::{schema, stmt, Error, Result, Schema};
