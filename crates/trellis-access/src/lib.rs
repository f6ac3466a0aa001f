mod denial;
pub use denial::Denial;

pub mod enforce;
pub use enforce::{BatchOp, Enforcer, ReadResult};

pub mod policy;
pub use policy::{CompiledRule, Decision, PolicySet, TablePolicy};

mod principal;
pub use principal::Principal;

mod role;
pub use role::RoleHierarchy;
