mod field;
pub use field::{DecimalOptions, Field, FieldTy};

mod index;
pub use index::{Index, UniqueConstraint};

mod permission;
pub use permission::{FieldPermission, Operation, PermissionSet, Rule};

mod relation;
pub use relation::{ForeignKey, ReferentialAction, RelationType, Relationship};

mod schema;
pub use schema::Schema;

mod table;
pub use table::{PrimaryKey, Table};

mod view;
pub use view::{Condition, Filter, GroupBy, Operator, Sort, View};
