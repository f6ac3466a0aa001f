mod direction;
pub use direction::Direction;

mod eval;

mod expr;
pub use expr::{Expr, MatchOp};

mod expr_arg;
pub use expr_arg::Arg;

mod input;
pub use input::{ConstInput, Input, RecordWithArgs};

mod op_binary;
pub use op_binary::BinaryOp;

mod record;
pub use record::Record;

mod value;
pub use value::Value;

mod value_cmp;
