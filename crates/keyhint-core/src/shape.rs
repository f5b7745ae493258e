//! The shape of one analysed statement.
//!
//! A [`Query`] is produced by a SQL front end and consumed read-only by the
//! advisor: the tables a statement references, how they are joined, the
//! conjunctive filter and the GROUP BY / ORDER BY clauses.

mod direction;
pub use direction::Direction;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_field;
pub use expr_field::ExprField;

mod expr_func;
pub use expr_func::ExprFunc;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_like;
pub use expr_like::ExprLike;

mod expr_not;
pub use expr_not::ExprNot;

mod expr_or;
pub use expr_or::ExprOr;

mod join;
pub use join::{JoinMarker, JoinOperand, NestedJoin, TableFactor};

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::OrderByExpr;

mod query;
pub use query::Query;

mod table_ref;
pub use table_ref::{TableId, TableRef};

mod value;
pub use value::Value;

pub mod visit;
pub use visit::Visit;
