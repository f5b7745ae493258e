use super::Expr;

use serde::{Deserialize, Serialize};

/// Whether an expression is (or is not) null. This is different from a
/// binary expression because of how databases treat null comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprIsNull {
    pub expr: Box<Expr>,

    #[serde(default)]
    pub negated: bool,
}

impl Expr {
    pub fn is_null(expr: impl Into<Self>) -> Self {
        ExprIsNull {
            expr: Box::new(expr.into()),
            negated: false,
        }
        .into()
    }

    pub fn is_not_null(expr: impl Into<Self>) -> Self {
        ExprIsNull {
            expr: Box::new(expr.into()),
            negated: true,
        }
        .into()
    }
}

impl From<ExprIsNull> for Expr {
    fn from(value: ExprIsNull) -> Self {
        Self::IsNull(value)
    }
}
