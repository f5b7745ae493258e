use super::{Expr, Value};

use serde::{Deserialize, Serialize};

/// `expr [NOT] LIKE pattern`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprLike {
    pub expr: Box<Expr>,

    pub pattern: Box<Expr>,

    #[serde(default)]
    pub negated: bool,
}

impl ExprLike {
    /// Returns `true` when the pattern is a literal that does not start with a
    /// wildcard, so that a left-anchored index range can serve it.
    pub fn is_left_anchored(&self) -> bool {
        match &*self.pattern {
            Expr::Value(Value::String(pattern)) => {
                !pattern.is_empty() && !pattern.starts_with(['%', '_'])
            }
            _ => false,
        }
    }
}

impl Expr {
    pub fn like(expr: impl Into<Self>, pattern: impl Into<Self>) -> Self {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
            negated: false,
        }
        .into()
    }
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Self::Like(value)
    }
}
