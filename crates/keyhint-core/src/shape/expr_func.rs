use super::Expr;

use serde::{Deserialize, Serialize};

/// A function call, e.g. `DATE(created_at)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprFunc {
    pub name: String,

    #[serde(default)]
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn func(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        ExprFunc {
            name: name.into(),
            args: args.into_iter().collect(),
        }
        .into()
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Self::Func(value)
    }
}
