use super::Expr;

use serde::{Deserialize, Serialize};

/// `expr [NOT] IN (list...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprInList {
    pub expr: Box<Expr>,

    pub list: Vec<Expr>,

    #[serde(default)]
    pub negated: bool,
}

impl Expr {
    pub fn in_list(expr: impl Into<Self>, list: impl IntoIterator<Item = Expr>) -> Self {
        ExprInList {
            expr: Box::new(expr.into()),
            list: list.into_iter().collect(),
            negated: false,
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
