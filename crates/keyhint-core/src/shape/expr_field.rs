use super::{Expr, TableId};

use serde::{Deserialize, Serialize};

/// A column reference.
///
/// `table` is `None` when the front end could not attribute an unqualified
/// column to a single table occurrence; the advisor resolves those against
/// the live schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprField {
    #[serde(default)]
    pub table: Option<TableId>,
    pub name: String,
}

impl ExprField {
    pub fn new(table: TableId, name: impl Into<String>) -> Self {
        Self {
            table: Some(table),
            name: name.into(),
        }
    }

    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }
}

impl Expr {
    pub fn field(table: TableId, name: impl Into<String>) -> Self {
        ExprField::new(table, name).into()
    }

    pub fn unqualified(name: impl Into<String>) -> Self {
        ExprField::unqualified(name).into()
    }
}
