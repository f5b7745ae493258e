use super::{Direction, ExprField};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByExpr {
    pub field: ExprField,

    /// Ascending or descending
    #[serde(default)]
    pub direction: Direction,
}

impl OrderByExpr {
    pub fn asc(field: ExprField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: ExprField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}
