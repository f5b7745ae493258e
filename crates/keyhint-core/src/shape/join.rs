use super::{Expr, TableId};

use serde::{Deserialize, Serialize};

/// One side of a join: a table or a nested join, with the join condition
/// and ordering marker the front end attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinOperand {
    pub factor: TableFactor,

    /// The `ON` condition attached to this operand
    #[serde(default)]
    pub on: Option<Expr>,

    #[serde(default)]
    pub marker: JoinMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFactor {
    /// Reference to a table in the query's `tables` vec
    Table(TableId),

    /// A parenthesized join
    Nested(Box<NestedJoin>),
}

/// A binary join between two operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedJoin {
    pub left: JoinOperand,

    pub right: JoinOperand,

    /// Columns listed in `USING (...)`, or shared by a `NATURAL` join
    #[serde(default)]
    pub using: Vec<String>,
}

/// Ordering constraint the front end placed on a join operand.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMarker {
    #[default]
    None,

    /// The operand is the outer-joined (null-supplying) side of a `LEFT JOIN`.
    /// `RIGHT JOIN`s are expected to arrive already rewritten as `LEFT JOIN`s.
    LeftOuter,

    /// `STRAIGHT_JOIN` forces the operand to be read after its sibling.
    Straight,
}

impl JoinOperand {
    pub fn table(table: TableId) -> Self {
        Self {
            factor: TableFactor::Table(table),
            on: None,
            marker: JoinMarker::None,
        }
    }

    pub fn nested(left: JoinOperand, right: JoinOperand) -> Self {
        Self {
            factor: TableFactor::Nested(Box::new(NestedJoin {
                left,
                right,
                using: vec![],
            })),
            on: None,
            marker: JoinMarker::None,
        }
    }

    pub fn on(mut self, on: impl Into<Expr>) -> Self {
        self.on = Some(on.into());
        self
    }

    pub fn left_outer(mut self) -> Self {
        self.marker = JoinMarker::LeftOuter;
        self
    }

    pub fn straight(mut self) -> Self {
        self.marker = JoinMarker::Straight;
        self
    }

    /// Sets the `USING` column list. Only meaningful on nested operands.
    pub fn using(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        if let TableFactor::Nested(nested) = &mut self.factor {
            nested.using = columns.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.factor, TableFactor::Table(_))
    }

    pub fn is_marked(&self) -> bool {
        self.marker != JoinMarker::None
    }

    /// Every table occurrence under this operand, left to right.
    pub fn tables(&self) -> Vec<TableId> {
        let mut tables = vec![];
        self.collect_tables(&mut tables);
        tables
    }

    fn collect_tables(&self, dst: &mut Vec<TableId>) {
        match &self.factor {
            TableFactor::Table(id) => dst.push(*id),
            TableFactor::Nested(nested) => {
                nested.left.collect_tables(dst);
                nested.right.collect_tables(dst);
            }
        }
    }
}
