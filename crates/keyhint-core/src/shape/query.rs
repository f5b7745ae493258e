use super::{visit, Expr, ExprField, JoinOperand, OrderByExpr, TableId, TableRef};
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The parsed shape of one SQL statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Every table occurrence the statement references. A [`TableId`] is an
    /// index into this list.
    pub tables: Vec<TableRef>,

    /// The join nest. Top-level operands are joined as if by commas. When
    /// empty, every table is a top-level operand.
    #[serde(default)]
    pub from: Vec<JoinOperand>,

    /// The `WHERE` clause
    #[serde(default)]
    pub filter: Option<Expr>,

    #[serde(default)]
    pub group_by: Vec<ExprField>,

    #[serde(default)]
    pub order_by: Vec<OrderByExpr>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table occurrence, returning its id.
    pub fn add_table(&mut self, table: TableRef) -> TableId {
        self.tables.push(table);
        TableId(self.tables.len() - 1)
    }

    /// ANDs `expr` into the filter.
    pub fn add_filter(&mut self, expr: impl Into<Expr>) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr.into(),
        });
    }

    pub fn table(&self, id: TableId) -> &TableRef {
        &self.tables[id.0]
    }

    pub fn table_ids(&self) -> impl ExactSizeIterator<Item = TableId> + '_ {
        (0..self.tables.len()).map(TableId)
    }

    /// Tables that take part in the analysis.
    pub fn base_tables(&self) -> impl Iterator<Item = TableId> + '_ {
        self.table_ids().filter(|id| !self.table(*id).temporary)
    }

    /// The join nest, defaulting to one top-level operand per table.
    pub fn join_operands(&self) -> Cow<'_, [JoinOperand]> {
        if self.from.is_empty() {
            Cow::Owned(self.table_ids().map(JoinOperand::table).collect())
        } else {
            Cow::Borrowed(&self.from)
        }
    }

    /// Checks that every table id the statement uses is in range and that the
    /// join nest names each occurrence at most once.
    pub fn verify(&self) -> Result<()> {
        let mut seen = vec![false; self.tables.len()];

        for operand in &self.from {
            for id in operand.tables() {
                self.verify_table_id(id)?;
                if std::mem::replace(&mut seen[id.0], true) {
                    return Err(Error::invalid_shape(format!(
                        "table {id} appears more than once in the join nest"
                    )));
                }
            }
        }

        let mut result = Ok(());
        let mut check = |field: &ExprField| {
            if let Some(id) = field.table {
                if result.is_ok() {
                    result = self.verify_table_id(id);
                }
            }
        };

        for operand in &self.from {
            for_each_join_condition(operand, &mut |expr| visit::for_each_field(expr, &mut check));
        }

        if let Some(filter) = &self.filter {
            visit::for_each_field(filter, &mut check);
        }

        self.group_by.iter().for_each(&mut check);
        self.order_by.iter().for_each(|order_by| check(&order_by.field));

        result
    }

    fn verify_table_id(&self, id: TableId) -> Result<()> {
        if id.0 < self.tables.len() {
            Ok(())
        } else {
            Err(Error::invalid_shape(format!(
                "table {id} is out of range; the statement has {} tables",
                self.tables.len()
            )))
        }
    }
}

fn for_each_join_condition(operand: &JoinOperand, f: &mut impl FnMut(&Expr)) {
    if let Some(on) = &operand.on {
        f(on);
    }

    if let super::TableFactor::Nested(nested) = &operand.factor {
        for_each_join_condition(&nested.left, f);
        for_each_join_condition(&nested.right, f);
    }
}
