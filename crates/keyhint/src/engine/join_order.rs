use super::{cx::Cx, predicate::PredicateKind};

use indexmap::IndexSet;
use keyhint_core::{
    shape::{Expr, ExprField, JoinOperand, NestedJoin, Query, TableFactor, TableId},
    Result,
};
use keyhint_sql::Serializer;
use tracing::{debug, trace};

/// What a structural walk of the join nest finds.
#[derive(Debug, Default)]
pub(crate) struct JoinNest {
    /// Tables that may drive the join, in first-seen order
    pub(crate) candidates: IndexSet<TableId>,

    /// Column equalities taken from `ON` and `USING` clauses
    pub(crate) conditions: Vec<JoinCondition>,
}

/// `lhs = rhs` between two columns.
#[derive(Debug, Clone)]
pub(crate) struct JoinCondition {
    pub(crate) lhs: FieldSite,
    pub(crate) rhs: FieldSite,
}

/// A column reference and the table occurrences it may belong to.
#[derive(Debug, Clone)]
pub(crate) struct FieldSite {
    pub(crate) field: ExprField,
    pub(crate) scope: Vec<TableId>,
}

impl FieldSite {
    pub(crate) fn new(field: ExprField, scope: &[TableId]) -> Self {
        Self {
            field,
            scope: scope.to_vec(),
        }
    }
}

/// Walks the join nest without consulting the database.
pub(crate) fn walk(query: &Query) -> JoinNest {
    let mut walker = Walker {
        query,
        all_tables: query.table_ids().collect(),
        nest: JoinNest::default(),
    };

    // Top-level operands are joined as if by commas
    for operand in query.join_operands().iter() {
        walker.walk_operand(operand);
    }

    walker.nest
}

struct Walker<'a> {
    query: &'a Query,
    all_tables: Vec<TableId>,
    nest: JoinNest,
}

impl Walker<'_> {
    /// Visits an operand that may drive the join.
    fn walk_operand(&mut self, operand: &JoinOperand) {
        match &operand.factor {
            TableFactor::Table(table) => {
                if self.query.table(*table).temporary {
                    trace!(table = %table, "skipping temporary table");
                    return;
                }

                self.extract(operand.on.as_ref());
                self.nest.candidates.insert(*table);
            }
            TableFactor::Nested(nested) => {
                self.extract(operand.on.as_ref());
                self.walk_nested(nested);
            }
        }
    }

    fn walk_nested(&mut self, nested: &NestedJoin) {
        self.extract_using(nested);

        let (left, right) = (&nested.left, &nested.right);

        // A marked leaf never outranks a nested sibling.
        let leaf_against_nest = |marked: &JoinOperand, other: &JoinOperand| {
            marked.is_marked() && marked.is_leaf() && !other.is_leaf()
        };

        if leaf_against_nest(left, right) {
            self.walk_operand(right);
            self.extract_all(left);
        } else if leaf_against_nest(right, left) {
            self.walk_operand(left);
            self.extract_all(right);
        } else {
            match (left.is_marked(), right.is_marked()) {
                (false, false) => {
                    self.walk_operand(left);
                    self.walk_operand(right);
                }
                (true, false) => {
                    self.walk_operand(right);
                    self.extract_all(left);
                }
                (false, true) => {
                    self.walk_operand(left);
                    self.extract_all(right);
                }
                (true, true) => {
                    trace!("both join operands are marked; walking the right one");
                    self.walk_operand(right);
                    self.extract_all(left);
                }
            }
        }
    }

    /// Collects every join condition under an operand that cannot drive the
    /// join.
    fn extract_all(&mut self, operand: &JoinOperand) {
        self.extract(operand.on.as_ref());

        if let TableFactor::Nested(nested) = &operand.factor {
            self.extract_using(nested);
            self.extract_all(&nested.left);
            self.extract_all(&nested.right);
        }
    }

    fn extract_using(&mut self, nested: &NestedJoin) {
        if nested.using.is_empty() {
            return;
        }

        let left = nested.left.tables();
        let right = nested.right.tables();

        for column in &nested.using {
            self.nest.conditions.push(JoinCondition {
                lhs: FieldSite::new(ExprField::unqualified(column), &left),
                rhs: FieldSite::new(ExprField::unqualified(column), &right),
            });
        }
    }

    fn extract(&mut self, on: Option<&Expr>) {
        let Some(expr) = on else { return };

        match expr {
            Expr::And(expr_and) => {
                for operand in &expr_and.operands {
                    self.extract(Some(operand));
                }
            }
            Expr::BinaryOp(binary_op) if binary_op.op.is_eq() => {
                match (&*binary_op.lhs, &*binary_op.rhs) {
                    (Expr::Field(lhs), Expr::Field(rhs)) => {
                        self.nest.conditions.push(JoinCondition {
                            lhs: FieldSite::new(lhs.clone(), &self.all_tables),
                            rhs: FieldSite::new(rhs.clone(), &self.all_tables),
                        });
                    }
                    _ => trace!("skipping join comparison against a non-column"),
                }
            }
            _ => trace!("skipping non-equi join condition"),
        }
    }
}

/// Picks the driving table.
///
/// A statement over a single base table is driven by it without asking the
/// provider. Otherwise each candidate's filtered scan is estimated and the
/// cheapest one wins, ties going to the first candidate seen.
pub(crate) async fn choose_driver(cx: &Cx<'_>, nest: &JoinNest) -> Result<Option<TableId>> {
    let mut base_tables = cx.query.base_tables();

    if let (Some(only), None) = (base_tables.next(), base_tables.next()) {
        debug!(table = %cx.table_name(only), "single table drives the statement");
        return Ok(Some(only));
    }

    match nest.candidates.len() {
        0 => {
            debug!("no table is eligible to drive the join");
            return Ok(None);
        }
        1 => {
            let driver = nest.candidates[0];
            debug!(table = %cx.table_name(driver), "only eligible table drives the join");
            return Ok(Some(driver));
        }
        _ => {}
    }

    let mut best: Option<(TableId, u64)> = None;

    for &candidate in &nest.candidates {
        let name = cx.table_name(candidate);
        let filter = equality_filter(cx, candidate);
        let rows = cx.provider.estimate_rows(&name, filter.as_deref()).await?;

        trace!(table = %name, filter = ?filter, rows, "estimated driver scan");

        if best.map_or(true, |(_, best_rows)| rows < best_rows) {
            best = Some((candidate, rows));
        }
    }

    if let Some((driver, rows)) = best {
        debug!(table = %cx.table_name(driver), rows, "cheapest scan drives the join");
    }

    Ok(best.map(|(driver, _)| driver))
}

/// The table's own equality predicates, ANDed and rendered as SQL.
fn equality_filter(cx: &Cx<'_>, table: TableId) -> Option<String> {
    let equalities = cx
        .state(table)
        .predicates
        .iter()
        .filter(|predicate| predicate.kind == PredicateKind::Equality)
        .map(|predicate| predicate.expr.clone())
        .collect();

    Expr::and_from_vec(equalities).map(|expr| Serializer::mysql().predicate(&expr))
}
