use super::join_order::{FieldSite, JoinCondition};

use keyhint_core::shape::{Expr, ExprBinaryOp, ExprField, TableId};
use tracing::trace;

/// A `WHERE` conjunct comparing one column to constants.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Predicate<'a> {
    pub(crate) field: &'a ExprField,
    pub(crate) kind: PredicateKind,
    /// The whole conjunct, sampled as-is
    pub(crate) expr: &'a Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PredicateKind {
    Equality,
    Range,
}

#[derive(Debug, Default)]
pub(crate) struct Classified<'a> {
    pub(crate) predicates: Vec<Predicate<'a>>,
    /// Two-column `=` comparisons, handled like `ON` conditions
    pub(crate) joins: Vec<JoinCondition>,
}

/// Splits a `WHERE` clause into indexable predicates and join conditions.
///
/// Only the top-level `AND` tree is walked. `OR` and `NOT` subtrees, and any
/// comparison whose column is wrapped in a function, are skipped.
pub(crate) fn classify<'a>(filter: Option<&'a Expr>, scope: &[TableId]) -> Classified<'a> {
    let mut classified = Classified::default();

    if let Some(filter) = filter {
        classify_expr(filter, scope, &mut classified);
    }

    classified
}

fn classify_expr<'a>(expr: &'a Expr, scope: &[TableId], dst: &mut Classified<'a>) {
    let predicate = |field, kind| Predicate { field, kind, expr };

    match expr {
        Expr::And(expr_and) => {
            for operand in &expr_and.operands {
                classify_expr(operand, scope, dst);
            }
        }
        Expr::Or(_) => trace!("skipping OR subtree"),
        Expr::Not(_) => trace!("skipping NOT subtree"),
        Expr::BinaryOp(binary_op) => match operands(binary_op) {
            Operands::Fields(lhs, rhs) if binary_op.op.is_eq() => {
                dst.joins.push(JoinCondition {
                    lhs: FieldSite::new(lhs.clone(), scope),
                    rhs: FieldSite::new(rhs.clone(), scope),
                });
            }
            Operands::Fields(..) => trace!(op = %binary_op.op, "skipping non-equi column comparison"),
            Operands::Constant(field) => {
                let kind = if binary_op.op.is_eq() {
                    PredicateKind::Equality
                } else {
                    PredicateKind::Range
                };
                dst.predicates.push(predicate(field, kind));
            }
            Operands::Other => trace!("skipping comparison without a bare column"),
        },
        Expr::InList(in_list) if !in_list.negated => {
            match in_list.expr.as_field() {
                Some(field) if in_list.list.iter().all(Expr::is_const) => {
                    dst.predicates.push(predicate(field, PredicateKind::Range));
                }
                _ => trace!("skipping IN list"),
            }
        }
        Expr::IsNull(is_null) => match is_null.expr.as_field() {
            Some(field) => dst.predicates.push(predicate(field, PredicateKind::Range)),
            None => trace!("skipping IS NULL on an expression"),
        },
        Expr::Like(like) if !like.negated => match like.expr.as_field() {
            Some(field) if like.is_left_anchored() => {
                dst.predicates.push(predicate(field, PredicateKind::Range));
            }
            Some(field) => trace!(field = %field.name, "skipping LIKE with a leading wildcard"),
            None => trace!("skipping LIKE on an expression"),
        },
        _ => trace!("skipping non-indexable conjunct"),
    }
}

enum Operands<'a> {
    /// Both sides are columns
    Fields(&'a ExprField, &'a ExprField),
    /// One side is a column, the other a constant
    Constant(&'a ExprField),
    Other,
}

fn operands(binary_op: &ExprBinaryOp) -> Operands<'_> {
    match (&*binary_op.lhs, &*binary_op.rhs) {
        (Expr::Field(lhs), Expr::Field(rhs)) => Operands::Fields(lhs, rhs),
        (Expr::Field(field), other) | (other, Expr::Field(field)) if other.is_const() => {
            Operands::Constant(field)
        }
        _ => Operands::Other,
    }
}
