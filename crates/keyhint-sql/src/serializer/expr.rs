use super::{Comma, Delimited, Formatter, Ident, ToSql};

use crate::stmt::{BinaryOp, Expr};

impl ToSql for &Expr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Expr::And(expr) => {
                let operands = Delimited(expr.operands.iter().map(Grouped::inside_and), " AND ");
                fmt!(f, operands);
            }
            Expr::BinaryOp(expr) => {
                fmt!(f, Grouped::term(&expr.lhs) " " expr.op " " Grouped::term(&expr.rhs));
            }
            Expr::Field(expr) => {
                fmt!(f, Ident(&expr.name));
            }
            Expr::Func(expr) => {
                // Built-in names such as `LEFT` are reserved words
                let name = &expr.name;
                fmt!(f, name "(" Comma(&expr.args) ")");
            }
            Expr::InList(expr) => {
                let not = if expr.negated { " NOT" } else { "" };
                fmt!(f, Grouped::term(&expr.expr) not " IN (" Comma(&expr.list) ")");
            }
            Expr::IsNull(expr) => {
                let not = if expr.negated { " NOT" } else { "" };
                fmt!(f, Grouped::term(&expr.expr) " IS" not " NULL");
            }
            Expr::Like(expr) => {
                let not = if expr.negated { " NOT" } else { "" };
                fmt!(f, Grouped::term(&expr.expr) not " LIKE " Grouped::term(&expr.pattern));
            }
            Expr::Not(expr) => {
                let inner = &*expr.expr;
                fmt!(f, "NOT (" inner ")");
            }
            Expr::Or(expr) => {
                let operands = Delimited(expr.operands.iter().map(Grouped::inside_or), " OR ");
                fmt!(f, operands);
            }
            Expr::Value(value) => {
                fmt!(f, value);
            }
        }
    }
}

impl ToSql for BinaryOp {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use std::fmt::Write;
        // Writing to a `String` cannot fail
        let _ = write!(f.dst, "{self}");
    }
}

/// A sub-expression, parenthesized when it would otherwise bind wrongly.
struct Grouped<'a> {
    expr: &'a Expr,
    parens: bool,
}

impl<'a> Grouped<'a> {
    fn inside_and(expr: &'a Expr) -> Self {
        Self {
            expr,
            parens: matches!(expr, Expr::Or(_)),
        }
    }

    fn inside_or(expr: &'a Expr) -> Self {
        Self {
            expr,
            parens: matches!(expr, Expr::And(_)),
        }
    }

    /// Operand of a comparison or predicate
    fn term(expr: &'a Expr) -> Self {
        Self {
            expr,
            parens: !matches!(expr, Expr::Field(_) | Expr::Value(_) | Expr::Func(_)),
        }
    }
}

impl ToSql for Grouped<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if self.parens {
            fmt!(f, "(" self.expr ")");
        } else {
            self.expr.to_sql(f);
        }
    }
}
