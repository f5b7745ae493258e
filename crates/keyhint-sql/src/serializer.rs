#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited, Period};

mod ident;
use ident::Ident;

// Fragment serializers
mod expr;
mod name;
mod statement;
mod value;

use crate::stmt::{Expr, Statement};

/// Serialize a statement to a MySQL SQL string
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a> {
    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn mysql() -> Serializer {
        Serializer { _priv: () }
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();
        let mut fmt = Formatter { dst: &mut ret };

        stmt.to_sql(&mut fmt);

        ret
    }

    /// Renders a predicate as `WHERE` text.
    ///
    /// Column references are emitted unqualified so the text can be applied
    /// to a single-table scan or to a derived sample of that table.
    pub fn predicate(&self, expr: &Expr) -> String {
        let mut ret = String::new();
        let mut fmt = Formatter { dst: &mut ret };

        expr.to_sql(&mut fmt);

        ret
    }
}
