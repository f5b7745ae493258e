use super::{Comma, Formatter, Ident, ToSql};

use crate::stmt::{self, Statement};

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::CreateIndex(stmt) => stmt.to_sql(f),
            Statement::Explain(stmt) => stmt.to_sql(f),
            Statement::Sample(stmt) => stmt.to_sql(f),
            Statement::ShowColumns(stmt) => stmt.to_sql(f),
            Statement::ShowIndex(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = &self.name;
        let table = &self.on;
        let columns = Comma(self.columns.iter().map(Ident));
        fmt!(f, "CREATE INDEX " name " ON " table "(" columns ")");
    }
}

impl ToSql for &stmt::Explain {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = &self.table;
        fmt!(f, "EXPLAIN SELECT * FROM " table);

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}

impl ToSql for &stmt::Sample {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = &self.table;
        fmt!(f, "SELECT COUNT(*) FROM (SELECT * FROM " table);

        if !self.order_by.is_empty() {
            let columns = Comma(self.order_by.iter().map(Desc));
            fmt!(f, " ORDER BY " columns);
        }

        let predicate = &self.predicate;
        fmt!(f, " LIMIT " self.limit ") AS " stmt::Sample::ALIAS " WHERE " predicate);
    }
}

impl ToSql for &stmt::ShowColumns {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = &self.table;
        fmt!(f, "SHOW COLUMNS FROM " table);
    }
}

impl ToSql for &stmt::ShowIndex {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = &self.table;
        fmt!(f, "SHOW INDEX FROM " table);
    }
}

struct Desc<'a>(&'a String);

impl ToSql for Desc<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(self.0) " DESC");
    }
}
