use super::{Statement, TableName};

/// `EXPLAIN SELECT * FROM <table> [WHERE <filter>]`
#[derive(Debug, Clone, PartialEq)]
pub struct Explain {
    pub table: TableName,

    /// Pre-rendered `WHERE` text
    pub filter: Option<String>,
}

impl Statement {
    pub fn explain(table: TableName, filter: Option<&str>) -> Self {
        Explain {
            table,
            filter: filter.map(str::to_string),
        }
        .into()
    }
}

impl From<Explain> for Statement {
    fn from(value: Explain) -> Self {
        Self::Explain(value)
    }
}
