use super::{Statement, TableName};

/// `SHOW INDEX FROM <table>`
#[derive(Debug, Clone, PartialEq)]
pub struct ShowIndex {
    pub table: TableName,
}

/// `SHOW COLUMNS FROM <table>`
#[derive(Debug, Clone, PartialEq)]
pub struct ShowColumns {
    pub table: TableName,
}

impl Statement {
    pub fn show_index(table: TableName) -> Self {
        Self::ShowIndex(ShowIndex { table })
    }

    pub fn show_columns(table: TableName) -> Self {
        Self::ShowColumns(ShowColumns { table })
    }
}
