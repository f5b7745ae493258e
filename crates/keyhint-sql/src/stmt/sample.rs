use super::{Statement, TableName};

/// Counts the rows of a bounded sample that match a predicate.
///
/// The sample is the first `limit` rows in descending `order_by` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub table: TableName,

    pub order_by: Vec<String>,

    pub limit: u64,

    /// Pre-rendered predicate text
    pub predicate: String,
}

impl Sample {
    /// Alias of the sampled derived table.
    pub const ALIAS: &'static str = "keyhint_sample";
}

impl Statement {
    pub fn sample(table: TableName, order_by: Vec<String>, limit: u64, predicate: &str) -> Self {
        Sample {
            table,
            order_by,
            limit,
            predicate: predicate.to_string(),
        }
        .into()
    }
}

impl From<Sample> for Statement {
    fn from(value: Sample) -> Self {
        Self::Sample(value)
    }
}
