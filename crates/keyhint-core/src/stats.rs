use crate::{
    async_trait,
    schema::{Index, TableName},
    Result,
};

use std::fmt::Debug;

/// Answers statistics questions about the live database.
///
/// Every call is a round trip to the server. The advisor awaits each call
/// before issuing the next one and treats any error as fatal for the
/// statement being analysed.
#[async_trait]
pub trait StatsProvider: Debug + Send + Sync {
    /// Estimated number of rows a single-table scan of `table` returns with
    /// the given `WHERE` text applied (`None` for an unfiltered scan).
    async fn estimate_rows(&self, table: &TableName, filter: Option<&str>) -> Result<u64>;

    /// Counts how many rows of a `sample_size`-row sample satisfy
    /// `predicate`. The sample is taken in descending `index` order, or in
    /// storage order when the table has no usable index.
    async fn sample_selectivity(
        &self,
        table: &TableName,
        index: Option<&Index>,
        sample_size: u64,
        predicate: &str,
    ) -> Result<u64>;

    /// Existing indexes on `table`, including the primary key.
    async fn list_indexes(&self, table: &TableName) -> Result<Vec<Index>>;

    /// Column names of `table`, in definition order.
    async fn list_columns(&self, table: &TableName) -> Result<Vec<String>>;

    /// Returns `true` when `field` is the first column of the table's primary
    /// key.
    async fn is_primary_key_leading_column(&self, table: &TableName, field: &str) -> Result<bool> {
        let indexes = self.list_indexes(table).await?;
        Ok(indexes
            .iter()
            .any(|index| {
                index.primary_key
                    && index
                        .leading_column()
                        .is_some_and(|column| column.eq_ignore_ascii_case(field))
            }))
    }
}
