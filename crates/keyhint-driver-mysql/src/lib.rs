mod show_index;
use show_index::IndexRow;

use keyhint_core::{
    async_trait, err,
    schema::{Index, TableName},
    stats::StatsProvider,
    Error, Result,
};
use keyhint_sql::{Serializer, Statement};
use mysql_async::{
    prelude::{ColumnIndex, FromValue, Queryable},
    Pool, Row,
};
use std::fmt;
use tracing::debug;
use url::Url;

/// Statistics provider backed by a live MySQL server.
#[derive(Debug)]
pub struct MySQL {
    pool: Pool,
}

impl MySQL {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_config(format!("invalid connection url: {err}")))?;

        if url.scheme() != "mysql" {
            return Err(Error::invalid_config(format!(
                "connection url does not have a `mysql` scheme; url={url}"
            )));
        }

        if url.host_str().is_none() {
            return Err(Error::invalid_config(format!(
                "missing host in connection url; url={url}"
            )));
        }

        if url.path().trim_start_matches('/').is_empty() {
            return Err(Error::invalid_config(format!(
                "no database specified - missing path in connection url; url={url}"
            )));
        }

        let opts = mysql_async::Opts::from_url(url.as_ref()).map_err(Error::provider)?;
        let pool = Pool::new(opts);
        Ok(Self { pool })
    }

    /// Closes every pooled connection.
    pub async fn disconnect(self) -> Result<()> {
        self.pool.disconnect().await.map_err(Error::provider)
    }

    async fn query(&self, stmt: Statement) -> Result<Vec<Row>> {
        let sql = Serializer::mysql().serialize(&stmt);
        debug!(%sql, "querying statistics");

        let mut conn = self.pool.get_conn().await.map_err(Error::provider)?;
        conn.query(sql.as_str()).await.map_err(|err| {
            Error::provider(err).context(Error::from_args(format_args!("{sql}")))
        })
    }
}

impl From<Pool> for MySQL {
    fn from(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsProvider for MySQL {
    async fn estimate_rows(&self, table: &TableName, filter: Option<&str>) -> Result<u64> {
        let rows = self.query(Statement::explain(table.clone(), filter)).await?;

        let Some(row) = rows.first() else {
            return Err(err!("EXPLAIN returned no rows for {table}"));
        };

        // `rows` is NULL when the optimizer proves the result empty
        let estimate: Option<u64> = column(row, "rows")?;
        Ok(estimate.unwrap_or(0))
    }

    async fn sample_selectivity(
        &self,
        table: &TableName,
        index: Option<&Index>,
        sample_size: u64,
        predicate: &str,
    ) -> Result<u64> {
        let order_by = index.map(|index| index.columns.clone()).unwrap_or_default();
        let stmt = Statement::sample(table.clone(), order_by, sample_size, predicate);

        let rows = self.query(stmt).await?;

        match rows.first() {
            Some(row) => column(row, 0usize),
            None => Err(err!("sample of {table} returned no rows")),
        }
    }

    async fn list_indexes(&self, table: &TableName) -> Result<Vec<Index>> {
        let rows = self.query(Statement::show_index(table.clone())).await?;

        let rows = rows
            .iter()
            .map(|row| {
                Ok(IndexRow {
                    key_name: column(row, "Key_name")?,
                    non_unique: column::<i64>(row, "Non_unique")? != 0,
                    seq_in_index: column(row, "Seq_in_index")?,
                    column_name: column(row, "Column_name")?,
                    cardinality: column(row, "Cardinality")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(show_index::group(rows))
    }

    async fn list_columns(&self, table: &TableName) -> Result<Vec<String>> {
        let rows = self.query(Statement::show_columns(table.clone())).await?;
        rows.iter().map(|row| column(row, "Field")).collect()
    }
}

/// Reads and converts one column of a result row.
fn column<T: FromValue>(row: &Row, index: impl ColumnIndex + fmt::Display + Copy) -> Result<T> {
    match row.get_opt::<T, _>(index) {
        Some(Ok(value)) => Ok(value),
        Some(Err(err)) => Err(err!("cannot convert column `{index}`; value={:?}", err.0)),
        None => Err(err!("result has no column `{index}`")),
    }
}
