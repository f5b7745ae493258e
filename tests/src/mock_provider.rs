use crate::CallLog;

use keyhint_core::{
    async_trait,
    schema::{Index, TableName},
    stats::StatsProvider,
    Error, Result,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// An in-memory statistics provider that records every call.
#[derive(Debug, Default)]
pub struct MockProvider {
    /// Keyed by the table's display name, e.g. `shop.orders`
    tables: HashMap<String, MockTable>,

    /// Log of all calls made through this provider
    /// Using Arc<Mutex> so tests keep access after the advisor takes ownership
    calls: Arc<Mutex<Vec<ProviderCall>>>,
}

/// Canned statistics for one table.
#[derive(Debug, Clone, Default)]
pub struct MockTable {
    rows: u64,

    /// `estimate_rows` answers keyed by filter text
    estimates: HashMap<String, u64>,

    /// `sample_selectivity` answers keyed by predicate text
    matches: HashMap<String, u64>,

    indexes: Vec<Index>,

    columns: Vec<String>,

    /// Every call touching the table fails
    failing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    EstimateRows {
        table: String,
        filter: Option<String>,
    },
    SampleSelectivity {
        table: String,
        index: Option<String>,
        sample_size: u64,
        predicate: String,
    },
    ListIndexes {
        table: String,
    },
    ListColumns {
        table: String,
    },
    IsPrimaryKeyLeadingColumn {
        table: String,
        field: String,
    },
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, name: impl Into<String>, table: MockTable) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// Get a handle to the call log
    pub fn log(&self) -> CallLog {
        CallLog::new(self.calls.clone())
    }

    fn record(&self, call: ProviderCall) {
        self.calls
            .lock()
            .expect("Failed to acquire call log lock")
            .push(call);
    }

    fn lookup(&self, table: &TableName) -> Result<&MockTable> {
        let name = table.to_string();

        match self.tables.get(&name) {
            Some(mock) if mock.failing => Err(Error::provider(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                format!("lost connection while reading {name}"),
            ))),
            Some(mock) => Ok(mock),
            None => Err(Error::provider(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("table {name} doesn't exist"),
            ))),
        }
    }
}

impl MockTable {
    /// A table with `rows` rows and no indexes.
    pub fn new(rows: u64) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Rows a scan filtered by `filter` is estimated to return.
    pub fn estimate(mut self, filter: impl Into<String>, rows: u64) -> Self {
        self.estimates.insert(filter.into(), rows);
        self
    }

    /// How many sampled rows `predicate` matches. Unlisted predicates match
    /// the whole sample.
    pub fn matches(mut self, predicate: impl Into<String>, matches: u64) -> Self {
        self.matches.insert(predicate.into(), matches);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

#[async_trait]
impl StatsProvider for MockProvider {
    async fn estimate_rows(&self, table: &TableName, filter: Option<&str>) -> Result<u64> {
        self.record(ProviderCall::EstimateRows {
            table: table.to_string(),
            filter: filter.map(str::to_string),
        });

        let mock = self.lookup(table)?;
        Ok(filter
            .and_then(|filter| mock.estimates.get(filter).copied())
            .unwrap_or(mock.rows))
    }

    async fn sample_selectivity(
        &self,
        table: &TableName,
        index: Option<&Index>,
        sample_size: u64,
        predicate: &str,
    ) -> Result<u64> {
        self.record(ProviderCall::SampleSelectivity {
            table: table.to_string(),
            index: index.map(|index| index.name.clone()),
            sample_size,
            predicate: predicate.to_string(),
        });

        let mock = self.lookup(table)?;
        Ok(mock
            .matches
            .get(predicate)
            .copied()
            .unwrap_or(sample_size)
            .min(sample_size))
    }

    async fn list_indexes(&self, table: &TableName) -> Result<Vec<Index>> {
        self.record(ProviderCall::ListIndexes {
            table: table.to_string(),
        });

        Ok(self.lookup(table)?.indexes.clone())
    }

    async fn list_columns(&self, table: &TableName) -> Result<Vec<String>> {
        self.record(ProviderCall::ListColumns {
            table: table.to_string(),
        });

        Ok(self.lookup(table)?.columns.clone())
    }

    async fn is_primary_key_leading_column(&self, table: &TableName, field: &str) -> Result<bool> {
        self.record(ProviderCall::IsPrimaryKeyLeadingColumn {
            table: table.to_string(),
            field: field.to_string(),
        });

        Ok(self
            .lookup(table)?
            .indexes
            .iter()
            .any(|index| {
                index.primary_key
                    && index
                        .leading_column()
                        .is_some_and(|column| column.eq_ignore_ascii_case(field))
            }))
    }
}
