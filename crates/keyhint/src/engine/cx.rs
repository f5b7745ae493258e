use super::predicate::Predicate;
use crate::{Config, FieldCandidate};

use keyhint_core::{
    schema::{Index, TableName},
    shape::{ExprField, Query, TableId},
    stats::StatsProvider,
    Result,
};
use std::collections::HashMap;
use tracing::trace;

/// Per-statement analysis state.
///
/// Created when a statement is handed to the advisor and dropped once its
/// advice is built. Provider answers are cached here so each question is
/// asked at most once per statement.
pub(crate) struct Cx<'a> {
    pub(crate) query: &'a Query,

    pub(crate) provider: &'a dyn StatsProvider,

    pub(crate) config: &'a Config,

    /// Indexed by `TableId`
    pub(crate) tables: Vec<TableState<'a>>,

    pub(crate) driver: Option<TableId>,

    indexes: HashMap<TableId, Vec<Index>>,

    columns: HashMap<TableId, Vec<String>>,

    row_counts: HashMap<TableId, u64>,

    pk_leading: HashMap<(TableId, String), bool>,
}

#[derive(Debug, Default)]
pub(crate) struct TableState<'a> {
    pub(crate) is_driver: bool,

    pub(crate) join_edges: Vec<JoinEdge>,

    /// `WHERE` predicates attributed to this table, in discovery order
    pub(crate) predicates: Vec<Predicate<'a>>,

    pub(crate) where_candidates: Vec<FieldCandidate>,

    pub(crate) join_candidates: Vec<FieldCandidate>,

    pub(crate) ordering_candidates: Vec<FieldCandidate>,
}

/// "This table's `field` equals `peer`'s `peer_field`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JoinEdge {
    pub(crate) field: String,
    pub(crate) peer: TableId,
    pub(crate) peer_field: String,
}

impl<'a> Cx<'a> {
    pub(crate) fn new(query: &'a Query, provider: &'a dyn StatsProvider, config: &'a Config) -> Self {
        Self {
            query,
            provider,
            config,
            tables: query.tables.iter().map(|_| TableState::default()).collect(),
            driver: None,
            indexes: HashMap::new(),
            columns: HashMap::new(),
            row_counts: HashMap::new(),
            pk_leading: HashMap::new(),
        }
    }

    pub(crate) fn table_name(&self, table: TableId) -> TableName {
        self.query.table(table).table_name()
    }

    pub(crate) fn is_temporary(&self, table: TableId) -> bool {
        self.query.table(table).temporary
    }

    pub(crate) fn state(&self, table: TableId) -> &TableState<'a> {
        &self.tables[table.0]
    }

    pub(crate) fn state_mut(&mut self, table: TableId) -> &mut TableState<'a> {
        &mut self.tables[table.0]
    }

    pub(crate) fn set_driver(&mut self, driver: Option<TableId>) {
        if let Some(previous) = self.driver.take() {
            self.tables[previous.0].is_driver = false;
        }

        if let Some(driver) = driver {
            self.tables[driver.0].is_driver = true;
        }

        self.driver = driver;
    }

    pub(crate) async fn indexes(&mut self, table: TableId) -> Result<&[Index]> {
        if !self.indexes.contains_key(&table) {
            let indexes = self.provider.list_indexes(&self.table_name(table)).await?;
            self.indexes.insert(table, indexes);
        }

        Ok(self.indexes.get(&table).map(Vec::as_slice).unwrap_or_default())
    }

    pub(crate) async fn columns(&mut self, table: TableId) -> Result<&[String]> {
        if !self.columns.contains_key(&table) {
            let columns = self.provider.list_columns(&self.table_name(table)).await?;
            self.columns.insert(table, columns);
        }

        Ok(self.columns.get(&table).map(Vec::as_slice).unwrap_or_default())
    }

    /// Estimated rows of an unfiltered scan.
    pub(crate) async fn row_count(&mut self, table: TableId) -> Result<u64> {
        if let Some(rows) = self.row_counts.get(&table) {
            return Ok(*rows);
        }

        let rows = self
            .provider
            .estimate_rows(&self.table_name(table), None)
            .await?;
        self.row_counts.insert(table, rows);
        Ok(rows)
    }

    pub(crate) async fn is_primary_key_leading_column(
        &mut self,
        table: TableId,
        field: &str,
    ) -> Result<bool> {
        let key = (table, field.to_string());

        if let Some(answer) = self.pk_leading.get(&key) {
            return Ok(*answer);
        }

        let answer = self
            .provider
            .is_primary_key_leading_column(&self.table_name(table), field)
            .await?;
        self.pk_leading.insert(key, answer);
        Ok(answer)
    }

    /// Works out which table occurrence `field` belongs to.
    ///
    /// `scope` lists the occurrences the field could refer to. Qualified
    /// fields need no lookup. An unqualified field in a one-table scope
    /// belongs to that table. Otherwise the column lists of the in-scope
    /// tables are consulted and the field is attributed only when exactly one
    /// of them has the column.
    pub(crate) async fn attribute(
        &mut self,
        field: &ExprField,
        scope: &[TableId],
    ) -> Result<Option<TableId>> {
        if let Some(table) = field.table {
            if self.is_temporary(table) {
                trace!(field = %field.name, table = %table, "field belongs to a temporary table");
                return Ok(None);
            }
            return Ok(Some(table));
        }

        if let [table] = scope {
            return Ok((!self.is_temporary(*table)).then_some(*table));
        }

        let mut owner = None;

        for &table in scope {
            if self.is_temporary(table) {
                continue;
            }

            let has_column = self
                .columns(table)
                .await?
                .iter()
                .any(|column| column.eq_ignore_ascii_case(&field.name));

            if has_column {
                if owner.is_some() {
                    trace!(field = %field.name, "ambiguous column; ignoring");
                    return Ok(None);
                }
                owner = Some(table);
            }
        }

        if owner.is_none() {
            trace!(field = %field.name, "no table in scope has the column; ignoring");
        }

        Ok(owner)
    }

    /// Records a symmetric join edge between two tables.
    pub(crate) fn add_join_edge(&mut self, lhs: TableId, lhs_field: &str, rhs: TableId, rhs_field: &str) {
        self.push_edge(lhs, lhs_field, rhs, rhs_field);
        self.push_edge(rhs, rhs_field, lhs, lhs_field);
    }

    fn push_edge(&mut self, table: TableId, field: &str, peer: TableId, peer_field: &str) {
        let edge = JoinEdge {
            field: field.to_string(),
            peer,
            peer_field: peer_field.to_string(),
        };

        let edges = &mut self.tables[table.0].join_edges;
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }
}
