use keyhint_core::{schema::TableName, shape::TableId};
use keyhint_sql::{stmt::CreateIndex, Serializer, Statement};

/// The advisor's verdict for one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    /// The table chosen to drive the join, if any
    pub driver: Option<TableId>,

    /// One entry per non-temporary table, in statement order
    pub tables: Vec<TableAdvice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableAdvice {
    pub table: TableId,

    pub name: TableName,

    pub is_driver: bool,

    /// The ordered candidate columns, before primary-key and existing-index
    /// checks were applied.
    pub candidates: Vec<FieldCandidate>,

    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new index should be created
    Create(CreateIndex),

    /// An existing index already serves the candidate columns
    Covered { index: String },

    /// The primary key's leading column would head the index
    PrimaryKey,

    /// Nothing about the statement benefits from an index on this table
    NoCandidates,
}

/// A column worth indexing, with the evidence that made it one.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCandidate {
    pub field: String,

    pub kind: CandidateKind,

    /// Approximate selectivity. Higher is more selective.
    pub selectivity: f64,

    /// The sampled predicate, rendered as SQL
    pub predicate: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    /// Compared to a constant with `=`
    Equality,

    /// Compared to a constant with anything else
    Range,

    /// Reached through a join edge from the driving table
    JoinPropagated,

    /// Taken from `GROUP BY` or `ORDER BY`
    OrderingOnly,
}

impl Advice {
    /// The indexes the advisor suggests creating, in table order.
    pub fn suggestions(&self) -> impl Iterator<Item = &CreateIndex> + '_ {
        self.tables.iter().filter_map(|table| match &table.outcome {
            Outcome::Create(create_index) => Some(create_index),
            _ => None,
        })
    }

    /// The suggestions rendered as MySQL `CREATE INDEX` statements.
    pub fn to_sql(&self) -> Vec<String> {
        let serializer = Serializer::mysql();
        self.suggestions()
            .map(|create_index| serializer.serialize(&Statement::from(create_index.clone())))
            .collect()
    }

    pub fn table(&self, table: TableId) -> Option<&TableAdvice> {
        self.tables.iter().find(|advice| advice.table == table)
    }
}

impl TableAdvice {
    pub fn is_create(&self) -> bool {
        matches!(self.outcome, Outcome::Create(_))
    }

    /// The candidate column names, in index order.
    pub fn candidate_fields(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .map(|candidate| candidate.field.as_str())
            .collect()
    }
}

impl FieldCandidate {
    pub fn new(field: impl Into<String>, kind: CandidateKind, selectivity: f64) -> Self {
        Self {
            field: field.into(),
            kind,
            selectivity,
            predicate: None,
        }
    }

    pub fn join(field: impl Into<String>) -> Self {
        Self::new(field, CandidateKind::JoinPropagated, 0.0)
    }

    pub fn ordering(field: impl Into<String>) -> Self {
        Self::new(field, CandidateKind::OrderingOnly, 0.0)
    }

    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// Returns `true` when both candidates name the same column. MySQL
    /// column names are case-insensitive.
    pub fn is_same_field(&self, other: &str) -> bool {
        self.field.eq_ignore_ascii_case(other)
    }
}

impl CandidateKind {
    /// Lower ranks go first in an index.
    pub(crate) fn rank(self) -> u8 {
        match self {
            CandidateKind::Equality => 0,
            CandidateKind::Range => 1,
            CandidateKind::JoinPropagated => 2,
            CandidateKind::OrderingOnly => 3,
        }
    }
}
