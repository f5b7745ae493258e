use serde::{Deserialize, Serialize};

/// An index that already exists on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name, unique within the table
    pub name: String,

    /// When `true`, indexed entries are unique
    #[serde(default)]
    pub unique: bool,

    /// When `true`, the index is the table's primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Number of distinct keys recorded by the database's statistics
    #[serde(default)]
    pub cardinality: u64,

    /// Indexed columns, in index order
    pub columns: Vec<String>,
}

impl Index {
    /// Name MySQL reports for the primary key index.
    pub const PRIMARY: &'static str = "PRIMARY";

    pub fn new(name: impl Into<String>, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            unique: false,
            primary_key: false,
            cardinality: 0,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a primary key index over the given columns.
    pub fn primary_key(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            unique: true,
            primary_key: true,
            ..Self::new(Self::PRIMARY, columns)
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn cardinality(mut self, cardinality: u64) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Returns the column at the given 1-based ordinal position.
    pub fn column_at(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.columns.get(i))
            .map(String::as_str)
    }

    /// The first indexed column.
    pub fn leading_column(&self) -> Option<&str> {
        self.column_at(1)
    }

    /// Picks the index a filtering scan should be ordered by.
    ///
    /// The primary key wins; otherwise the unique index with the smallest
    /// cardinality; otherwise the non-unique index with the largest
    /// cardinality. Ties keep the first listed index.
    pub fn best_for_filtering(indexes: &[Index]) -> Option<&Index> {
        if let Some(pk) = indexes.iter().find(|index| index.primary_key) {
            return Some(pk);
        }

        let mut unique: Option<&Index> = None;
        let mut non_unique: Option<&Index> = None;

        for index in indexes.iter().filter(|index| !index.columns.is_empty()) {
            if index.unique {
                if unique.map_or(true, |best| index.cardinality < best.cardinality) {
                    unique = Some(index);
                }
            } else if non_unique.map_or(true, |best| index.cardinality > best.cardinality) {
                non_unique = Some(index);
            }
        }

        unique.or(non_unique)
    }
}
