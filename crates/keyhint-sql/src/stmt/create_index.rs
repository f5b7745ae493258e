use super::{Name, Statement, TableName};

/// MySQL rejects identifiers longer than this.
const MAX_IDENT_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    /// Name of the index
    pub name: Name,

    /// Which table to index
    pub on: TableName,

    /// The columns to index, in index order
    pub columns: Vec<String>,
}

impl CreateIndex {
    /// Derives an index name by joining `prefix` and the column names with
    /// underscores, e.g. `idx_customer_id_status`.
    pub fn name_for(prefix: &str, columns: &[String]) -> Name {
        let mut name = String::from(prefix);
        for column in columns {
            if !name.is_empty() {
                name.push('_');
            }
            name.push_str(column);
        }

        if let Some((end, _)) = name.char_indices().nth(MAX_IDENT_LEN) {
            name.truncate(end);
        }

        Name::from(name)
    }
}

impl Statement {
    pub fn create_index(prefix: &str, on: TableName, columns: Vec<String>) -> Self {
        CreateIndex {
            name: CreateIndex::name_for(prefix, &columns),
            on,
            columns,
        }
        .into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
