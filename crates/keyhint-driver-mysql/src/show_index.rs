use indexmap::IndexMap;
use keyhint_core::schema::Index;

/// One row of `SHOW INDEX` output.
#[derive(Debug, Clone)]
pub(crate) struct IndexRow {
    pub(crate) key_name: String,
    pub(crate) non_unique: bool,
    pub(crate) seq_in_index: u64,
    /// `NULL` for functional key parts
    pub(crate) column_name: Option<String>,
    pub(crate) cardinality: Option<u64>,
}

/// Folds `SHOW INDEX` rows into one [`Index`] per key, in the order the
/// server listed the keys.
///
/// Functional key parts have no column name; an index is cut short at its
/// first one since nothing after it can be matched by column.
pub(crate) fn group(rows: Vec<IndexRow>) -> Vec<Index> {
    let mut keys: IndexMap<String, Vec<IndexRow>> = IndexMap::new();

    for row in rows {
        keys.entry(row.key_name.clone()).or_default().push(row);
    }

    keys.into_iter()
        .map(|(name, mut parts)| {
            parts.sort_by_key(|part| part.seq_in_index);

            let unique = parts.iter().all(|part| !part.non_unique);
            // Cardinality is reported per key prefix; the full key's is last
            let cardinality = parts.last().and_then(|part| part.cardinality).unwrap_or(0);
            let columns: Vec<String> = parts
                .into_iter()
                .map_while(|part| part.column_name)
                .collect();

            let index = if name == Index::PRIMARY {
                Index::primary_key(columns)
            } else {
                Index::new(name, columns)
            };

            if unique {
                index.unique().cardinality(cardinality)
            } else {
                index.cardinality(cardinality)
            }
        })
        .collect()
}
