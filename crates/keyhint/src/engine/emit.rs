use crate::FieldCandidate;

use keyhint_core::schema::TableName;
use keyhint_sql::stmt::CreateIndex;

/// Builds the `CREATE INDEX` suggestion for an ordered candidate list.
pub(crate) fn create_index(prefix: &str, on: TableName, candidates: &[FieldCandidate]) -> CreateIndex {
    let columns: Vec<String> = candidates
        .iter()
        .map(|candidate| candidate.field.clone())
        .collect();

    CreateIndex {
        name: CreateIndex::name_for(prefix, &columns),
        on,
        columns,
    }
}
