use crate::FieldCandidate;

use keyhint_core::schema::Index;

/// Finds an existing index whose leading columns are exactly the candidate
/// columns, in order.
///
/// The set of indexes having candidate *i* at ordinal *i* is intersected
/// position by position, stopping as soon as it is empty.
pub(crate) fn covering_index<'i>(indexes: &'i [Index], candidates: &[FieldCandidate]) -> Option<&'i Index> {
    if candidates.is_empty() {
        return None;
    }

    let mut survivors: Vec<&Index> = indexes.iter().collect();

    for (i, candidate) in candidates.iter().enumerate() {
        let position = i + 1;
        survivors.retain(|index| has_column_at(index, &candidate.field, position));

        if survivors.is_empty() {
            return None;
        }
    }

    survivors.first().copied()
}

/// Returns `true` if `index` has `column` at the given 1-based position.
pub(crate) fn has_column_at(index: &Index, column: &str, position: usize) -> bool {
    index
        .column_at(position)
        .is_some_and(|at| at.eq_ignore_ascii_case(column))
}
