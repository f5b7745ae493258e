use crate::{CandidateKind, FieldCandidate};

/// Merges a table's candidates into index column order.
///
/// `WHERE` candidates are inserted first, in discovery order, then
/// join-propagated ones, then ordering ones. Equalities lead, most selective
/// first, followed by ranges, most selective first. Join-propagated columns
/// follow every range, or with `icp_compatible` sit right after the first
/// range so the rest can be checked by index condition pushdown. Ordering
/// columns always trail. A column is kept at its highest-priority occurrence.
pub(crate) fn order_candidates(
    where_candidates: &[FieldCandidate],
    join_candidates: &[FieldCandidate],
    ordering_candidates: &[FieldCandidate],
    icp_compatible: bool,
) -> Vec<FieldCandidate> {
    let mut list = Vec::new();

    for candidate in where_candidates.iter().chain(join_candidates) {
        insert(&mut list, candidate, icp_compatible);
    }

    for candidate in ordering_candidates {
        if !list.iter().any(|c: &FieldCandidate| c.is_same_field(&candidate.field)) {
            list.push(candidate.clone());
        }
    }

    list
}

/// Drops the primary key's leading column from an ordered list.
///
/// Returns `None` when that column heads the list: the primary key already
/// serves whatever the index would.
pub(crate) fn exclude_primary_key(
    mut list: Vec<FieldCandidate>,
    pk_leading: Option<&str>,
) -> Option<Vec<FieldCandidate>> {
    let Some(pk) = pk_leading else {
        return Some(list);
    };

    if list.first().is_some_and(|head| head.is_same_field(pk)) {
        return None;
    }

    list.retain(|candidate| !candidate.is_same_field(pk));
    Some(list)
}

fn insert(list: &mut Vec<FieldCandidate>, candidate: &FieldCandidate, icp_compatible: bool) {
    if let Some(i) = list.iter().position(|c| c.is_same_field(&candidate.field)) {
        if list[i].kind.rank() <= candidate.kind.rank() {
            return;
        }
        list.remove(i);
    }

    let position = match candidate.kind {
        CandidateKind::Equality => list
            .iter()
            .position(|c| c.kind != CandidateKind::Equality || c.selectivity < candidate.selectivity),
        CandidateKind::Range => list.iter().position(|c| match c.kind {
            CandidateKind::Equality => false,
            CandidateKind::Range => c.selectivity < candidate.selectivity,
            _ => true,
        }),
        CandidateKind::JoinPropagated if icp_compatible => list
            .iter()
            .position(|c| c.kind == CandidateKind::Range)
            .map(|first_range| {
                // After the first range and any join columns already placed
                // behind it
                list[first_range + 1..]
                    .iter()
                    .position(|c| c.kind != CandidateKind::JoinPropagated)
                    .map_or(list.len(), |offset| first_range + 1 + offset)
            }),
        CandidateKind::JoinPropagated => list
            .iter()
            .position(|c| c.kind == CandidateKind::OrderingOnly),
        CandidateKind::OrderingOnly => None,
    };

    list.insert(position.unwrap_or(list.len()), candidate.clone());
}
