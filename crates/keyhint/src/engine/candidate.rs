use super::{cx::Cx, predicate::PredicateKind, selectivity};
use crate::{CandidateKind, FieldCandidate};

use indexmap::IndexSet;
use keyhint_core::{
    shape::{ExprField, TableId},
    Result,
};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Samples each of the table's `WHERE` predicates and keeps the ones that
/// are selective enough to be worth an index column.
pub(crate) async fn where_candidates(cx: &mut Cx<'_>, table: TableId) -> Result<()> {
    let predicates = cx.state(table).predicates.clone();
    let threshold = cx.config.min_selectivity;

    for predicate in &predicates {
        let sampled = selectivity::sample(cx, table, predicate).await?;

        if sampled.selectivity < threshold {
            debug!(
                field = %predicate.field.name,
                predicate = %sampled.predicate,
                selectivity = sampled.selectivity,
                threshold,
                "predicate is not selective enough"
            );
            continue;
        }

        let kind = match predicate.kind {
            PredicateKind::Equality => CandidateKind::Equality,
            PredicateKind::Range => CandidateKind::Range,
        };

        cx.state_mut(table).where_candidates.push(
            FieldCandidate::new(&predicate.field.name, kind, sampled.selectivity)
                .predicate(sampled.predicate),
        );
    }

    Ok(())
}

/// Breadth-first walk of the join graph from the driver.
///
/// Every table is reached once, by the first table that reaches it. All of
/// the reaching table's edges to it contribute their peer column.
pub(crate) fn propagate_joins(cx: &mut Cx<'_>, driver: TableId) {
    let mut reached = IndexSet::from([driver]);
    let mut queue = VecDeque::from([driver]);

    while let Some(table) = queue.pop_front() {
        let mut newly_reached = IndexSet::new();

        for edge in cx.state(table).join_edges.clone() {
            if reached.contains(&edge.peer) {
                continue;
            }

            trace!(from = %table, to = %edge.peer, field = %edge.peer_field, "propagating join column");

            let candidates = &mut cx.state_mut(edge.peer).join_candidates;
            if !candidates.iter().any(|c| c.is_same_field(&edge.peer_field)) {
                candidates.push(FieldCandidate::join(edge.peer_field));
            }

            newly_reached.insert(edge.peer);
        }

        for peer in newly_reached {
            reached.insert(peer);
            queue.push_back(peer);
        }
    }

    for table in cx.query.base_tables() {
        if !reached.contains(&table) {
            trace!(table = %cx.table_name(table), "not reachable from the driver");
        }
    }
}

/// Turns `GROUP BY`, or failing that `ORDER BY`, into trailing candidates on
/// the driving table.
pub(crate) async fn ordering_candidates(cx: &mut Cx<'_>) -> Result<()> {
    let Some((table, fields)) = ordering_clause(cx).await? else {
        return Ok(());
    };

    let mut pk_positions = vec![];
    for (i, field) in fields.iter().enumerate() {
        if cx.is_primary_key_leading_column(table, &field.name).await? {
            pk_positions.push(i);
        }
    }

    let Some(names) = without_primary_key(&fields, &pk_positions) else {
        debug!(table = %cx.table_name(table), "ordering clause is served by the primary key; ignoring");
        return Ok(());
    };

    let candidates = &mut cx.state_mut(table).ordering_candidates;
    for name in names {
        if !candidates.iter().any(|c| c.is_same_field(name)) {
            candidates.push(FieldCandidate::ordering(name));
        }
    }

    Ok(())
}

/// Picks the clause that supplies ordering candidates. `GROUP BY` is preferred
/// when it qualifies; otherwise `ORDER BY` is considered.
async fn ordering_clause<'a>(cx: &mut Cx<'a>) -> Result<Option<(TableId, Vec<&'a ExprField>)>> {
    let query = cx.query;

    if !query.group_by.is_empty() {
        let fields: Vec<_> = query.group_by.iter().collect();
        if let Some(table) = driving_owner(cx, &fields, "GROUP BY").await? {
            return Ok(Some((table, fields)));
        }
    }

    if query.order_by.is_empty() {
        return Ok(None);
    }

    let direction = query.order_by[0].direction;
    if query.order_by.iter().any(|order_by| order_by.direction != direction) {
        debug!("ORDER BY mixes directions; ignoring");
        return Ok(None);
    }

    let fields: Vec<_> = query.order_by.iter().map(|order_by| &order_by.field).collect();
    Ok(driving_owner(cx, &fields, "ORDER BY")
        .await?
        .map(|table| (table, fields)))
}

/// The driving table, when it owns every field of the clause.
async fn driving_owner(cx: &mut Cx<'_>, fields: &[&ExprField], clause: &str) -> Result<Option<TableId>> {
    let Some(table) = single_owner(cx, fields).await? else {
        debug!(clause, "clause spans several tables or cannot be attributed; ignoring");
        return Ok(None);
    };

    if cx.driver != Some(table) {
        debug!(clause, table = %cx.table_name(table), "clause is not on the driving table; ignoring");
        return Ok(None);
    }

    Ok(Some(table))
}

/// The table all `fields` belong to, if there is exactly one.
async fn single_owner(cx: &mut Cx<'_>, fields: &[&ExprField]) -> Result<Option<TableId>> {
    let scope: Vec<_> = cx.query.table_ids().collect();
    let mut owner = None;

    for field in fields {
        match cx.attribute(field, &scope).await? {
            Some(table) if owner.map_or(true, |owner| owner == table) => owner = Some(table),
            _ => return Ok(None),
        }
    }

    Ok(owner)
}

/// Applies the primary-key rule to an ordering clause.
///
/// A primary-key column that leads the clause, or sits anywhere but last,
/// discards the whole clause. A trailing one is dropped.
fn without_primary_key<'f>(fields: &[&'f ExprField], pk_positions: &[usize]) -> Option<Vec<&'f str>> {
    let names = fields.iter().map(|field| field.name.as_str());

    match pk_positions {
        [] => Some(names.collect()),
        [last] if *last + 1 == fields.len() && *last != 0 => Some(names.take(*last).collect()),
        _ => None,
    }
}
