mod candidate;
mod cx;
mod emit;
mod index_match;
mod join_order;
mod order;
mod predicate;
mod selectivity;

use cx::Cx;

use crate::{Advice, Config, Outcome, TableAdvice};
use keyhint_core::{
    shape::{Query, TableId},
    stats::StatsProvider,
    Result,
};
use tracing::{debug, info};

/// Runs the full analysis of one statement.
pub(crate) async fn analyze(provider: &dyn StatsProvider, config: &Config, query: &Query) -> Result<Advice> {
    query.verify()?;

    let mut cx = Cx::new(query, provider, config);

    let mut nest = join_order::walk(query);
    let all_tables: Vec<_> = query.table_ids().collect();
    let classified = predicate::classify(query.filter.as_ref(), &all_tables);
    nest.conditions.extend(classified.joins);

    for predicate in classified.predicates {
        match cx.attribute(predicate.field, &all_tables).await? {
            Some(table) => cx.state_mut(table).predicates.push(predicate),
            None => debug!(field = %predicate.field.name, "predicate column has no single owner; ignoring"),
        }
    }

    for condition in &nest.conditions {
        let lhs = cx.attribute(&condition.lhs.field, &condition.lhs.scope).await?;
        let rhs = cx.attribute(&condition.rhs.field, &condition.rhs.scope).await?;

        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) if lhs != rhs => {
                cx.add_join_edge(lhs, &condition.lhs.field.name, rhs, &condition.rhs.field.name);
            }
            _ => debug!(
                lhs = %condition.lhs.field.name,
                rhs = %condition.rhs.field.name,
                "join condition does not link two tables; ignoring"
            ),
        }
    }

    let driver = join_order::choose_driver(&cx, &nest).await?;
    cx.set_driver(driver);

    for table in query.base_tables() {
        candidate::where_candidates(&mut cx, table).await?;
    }

    if let Some(driver) = driver {
        candidate::propagate_joins(&mut cx, driver);
        candidate::ordering_candidates(&mut cx).await?;
    }

    let mut tables = vec![];
    for table in query.base_tables() {
        tables.push(recommend(&mut cx, table).await?);
    }

    Ok(Advice { driver, tables })
}

async fn recommend(cx: &mut Cx<'_>, table: TableId) -> Result<TableAdvice> {
    let config = cx.config;
    let name = cx.table_name(table);
    let state = cx.state(table);
    let is_driver = state.is_driver;

    let candidates = order::order_candidates(
        &state.where_candidates,
        &state.join_candidates,
        &state.ordering_candidates,
        config.icp_compatible,
    );

    let mut pk_leading = None;
    for candidate in &candidates {
        if cx.is_primary_key_leading_column(table, &candidate.field).await? {
            pk_leading = Some(candidate.field.clone());
            break;
        }
    }

    let outcome = match order::exclude_primary_key(candidates.clone(), pk_leading.as_deref()) {
        None => Outcome::PrimaryKey,
        Some(columns) if columns.is_empty() => Outcome::NoCandidates,
        Some(columns) => match index_match::covering_index(cx.indexes(table).await?, &columns) {
            Some(index) => Outcome::Covered {
                index: index.name.clone(),
            },
            None => Outcome::Create(emit::create_index(
                &config.index_name_prefix,
                name.clone(),
                &columns,
            )),
        },
    };

    match &outcome {
        Outcome::Create(create_index) => {
            info!(table = %name, index = %create_index.name, columns = ?create_index.columns, "suggesting index");
        }
        Outcome::Covered { index } => debug!(table = %name, index = %index, "existing index covers the candidates"),
        Outcome::PrimaryKey => debug!(table = %name, "primary key serves the candidates"),
        Outcome::NoCandidates => debug!(table = %name, "no index candidates"),
    }

    Ok(TableAdvice {
        table,
        name,
        is_driver,
        candidates,
        outcome,
    })
}
