use super::{cx::Cx, predicate::Predicate};

use keyhint_core::{schema::Index, shape::TableId, Result};
use keyhint_sql::Serializer;
use tracing::trace;

/// A sampled selectivity estimate.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sampled {
    pub(crate) selectivity: f64,
    /// The predicate as it was sent to the database
    pub(crate) predicate: String,
}

/// Estimates how selective `predicate` is by counting its matches in a
/// bounded sample of the table.
///
/// The sample is half the table, capped at `Config::sample_cap` rows, read in
/// the order of the index best suited to filtering.
pub(crate) async fn sample(cx: &mut Cx<'_>, table: TableId, predicate: &Predicate<'_>) -> Result<Sampled> {
    let text = Serializer::mysql().predicate(predicate.expr);
    let sample_size = sample_size(cx.row_count(table).await?, cx.config.sample_cap);

    if sample_size == 0 {
        trace!(predicate = %text, "table is empty; nothing to sample");
        return Ok(Sampled {
            selectivity: 0.0,
            predicate: text,
        });
    }

    let index = Index::best_for_filtering(cx.indexes(table).await?).cloned();
    let name = cx.table_name(table);

    let matches = cx
        .provider
        .sample_selectivity(&name, index.as_ref(), sample_size, &text)
        .await?;

    let selectivity = selectivity(sample_size, matches);

    trace!(
        table = %name,
        predicate = %text,
        sample_size,
        matches,
        selectivity,
        "sampled predicate"
    );

    Ok(Sampled {
        selectivity,
        predicate: text,
    })
}

pub(crate) fn sample_size(rows: u64, cap: u64) -> u64 {
    (rows / 2).min(cap)
}

/// Sample rows per match. A predicate that matches nothing in the sample is
/// credited with the whole sample.
pub(crate) fn selectivity(sample_size: u64, matches: u64) -> f64 {
    if matches == 0 {
        sample_size as f64
    } else {
        sample_size as f64 / matches as f64
    }
}
