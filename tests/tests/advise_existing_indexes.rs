use pretty_assertions::assert_eq;
use tests::prelude::*;

/// `WHERE a = 1 AND b = 2`, with `a` sampled at `a_matches` and `b` at
/// `b_matches` out of a 5 000 row sample.
fn query_and_stats(a_matches: u64, b_matches: u64) -> (Query, MockTable) {
    let mut query = Query::new();
    let t = query.add_table(TableRef::new("t"));
    query.add_filter(Expr::eq(Expr::field(t, "a"), 1));
    query.add_filter(Expr::eq(Expr::field(t, "b"), 2));

    let stats = MockTable::new(10_000)
        .matches("a = 1", a_matches)
        .matches("b = 2", b_matches);

    (query, stats)
}

#[tokio::test]
async fn matching_index_suppresses_the_suggestion() {
    let (query, stats) = query_and_stats(5, 50);
    let stats = stats.index(Index::new("idx_a_b", ["a", "b"]));

    let advice = Advisor::new(MockProvider::new().table("t", stats))
        .advise(&query)
        .await
        .unwrap();

    assert_eq!(advice.tables[0].candidate_fields(), ["a", "b"]);
    assert_eq!(
        advice.tables[0].outcome,
        Outcome::Covered {
            index: "idx_a_b".to_string()
        }
    );
    assert!(advice.to_sql().is_empty());
}

#[tokio::test]
async fn column_order_must_match() {
    let (query, stats) = query_and_stats(50, 5);
    let stats = stats.index(Index::new("idx_a_b", ["a", "b"]));

    let advice = Advisor::new(MockProvider::new().table("t", stats))
        .advise(&query)
        .await
        .unwrap();

    assert_eq!(advice.to_sql(), ["CREATE INDEX idx_b_a ON t(b, a)"]);
}

#[tokio::test]
async fn longer_index_with_matching_prefix_covers() {
    let (query, stats) = query_and_stats(5, 50);
    let stats = stats.index(Index::new("idx_a_b_c", ["a", "b", "c"]));

    let advice = Advisor::new(MockProvider::new().table("t", stats))
        .advise(&query)
        .await
        .unwrap();

    assert!(advice.suggestions().next().is_none());
}

#[tokio::test]
async fn applying_a_suggestion_suppresses_it_next_time() {
    let (query, stats) = query_and_stats(50, 5);

    let advice = Advisor::new(MockProvider::new().table("t", stats.clone()))
        .advise(&query)
        .await
        .unwrap();

    let suggestion = advice.suggestions().next().unwrap().clone();
    let created = Index::new(suggestion.name.to_string(), suggestion.columns.clone());

    let again = Advisor::new(MockProvider::new().table("t", stats.index(created)))
        .advise(&query)
        .await
        .unwrap();

    assert_eq!(
        again.tables[0].outcome,
        Outcome::Covered {
            index: "idx_b_a".to_string()
        }
    );
}

#[tokio::test]
async fn sample_follows_the_best_filtering_index() {
    let (query, stats) = query_and_stats(5, 50);
    let stats = stats
        .index(Index::new("idx_status", ["status"]).cardinality(3))
        .index(Index::new("idx_customer", ["customer_id"]).cardinality(500));

    let provider = MockProvider::new().table("t", stats);
    let log = provider.log();

    Advisor::new(provider).advise(&query).await.unwrap();

    let indexes: Vec<_> = log
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            ProviderCall::SampleSelectivity {
                index, sample_size, ..
            } => Some((index, sample_size)),
            _ => None,
        })
        .collect();

    assert_eq!(
        indexes,
        [
            (Some("idx_customer".to_string()), 5_000),
            (Some("idx_customer".to_string()), 5_000),
        ]
    );
}

#[tokio::test]
async fn sample_is_capped() {
    let (query, stats) = query_and_stats(5, 50);
    let stats = stats.index(Index::primary_key(["id"]));

    let provider = MockProvider::new().table("t", stats);
    let log = provider.log();

    let advisor = Advisor::with_config(provider, Config::new().sample_cap(1_000)).unwrap();
    advisor.advise(&query).await.unwrap();

    assert!(log.any(|call| matches!(
        call,
        ProviderCall::SampleSelectivity { index: Some(index), sample_size: 1_000, .. }
            if index == "PRIMARY"
    )));
}
