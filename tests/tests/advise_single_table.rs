use pretty_assertions::assert_eq;
use tests::prelude::*;

fn orders() -> (Query, TableId) {
    let mut query = Query::new();
    let orders = query.add_table(TableRef::new("orders"));
    (query, orders)
}

#[tokio::test]
async fn equalities_ordered_by_selectivity() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "open"));
    query.add_filter(Expr::eq(Expr::field(orders, "customer_id"), 5));

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000)
            .matches("customer_id = 5", 100)
            .matches("status = 'open'", 1_000),
    );
    let log = provider.log();

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(
        advice.to_sql(),
        ["CREATE INDEX idx_customer_id_status ON orders(customer_id, status)"]
    );

    let table = advice.table(orders).unwrap();
    assert!(table.is_driver);
    assert_eq!(table.candidates[0].selectivity, 500.0);
    assert_eq!(table.candidates[1].selectivity, 50.0);
    assert_eq!(
        table.candidates[0].predicate.as_deref(),
        Some("customer_id = 5")
    );

    // The row count is asked for once, unfiltered, to size the sample
    assert_eq!(log.estimates(), [("orders".to_string(), None)]);
    assert_eq!(
        log.sampled_predicates(),
        ["status = 'open'", "customer_id = 5"]
    );
}

#[tokio::test]
async fn single_table_needs_no_driver_estimate() {
    let (query, orders) = orders();

    let provider = MockProvider::new().table("orders", MockTable::new(100_000));
    let log = provider.log();

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(advice.driver, Some(orders));
    assert_eq!(advice.tables[0].outcome, Outcome::NoCandidates);
    assert!(log.is_empty(), "unexpected calls: {:#?}", log.calls());
}

#[tokio::test]
async fn equality_precedes_range() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::gt(Expr::field(orders, "total"), 100));
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "open"));

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000)
            .matches("total > 100", 10)
            .matches("status = 'open'", 1_000),
    );

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(
        advice.to_sql(),
        ["CREATE INDEX idx_status_total ON orders(status, total)"]
    );
    assert_eq!(
        advice.tables[0].candidates[1].kind,
        CandidateKind::Range
    );
}

#[tokio::test]
async fn leading_wildcard_like_contributes_nothing() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::like(Expr::field(orders, "name"), "%foo%"));

    let provider = MockProvider::new().table("orders", MockTable::new(100_000));
    let log = provider.log();

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(advice.tables[0].outcome, Outcome::NoCandidates);
    assert!(advice.to_sql().is_empty());
    assert!(log.sampled_predicates().is_empty());
}

#[tokio::test]
async fn unselective_predicates_are_dropped() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "open"));

    let table = MockTable::new(100_000).matches("status = 'open'", 40_000);

    let advice = Advisor::new(MockProvider::new().table("orders", table.clone()))
        .advise(&query)
        .await
        .unwrap();
    assert_eq!(advice.tables[0].outcome, Outcome::NoCandidates);

    // Selectivity 1.25 passes a lower threshold
    let advisor = Advisor::with_config(
        MockProvider::new().table("orders", table),
        Config::new().min_selectivity(1.0),
    )
    .unwrap();
    let advice = advisor.advise(&query).await.unwrap();
    assert_eq!(advice.to_sql(), ["CREATE INDEX idx_status ON orders(status)"]);
}

#[tokio::test]
async fn primary_key_leading_excludes_the_table() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::eq(Expr::field(orders, "id"), 7));
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "open"));

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000)
            .index(Index::primary_key(["id"]))
            .matches("id = 7", 1)
            .matches("status = 'open'", 1_000),
    );

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(advice.tables[0].candidate_fields(), ["id", "status"]);
    assert_eq!(advice.tables[0].outcome, Outcome::PrimaryKey);
    assert!(advice.to_sql().is_empty());
}

#[tokio::test]
async fn primary_key_column_is_removed_when_not_leading() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::gt(Expr::field(orders, "id"), 10));
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "open"));

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000)
            .index(Index::primary_key(["id"]))
            .matches("id > 10", 25_000)
            .matches("status = 'open'", 1_000),
    );

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(advice.tables[0].candidate_fields(), ["status", "id"]);
    assert_eq!(advice.to_sql(), ["CREATE INDEX idx_status ON orders(status)"]);
}

#[tokio::test]
async fn primary_key_match_ignores_column_case() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::eq(Expr::field(orders, "ID"), 5));
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "x"));

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000)
            .index(Index::primary_key(["id", "tenant_id"]))
            .matches("ID = 5", 1)
            .matches("status = 'x'", 1_000),
    );

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(advice.tables[0].candidate_fields(), ["ID", "status"]);
    assert_eq!(advice.tables[0].outcome, Outcome::PrimaryKey);
    assert!(advice.to_sql().is_empty());
}

#[tokio::test]
async fn reserved_word_columns_are_quoted() {
    let mut query = Query::new();
    let events = query.add_table(TableRef::new("events"));
    query.add_filter(Expr::eq(Expr::field(events, "order"), 5));

    let provider = MockProvider::new().table(
        "events",
        MockTable::new(100_000).matches("`order` = 5", 10),
    );
    let log = provider.log();

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(log.sampled_predicates(), ["`order` = 5"]);
    assert_eq!(
        advice.to_sql(),
        ["CREATE INDEX idx_order ON events(`order`)"]
    );
}

#[tokio::test]
async fn schema_qualified_table() {
    let mut query = Query::new();
    let orders = query.add_table(TableRef::new("orders").schema("shop").alias("o"));
    query.add_filter(Expr::eq(Expr::field(orders, "customer_id"), 5));

    let provider = MockProvider::new().table(
        "shop.orders",
        MockTable::new(100_000).matches("customer_id = 5", 100),
    );

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(advice.tables[0].name, TableName::qualified("shop", "orders"));
    assert_eq!(
        advice.to_sql(),
        ["CREATE INDEX idx_customer_id ON shop.orders(customer_id)"]
    );
}

#[tokio::test]
async fn unqualified_column_of_the_only_table() {
    let (mut query, _) = orders();
    query.add_filter(Expr::eq(Expr::unqualified("customer_id"), 5));

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000).matches("customer_id = 5", 100),
    );
    let log = provider.log();

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(
        advice.to_sql(),
        ["CREATE INDEX idx_customer_id ON orders(customer_id)"]
    );
    assert!(!log.has_list_columns());
}

#[tokio::test]
async fn order_by_trails_the_where_columns() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "open"));
    query.order_by = vec![OrderByExpr::desc(ExprField::new(orders, "created_at"))];

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000).matches("status = 'open'", 1_000),
    );

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(
        advice.to_sql(),
        ["CREATE INDEX idx_status_created_at ON orders(status, created_at)"]
    );
    assert_eq!(
        advice.tables[0].candidates[1].kind,
        CandidateKind::OrderingOnly
    );
}

#[tokio::test]
async fn order_by_with_mixed_directions_is_ignored() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "open"));
    query.order_by = vec![
        OrderByExpr::asc(ExprField::new(orders, "created_at")),
        OrderByExpr::desc(ExprField::new(orders, "total")),
    ];

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000).matches("status = 'open'", 1_000),
    );

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(advice.to_sql(), ["CREATE INDEX idx_status ON orders(status)"]);
}

#[tokio::test]
async fn group_by_primary_key_adds_nothing() {
    let (mut query, orders) = orders();
    query.group_by = vec![ExprField::new(orders, "id")];

    let provider = MockProvider::new().table(
        "orders",
        MockTable::new(100_000).index(Index::primary_key(["id"])),
    );

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert!(advice.tables[0].candidates.is_empty());
    assert_eq!(advice.tables[0].outcome, Outcome::NoCandidates);
}

#[tokio::test]
async fn trailing_primary_key_is_dropped_from_order_by() {
    let (mut query, orders) = orders();
    query.add_filter(Expr::eq(Expr::field(orders, "status"), "open"));
    query.order_by = vec![
        OrderByExpr::asc(ExprField::new(orders, "created_at")),
        OrderByExpr::asc(ExprField::new(orders, "id")),
    ];

    let table = MockTable::new(100_000)
        .index(Index::primary_key(["id"]))
        .matches("status = 'open'", 1_000);

    let advice = Advisor::new(MockProvider::new().table("orders", table.clone()))
        .advise(&query)
        .await
        .unwrap();
    assert_eq!(
        advice.to_sql(),
        ["CREATE INDEX idx_status_created_at ON orders(status, created_at)"]
    );

    // Anywhere else, the primary key discards the clause
    query.order_by.push(OrderByExpr::asc(ExprField::new(orders, "total")));

    let advice = Advisor::new(MockProvider::new().table("orders", table))
        .advise(&query)
        .await
        .unwrap();
    assert_eq!(advice.to_sql(), ["CREATE INDEX idx_status ON orders(status)"]);
}

#[tokio::test]
async fn group_by_wins_over_order_by() {
    let (mut query, orders) = orders();
    query.group_by = vec![ExprField::new(orders, "customer_id")];
    query.order_by = vec![OrderByExpr::asc(ExprField::new(orders, "created_at"))];

    let provider = MockProvider::new().table("orders", MockTable::new(100_000));

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(
        advice.to_sql(),
        ["CREATE INDEX idx_customer_id ON orders(customer_id)"]
    );
}

#[tokio::test]
async fn out_of_range_table_is_an_invalid_shape() {
    let (mut query, _) = orders();
    query.add_filter(Expr::eq(Expr::field(TableId(5), "status"), "open"));

    let provider = MockProvider::new().table("orders", MockTable::new(100_000));
    let log = provider.log();

    let err = Advisor::new(provider).advise(&query).await.unwrap_err();

    assert!(err.is_invalid_shape());
    assert!(log.is_empty());
}
