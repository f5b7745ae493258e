use pretty_assertions::assert_eq;
use tests::prelude::*;

fn filtered(table: &str, column: &str, value: i64) -> Query {
    let mut query = Query::new();
    let t = query.add_table(TableRef::new(table));
    query.add_filter(Expr::eq(Expr::field(t, column), value));
    query
}

fn provider() -> MockProvider {
    MockProvider::new()
        .table(
            "orders",
            MockTable::new(100_000).matches("customer_id = 5", 100),
        )
        .table("broken", MockTable::new(100_000).failing())
}

#[tokio::test]
async fn provider_failure_aborts_the_statement() {
    let err = Advisor::new(provider())
        .advise(&filtered("broken", "id", 1))
        .await
        .unwrap_err();

    assert!(err.is_provider());
    assert_eq!(
        err.to_string(),
        "statistics provider failed: lost connection while reading broken"
    );
}

#[tokio::test]
async fn failures_do_not_stop_the_batch() {
    let mut invalid = filtered("orders", "customer_id", 5);
    invalid.add_filter(Expr::eq(Expr::field(TableId(9), "status"), "open"));

    let queries = [
        filtered("orders", "customer_id", 5),
        filtered("broken", "id", 1),
        invalid,
        filtered("orders", "customer_id", 5),
    ];

    let results = Advisor::new(provider()).advise_all(&queries).await;

    assert_eq!(results.len(), 4);
    assert!(results[1].as_ref().unwrap_err().is_provider());
    assert!(results[2].as_ref().unwrap_err().is_invalid_shape());

    for i in [0, 3] {
        assert_eq!(
            results[i].as_ref().unwrap().to_sql(),
            ["CREATE INDEX idx_customer_id ON orders(customer_id)"]
        );
    }
}

#[tokio::test]
async fn shape_from_json() {
    let query: Query = serde_json::from_str(
        r#"{
            "tables": [
                { "name": "orders", "alias": "o" },
                { "name": "items", "alias": "i" }
            ],
            "from": [{
                "factor": { "nested": {
                    "left": { "factor": { "table": 0 } },
                    "right": {
                        "factor": { "table": 1 },
                        "marker": "left_outer",
                        "on": { "binary_op": {
                            "lhs": { "field": { "table": 0, "name": "id" } },
                            "op": "eq",
                            "rhs": { "field": { "table": 1, "name": "order_id" } }
                        } }
                    }
                } }
            }],
            "filter": { "binary_op": {
                "lhs": { "field": { "table": 0, "name": "customer_id" } },
                "op": "eq",
                "rhs": { "value": 5 }
            } }
        }"#,
    )
    .unwrap();

    let provider = provider().table("items", MockTable::new(1_000));

    let advice = Advisor::new(provider).advise(&query).await.unwrap();

    assert_eq!(advice.driver, Some(TableId(0)));
    assert_eq!(
        advice.to_sql(),
        [
            "CREATE INDEX idx_customer_id ON orders(customer_id)",
            "CREATE INDEX idx_order_id ON items(order_id)",
        ]
    );
}

#[test]
fn invalid_config_is_rejected() {
    let err = Advisor::with_config(MockProvider::new(), Config::new().min_selectivity(-1.0))
        .unwrap_err();
    assert!(err.is_invalid_config());
}
