mod common;

use common::{add_active_subscriber, give_holding, setup, setup_with_broker, ScriptedBroker, ScriptedCall};
use std::sync::Arc;
use stocksync::domain::error::DomainError;
use stocksync::domain::values::intent::TradeIntent;
use stocksync::domain::values::order_side::OrderSide;
use stocksync::domain::values::outcome::ExecutionOutcome;

#[tokio::test]
async fn buy_sizes_each_subscriber_independently() {
    let sync = setup();
    let rich = add_active_subscriber(&sync, "rich@example.com", 100_000.0);
    let poor = add_active_subscriber(&sync, "poor@example.com", 1_000.0);
    let mid = add_active_subscriber(&sync, "mid@example.com", 50_000.0);

    let summary = sync
        .execute_batch(TradeIntent::market("RELIANCE", OrderSide::Buy, 10))
        .await
        .unwrap();

    assert_eq!(summary.total_subscribers, 3);
    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.failure_count, 1);

    let by_id = |id: &str| {
        summary
            .records
            .iter()
            .find(|r| r.subscriber_id == id)
            .unwrap()
    };

    // 25% of 100_000 affords floor(25_000 / 2950.50) = 8 shares
    let rich_record = by_id(&rich);
    assert_eq!(rich_record.outcome, ExecutionOutcome::Success);
    assert_eq!(rich_record.executed_quantity, 8);
    assert!(rich_record.broker_response.is_some());

    // 25% of 1_000 affords nothing
    let poor_record = by_id(&poor);
    assert_eq!(poor_record.outcome, ExecutionOutcome::Failed);
    assert_eq!(poor_record.executed_quantity, 0);
    assert!(poor_record
        .failure_reason
        .as_deref()
        .unwrap()
        .starts_with("Insufficient funds"));
    // Ineligible subscribers never reach the broker
    assert!(poor_record.broker_response.is_none());

    // 25% of 50_000 affords floor(12_500 / 2950.50) = 4 shares
    let mid_record = by_id(&mid);
    assert_eq!(mid_record.outcome, ExecutionOutcome::Success);
    assert_eq!(mid_record.executed_quantity, 4);
}

#[tokio::test]
async fn buy_success_never_exceeds_capital_slice() {
    let sync = setup();
    for (i, capital) in [100_000.0, 37_500.0, 12_345.0, 1_000_000.0].iter().enumerate() {
        add_active_subscriber(&sync, &format!("sub{i}@example.com"), *capital);
    }

    let summary = sync
        .execute_batch(TradeIntent::market("RELIANCE", OrderSide::Buy, 100))
        .await
        .unwrap();

    for record in summary
        .records
        .iter()
        .filter(|r| r.outcome == ExecutionOutcome::Success)
    {
        let subscriber = sync.subscriber_get(&record.subscriber_id).unwrap();
        let deployed = record.executed_quantity as f64 * record.reference_price;
        assert!(
            deployed <= subscriber.max_capital * 0.25 + 1e-9,
            "record for {} deployed {deployed} over its slice",
            subscriber.email
        );
        assert!(record.executed_quantity <= record.requested_quantity);
    }
}

#[tokio::test]
async fn sell_clamps_to_held_quantity() {
    let sync = setup();
    let full = add_active_subscriber(&sync, "full@example.com", 0.0);
    give_holding(&sync, &full, "TCS", 25);
    let short = add_active_subscriber(&sync, "short@example.com", 0.0);
    give_holding(&sync, &short, "TCS", 12);

    let summary = sync
        .execute_batch(TradeIntent::market("TCS", OrderSide::Sell, 20))
        .await
        .unwrap();

    assert_eq!(summary.success_count, 2);

    let full_record = summary.records.iter().find(|r| r.subscriber_id == full).unwrap();
    assert_eq!(full_record.executed_quantity, 20);

    // Holding fewer than requested clamps silently, outcome still SUCCESS
    let short_record = summary.records.iter().find(|r| r.subscriber_id == short).unwrap();
    assert_eq!(short_record.outcome, ExecutionOutcome::Success);
    assert_eq!(short_record.executed_quantity, 12);
    assert_eq!(short_record.requested_quantity, 20);
}

#[tokio::test]
async fn sell_without_holding_fails_without_broker_call() {
    let broker = Arc::new(ScriptedBroker::always_fill());
    let sync = setup_with_broker(broker.clone());
    add_active_subscriber(&sync, "empty@example.com", 100_000.0);

    let summary = sync
        .execute_batch(TradeIntent::market("TCS", OrderSide::Sell, 20))
        .await
        .unwrap();

    assert_eq!(summary.failure_count, 1);
    let record = &summary.records[0];
    assert_eq!(record.outcome, ExecutionOutcome::Failed);
    assert_eq!(record.executed_quantity, 0);
    assert_eq!(
        record.failure_reason.as_deref(),
        Some("Stock not available in portfolio")
    );
    assert!(broker.requests().is_empty());
}

#[tokio::test]
async fn broker_fault_is_isolated_to_one_subscriber() {
    let broker = Arc::new(ScriptedBroker::new(vec![
        ScriptedCall::Fill,
        ScriptedCall::Fault("connection reset by broker"),
        ScriptedCall::Fill,
    ]));
    let sync = setup_with_broker(broker);
    let first = add_active_subscriber(&sync, "first@example.com", 100_000.0);
    let second = add_active_subscriber(&sync, "second@example.com", 100_000.0);
    let third = add_active_subscriber(&sync, "third@example.com", 100_000.0);

    let summary = sync
        .execute_batch(TradeIntent::market("RELIANCE", OrderSide::Buy, 5))
        .await
        .unwrap();

    assert_eq!(summary.success_count + summary.failure_count, 3);
    assert_eq!(summary.success_count, 2);

    let by_id = |id: &str| {
        summary
            .records
            .iter()
            .find(|r| r.subscriber_id == id)
            .unwrap()
    };
    assert_eq!(by_id(&first).outcome, ExecutionOutcome::Success);
    assert_eq!(by_id(&third).outcome, ExecutionOutcome::Success);

    let faulted = by_id(&second);
    assert_eq!(faulted.outcome, ExecutionOutcome::Failed);
    assert_eq!(faulted.executed_quantity, 0);
    assert!(faulted
        .failure_reason
        .as_deref()
        .unwrap()
        .starts_with("System error:"));
}

#[tokio::test]
async fn broker_rejection_records_broker_reason() {
    let broker = Arc::new(ScriptedBroker::new(vec![ScriptedCall::Reject(
        "Market execution failed - insufficient liquidity",
    )]));
    let sync = setup_with_broker(broker);
    add_active_subscriber(&sync, "one@example.com", 100_000.0);

    let summary = sync
        .execute_batch(TradeIntent::market("RELIANCE", OrderSide::Buy, 5))
        .await
        .unwrap();

    let record = &summary.records[0];
    assert_eq!(record.outcome, ExecutionOutcome::Failed);
    assert_eq!(record.executed_quantity, 0);
    assert_eq!(
        record.failure_reason.as_deref(),
        Some("Market execution failed - insufficient liquidity")
    );
    // An attempt was made, so the broker acknowledgement is preserved
    assert!(record.broker_response.is_some());
}

#[tokio::test]
async fn every_subscriber_appears_exactly_once_in_the_ledger() {
    let sync = setup();
    let mut ids = Vec::new();
    for (i, capital) in [100_000.0, 500.0, 80_000.0, 100.0, 60_000.0].iter().enumerate() {
        ids.push(add_active_subscriber(
            &sync,
            &format!("sub{i}@example.com"),
            *capital,
        ));
    }

    let summary = sync
        .execute_batch(TradeIntent::market("RELIANCE", OrderSide::Buy, 10))
        .await
        .unwrap();

    let ledger_records = sync.batch_records(&summary.batch_id).unwrap();
    assert_eq!(ledger_records.len(), 5);
    assert_eq!(summary.total_subscribers, 5);
    assert_eq!(
        summary.success_count + summary.failure_count,
        summary.total_subscribers
    );

    let mut seen: Vec<&str> = ledger_records.iter().map(|r| r.subscriber_id.as_str()).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 5);

    // Ledger order matches processing order, which matches input order
    let summary_ids: Vec<_> = summary.records.iter().map(|r| &r.subscriber_id).collect();
    let ledger_ids: Vec<_> = ledger_records.iter().map(|r| &r.subscriber_id).collect();
    assert_eq!(summary_ids, ledger_ids);
    assert_eq!(summary_ids, ids.iter().collect::<Vec<_>>());
}

#[tokio::test]
async fn limit_price_is_forwarded_to_the_broker() {
    let broker = Arc::new(ScriptedBroker::always_fill());
    let sync = setup_with_broker(broker.clone());
    add_active_subscriber(&sync, "one@example.com", 1_000_000.0);

    sync.execute_batch(TradeIntent::limit("RELIANCE", OrderSide::Buy, 5, 2900.0))
        .await
        .unwrap();
    sync.execute_batch(TradeIntent::market("RELIANCE", OrderSide::Buy, 5))
        .await
        .unwrap();

    let requests = broker.requests();
    assert_eq!(requests.len(), 2);
    assert!((requests[0].price - 2900.0).abs() < f64::EPSILON);
    assert!((requests[1].price - 2950.50).abs() < f64::EPSILON);
    assert_eq!(requests[0].security_id, "2885");
    assert_eq!(requests[0].exchange_segment, "NSE");
}

#[tokio::test]
async fn empty_subscriber_list_rejects_before_any_record() {
    let sync = setup();

    let err = sync
        .execute_batch(TradeIntent::market("RELIANCE", OrderSide::Buy, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert!(sync.execution_history(10).unwrap().is_empty());
}

#[tokio::test]
async fn unknown_symbol_rejects_before_any_record() {
    let sync = setup();
    add_active_subscriber(&sync, "one@example.com", 100_000.0);

    let err = sync
        .execute_batch(TradeIntent::market("AAPL", OrderSide::Buy, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
    assert!(sync.execution_history(10).unwrap().is_empty());
}

#[tokio::test]
async fn malformed_intents_reject_before_any_record() {
    let sync = setup();
    add_active_subscriber(&sync, "one@example.com", 100_000.0);

    let zero_quantity = TradeIntent::market("RELIANCE", OrderSide::Buy, 0);
    assert!(sync.execute_batch(zero_quantity).await.is_err());

    let mut limit_without_price = TradeIntent::limit("RELIANCE", OrderSide::Buy, 5, 2900.0);
    limit_without_price.limit_price = None;
    assert!(sync.execute_batch(limit_without_price).await.is_err());

    let mut market_with_price = TradeIntent::market("RELIANCE", OrderSide::Buy, 5);
    market_with_price.limit_price = Some(2900.0);
    assert!(sync.execute_batch(market_with_price).await.is_err());

    assert!(sync.execution_history(10).unwrap().is_empty());
}

#[tokio::test]
async fn inactive_subscribers_are_not_part_of_the_snapshot() {
    let sync = setup();
    add_active_subscriber(&sync, "active@example.com", 100_000.0);
    // Added but never activated
    sync.subscriber_add("dormant@example.com".into(), "Dormant".into(), 100_000.0)
        .unwrap();

    let summary = sync
        .execute_batch(TradeIntent::market("RELIANCE", OrderSide::Buy, 5))
        .await
        .unwrap();

    assert_eq!(summary.total_subscribers, 1);
    assert_eq!(summary.records[0].subscriber_email, "active@example.com");
}
