//! Single-shot execution attempt against the brokerage port.
//!
//! Exactly one `place_order` call per invocation; every way that call can
//! end (fill, rejection, transport error, timeout) collapses into an
//! [`AttemptOutcome`] the orchestrator can record. Nothing here aborts the
//! batch. Retry policy, if ever wanted, belongs to the caller.

use crate::domain::entities::stock::StockReference;
use crate::domain::ports::broker_client::{BrokerClient, OrderRequest, OrderStatus};
use crate::domain::values::intent::TradeIntent;
use crate::domain::values::order_type::OrderType;
use crate::domain::values::outcome::ExecutionOutcome;
use std::time::Duration;
use tracing::debug;

/// Normalized result of one brokerage attempt.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub outcome: ExecutionOutcome,
    pub executed_quantity: i64,
    pub failure_reason: Option<String>,
    pub broker_response: Option<serde_json::Value>,
}

/// Place one sized order and normalize whatever comes back.
pub async fn attempt_order(
    broker: &dyn BrokerClient,
    intent: &TradeIntent,
    stock: &StockReference,
    sized_quantity: i64,
    timeout: Duration,
) -> AttemptOutcome {
    let price = match intent.order_type {
        OrderType::Limit => intent.limit_price.unwrap_or(stock.last_price),
        OrderType::Market => stock.last_price,
    };
    let request = OrderRequest {
        side: intent.side,
        exchange_segment: stock.exchange.clone(),
        product_type: intent.product_type,
        order_type: intent.order_type,
        security_id: stock.security_id.clone(),
        symbol: stock.symbol.clone(),
        quantity: sized_quantity,
        price,
    };

    match tokio::time::timeout(timeout, broker.place_order(&request)).await {
        Ok(Ok(result)) => {
            debug!(
                broker = broker.name(),
                order_id = %result.order_id,
                status = ?result.status,
                "broker acknowledged order"
            );
            let response = serde_json::to_value(&result).ok();
            match result.status {
                OrderStatus::Executed => AttemptOutcome {
                    outcome: ExecutionOutcome::Success,
                    executed_quantity: sized_quantity,
                    failure_reason: None,
                    broker_response: response,
                },
                OrderStatus::Rejected => AttemptOutcome {
                    outcome: ExecutionOutcome::Failed,
                    executed_quantity: 0,
                    failure_reason: Some(
                        result
                            .message
                            .unwrap_or_else(|| "Order rejected by broker".to_string()),
                    ),
                    broker_response: response,
                },
            }
        }
        Ok(Err(e)) => AttemptOutcome {
            outcome: ExecutionOutcome::Failed,
            executed_quantity: 0,
            failure_reason: Some(format!("System error: {e}")),
            broker_response: None,
        },
        Err(_) => AttemptOutcome {
            outcome: ExecutionOutcome::Failed,
            executed_quantity: 0,
            failure_reason: Some(format!(
                "System error: broker call timed out after {}s",
                timeout.as_secs()
            )),
            broker_response: None,
        },
    }
}
