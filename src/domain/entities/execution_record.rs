use crate::domain::values::order_side::OrderSide;
use crate::domain::values::order_type::OrderType;
use crate::domain::values::outcome::ExecutionOutcome;
use crate::domain::values::product_type::ProductType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable per-subscriber outcome of one batch. Written once to the ledger
/// and never updated: this is history, not state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub id: String,
    /// Shared across every record of the same fan-out.
    pub batch_id: String,
    pub subscriber_id: String,
    pub subscriber_email: String,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub product_type: ProductType,
    pub requested_quantity: i64,
    /// Zero whenever the outcome is FAILED or the subscriber was ineligible.
    pub executed_quantity: i64,
    /// The reference price sizing ran against.
    pub reference_price: f64,
    pub outcome: ExecutionOutcome,
    /// Present iff the outcome is FAILED.
    pub failure_reason: Option<String>,
    /// Raw broker acknowledgement, present iff an attempt was made.
    pub broker_response: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl ExecutionRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        batch_id: String,
        subscriber_id: String,
        subscriber_email: String,
        symbol: String,
        side: OrderSide,
        order_type: OrderType,
        product_type: ProductType,
        requested_quantity: i64,
        executed_quantity: i64,
        reference_price: f64,
        outcome: ExecutionOutcome,
        failure_reason: Option<String>,
        broker_response: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            batch_id,
            subscriber_id,
            subscriber_email,
            symbol,
            side,
            order_type,
            product_type,
            requested_quantity,
            executed_quantity,
            reference_price,
            outcome,
            failure_reason,
            broker_response,
            created_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ExecutionOutcome::Success
    }
}
