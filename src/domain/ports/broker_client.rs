/// Brokerage port: the one capability the engine needs from a broker is to
/// place a single order and report what happened to it.
///
/// Implementations normalize their wire status into [`OrderStatus`]; the
/// execution-attempt layer maps that (plus transport errors) onto the
/// per-subscriber record. Liquidity-style nondeterminism belongs behind this
/// port (see the paper broker), never inside the orchestrator.
use crate::domain::error::DomainError;
use crate::domain::values::order_side::OrderSide;
use crate::domain::values::order_type::OrderType;
use crate::domain::values::product_type::ProductType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One order as handed to the broker, already sized for the subscriber.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub side: OrderSide,
    pub exchange_segment: String,
    pub product_type: ProductType,
    pub order_type: OrderType,
    pub security_id: String,
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
}

/// Normalized broker acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: String,
    pub status: OrderStatus,
    /// Broker-reported reason, populated on rejection.
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Executed,
    Rejected,
}

#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Place the order exactly once. `Err` means the call itself failed
    /// (transport, malformed response); a broker-side rejection is an `Ok`
    /// result with [`OrderStatus::Rejected`].
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult, DomainError>;

    /// Broker name for logging
    fn name(&self) -> &str;
}
